//! Voxel chunk data structures.
//!
//! Chunks are 32x32x32 voxels. The flat index layout
//! `z * 32 * 32 + y * 32 + x` is the single addressing convention shared
//! by the mesher, the inclusion mask, and the host.

use serde::{Deserialize, Serialize};

/// Chunk dimension - 32 voxels per axis.
pub const CHUNK_SIZE: usize = 32;

/// Voxels per chunk slice.
pub const CHUNK_AREA: usize = CHUNK_SIZE * CHUNK_SIZE;

/// Total voxels per chunk.
pub const CHUNK_VOLUME: usize = CHUNK_AREA * CHUNK_SIZE;

/// World-space edge length of one voxel.
pub const VOXEL_SIZE_UNITS: f32 = 0.05;

/// Voxel material kind.
///
/// `Empty` is the sentinel for "no solid content". Every other variant is
/// opaque and solid; the mesher merges on occupancy, so solids are
/// mesh-equivalent to each other.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoxelMaterial {
    /// No solid content.
    #[default]
    Empty = 0,
    /// Generic rock.
    Stone = 1,
    /// Loose ground.
    Dirt = 2,
    /// Structural plating.
    Metal = 3,
}

/// A single voxel: destructibility state plus material kind.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voxel {
    /// Remaining hit points; meaningless for `Empty`.
    pub health: u8,
    /// Material kind.
    pub material: VoxelMaterial,
}

impl Voxel {
    /// The empty voxel.
    pub const EMPTY: Self = Self {
        health: 0,
        material: VoxelMaterial::Empty,
    };

    /// Creates a voxel with explicit health.
    #[inline]
    #[must_use]
    pub const fn new(material: VoxelMaterial, health: u8) -> Self {
        Self { health, material }
    }

    /// Creates an undamaged solid voxel of the given material.
    #[inline]
    #[must_use]
    pub const fn solid(material: VoxelMaterial) -> Self {
        Self::new(material, u8::MAX)
    }

    /// Returns true if this voxel has no solid content.
    #[inline]
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.material == VoxelMaterial::Empty
    }

    /// Returns true if this voxel is solid (not empty).
    #[inline]
    #[must_use]
    pub fn is_solid(self) -> bool {
        !self.is_empty()
    }
}

/// A chunk of voxels - 32x32x32 = 32,768 voxels in a flat array.
///
/// The grid is read-only during meshing; mutation goes through [`set`],
/// which keeps the solid count and the dirty flag coherent.
///
/// [`set`]: VoxelChunk::set
pub struct VoxelChunk {
    /// Voxel data, exactly `CHUNK_VOLUME` long.
    /// Layout: `voxels[z * CHUNK_AREA + y * CHUNK_SIZE + x]`.
    voxels: Box<[Voxel]>,

    /// Dirty flag - set when the chunk needs re-meshing.
    dirty: bool,

    /// Number of solid voxels (for quick empty/full checks).
    solid_count: u32,
}

impl VoxelChunk {
    /// Creates a new empty chunk.
    ///
    /// Note: This allocates. Only call during loading, never in hot path.
    #[must_use]
    pub fn new() -> Self {
        Self {
            voxels: vec![Voxel::EMPTY; CHUNK_VOLUME].into_boxed_slice(),
            dirty: true,
            solid_count: 0,
        }
    }

    /// Calculates the flat index for a voxel position.
    ///
    /// # Panics
    /// Panics if any coordinate is out of range. An out-of-range grid
    /// access is a contract violation, checked at the access boundary.
    #[inline]
    #[must_use]
    pub fn flat_index(x: usize, y: usize, z: usize) -> usize {
        assert!(
            x < CHUNK_SIZE && y < CHUNK_SIZE && z < CHUNK_SIZE,
            "voxel position ({x}, {y}, {z}) out of range"
        );
        z * CHUNK_AREA + y * CHUNK_SIZE + x
    }

    /// Gets a voxel at the given local position.
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Voxel {
        self.voxels[Self::flat_index(x, y, z)]
    }

    /// Gets a voxel by flat index.
    ///
    /// # Panics
    /// Panics if `index >= CHUNK_VOLUME`.
    #[inline]
    #[must_use]
    pub fn get_index(&self, index: usize) -> Voxel {
        self.voxels[index]
    }

    /// Gets a voxel at the given local position, or None if out of bounds.
    #[inline]
    #[must_use]
    pub fn try_get(&self, x: usize, y: usize, z: usize) -> Option<Voxel> {
        if x < CHUNK_SIZE && y < CHUNK_SIZE && z < CHUNK_SIZE {
            Some(self.voxels[z * CHUNK_AREA + y * CHUNK_SIZE + x])
        } else {
            None
        }
    }

    /// Sets a voxel at the given local position.
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, voxel: Voxel) {
        let idx = Self::flat_index(x, y, z);
        let old = self.voxels[idx];

        if old.is_solid() && voxel.is_empty() {
            self.solid_count -= 1;
        } else if old.is_empty() && voxel.is_solid() {
            self.solid_count += 1;
        }

        self.voxels[idx] = voxel;
        self.dirty = true;
    }

    /// Fills the whole chunk with one voxel value.
    pub fn fill(&mut self, voxel: Voxel) {
        self.voxels.fill(voxel);
        self.solid_count = if voxel.is_solid() { CHUNK_VOLUME as u32 } else { 0 };
        self.dirty = true;
    }

    /// Returns the whole grid as a flat slice, read-only.
    #[inline]
    #[must_use]
    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    /// Returns true if the chunk needs re-meshing.
    #[inline]
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clears the dirty flag after a successful rebuild.
    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Returns true if the chunk is completely empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.solid_count == 0
    }

    /// Returns true if the chunk is completely solid.
    #[inline]
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.solid_count == CHUNK_VOLUME as u32
    }

    /// Returns the number of solid voxels.
    #[inline]
    #[must_use]
    pub const fn solid_count(&self) -> u32 {
        self.solid_count
    }
}

impl Default for VoxelChunk {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_index_convention() {
        assert_eq!(VoxelChunk::flat_index(0, 0, 0), 0);
        assert_eq!(VoxelChunk::flat_index(1, 0, 0), 1);
        assert_eq!(VoxelChunk::flat_index(0, 1, 0), CHUNK_SIZE);
        assert_eq!(VoxelChunk::flat_index(0, 0, 1), CHUNK_AREA);
        assert_eq!(
            VoxelChunk::flat_index(31, 31, 31),
            CHUNK_VOLUME - 1
        );
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_rejected() {
        let _ = VoxelChunk::flat_index(32, 0, 0);
    }

    #[test]
    fn test_chunk_operations() {
        let mut chunk = VoxelChunk::new();
        assert!(chunk.is_empty());
        assert!(chunk.is_dirty());

        chunk.set(0, 0, 0, Voxel::solid(VoxelMaterial::Stone));
        assert!(!chunk.is_empty());
        assert_eq!(chunk.solid_count(), 1);
        assert_eq!(chunk.get(0, 0, 0).material, VoxelMaterial::Stone);
        assert_eq!(chunk.get_index(0), chunk.get(0, 0, 0));

        chunk.clear_dirty();
        chunk.set(0, 0, 0, Voxel::EMPTY);
        assert!(chunk.is_empty());
        assert!(chunk.is_dirty());
    }

    #[test]
    fn test_fill_and_try_get() {
        let mut chunk = VoxelChunk::new();
        chunk.fill(Voxel::solid(VoxelMaterial::Metal));
        assert!(chunk.is_full());
        assert_eq!(chunk.solid_count(), CHUNK_VOLUME as u32);

        assert!(chunk.try_get(31, 31, 31).is_some());
        assert!(chunk.try_get(32, 0, 0).is_none());
    }

    #[test]
    fn test_damaged_voxel_still_solid() {
        let v = Voxel::new(VoxelMaterial::Dirt, 3);
        assert!(v.is_solid());
        assert_eq!(v.health, 3);
        assert!(Voxel::EMPTY.is_empty());
    }
}
