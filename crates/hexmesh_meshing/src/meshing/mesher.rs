//! Greedy run-length mesher.
//!
//! Walks the voxel grid in scan order, collapses maximal runs of adjacent
//! non-empty voxels into cuboids via three nested greedy expansions, and
//! emits one 24-vertex slice per cuboid into a pooled vertex buffer.
//!
//! ## Algorithm
//!
//! Per unvisited non-empty seed found by a linear z-major, y-mid, x-minor
//! scan:
//!
//! 1. **X-run**: extend along +x while each voxel is non-empty and not
//!    yet included, marking as it goes
//! 2. **Y-extension**: accept a +y row only if the entire `[x, x+dx)`
//!    range qualifies - one blocked cell vetoes the whole row
//! 3. **Z-extension**: accept a +z plane only if the entire `dx * dy`
//!    rectangle qualifies
//!
//! The merge predicate is occupancy, not material equality: adjacent
//! solids of different materials merge into one cuboid and the emitted
//! geometry carries no material tag.

use std::sync::Arc;
use std::time::Instant;

use hexmesh_core::{InclusionMask, Vec3, VertexBuffer};

use super::geometry::{self, emit_box, MAX_BOXES_PER_CHUNK, VERTICES_PER_BOX};
use super::resources::MesherResources;
use crate::error::{MeshError, MeshResult};
use crate::voxel::{Voxel, VoxelChunk, CHUNK_SIZE, CHUNK_VOLUME};

/// One maximal axis-aligned run of non-empty voxels found by greedy
/// expansion. Ephemeral: consumed immediately into vertex output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CuboidRun {
    /// Seed corner of the box, in voxel coordinates.
    pub origin: [usize; 3],
    /// Box dimensions in voxels, each at least 1.
    pub extent: [usize; 3],
}

impl CuboidRun {
    /// Number of voxels the run consumed.
    #[inline]
    #[must_use]
    pub const fn volume(&self) -> usize {
        self.extent[0] * self.extent[1] * self.extent[2]
    }
}

/// Expands a run from `(sx, sy, sz)`, marking every consumed cell.
///
/// The seed and each accepted cell flip to included exactly once, so
/// after a full scan the mask equals the union of all emitted boxes.
fn expand_run(
    voxels: &[Voxel],
    mask: &mut InclusionMask,
    sx: usize,
    sy: usize,
    sz: usize,
) -> CuboidRun {
    let free = |mask: &InclusionMask, x: usize, y: usize, z: usize| {
        let i = VoxelChunk::flat_index(x, y, z);
        voxels[i].is_solid() && !mask.is_included(i)
    };

    mask.include(VoxelChunk::flat_index(sx, sy, sz));

    let mut dx = 1;
    for ix in sx + 1..CHUNK_SIZE {
        if !free(mask, ix, sy, sz) {
            break;
        }
        mask.include(VoxelChunk::flat_index(ix, sy, sz));
        dx += 1;
    }

    let mut dy = 1;
    'rows: for iy in sy + 1..CHUNK_SIZE {
        for ix in sx..sx + dx {
            if !free(mask, ix, iy, sz) {
                break 'rows;
            }
        }
        for ix in sx..sx + dx {
            mask.include(VoxelChunk::flat_index(ix, iy, sz));
        }
        dy += 1;
    }

    let mut dz = 1;
    'planes: for iz in sz + 1..CHUNK_SIZE {
        for iy in sy..sy + dy {
            for ix in sx..sx + dx {
                if !free(mask, ix, iy, iz) {
                    break 'planes;
                }
            }
        }
        for iy in sy..sy + dy {
            for ix in sx..sx + dx {
                mask.include(VoxelChunk::flat_index(ix, iy, iz));
            }
        }
        dz += 1;
    }

    CuboidRun {
        origin: [sx, sy, sz],
        extent: [dx, dy, dz],
    }
}

/// Runs the greedy scan, calling `emit` once per found run in scan order
/// (z-major, y-mid, x-minor). Cells already consumed are skipped in O(1)
/// via the mask, and the pass always visits all `CHUNK_VOLUME` cells.
///
/// # Errors
/// Propagates the first error `emit` returns; no further runs are found
/// after that.
///
/// # Panics
/// Panics if the mask does not cover the chunk volume; callers go through
/// [`GreedyMesher::mesh`], which rejects the mismatch at entry.
pub fn scan<F>(chunk: &VoxelChunk, mask: &mut InclusionMask, mut emit: F) -> MeshResult<()>
where
    F: FnMut(CuboidRun) -> MeshResult<()>,
{
    assert_eq!(mask.len(), CHUNK_VOLUME, "mask does not cover the grid");
    let voxels = chunk.voxels();
    for z in 0..CHUNK_SIZE {
        for y in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                let i = VoxelChunk::flat_index(x, y, z);
                if voxels[i].is_empty() || mask.is_included(i) {
                    continue;
                }
                emit(expand_run(voxels, mask, x, y, z))?;
            }
        }
    }
    Ok(())
}

/// The finished output of one chunk mesh build.
///
/// Holds the (possibly tier-upgraded) pooled vertex buffer; triangle
/// indices and normals are not part of per-build output - the host reads
/// them from the shared [`GeometryTables`] using [`index_count`].
///
/// [`GeometryTables`]: super::geometry::GeometryTables
/// [`index_count`]: ChunkMesh::index_count
pub struct ChunkMesh {
    vertices: VertexBuffer,
    box_count: usize,
}

impl ChunkMesh {
    /// Number of cuboids the build emitted.
    #[inline]
    #[must_use]
    pub const fn box_count(&self) -> usize {
        self.box_count
    }

    /// Number of vertex positions written (`box_count * 24`).
    #[inline]
    #[must_use]
    pub const fn vertex_count(&self) -> usize {
        self.vertices.vertex_count()
    }

    /// Number of vertex-buffer indices the host should draw.
    #[inline]
    #[must_use]
    pub const fn index_count(&self) -> usize {
        geometry::index_count_for(self.vertex_count())
    }

    /// Vertex positions in emission order.
    #[inline]
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        self.vertices.positions()
    }

    /// Vertex positions as raw bytes for GPU upload.
    #[inline]
    #[must_use]
    pub fn position_bytes(&self) -> &[u8] {
        self.vertices.position_bytes()
    }

    /// Size class the buffer ended the build on.
    #[inline]
    #[must_use]
    pub const fn tier(&self) -> usize {
        self.vertices.tier()
    }

    /// Returns the vertex buffer to the pool for the next rebuild tick.
    pub fn recycle(self, resources: &MesherResources) {
        resources.vertex_buffers.release(self.vertices);
    }
}

/// Greedy mesher bound to a shared, thread-safe resource handle.
///
/// One chunk's build is a single sequential unit of work; clone the
/// handle and build different chunks concurrently from separate meshers.
pub struct GreedyMesher {
    resources: Arc<MesherResources>,
}

impl GreedyMesher {
    /// Creates a mesher over shared resources.
    #[must_use]
    pub fn new(resources: Arc<MesherResources>) -> Self {
        Self { resources }
    }

    /// The shared resource handle (geometry tables, pools).
    #[inline]
    #[must_use]
    pub fn resources(&self) -> &Arc<MesherResources> {
        &self.resources
    }

    /// Builds the chunk's mesh: finds every maximal run covering every
    /// non-empty voxel exactly once and emits its vertices.
    ///
    /// Output is deterministic for identical input - cuboids land in scan
    /// order. The scratch mask is pooled and returned automatically; the
    /// returned mesh owns its vertex buffer until
    /// [`recycled`](ChunkMesh::recycle).
    ///
    /// # Errors
    /// - [`MeshError::MaskSizeMismatch`] if the resource handle's scratch
    ///   pool does not cover this chunk volume (rejected at entry)
    /// - [`MeshError::BoxBudgetExceeded`] / [`MeshError::Pool`] if the
    ///   build outgrows the geometry tables or the largest buffer tier
    pub fn mesh(&self, chunk: &VoxelChunk) -> MeshResult<ChunkMesh> {
        let res = &*self.resources;
        if res.scratch.volume() != CHUNK_VOLUME {
            return Err(MeshError::MaskSizeMismatch {
                expected: CHUNK_VOLUME,
                actual: res.scratch.volume(),
            });
        }

        let started = Instant::now();
        let mut mask = res.scratch.acquire();
        let mut buffer = res.vertex_buffers.acquire(0)?;
        let mut box_count = 0usize;

        let outcome = scan(chunk, &mut mask, |run| {
            if box_count == MAX_BOXES_PER_CHUNK {
                return Err(MeshError::BoxBudgetExceeded {
                    emitted: box_count,
                    budget: MAX_BOXES_PER_CHUNK,
                });
            }
            // Grow before writing: capacities are whole boxes, so the
            // cursor can sit exactly on a tier boundary between boxes.
            res.vertex_buffers.grow_if_full(&mut buffer)?;
            emit_box(&mut buffer, run.origin, run.extent);
            box_count += 1;
            Ok(())
        });
        res.scratch.release(mask);

        match outcome {
            Ok(()) => {
                debug_assert_eq!(buffer.vertex_count(), box_count * VERTICES_PER_BOX);
                tracing::debug!(
                    boxes = box_count,
                    vertices = buffer.vertex_count(),
                    tier = buffer.tier(),
                    elapsed_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
                    "chunk mesh built"
                );
                Ok(ChunkMesh {
                    vertices: buffer,
                    box_count,
                })
            }
            Err(err) => {
                res.vertex_buffers.release(buffer);
                tracing::debug!(error = %err, "chunk mesh build aborted");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxel::VoxelMaterial;

    fn mesher() -> GreedyMesher {
        GreedyMesher::new(MesherResources::shared())
    }

    #[test]
    fn test_empty_chunk() {
        let mesher = mesher();
        let chunk = VoxelChunk::new();

        let mesh = mesher.mesh(&chunk).unwrap();
        assert_eq!(mesh.box_count(), 0);
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.index_count(), 0);
        mesh.recycle(mesher.resources());
    }

    #[test]
    fn test_single_voxel() {
        let mesher = mesher();
        let mut chunk = VoxelChunk::new();
        chunk.set(5, 5, 5, Voxel::solid(VoxelMaterial::Stone));

        let mesh = mesher.mesh(&chunk).unwrap();
        assert_eq!(mesh.box_count(), 1);
        assert_eq!(mesh.vertex_count(), VERTICES_PER_BOX);
        mesh.recycle(mesher.resources());
    }

    #[test]
    fn test_full_chunk_is_one_box() {
        let mesher = mesher();
        let mut chunk = VoxelChunk::new();
        chunk.fill(Voxel::solid(VoxelMaterial::Stone));

        let mesh = mesher.mesh(&chunk).unwrap();
        assert_eq!(mesh.box_count(), 1);
        assert_eq!(mesh.vertex_count(), VERTICES_PER_BOX);
        assert_eq!(mesh.index_count(), 36);
        mesh.recycle(mesher.resources());
    }

    #[test]
    fn test_x_run_stops_at_gap() {
        let mesher = mesher();
        let mut chunk = VoxelChunk::new();
        chunk.set(0, 0, 0, Voxel::solid(VoxelMaterial::Stone));
        chunk.set(2, 0, 0, Voxel::solid(VoxelMaterial::Stone));

        let mesh = mesher.mesh(&chunk).unwrap();
        assert_eq!(mesh.box_count(), 2);
        mesh.recycle(mesher.resources());
    }

    #[test]
    fn test_mixed_materials_merge_by_occupancy() {
        let mesher = mesher();
        let mut chunk = VoxelChunk::new();
        chunk.set(0, 0, 0, Voxel::solid(VoxelMaterial::Stone));
        chunk.set(1, 0, 0, Voxel::solid(VoxelMaterial::Metal));

        let mesh = mesher.mesh(&chunk).unwrap();
        assert_eq!(mesh.box_count(), 1);
        mesh.recycle(mesher.resources());
    }

    #[test]
    fn test_blocked_cell_vetoes_row() {
        let mesher = mesher();
        let mut chunk = VoxelChunk::new();
        // A 3-wide seed row, but the next row is missing its middle cell:
        // the y-extension must refuse the whole row, leaving the free
        // cells of that row to their own later runs.
        for x in 0..3 {
            chunk.set(x, 0, 0, Voxel::solid(VoxelMaterial::Stone));
        }
        chunk.set(0, 1, 0, Voxel::solid(VoxelMaterial::Stone));
        chunk.set(2, 1, 0, Voxel::solid(VoxelMaterial::Stone));

        let res = mesher.resources();
        let mut mask = res.scratch.acquire();
        let mut runs = Vec::new();
        scan(&chunk, &mut mask, |run| {
            runs.push(run);
            Ok(())
        })
        .unwrap();
        res.scratch.release(mask);

        assert_eq!(
            runs,
            vec![
                CuboidRun { origin: [0, 0, 0], extent: [3, 1, 1] },
                CuboidRun { origin: [0, 1, 0], extent: [1, 1, 1] },
                CuboidRun { origin: [2, 1, 0], extent: [1, 1, 1] },
            ]
        );
    }

    #[test]
    fn test_slab_merges_across_y_and_z() {
        let mesher = mesher();
        let mut chunk = VoxelChunk::new();
        for z in 0..4 {
            for y in 0..2 {
                for x in 0..8 {
                    chunk.set(x, y, z, Voxel::solid(VoxelMaterial::Dirt));
                }
            }
        }

        let res = mesher.resources();
        let mut mask = res.scratch.acquire();
        let mut runs = Vec::new();
        scan(&chunk, &mut mask, |run| {
            runs.push(run);
            Ok(())
        })
        .unwrap();
        res.scratch.release(mask);

        assert_eq!(
            runs,
            vec![CuboidRun { origin: [0, 0, 0], extent: [8, 2, 4] }]
        );
    }

    #[test]
    fn test_scan_stops_at_first_emit_error() {
        let mesher = mesher();
        let mut chunk = VoxelChunk::new();
        // Three disjoint voxels, so the scan would emit three runs if the
        // callback let it.
        chunk.set(0, 0, 0, Voxel::solid(VoxelMaterial::Stone));
        chunk.set(4, 0, 0, Voxel::solid(VoxelMaterial::Stone));
        chunk.set(8, 0, 0, Voxel::solid(VoxelMaterial::Stone));

        let res = mesher.resources();
        let mut mask = res.scratch.acquire();
        let mut emitted = 0usize;
        let outcome = scan(&chunk, &mut mask, |_| {
            emitted += 1;
            Err(MeshError::BoxBudgetExceeded {
                emitted,
                budget: 1,
            })
        });
        res.scratch.release(mask);

        assert_eq!(emitted, 1, "scan kept walking after a failed emit");
        match outcome {
            Err(err) => assert_eq!(
                err,
                MeshError::BoxBudgetExceeded {
                    emitted: 1,
                    budget: 1,
                }
            ),
            Ok(()) => panic!("expected the emit error to surface"),
        }
    }

    #[test]
    fn test_box_budget_matches_top_tier_capacity() {
        use hexmesh_core::{TIER_CAPACITIES, TIER_COUNT};

        // The budget guard and the final grow step agree: a worst-case
        // chunk lands exactly at the top tier's capacity, so the guard
        // fires before the pool ever can.
        assert_eq!(
            MAX_BOXES_PER_CHUNK * VERTICES_PER_BOX,
            TIER_CAPACITIES[TIER_COUNT - 1]
        );
    }

    #[test]
    fn test_build_cycle_returns_buffer_to_pool() {
        use super::super::geometry::GeometryTables;
        use hexmesh_core::{ScratchPool, VertexBufferPool};

        let resources = Arc::new(MesherResources {
            tables: GeometryTables::new(),
            vertex_buffers: VertexBufferPool::new(),
            scratch: ScratchPool::new(CHUNK_VOLUME),
        });
        let mesher = GreedyMesher::new(Arc::clone(&resources));
        let mut chunk = VoxelChunk::new();
        chunk.set(0, 0, 0, Voxel::solid(VoxelMaterial::Stone));

        let before = resources.vertex_buffers.pooled_count(0);
        let mesh = mesher.mesh(&chunk).unwrap();
        assert_eq!(resources.vertex_buffers.pooled_count(0), before - 1);
        mesh.recycle(mesher.resources());
        assert_eq!(resources.vertex_buffers.pooled_count(0), before);
    }

    #[test]
    fn test_mask_mismatch_rejected_at_entry() {
        use super::super::geometry::GeometryTables;
        use hexmesh_core::{ScratchPool, VertexBufferPool};

        let resources = Arc::new(MesherResources {
            tables: GeometryTables::new(),
            vertex_buffers: VertexBufferPool::new(),
            scratch: ScratchPool::new(8),
        });
        let mesher = GreedyMesher::new(resources);
        let chunk = VoxelChunk::new();

        match mesher.mesh(&chunk) {
            Err(err) => assert_eq!(
                err,
                MeshError::MaskSizeMismatch {
                    expected: CHUNK_VOLUME,
                    actual: 8,
                }
            ),
            Ok(_) => panic!("expected MaskSizeMismatch"),
        }
    }
}
