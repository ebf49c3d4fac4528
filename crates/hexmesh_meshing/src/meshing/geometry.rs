//! Precomputed geometry tables and cuboid vertex emission.
//!
//! Every emitted cuboid contributes a fixed, constant-size slice of 24
//! vertices / 12 triangles. Triangle indices and per-vertex normals never
//! change per build, so they are computed once for the worst-case cuboid
//! count and shared read-only across every chunk; a build only writes
//! vertex positions.

use hexmesh_core::{Vec3, VertexBuffer};

use crate::voxel::{CHUNK_VOLUME, VOXEL_SIZE_UNITS};

/// Vertices emitted per cuboid: 8 corners, each repeated once per
/// adjoining face to support hard per-face normals.
pub const VERTICES_PER_BOX: usize = 24;

/// Triangles per cuboid: 2 per face, 6 faces.
pub const TRIANGLES_PER_BOX: usize = 12;

/// Vertex-buffer indices per cuboid.
pub const INDICES_PER_BOX: usize = TRIANGLES_PER_BOX * 3;

/// Worst-case cuboids in one chunk: the hypothetical situation where
/// every other voxel is a lone 1x1x1 run without neighbours.
pub const MAX_BOXES_PER_CHUNK: usize = CHUNK_VOLUME / 2;

/// 12 triangles of one cuboid, as indices into its 24-vertex slice.
const BOX_TRIANGLE_INDICES: [u32; INDICES_PER_BOX] = [
    0, 3, 6, //
    0, 6, 9, //
    4, 18, 15, //
    4, 18, 7, //
    12, 19, 16, //
    12, 19, 21, //
    1, 22, 13, //
    1, 22, 10, //
    11, 20, 8, //
    11, 20, 23, //
    2, 17, 5, //
    2, 17, 14,
];

const BACK: Vec3 = Vec3::new(0.0, 0.0, -1.0);
const FORWARD: Vec3 = Vec3::new(0.0, 0.0, 1.0);
const LEFT: Vec3 = Vec3::new(-1.0, 0.0, 0.0);
const RIGHT: Vec3 = Vec3::new(1.0, 0.0, 0.0);
const DOWN: Vec3 = Vec3::new(0.0, -1.0, 0.0);
const UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Per-vertex normals of one cuboid, three per corner (one per adjoining
/// face), in the same 24-vertex order [`emit_box`] writes positions.
const BOX_VERTEX_NORMALS: [Vec3; VERTICES_PER_BOX] = [
    BACK, LEFT, DOWN, //
    BACK, RIGHT, DOWN, //
    BACK, RIGHT, UP, //
    BACK, LEFT, UP, //
    FORWARD, LEFT, DOWN, //
    RIGHT, FORWARD, DOWN, //
    RIGHT, FORWARD, UP, //
    FORWARD, LEFT, UP,
];

/// Number of vertex-buffer indices the host should draw for a build that
/// wrote `vertex_count` positions.
#[inline]
#[must_use]
pub const fn index_count_for(vertex_count: usize) -> usize {
    vertex_count / VERTICES_PER_BOX * INDICES_PER_BOX
}

/// Read-only triangle-index and per-vertex-normal tables, sized once for
/// the worst-case cuboid count and never resized or mutated after.
///
/// Box `k`'s triangles live at indices `[k * 36, (k + 1) * 36)` and
/// reference vertices `[k * 24, (k + 1) * 24)`; its normals sit at the
/// matching vertex offsets. The host uploads these once and draws prefix
/// ranges of them.
pub struct GeometryTables {
    triangles: Box<[u32]>,
    normals: Box<[Vec3]>,
}

impl GeometryTables {
    /// Builds the tables. Call once at process initialization.
    #[must_use]
    pub fn new() -> Self {
        let index_total = INDICES_PER_BOX * MAX_BOXES_PER_CHUNK;
        let mut triangles = vec![0u32; index_total].into_boxed_slice();
        for (i, slot) in triangles.iter_mut().enumerate() {
            *slot = BOX_TRIANGLE_INDICES[i % INDICES_PER_BOX]
                + (i / INDICES_PER_BOX * VERTICES_PER_BOX) as u32;
        }

        let normal_total = VERTICES_PER_BOX * MAX_BOXES_PER_CHUNK;
        let mut normals = vec![Vec3::ZERO; normal_total].into_boxed_slice();
        for (i, slot) in normals.iter_mut().enumerate() {
            *slot = BOX_VERTEX_NORMALS[i % VERTICES_PER_BOX];
        }

        Self { triangles, normals }
    }

    /// The full triangle-index table.
    #[inline]
    #[must_use]
    pub fn triangles(&self) -> &[u32] {
        &self.triangles
    }

    /// The full per-vertex normal table.
    #[inline]
    #[must_use]
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// The full triangle table as raw bytes, for one-time GPU upload.
    #[inline]
    #[must_use]
    pub fn triangle_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangles)
    }

    /// The full normal table as raw bytes, for one-time GPU upload.
    #[inline]
    #[must_use]
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// The triangle indices covering a build of `vertex_count` positions.
    ///
    /// # Panics
    /// Panics if `vertex_count` exceeds the worst-case table size.
    #[inline]
    #[must_use]
    pub fn triangles_for(&self, vertex_count: usize) -> &[u32] {
        &self.triangles[..index_count_for(vertex_count)]
    }

    /// The normals covering a build of `vertex_count` positions.
    ///
    /// # Panics
    /// Panics if `vertex_count` exceeds the worst-case table size.
    #[inline]
    #[must_use]
    pub fn normals_for(&self, vertex_count: usize) -> &[Vec3] {
        &self.normals[..vertex_count]
    }
}

impl Default for GeometryTables {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes one cuboid's 24 vertex positions into the buffer.
///
/// The 8 corners of the box `origin..origin+extent` (in voxel units,
/// scaled by [`VOXEL_SIZE_UNITS`]) are each written three times, in the
/// fixed order the tables assume: origin, +x, +x+y, +y, +z, +x+z,
/// +x+y+z, +y+z.
#[inline]
pub fn emit_box(buffer: &mut VertexBuffer, origin: [usize; 3], extent: [usize; 3]) {
    let s = VOXEL_SIZE_UNITS;
    let start = Vec3::new(
        origin[0] as f32 * s,
        origin[1] as f32 * s,
        origin[2] as f32 * s,
    );
    let ex = extent[0] as f32 * s;
    let ey = extent[1] as f32 * s;
    let ez = extent[2] as f32 * s;

    let corners = [
        start,                                  // 0 1 2
        start + Vec3::new(ex, 0.0, 0.0),        // 3 4 5
        start + Vec3::new(ex, ey, 0.0),         // 6 7 8
        start + Vec3::new(0.0, ey, 0.0),        // 9 10 11
        start + Vec3::new(0.0, 0.0, ez),        // 12 13 14
        start + Vec3::new(ex, 0.0, ez),         // 15 16 17
        start + Vec3::new(ex, ey, ez),          // 18 19 20
        start + Vec3::new(0.0, ey, ez),         // 21 22 23
    ];
    for corner in corners {
        buffer.write(corner);
        buffer.write(corner);
        buffer.write(corner);
    }
}
