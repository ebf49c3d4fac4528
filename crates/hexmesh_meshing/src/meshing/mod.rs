//! Greedy meshing pipeline.
//!
//! [`GeometryTables`] hold the read-only triangle/normal sequences every
//! chunk shares; [`MesherResources`] bundles them with the pools; the
//! [`GreedyMesher`] turns a chunk into a [`ChunkMesh`] of cuboid runs.

mod geometry;
mod mesher;
mod resources;

pub use geometry::{
    emit_box, index_count_for, GeometryTables, INDICES_PER_BOX, MAX_BOXES_PER_CHUNK,
    TRIANGLES_PER_BOX, VERTICES_PER_BOX,
};
pub use mesher::{scan, ChunkMesh, CuboidRun, GreedyMesher};
pub use resources::MesherResources;
