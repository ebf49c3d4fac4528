//! # HEXMESH Meshing Engine
//!
//! Converts a dense 32x32x32 grid of typed voxels into a compact triangle
//! mesh: greedy run-length merging collapses runs of adjacent non-empty
//! voxels into single rectangular cuboids instead of emitting one cube per
//! voxel.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     REMESH PIPELINE                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  VoxelChunk → Greedy Scan → Cuboid Runs → Vertex Buffer      │
//! │       ↓             ↓                          ↓             │
//! │  Inclusion Mask (pooled)            Geometry Tables (shared) │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Per-build output is vertex positions only. Triangle indices and
//! per-vertex normals are read at draw time from the shared
//! [`GeometryTables`], offset by how many cuboids the build emitted.
//!
//! ## ARCHITECT'S MANDATE
//!
//! - No allocations in the remesh loop - masks and buffers come from pools
//! - One chunk build is one sequential unit of work; parallelism across
//!   chunks belongs to the caller
//! - Identical input yields bit-identical output (scan-order emission)

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod meshing;
pub mod voxel;

pub use error::{MeshError, MeshResult};
pub use meshing::{
    ChunkMesh, CuboidRun, GeometryTables, GreedyMesher, MesherResources, INDICES_PER_BOX,
    MAX_BOXES_PER_CHUNK, TRIANGLES_PER_BOX, VERTICES_PER_BOX,
};
pub use voxel::{
    Voxel, VoxelChunk, VoxelMaterial, CHUNK_AREA, CHUNK_SIZE, CHUNK_VOLUME, VOXEL_SIZE_UNITS,
};
