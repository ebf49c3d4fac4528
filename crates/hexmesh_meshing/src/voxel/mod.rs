//! Voxel data model.
//!
//! The chunk owns the fixed-size voxel grid and defines the flat indexing
//! convention every other component shares.

mod chunk;

pub use chunk::{
    Voxel, VoxelChunk, VoxelMaterial, CHUNK_AREA, CHUNK_SIZE, CHUNK_VOLUME, VOXEL_SIZE_UNITS,
};
