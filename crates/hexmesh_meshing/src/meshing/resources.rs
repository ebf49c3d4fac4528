//! Shared mesher resources.
//!
//! The geometry tables and the pools used to be the kind of thing that
//! lives in process-wide statics. Here they are explicitly owned: built
//! once at application initialization, held behind a shared thread-safe
//! handle, and passed into every mesher invocation.

use std::sync::Arc;

use hexmesh_core::{ScratchPool, VertexBufferPool};

use super::geometry::GeometryTables;
use crate::voxel::CHUNK_VOLUME;

/// Everything a mesh build needs besides the chunk itself.
///
/// Construct one per process and share it; the pools inside serialize
/// their own free lists, the tables are read-only after construction.
pub struct MesherResources {
    /// Read-only triangle/normal tables, sized for the worst case.
    pub tables: GeometryTables,
    /// Tiered vertex buffer pool.
    pub vertex_buffers: VertexBufferPool,
    /// Inclusion mask pool, sized to the chunk volume.
    pub scratch: ScratchPool,
}

impl MesherResources {
    /// Builds the tables and pre-warms the pools.
    ///
    /// Note: Call this once during initialization, not in the hot path.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: GeometryTables::new(),
            vertex_buffers: VertexBufferPool::new(),
            scratch: ScratchPool::new(CHUNK_VOLUME),
        }
    }

    /// Convenience for the common case: build once, share everywhere.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

impl Default for MesherResources {
    fn default() -> Self {
        Self::new()
    }
}
