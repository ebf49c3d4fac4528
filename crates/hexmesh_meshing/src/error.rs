//! # Meshing Error Types
//!
//! All errors that can occur during a chunk mesh build.

use hexmesh_core::PoolError;
use thiserror::Error;

/// Errors that can occur during a chunk mesh build.
///
/// A build either runs to completion or fails fatally; there are no
/// retries and no partial meshes.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshError {
    /// The allocation layer failed (largest vertex buffer tier exhausted).
    #[error(transparent)]
    Pool(#[from] PoolError),

    /// The scratch pool's masks do not cover the chunk volume.
    ///
    /// Grid and mask must share the flat index space; a size mismatch is
    /// rejected at build entry, never silently ignored.
    #[error("inclusion mask covers {actual} cells, chunk volume is {expected}")]
    MaskSizeMismatch {
        /// The chunk volume the mask must cover.
        expected: usize,
        /// The volume the scratch pool was configured for.
        actual: usize,
    },

    /// The build emitted more cuboids than the geometry tables were sized
    /// for. The tables assume at most one cuboid per two voxels; exceeding
    /// that is a contract violation, not a runtime condition.
    #[error("emitted {emitted} cuboids, geometry table budget is {budget}")]
    BoxBudgetExceeded {
        /// Cuboids emitted when the budget check fired.
        emitted: usize,
        /// The table budget (`MAX_BOXES_PER_CHUNK`).
        budget: usize,
    },
}

/// Result type for meshing operations.
pub type MeshResult<T> = Result<T, MeshError>;
