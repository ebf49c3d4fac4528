//! # HEXMESH Core
//!
//! Zero-churn allocation layer for the HEXMESH voxel meshing engine:
//! - Tiered vertex buffer pool - a chunk remesh never allocates on the
//!   happy path, it pulls pre-sized buffers from per-tier free lists
//! - Scratch state pool - one inclusion mask per concurrent mesher,
//!   recycled across rebuilds
//! - Shared math value types in GPU-uploadable layout
//!
//! ## Architecture Rules
//!
//! 1. **No heap allocations in the remesh hot path** - buffers come from
//!    pools; pool underflow falls back to a fresh allocation, never blocks
//! 2. **Acquire always yields a well-defined state** - buffers start with
//!    the cursor at zero, masks come back fully cleared
//! 3. **Capacity exhaustion is fatal, never silent** - overflowing the
//!    largest tier is a capacity-planning bug and surfaces as an error
//!
//! ## Example
//!
//! ```rust,ignore
//! use hexmesh_core::{VertexBufferPool, Vec3};
//!
//! let pool = VertexBufferPool::new();
//! let mut buf = pool.acquire(0)?;
//! buf.write(Vec3::new(0.0, 0.0, 0.0));
//! pool.release(buf);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod math;
pub mod memory;

pub use error::{CoreResult, PoolError};
pub use math::Vec3;
pub use memory::{
    InclusionMask, ScratchPool, VertexBuffer, VertexBufferPool, TIER_CAPACITIES, TIER_COUNT,
};
