//! # Memory Management
//!
//! Pre-allocated pools for zero-churn chunk remeshing.
//!
//! ## Design Philosophy
//!
//! A chunk rebuilds its mesh every fixed tick. During gameplay:
//! - No heap allocations on the happy path - buffers and masks are pooled
//! - Pool underflow falls back to a fresh allocation, it is never an error
//! - The pools are the only shared mutable state; each free list is
//!   serialized behind its own mutex

mod scratch;
mod vertex_pool;

pub use scratch::{InclusionMask, ScratchPool};
pub use vertex_pool::{VertexBuffer, VertexBufferPool, TIER_CAPACITIES, TIER_COUNT};
