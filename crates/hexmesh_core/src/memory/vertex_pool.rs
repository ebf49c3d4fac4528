//! # Tiered Vertex Buffer Pool
//!
//! Growable append-only vertex buffers backed by per-tier free lists.
//!
//! Every mesh build starts on the smallest tier and transparently upgrades
//! when the write cursor reaches the tier capacity. The exhausted storage
//! goes back to its own tier's free list, so repeated rebuilds settle into
//! a steady state with zero heap traffic.

use parking_lot::Mutex;

use crate::error::{CoreResult, PoolError};
use crate::math::Vec3;

/// Number of buffer size classes.
pub const TIER_COUNT: usize = 7;

/// Capacity (in vertices) of each tier, strictly ascending.
///
/// Every capacity is a whole number of 24-vertex boxes, so a box emission
/// can write all 24 corners and only then run the grow check - the cursor
/// lands exactly on the boundary, never past it.
pub const TIER_CAPACITIES: [usize; TIER_COUNT] =
    [24, 648, 1_944, 5_832, 17_496, 52_488, 393_216];

/// Buffers pre-allocated per tier at pool construction.
///
/// Small on purpose: underflow falls back to a fresh allocation and the
/// pool retains everything released, so steady state is reached after the
/// first few ticks regardless of the pre-warm count.
const TIER_PREWARM: [usize; TIER_COUNT] = [64, 32, 16, 8, 4, 2, 1];

const _: () = {
    let mut i = 0;
    while i < TIER_COUNT {
        assert!(TIER_CAPACITIES[i] % 24 == 0, "tier must hold whole boxes");
        assert!(i == 0 || TIER_CAPACITIES[i - 1] < TIER_CAPACITIES[i]);
        i += 1;
    }
};

/// A growable, append-only vertex position buffer.
///
/// The write cursor is monotonic within one mesh build and never exceeds
/// the current tier's capacity. Tier upgrades preserve the written prefix
/// (copy-forward), so one build is always one unbroken vertex stream.
pub struct VertexBuffer {
    /// Size class of the backing storage.
    tier: usize,
    /// Next write position.
    cursor: usize,
    /// Backing storage, exactly `TIER_CAPACITIES[tier]` long.
    mem: Box<[Vec3]>,
}

impl VertexBuffer {
    /// Appends a vertex position at the cursor.
    ///
    /// # Panics
    /// Panics if the cursor is at capacity - callers must run
    /// [`VertexBufferPool::grow_if_full`] between box emissions.
    #[inline]
    pub fn write(&mut self, vertex: Vec3) {
        debug_assert!(self.cursor < self.mem.len(), "write past tier capacity");
        self.mem[self.cursor] = vertex;
        self.cursor += 1;
    }

    /// Returns the current size class.
    #[inline]
    #[must_use]
    pub const fn tier(&self) -> usize {
        self.tier
    }

    /// Returns the number of vertices written so far.
    #[inline]
    #[must_use]
    pub const fn vertex_count(&self) -> usize {
        self.cursor
    }

    /// Returns the capacity of the current tier.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.mem.len()
    }

    /// Returns true if the cursor has reached the tier capacity.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cursor == self.mem.len()
    }

    /// Returns the written prefix of the buffer, in write order.
    #[inline]
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.mem[..self.cursor]
    }

    /// Returns the written prefix as raw bytes for GPU upload.
    #[inline]
    #[must_use]
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.positions())
    }
}

/// Pool of vertex buffers, one free list per size class.
///
/// # Thread Safety
///
/// Each free list is guarded by its own mutex; `acquire`/`release` from
/// concurrent mesh builds serialize only on the touched tier.
pub struct VertexBufferPool {
    /// Free storage per tier. Contents of returned buffers are ignored;
    /// the cursor is reset on acquire.
    free: [Mutex<Vec<Box<[Vec3]>>>; TIER_COUNT],
}

impl VertexBufferPool {
    /// Creates the pool and pre-warms each tier's free list.
    ///
    /// Note: Call this once during initialization, not in the hot path.
    #[must_use]
    pub fn new() -> Self {
        let free = std::array::from_fn(|tier| {
            let buffers = (0..TIER_PREWARM[tier]).map(|_| Self::fresh(tier)).collect();
            Mutex::new(buffers)
        });
        Self { free }
    }

    /// Allocates backing storage of exactly the tier's capacity.
    fn fresh(tier: usize) -> Box<[Vec3]> {
        vec![Vec3::ZERO; TIER_CAPACITIES[tier]].into_boxed_slice()
    }

    /// Acquires a logically empty buffer of the requested tier.
    ///
    /// Prefers pooled storage; falls back to a fresh allocation when the
    /// free list is empty. The write cursor always starts at zero.
    ///
    /// # Errors
    /// [`PoolError::InvalidTier`] if `tier >= TIER_COUNT`.
    pub fn acquire(&self, tier: usize) -> CoreResult<VertexBuffer> {
        if tier >= TIER_COUNT {
            return Err(PoolError::InvalidTier { tier, count: TIER_COUNT });
        }
        let mem = self.free[tier]
            .lock()
            .pop()
            .unwrap_or_else(|| Self::fresh(tier));
        Ok(VertexBuffer { tier, cursor: 0, mem })
    }

    /// Returns a buffer's storage to its tier's free list.
    ///
    /// Contents are ignored; "logically empty" is re-established by the
    /// cursor reset on the next acquire.
    pub fn release(&self, buffer: VertexBuffer) {
        self.free[buffer.tier].lock().push(buffer.mem);
    }

    /// Upgrades the buffer to the next tier if the cursor has reached
    /// capacity; a no-op otherwise.
    ///
    /// Growth policy is **copy-forward**: already-written vertices are
    /// copied into the larger buffer and the exhausted storage returns to
    /// its own tier's free list. The cursor is not reset - the build
    /// continues as one unbroken stream, which the fixed 24-vertex box
    /// stride of the geometry tables requires.
    ///
    /// # Errors
    /// [`PoolError::TierExhausted`] when the largest tier fills up.
    pub fn grow_if_full(&self, buffer: &mut VertexBuffer) -> CoreResult<()> {
        if !buffer.is_full() {
            return Ok(());
        }
        let next = buffer.tier + 1;
        if next == TIER_COUNT {
            return Err(PoolError::TierExhausted {
                tier: buffer.tier,
                cursor: buffer.cursor,
            });
        }

        let mut mem = self.free[next].lock().pop().unwrap_or_else(|| Self::fresh(next));
        mem[..buffer.cursor].copy_from_slice(&buffer.mem[..buffer.cursor]);

        let exhausted = std::mem::replace(&mut buffer.mem, mem);
        self.free[buffer.tier].lock().push(exhausted);
        buffer.tier = next;
        Ok(())
    }

    /// Returns the number of pooled buffers in a tier's free list.
    ///
    /// Diagnostic only; the count is stale the moment it is read under
    /// concurrent use.
    #[must_use]
    pub fn pooled_count(&self, tier: usize) -> usize {
        self.free.get(tier).map_or(0, |list| list.lock().len())
    }
}

impl Default for VertexBufferPool {
    fn default() -> Self {
        Self::new()
    }
}
