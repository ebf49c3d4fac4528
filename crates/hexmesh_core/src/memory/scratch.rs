//! # Meshing Scratch State Pool
//!
//! Per-build inclusion masks, recycled so a rebuild every fixed tick does
//! not re-allocate a chunk-volume boolean array each time.

use std::num::NonZeroUsize;

use parking_lot::Mutex;

/// Per-build scratch state: which flat indices have already been consumed
/// by an emitted cuboid during the current mesh build.
///
/// Once a build starts, every non-empty voxel flips to included exactly
/// once; the mask is never reset mid-build, only cleared between builds
/// (lazily, on the next acquire).
pub struct InclusionMask {
    cells: Box<[bool]>,
}

impl InclusionMask {
    fn new(volume: usize) -> Self {
        Self {
            cells: vec![false; volume].into_boxed_slice(),
        }
    }

    /// Returns the number of cells (the chunk volume).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the mask covers zero cells.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns whether the cell at `index` has been consumed.
    ///
    /// # Panics
    /// Panics if `index` is out of range - an out-of-range flat index is a
    /// contract violation, checked at the access boundary.
    #[inline]
    #[must_use]
    pub fn is_included(&self, index: usize) -> bool {
        self.cells[index]
    }

    /// Marks the cell at `index` as consumed.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    #[inline]
    pub fn include(&mut self, index: usize) {
        self.cells[index] = true;
    }

    /// Clears every cell back to unconsumed.
    #[inline]
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Returns the number of consumed cells. Diagnostic/test helper.
    #[must_use]
    pub fn included_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

/// Pool of inclusion masks sized to one chunk volume.
///
/// Pre-warmed with one mask per available execution unit - the expected
/// number of concurrent mesh builds. Growth beyond that falls back to
/// fresh allocation; acquire never blocks on an empty pool and never
/// fails.
pub struct ScratchPool {
    volume: usize,
    free: Mutex<Vec<InclusionMask>>,
}

impl ScratchPool {
    /// Creates the pool for masks of `volume` cells.
    ///
    /// Note: Call this once during initialization, not in the hot path.
    #[must_use]
    pub fn new(volume: usize) -> Self {
        let prewarm = std::thread::available_parallelism().map_or(1, NonZeroUsize::get);
        let masks = (0..prewarm).map(|_| InclusionMask::new(volume)).collect();
        Self {
            volume,
            free: Mutex::new(masks),
        }
    }

    /// Returns the chunk volume this pool's masks cover.
    #[inline]
    #[must_use]
    pub const fn volume(&self) -> usize {
        self.volume
    }

    /// Acquires a fully cleared mask.
    ///
    /// Pooled masks come back dirty from their previous build and are
    /// cleared here (lazy clear on acquire); a fresh allocation is already
    /// zeroed.
    #[must_use]
    pub fn acquire(&self) -> InclusionMask {
        match self.free.lock().pop() {
            Some(mut mask) => {
                mask.clear();
                mask
            }
            None => InclusionMask::new(self.volume),
        }
    }

    /// Returns a mask to the pool without clearing it.
    ///
    /// Masks of the wrong volume are dropped instead of pooled; handing
    /// one out later would break the grid/mask size contract.
    pub fn release(&self, mask: InclusionMask) {
        if mask.len() == self.volume {
            self.free.lock().push(mask);
        }
    }
}
