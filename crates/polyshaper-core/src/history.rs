//! Sliding window over the most recent input samples.
//!
//! The buffer has a fixed capacity of [`HISTORY_LEN`] taps, but only the
//! first `order + 1` are active for a given order. Tap 0 is the oldest
//! sample, tap `order` the newest. Each [`push`](HistoryBuffer::push) drops
//! the oldest active tap and appends one sample, so exactly one write happens
//! per processed sample. Taps beyond the active window are left as they are
//! and never read.
//!
//! ```text
//! order = 3, push(x):
//!
//!   before  [ a | b | c | d | . . . ]
//!   after   [ b | c | d | x | . . . ]
//!             0   1   2   3
//! ```

/// Highest supported harmonic order.
pub const MAX_ORDER: usize = 10;

/// Fixed tap capacity (`MAX_ORDER + 1`).
pub const HISTORY_LEN: usize = MAX_ORDER + 1;

/// Fixed-capacity history of recent samples.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryBuffer {
    taps: [f32; HISTORY_LEN],
}

impl HistoryBuffer {
    /// Create a zero-filled history.
    pub const fn new() -> Self {
        Self {
            taps: [0.0; HISTORY_LEN],
        }
    }

    /// Shift the active window by one and store `sample` as the newest tap.
    ///
    /// `order` above [`MAX_ORDER`] is treated as `MAX_ORDER`, so the write
    /// always lands inside the buffer.
    #[inline]
    pub fn push(&mut self, order: usize, sample: f32) {
        let order = order.min(MAX_ORDER);
        self.taps.copy_within(1..=order, 0);
        self.taps[order] = sample;
    }

    /// Tap `j` (0 = oldest of the active window).
    ///
    /// # Panics
    ///
    /// Panics if `j >= HISTORY_LEN`.
    #[inline]
    pub fn tap(&self, j: usize) -> f32 {
        self.taps[j]
    }

    /// The active window for `order`, oldest first.
    pub fn window(&self, order: usize) -> &[f32] {
        &self.taps[..=order.min(MAX_ORDER)]
    }

    /// All taps, including the inactive tail.
    pub fn as_slice(&self) -> &[f32] {
        &self.taps
    }

    /// Zero every tap.
    pub fn clear(&mut self) {
        self.taps = [0.0; HISTORY_LEN];
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}
