//! Self-cancelling stack of point indices.
//!
//! Holds indices into an external point-coordinate array (index `i`
//! addresses the pair at `points[2*i], points[2*i + 1]`), typically the
//! crossing points collected while clipping a path side. Pushing a value
//! equal to the current top pops instead of appending (a degenerate
//! zero-length edge and its twin cross each other out), so no two adjacent
//! entries are ever equal. The surviving indices replay as a polyline.

use crate::array::ArrayCache;
use crate::basics::{PathConsumer, INITIAL_INDICES_COUNT};
#[cfg(feature = "stats")]
use crate::stats::{Histogram, StatLong};

// ============================================================================
// IndexStack
// ============================================================================

/// A pooled growable stack of `u32` point indices with adjacent-duplicate
/// elimination.
pub struct IndexStack {
    indices: Vec<u32>,
    end: usize,

    indices_cache: ArrayCache<u32>,

    #[cfg(feature = "stats")]
    indices_use_mark: usize,
    #[cfg(feature = "stats")]
    stats: IndexStackStats,
}

/// High-water-mark counters, accumulated at every
/// [`dispose`](IndexStack::dispose).
#[cfg(feature = "stats")]
#[derive(Debug, Clone)]
pub struct IndexStackStats {
    pub indices_used: StatLong,
    pub indices_hist: Histogram,
}

impl IndexStack {
    /// A stack drawing its backing storage from the given cache. The handle
    /// is cloned; the caller keeps its own.
    pub fn new(indices_cache: &ArrayCache<u32>) -> Self {
        Self {
            indices: indices_cache.acquire(),
            end: 0,
            indices_cache: indices_cache.clone(),
            #[cfg(feature = "stats")]
            indices_use_mark: 0,
            #[cfg(feature = "stats")]
            stats: IndexStackStats {
                indices_used: StatLong::new("index_stack.indices_used"),
                indices_hist: Histogram::new("index_stack.indices_used"),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.end == 0
    }

    /// Clear without touching the cache.
    pub fn reset(&mut self) {
        self.end = 0;
    }

    /// Push `v`, unless it equals the current top; then pop the top
    /// instead, cancelling the pair.
    pub fn push(&mut self, v: u32) {
        if self.end != 0 && self.indices[self.end - 1] == v {
            self.end -= 1;
            return;
        }
        if self.indices.len() <= self.end {
            self.indices =
                self.indices_cache
                    .widen(std::mem::take(&mut self.indices), self.end, self.end + 1);
        }
        self.indices[self.end] = v;
        self.end += 1;

        #[cfg(feature = "stats")]
        if self.end > self.indices_use_mark {
            self.indices_use_mark = self.end;
        }
    }

    /// Emit `line_to(points[2*i], points[2*i + 1])` for each stored index in
    /// push order, then clear the stack.
    pub fn pull_all(&mut self, points: &[f64], io: &mut impl PathConsumer) {
        for &idx in &self.indices[..self.end] {
            let j = (idx as usize) << 1;
            io.line_to(points[j], points[j + 1]);
        }
        self.end = 0;
    }

    /// Reset to empty and return the backing array to its cache dirty. The
    /// stack stays usable.
    pub fn dispose(&mut self) {
        self.end = 0;

        #[cfg(feature = "stats")]
        {
            self.stats.indices_used.add(self.indices_use_mark);
            self.stats.indices_hist.add(self.indices_use_mark);
            self.indices_use_mark = 0;
        }

        self.indices = self
            .indices_cache
            .release(std::mem::take(&mut self.indices));
    }

    /// Counters accumulated so far.
    #[cfg(feature = "stats")]
    pub fn stats(&self) -> &IndexStackStats {
        &self.stats
    }
}

impl Default for IndexStack {
    fn default() -> Self {
        Self::new(&ArrayCache::new(INITIAL_INDICES_COUNT))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        lines: Vec<(f64, f64)>,
    }

    impl PathConsumer for Recorder {
        fn line_to(&mut self, x: f64, y: f64) {
            self.lines.push((x, y));
        }
        fn quad_to(&mut self, _cx: f64, _cy: f64, _x: f64, _y: f64) {
            unreachable!("index stacks only emit lines");
        }
        fn curve_to(&mut self, _cx1: f64, _cy1: f64, _cx2: f64, _cy2: f64, _x: f64, _y: f64) {
            unreachable!("index stacks only emit lines");
        }
    }

    // points[2i], points[2i+1] pairs for indices 0..4
    const POINTS: [f64; 8] = [0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5];

    #[test]
    fn test_adjacent_duplicates_cancel() {
        let mut stack = IndexStack::default();
        stack.push(3);
        stack.push(3);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_cancel_is_pairwise() {
        let mut stack = IndexStack::default();
        for v in [1, 2, 2, 3] {
            stack.push(v);
        }
        let mut rec = Recorder::default();
        stack.pull_all(&POINTS, &mut rec);
        assert_eq!(rec.lines, vec![(1.0, 1.5), (3.0, 3.5)]);
    }

    #[test]
    fn test_nonadjacent_duplicates_survive() {
        let mut stack = IndexStack::default();
        for v in [1, 2, 1] {
            stack.push(v);
        }
        let mut rec = Recorder::default();
        stack.pull_all(&POINTS, &mut rec);
        assert_eq!(rec.lines, vec![(1.0, 1.5), (2.0, 2.5), (1.0, 1.5)]);
    }

    #[test]
    fn test_cancellation_exposes_previous_top() {
        // after 2,2 cancel, a following 1 cancels against the initial 1
        let mut stack = IndexStack::default();
        for v in [1, 2, 2, 1] {
            stack.push(v);
        }
        assert!(stack.is_empty());
    }

    #[test]
    fn test_pull_all_clears() {
        let mut stack = IndexStack::default();
        stack.push(0);
        let mut rec = Recorder::default();
        stack.pull_all(&POINTS, &mut rec);
        assert!(stack.is_empty());
        stack.pull_all(&POINTS, &mut rec);
        assert_eq!(rec.lines.len(), 1);
    }

    #[test]
    fn test_reset_keeps_storage() {
        let mut stack = IndexStack::default();
        stack.push(1);
        stack.push(2);
        stack.reset();
        assert!(stack.is_empty());
        stack.push(2);
        let mut rec = Recorder::default();
        stack.pull_all(&POINTS, &mut rec);
        assert_eq!(rec.lines, vec![(2.0, 2.5)]);
    }

    #[test]
    fn test_growth_preserves_order() {
        let stack_cache = ArrayCache::new(2);
        let mut stack = IndexStack::new(&stack_cache);
        for v in 0..100u32 {
            stack.push(v);
        }
        let points: Vec<f64> = (0..200).map(|i| i as f64).collect();
        let mut rec = Recorder::default();
        stack.pull_all(&points, &mut rec);
        assert_eq!(rec.lines.len(), 100);
        assert_eq!(rec.lines[0], (0.0, 1.0));
        assert_eq!(rec.lines[99], (198.0, 199.0));
    }

    #[test]
    fn test_dispose_then_reuse() {
        let mut stack = IndexStack::default();
        stack.push(1);
        stack.dispose();
        assert!(stack.is_empty());
        stack.push(3);
        let mut rec = Recorder::default();
        stack.pull_all(&POINTS, &mut rec);
        assert_eq!(rec.lines, vec![(3.0, 3.5)]);
    }
}
