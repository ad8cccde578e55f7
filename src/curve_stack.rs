//! Segment stack: a replayable buffer of mixed line/quad/cubic segments.
//!
//! Pieces produced while walking a dashed or offset curve are pushed here
//! and later emitted to a [`PathConsumer`] in push order (`pull_all`) or
//! reverse order (`pop_all`). Adjacent segments share endpoints, so each
//! push carries only control points and the endpoint; the start point is
//! implicit.
//!
//! Internal representation: segment tags live in one pooled `u8` buffer in
//! insertion order; coordinates live in a second pooled `f64` buffer with
//! each segment's points stored *last point first*, which lets reverse
//! replay walk the coordinate buffer backwards one segment at a time without
//! any index arithmetic beyond a running offset. Replay reconstructs the
//! forward argument order from the reversed storage.

use std::fmt;

use crate::array::ArrayCache;
use crate::basics::{PathConsumer, INITIAL_CURVES_COUNT, INITIAL_TYPES_COUNT};
#[cfg(feature = "stats")]
use crate::stats::{Histogram, StatLong};

const TYPE_LINE_TO: u8 = 0;
const TYPE_QUAD_TO: u8 = 1;
const TYPE_CUBIC_TO: u8 = 2;

// ============================================================================
// CurveStack
// ============================================================================

/// Accumulates an ordered run of line/quad/cubic segments backed by pooled
/// dirty arrays.
///
/// Constructed once per rendering context and reused: both replay calls and
/// [`dispose`](Self::dispose) reset the logical length to zero, never the
/// storage.
pub struct CurveStack {
    /// Coordinates, each segment reversed (last point first).
    curves: Vec<f64>,
    /// One past the last used coordinate.
    end: usize,
    /// Segment tags in insertion order.
    types: Vec<u8>,
    num_segments: usize,

    curves_cache: ArrayCache<f64>,
    types_cache: ArrayCache<u8>,

    #[cfg(feature = "stats")]
    curves_use_mark: usize,
    #[cfg(feature = "stats")]
    types_use_mark: usize,
    #[cfg(feature = "stats")]
    stats: CurveStackStats,
}

/// High-water-mark counters, accumulated at every
/// [`dispose`](CurveStack::dispose).
#[cfg(feature = "stats")]
#[derive(Debug, Clone)]
pub struct CurveStackStats {
    pub types_used: StatLong,
    pub curves_used: StatLong,
    pub curves_hist: Histogram,
}

impl CurveStack {
    /// A stack drawing its backing storage from the given caches. The
    /// handles are cloned; the caller keeps its own.
    pub fn new(curves_cache: &ArrayCache<f64>, types_cache: &ArrayCache<u8>) -> Self {
        Self {
            curves: curves_cache.acquire(),
            end: 0,
            types: types_cache.acquire(),
            num_segments: 0,
            curves_cache: curves_cache.clone(),
            types_cache: types_cache.clone(),
            #[cfg(feature = "stats")]
            curves_use_mark: 0,
            #[cfg(feature = "stats")]
            types_use_mark: 0,
            #[cfg(feature = "stats")]
            stats: CurveStackStats {
                types_used: StatLong::new("curve_stack.types_used"),
                curves_used: StatLong::new("curve_stack.curves_used"),
                curves_hist: Histogram::new("curve_stack.curves_used"),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.num_segments == 0
    }

    /// Append a line segment ending at `(x, y)`.
    pub fn push_line(&mut self, x: f64, y: f64) {
        self.ensure_space(2);
        self.types[self.num_segments] = TYPE_LINE_TO;
        self.num_segments += 1;
        self.curves[self.end] = x;
        self.curves[self.end + 1] = y;
        self.end += 2;
    }

    /// Append a quadratic segment with control `(cx, cy)` ending at `(x, y)`.
    pub fn push_quad(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        self.ensure_space(4);
        self.types[self.num_segments] = TYPE_QUAD_TO;
        self.num_segments += 1;
        let e = self.end;
        self.curves[e] = x;
        self.curves[e + 1] = y;
        self.curves[e + 2] = cx;
        self.curves[e + 3] = cy;
        self.end = e + 4;
    }

    /// Append a cubic segment with controls `(cx1, cy1)`, `(cx2, cy2)`
    /// ending at `(x, y)`.
    pub fn push_cubic(&mut self, cx1: f64, cy1: f64, cx2: f64, cy2: f64, x: f64, y: f64) {
        self.ensure_space(6);
        self.types[self.num_segments] = TYPE_CUBIC_TO;
        self.num_segments += 1;
        let e = self.end;
        self.curves[e] = x;
        self.curves[e + 1] = y;
        self.curves[e + 2] = cx2;
        self.curves[e + 3] = cy2;
        self.curves[e + 4] = cx1;
        self.curves[e + 5] = cy1;
        self.end = e + 6;
    }

    /// Emit every segment to `io` in push order, then clear the stack.
    pub fn pull_all(&mut self, io: &mut impl PathConsumer) {
        let nc = self.num_segments;
        if nc == 0 {
            return;
        }
        self.update_use_marks();

        let mut e = 0;
        for i in 0..nc {
            match self.types[i] {
                TYPE_LINE_TO => {
                    io.line_to(self.curves[e], self.curves[e + 1]);
                    e += 2;
                }
                TYPE_QUAD_TO => {
                    io.quad_to(
                        self.curves[e + 2],
                        self.curves[e + 3],
                        self.curves[e],
                        self.curves[e + 1],
                    );
                    e += 4;
                }
                TYPE_CUBIC_TO => {
                    io.curve_to(
                        self.curves[e + 4],
                        self.curves[e + 5],
                        self.curves[e + 2],
                        self.curves[e + 3],
                        self.curves[e],
                        self.curves[e + 1],
                    );
                    e += 6;
                }
                _ => unreachable!("corrupt segment tag"),
            }
        }
        self.num_segments = 0;
        self.end = 0;
    }

    /// Emit every segment to `io` in reverse order, most recently pushed
    /// first, then clear the stack.
    pub fn pop_all(&mut self, io: &mut impl PathConsumer) {
        let mut nc = self.num_segments;
        if nc == 0 {
            return;
        }
        self.update_use_marks();

        let mut e = self.end;
        while nc != 0 {
            nc -= 1;
            match self.types[nc] {
                TYPE_LINE_TO => {
                    e -= 2;
                    io.line_to(self.curves[e], self.curves[e + 1]);
                }
                TYPE_QUAD_TO => {
                    e -= 4;
                    io.quad_to(
                        self.curves[e + 2],
                        self.curves[e + 3],
                        self.curves[e],
                        self.curves[e + 1],
                    );
                }
                TYPE_CUBIC_TO => {
                    e -= 6;
                    io.curve_to(
                        self.curves[e + 4],
                        self.curves[e + 5],
                        self.curves[e + 2],
                        self.curves[e + 3],
                        self.curves[e],
                        self.curves[e + 1],
                    );
                }
                _ => unreachable!("corrupt segment tag"),
            }
        }
        self.num_segments = 0;
        self.end = 0;
    }

    /// Reset to empty and return both backing arrays to their caches dirty.
    /// The stack stays usable; the next push runs on initial-size storage.
    pub fn dispose(&mut self) {
        self.end = 0;
        self.num_segments = 0;

        #[cfg(feature = "stats")]
        {
            self.stats.types_used.add(self.types_use_mark);
            self.stats.curves_used.add(self.curves_use_mark);
            self.stats.curves_hist.add(self.curves_use_mark);
            self.types_use_mark = 0;
            self.curves_use_mark = 0;
        }

        self.curves = self.curves_cache.release(std::mem::take(&mut self.curves));
        self.types = self.types_cache.release(std::mem::take(&mut self.types));
    }

    /// Counters accumulated so far.
    #[cfg(feature = "stats")]
    pub fn stats(&self) -> &CurveStackStats {
        &self.stats
    }

    fn ensure_space(&mut self, n: usize) {
        // subtraction side avoids overflow on huge buffers
        if self.curves.len() - self.end < n {
            self.curves = self.curves_cache.widen(
                std::mem::take(&mut self.curves),
                self.end,
                self.end + n,
            );
        }
        if self.types.len() <= self.num_segments {
            self.types = self.types_cache.widen(
                std::mem::take(&mut self.types),
                self.num_segments,
                self.num_segments + 1,
            );
        }
    }

    #[cfg(feature = "stats")]
    fn update_use_marks(&mut self) {
        if self.num_segments > self.types_use_mark {
            self.types_use_mark = self.num_segments;
        }
        if self.end > self.curves_use_mark {
            self.curves_use_mark = self.end;
        }
    }

    #[cfg(not(feature = "stats"))]
    #[inline]
    fn update_use_marks(&mut self) {}
}

impl Default for CurveStack {
    fn default() -> Self {
        Self::new(
            &ArrayCache::new(INITIAL_CURVES_COUNT),
            &ArrayCache::new(INITIAL_TYPES_COUNT),
        )
    }
}

impl fmt::Debug for CurveStack {
    /// Renders the pending segments top-down (pop order).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut nc = self.num_segments;
        let mut last = self.end;
        while nc != 0 {
            nc -= 1;
            let (name, len) = match self.types[nc] {
                TYPE_LINE_TO => ("line", 2),
                TYPE_QUAD_TO => ("quad", 4),
                _ => ("cubic", 6),
            };
            last -= len;
            writeln!(f, "{}: {:?}", name, &self.curves[last..last + len])?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
