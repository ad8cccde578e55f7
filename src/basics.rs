//! Foundation types and the path consumer contract.
//!
//! The most fundamental pieces everything else depends on: the consumer
//! interface that receives replayed segments, and the default sizing
//! constants for the pooled buffers.

// ============================================================================
// Buffer sizing constants
// ============================================================================

/// Expected number of edges produced while walking one path. The pooled
/// buffers are pre-sized from this so a typical frame never widens them.
pub const INITIAL_EDGES_COUNT: usize = 4096;

/// Initial coordinate capacity of a [`crate::curve_stack::CurveStack`]
/// (edges × 2 coordinates).
pub const INITIAL_CURVES_COUNT: usize = INITIAL_EDGES_COUNT << 1;

/// Initial tag capacity of a [`crate::curve_stack::CurveStack`].
pub const INITIAL_TYPES_COUNT: usize = INITIAL_EDGES_COUNT;

/// Initial capacity of an [`crate::index_stack::IndexStack`]. Crossing
/// indices are far sparser than edges.
pub const INITIAL_INDICES_COUNT: usize = INITIAL_EDGES_COUNT >> 2;

// ============================================================================
// PathConsumer trait
// ============================================================================

/// The receiving end of segment replay. The current point is implicit: each
/// call starts where the previous one ended, so a consumer only sees control
/// points and endpoints.
///
/// Implemented by the downstream flattening/filling stages; the stacks in
/// this crate call it zero or more times per replay and never consume a
/// return value.
pub trait PathConsumer {
    /// Line segment from the current point to `(x, y)`.
    fn line_to(&mut self, x: f64, y: f64);

    /// Quadratic segment with control point `(cx, cy)` ending at `(x, y)`.
    fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64);

    /// Cubic segment with control points `(cx1, cy1)`, `(cx2, cy2)` ending
    /// at `(x, y)`.
    fn curve_to(&mut self, cx1: f64, cy1: f64, cx2: f64, cy2: f64, x: f64, y: f64);
}
