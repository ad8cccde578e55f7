//! # polycurve
//!
//! Curve geometry and pooled segment buffering core for scan-line path
//! rasterization.
//!
//! The crate provides the numerically delicate inner machinery that a path
//! rasterizer's dashing, stroking, and flattening stages lean on:
//!
//! - Polynomial root extraction (quadratic and cubic) with
//!   cancellation-avoiding branch selection
//! - de Casteljau subdivision of quadratic/cubic Bézier segments over flat,
//!   offset-addressed coordinate buffers that may alias
//! - Cohen–Sutherland outcode classification against a half-open clip box
//! - Growable, pooled "dirty" buffers that keep the per-frame hot path
//!   allocation-free
//! - A segment stack replayable in forward or reverse order, and a
//!   self-cancelling stack of point indices
//!
//! ## Architecture
//!
//! The orchestration layer (dasher, stroker, flattener; not part of this
//! crate) solves for curve parameters with the [`math`] kernel, splits
//! segments with [`curves`], and accumulates the pieces in a
//! [`curve_stack::CurveStack`] or [`index_stack::IndexStack`] for later,
//! possibly reordered, emission to a [`basics::PathConsumer`].
//!
//! Everything here is single-threaded: one rendering context owns its stacks
//! and its [`array::ArrayCache`] handles, and a context never crosses
//! threads.

// Foundation types and math
pub mod array;
pub mod basics;
pub mod clip;
pub mod math;

// Curve operations
pub mod curves;

// Pooled segment buffers
pub mod curve_stack;
pub mod index_stack;

#[cfg(feature = "stats")]
pub mod stats;
