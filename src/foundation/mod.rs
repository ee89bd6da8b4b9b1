//! Geometry, errors, and the numeric helpers shared by every stage.

/// Page-space rectangles.
pub mod core;
/// Error type and result alias.
pub mod error;
/// Float comparison and formatting.
pub mod math;
