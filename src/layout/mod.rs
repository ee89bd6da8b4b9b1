//! Placing the chosen article boxes on the page.

/// Edge stretching applied after packing.
pub mod stretch;
/// Worst-fit packing with backtracking over smaller options.
pub mod worst_fit;
