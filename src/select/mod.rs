//! Choosing one option per article, then ordering articles for packing.

/// Exhaustive search for the largest combination that fits the page area.
pub mod combinations;
/// Largest-first ordering of articles.
pub mod order;
