//! Clustering of unmatched pixels into annotation boxes.

pub(crate) mod boxes;

pub use boxes::{BoxAccumulator, ComparisonBox};
