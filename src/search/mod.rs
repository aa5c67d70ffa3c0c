//! Neighborhood search for shift-tolerant pixel matching.
//!
//! `order` precomputes the ring-ordered offset table, `usage` tracks how often
//! each target pixel has been claimed, and `matcher` combines the two to decide
//! whether a source pixel has a partner in the target image.

pub mod matcher;
pub mod order;
pub mod usage;

pub use matcher::NeighborhoodMatcher;
pub use order::{Offset, SearchOrder, MAX_SEARCH_DISTANCE};
pub use usage::UsageGrid;
