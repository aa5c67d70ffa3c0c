//! Low-level building blocks for custom comparison pipelines.
//!
//! These expose the search table, usage grid, matcher, box accumulator and
//! renderers that [`crate::Comparator`] composes. Most users should prefer
//! [`crate::compare`] or [`crate::Comparator`].

pub use crate::cluster::{BoxAccumulator, ComparisonBox};
pub use crate::compare::{failure_ratio, within_tolerance};
pub use crate::render::{annotate, draw_box, draw_boxes, usage_heatmap, usage_intensity};
pub use crate::search::{NeighborhoodMatcher, Offset, SearchOrder, UsageGrid, MAX_SEARCH_DISTANCE};
