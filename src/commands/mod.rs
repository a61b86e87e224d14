//! Command implementations for snpbed.

pub mod merge;
pub mod query;
pub mod sort;

pub use merge::{MergeCommand, MergeStats, TieBreak};
pub use query::{extract_region, is_feature_in, is_overlapping, QueryCommand, QueryStats, Region};
pub use sort::SortCommand;
