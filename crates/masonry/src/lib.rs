//! Masonry (waterfall) column distribution.
//!
//! Items of known aspect ratio are dealt into a fixed number of columns,
//! each going to the column with the smallest predicted height so far. The
//! greedy pass is O(n·k) and keeps columns within one item's weight of each
//! other; it does not search for an optimal partition.

mod columns;
mod distribute;
mod layout;

pub use columns::{ColumnLayout, columns_for_width};
pub use distribute::{MasonryAssignment, distribute, height_weight};
pub use layout::{LayoutKey, MasonryLayout};
