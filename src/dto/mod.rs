//! Serializable views of records and statistics.
//!
//! Used by the admin binary for `--json` output; the field names are the
//! stable external shape.

pub mod clicks;
pub mod shorten;
pub mod stats;
pub mod stats_list;

pub use clicks::ClickItem;
pub use shorten::ShortenResponse;
pub use stats::StatsResponse;
pub use stats_list::{ListItem, ListResponse};
