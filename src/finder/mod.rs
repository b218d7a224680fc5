pub mod availability;
pub mod format;
pub mod item_finder;
pub mod listing;
pub mod patterns;
pub mod report;
pub mod storage;

pub use item_finder::ItemFinder;
pub use listing::{HostFilter, SortField, SortOrder, sort_reports};
pub use patterns::Metric;
pub use report::{HostRef, HostReport, InventoryTotals};
