pub mod filesystem_metric;
pub mod host_interface;
pub mod monitoring_item;
pub mod resolved_value;
pub mod search_pattern;

pub use filesystem_metric::{FilesystemMetric, FsMetricKind};
pub use host_interface::{HostAvailability, HostInterface, InterfaceType};
pub use monitoring_item::{HistoryPartition, HistoryRecord, ItemStatus, MonitoringItem, ValueType};
pub use resolved_value::ResolvedValue;
pub use search_pattern::SearchPattern;
