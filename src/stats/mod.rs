//! Usage statistics: fetching, flattening and name normalization

pub mod fetch;
pub mod normalize;
pub mod table;
pub mod types;
pub mod whitelist;

pub use fetch::{HttpSource, SnapshotSource, StatsSource};
pub use normalize::{strip_quantization, Normalizer};
pub use table::build_tables;
pub use types::{Granularity, RawSnapshot, UsageRecord, UsageRow, UsageTables};
pub use whitelist::Whitelist;
