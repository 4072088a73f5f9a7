// Leaf modules
pub mod config;
pub mod metrics;
pub mod model;
pub mod rules;
pub mod util;

// Flat-text grammar (src/codec/{mod,encode,decode}.rs) and the day store
pub mod codec;
pub mod store;

// Day-level engine
pub mod aggregate;
pub mod detect;
pub mod stats;

// I/O boundaries
pub mod ingest;
pub mod report;

// Convenience re-exports
pub use aggregate::{aggregate, resolve_ids, AggregatedDay, ResolvedDay};
pub use config::Config;
pub use detect::detect_new;
pub use model::{AggregatedTitleInfo, FailedSource, FetchBatch, SourceSnapshot, TitleRecord};
pub use rules::{RuleSet, WordGroup};
pub use stats::{compute_stats, rank_span, FrequencyStat, RankSpan, TitleHit};
pub use store::SnapshotStore;
