mod aggregator;
mod emitter;
pub mod views;

pub use aggregator::{compute_snapshot, rank_top_jobs};
pub use emitter::SnapshotEmitter;
pub use views::ReportSnapshot;
