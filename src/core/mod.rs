//! Domain logic: the round schedule, report reconciliation and the
//! operations the CLI drives on top of them.

pub mod backup;
pub mod config;
pub mod log;
pub mod reconcile;
pub mod report;
pub mod schedule;
pub mod store;
pub mod summary;

pub use reconcile::{build_report, reconcile};
pub use schedule::{ROUNDS, generate_round_slots};
pub use store::RecordStore;
