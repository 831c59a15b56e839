//! Rollcall Ledger — Per-class attendance state: the scan/mark
//! transition rules with duplicate protection, roster search, aggregate
//! counts, and report aggregation over archived day summaries.

pub mod error;
pub mod ledger;
pub mod reports;

pub use error::MarkError;
pub use ledger::{AttendanceLedger, MarkSource, RosterCounts, ScanEntry};
