//! Usage history for the interval timer.
//!
//! Every finished run appends one CSV line to the log file; the report
//! command sums them into total focused time.
//!
//! - `log`: `UsageLog` trait, the CSV file implementation and a mock
//! - `report`: parsing and aggregation
//! - `error`: `HistoryError`

pub mod error;
pub mod log;
pub mod report;

pub use error::HistoryError;
pub use log::{CsvUsageLog, MockUsageLog, UsageLog};
pub use report::{UsageEntry, UsageReport};
