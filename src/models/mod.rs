pub mod log_entry;
pub mod severity;

pub use log_entry::{DisplayEntry, LogEntry, LogFilter, LogRequest, NewLogEntry};
pub use severity::{RawSeverity, Severity};
