//! Observability for schemakv
//!
//! Structured JSON logging: one line per event, deterministic key
//! ordering, explicit severity levels. Logging is a secondary channel;
//! every failure is also surfaced to the caller as an error value.

mod logger;

pub use logger::{Logger, Severity};
