//! Telemetry and structured logging components for UnivAegis.
//!
//! Handles log redaction, console and rolling JSON file output, and
//! verification event logging.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{EventLogEntry, EventLogger, VerificationEvent};
pub use logger::{LogOptions, init_logger};
pub use redact::redact_sensitive_data;
