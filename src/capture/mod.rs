//! Sample capture module
//!
//! Records pointer activity on the tracing canvas as an append-only sample
//! log. Recording is synchronous and never blocks the input path; analysis
//! works on a snapshot of the log.

pub mod types;
pub mod session;

pub use types::*;
pub use session::CaptureSession;
