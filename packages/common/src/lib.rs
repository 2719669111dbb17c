//! Common infrastructure shared by the tokenward crates
//!
//! Currently this is the process-wide logging bootstrap and the helpers that
//! keep subject identifiers and key material out of log output.

pub mod logging;

pub use logging::LoggingTransformer;
