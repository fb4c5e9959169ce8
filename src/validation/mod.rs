//! Stream validation
//!
//! This module probes channel URLs over HTTP with bounded concurrency
//! and classifies each channel as reachable or not.

pub mod pool;
pub mod validator;

// Re-export commonly used items
pub use pool::map_bounded;
pub use validator::{
    ProbeChannels, ProbeOutcome, ProbeSettings, ValidationResult, Validator, build_client,
    classify,
};
