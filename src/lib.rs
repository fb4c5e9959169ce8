//! cvtv-playlist - build a validated IPTV playlist for regional TV channels
//!
//! A run loads an ordered channel list (built in, from a config file, or
//! scanned out of a GitHub issue), probes every stream with a small ranged
//! GET under bounded concurrency, and writes an extended M3U playlist in which
//! unreachable channels are kept but commented out.

// Core functionality
pub mod core;

// Feature modules
pub mod config;
pub mod pipeline;
pub mod playlist;
pub mod reporting;
pub mod source;
pub mod ui;
pub mod validation;

// Re-export commonly used types for convenience
pub use crate::core::{Channel, ChannelProbeError, PlaylistError, Result};
pub use pipeline::run;
pub use validation::{ProbeOutcome, ValidationResult, Validator};
