//! Playlist output
//!
//! This module turns validation results into extended M3U text and
//! writes it to disk atomically.

pub mod render;
pub mod writer;

// Re-export commonly used items
pub use render::{RenderOptions, extinf_line, render_playlist, slugify};
pub use writer::write_atomic;
