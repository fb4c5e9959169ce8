//! Channel sources
//!
//! This module produces the ordered channel list a run works on, either
//! from a fixed list (built in or injected through configuration) or by
//! scanning a GitHub issue body.

pub mod builtin;
pub mod issue;

use async_trait::async_trait;

use crate::core::{Channel, Result};

// Re-export commonly used items
pub use builtin::default_channels;
pub use issue::{IssueSource, parse_issue_body};

/// Anything that can hand the pipeline an ordered list of channels.
#[async_trait]
pub trait ChannelSource {
    /// Load the channels. Order is preserved all the way into the playlist.
    async fn load(&self) -> Result<Vec<Channel>>;

    /// Short human-readable origin, used in logs.
    fn describe(&self) -> String;
}

/// A channel list known before the run starts.
#[derive(Debug, Clone)]
pub struct StaticSource {
    channels: Vec<Channel>,
}

impl StaticSource {
    pub fn new(channels: Vec<Channel>) -> Self {
        Self { channels }
    }
}

impl Default for StaticSource {
    fn default() -> Self {
        Self::new(default_channels())
    }
}

#[async_trait]
impl ChannelSource for StaticSource {
    async fn load(&self) -> Result<Vec<Channel>> {
        Ok(self.channels.clone())
    }

    fn describe(&self) -> String {
        format!("static list ({} channels)", self.channels.len())
    }
}
