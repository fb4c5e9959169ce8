use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::constants::playlist;

/// A television channel to publish in the playlist.
///
/// Channels are identified by their position in the list they came from;
/// two channels with the same name or URL are both kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Display name, also used for `tvg-name` and the slug
    pub name: String,
    /// Absolute HTTP(S) stream URL
    pub url: String,
    /// Display category (`group-title`)
    #[serde(default = "default_group")]
    pub group: String,
}

fn default_group() -> String {
    playlist::DEFAULT_GROUP.to_string()
}

impl Channel {
    /// Create a channel in the default group.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            group: default_group(),
        }
    }

    /// Create a channel in the given group.
    pub fn with_group(
        name: impl Into<String>,
        url: impl Into<String>,
        group: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            group: group.into(),
        }
    }

    /// Whether the URL is an absolute http or https URL.
    pub fn has_http_url(&self) -> bool {
        is_http_url(&self.url)
    }

    /// First field holding a control character, e.g. an embedded newline.
    pub fn field_with_control_char(&self) -> Option<&'static str> {
        [("name", &self.name), ("url", &self.url), ("group", &self.group)]
            .into_iter()
            .find(|(_, value)| value.chars().any(char::is_control))
            .map(|(field, _)| field)
    }
}

/// An absolute http(s) URL with a host, written on one line without spaces.
///
/// The URL parser silently drops tabs and newlines, so those are rejected
/// before parsing.
pub fn is_http_url(url: &str) -> bool {
    if url.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return false;
    }

    match reqwest::Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https") && parsed.has_host(),
        Err(_) => false,
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] - {}", self.name, self.group, self.url)
    }
}
