use std::fmt;
use std::time::Duration;

/// Error types for playlist generation.
///
/// Every variant here aborts the run. Per-channel probe failures are
/// recorded as [`ChannelProbeError`] instead and never reach this type.
#[derive(Debug)]
pub enum PlaylistError {
    /// Remote channel source could not be fetched or decoded
    SourceFetch(String),

    /// Remote channel source answered without a body
    EmptyBody(String),

    /// Temp-file write or atomic rename of the playlist failed
    Write {
        path: String,
        source: std::io::Error,
    },

    /// Configuration error
    Config(String),

    /// IO error
    Io(std::io::Error),

    /// HTTP client error
    Http(reqwest::Error),

    /// JSON decoding error
    Json(serde_json::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),
}

impl fmt::Display for PlaylistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaylistError::SourceFetch(msg) => write!(f, "Source fetch error: {msg}"),
            PlaylistError::EmptyBody(url) => write!(f, "Empty body error: no body in {url}"),
            PlaylistError::Write { path, source } => {
                write!(f, "Write error: could not write '{path}': {source}")
            }
            PlaylistError::Config(msg) => write!(f, "Configuration error: {msg}"),
            PlaylistError::Io(err) => write!(f, "IO error: {err}"),
            PlaylistError::Http(err) => write!(f, "HTTP error: {err}"),
            PlaylistError::Json(err) => write!(f, "JSON error: {err}"),
            PlaylistError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
        }
    }
}

impl std::error::Error for PlaylistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlaylistError::Write { source, .. } => Some(source),
            PlaylistError::Io(err) => Some(err),
            PlaylistError::Http(err) => Some(err),
            PlaylistError::Json(err) => Some(err),
            PlaylistError::TomlParsing(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PlaylistError {
    fn from(err: std::io::Error) -> Self {
        PlaylistError::Io(err)
    }
}

impl From<reqwest::Error> for PlaylistError {
    fn from(err: reqwest::Error) -> Self {
        PlaylistError::Http(err)
    }
}

impl From<serde_json::Error> for PlaylistError {
    fn from(err: serde_json::Error) -> Self {
        PlaylistError::Json(err)
    }
}

impl From<toml::de::Error> for PlaylistError {
    fn from(err: toml::de::Error) -> Self {
        PlaylistError::TomlParsing(err)
    }
}

/// Type alias for Results using PlaylistError
pub type Result<T> = std::result::Result<T, PlaylistError>;

/// Most specific message available for a reqwest failure.
///
/// reqwest's own `Display` only names the URL; the underlying cause
/// (refused connection, DNS failure, TLS) lives in its source.
pub fn error_reason(err: &reqwest::Error) -> String {
    std::error::Error::source(err)
        .map(|e| e.to_string())
        .unwrap_or_else(|| err.to_string())
}

/// Why a single channel was judged unreachable.
///
/// The `Display` output is what ends up in the playlist's failure comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelProbeError {
    /// Server answered outside the 2xx range
    HttpStatus(u16),

    /// Server answered 2xx but nothing suggests an HLS stream
    NotAStream {
        status: u16,
        content_type: Option<String>,
    },

    /// No response within the deadline
    Timeout(Duration),

    /// Connection, TLS, DNS or protocol failure
    Network(String),
}

impl fmt::Display for ChannelProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelProbeError::HttpStatus(status) => write!(f, "http {status}"),
            ChannelProbeError::NotAStream {
                status,
                content_type,
            } => write!(
                f,
                "status={status} ct={}",
                content_type.as_deref().unwrap_or("")
            ),
            ChannelProbeError::Timeout(after) => {
                write!(f, "timed out after {}s", after.as_secs())
            }
            ChannelProbeError::Network(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ChannelProbeError {}
