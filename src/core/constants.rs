/// Application-wide constants to avoid magic values throughout the codebase.
///
/// Defaults here describe the behaviour of a bare invocation: no config file,
/// no flags, the built-in channel list written to `playlists/missouri.m3u8`.
/// Probe tuning constants
pub mod probe {
    /// Default number of probes in flight at once
    pub const DEFAULT_CONCURRENCY: usize = 6;
    /// Upper bound accepted for concurrency
    pub const MAX_CONCURRENCY: usize = 100;
    /// Default per-request deadline in seconds
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
    /// Upper bound accepted for the per-request deadline (5 minutes)
    pub const MAX_TIMEOUT_SECONDS: u64 = 300;
    /// Only the first KiB is requested; availability is all that matters
    pub const RANGE_HEADER_VALUE: &str = "bytes=0-1023";
    /// Maximum number of redirects followed per probe
    pub const MAX_REDIRECTS: usize = 10;
}

/// Content classification markers
pub mod stream {
    /// Substring shared by `application/vnd.apple.mpegurl`, `application/x-mpegurl`
    /// and `audio/mpegurl`
    pub const MPEGURL_MARKER: &str = "mpegurl";
    /// HLS playlist extension
    pub const HLS_EXTENSION: &str = ".m3u8";
}

/// Remote channel source (GitHub issue)
pub mod issue {
    /// Issue whose body lists the channels
    pub const DEFAULT_URL: &str = "https://api.github.com/repos/DisabledAbel/Cvtv-m3u/issues/1";
    /// Content negotiation for the GitHub v3 API
    pub const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";
    /// Name used for a URL line that has no preceding name line
    pub const UNKNOWN_NAME: &str = "Unknown";
}

/// Playlist output
pub mod playlist {
    /// Default output file
    pub const DEFAULT_OUTPUT_PATH: &str = "playlists/missouri.m3u8";
    /// Group assigned to channels that do not name one
    pub const DEFAULT_GROUP: &str = "Local";
    /// Attribution comment written under the header
    pub const DEFAULT_ATTRIBUTION: &str = "DisabledAbel/Cvtv-m3u";
    /// Unix mode of a newly created playlist (world-readable, it gets published)
    pub const FILE_MODE: u32 = 0o644;
}

/// Channel source kinds
pub mod sources {
    /// Built-in or configured channel list
    pub const STATIC: &str = "static";
    /// Channels parsed from a GitHub issue body
    pub const ISSUE: &str = "issue";

    /// Default source kind
    pub const DEFAULT: &str = STATIC;

    /// All valid source kinds
    pub const ALL: [&str; 2] = [STATIC, ISSUE];
}

/// Configuration file discovery
pub mod config_files {
    /// Config file looked up in the working directory
    pub const DEFAULT_FILE_NAME: &str = ".cvtv-playlist.toml";
}

/// Process exit codes
pub mod exit_codes {
    /// Playlist written (unreachable channels do not count as failure)
    pub const SUCCESS: i32 = 0;
    /// Invalid configuration or arguments
    pub const CONFIG_ERROR: i32 = 1;
    /// The run could not produce a playlist
    pub const FATAL: i32 = 2;
}
