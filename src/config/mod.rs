//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments. Every field is optional; unset fields
//! fall back to the constants in [`crate::core::constants`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::constants::{config_files, issue, playlist, probe, sources};
use crate::core::error::{PlaylistError, Result};
use crate::core::types::{Channel, is_http_url};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Playlist file to write
    pub output: Option<String>,

    /// Number of probes in flight at once
    pub concurrency: Option<usize>,

    /// Per-request timeout in seconds
    pub timeout: Option<u64>,

    /// Custom User-Agent header
    pub user_agent: Option<String>,

    /// Probe channels before publishing them
    pub validate: Option<bool>,

    /// Where channels come from: "static" or "issue"
    pub source: Option<String>,

    /// GitHub API URL of the issue listing channels
    pub issue_url: Option<String>,

    /// Group assigned to channels parsed from the issue
    pub issue_group: Option<String>,

    /// Attribution written as `# Source:` under the header
    pub attribution: Option<String>,

    /// Write the attribution line at all
    pub include_attribution: Option<bool>,

    /// Enable verbose logging
    pub verbose: Option<bool>,

    /// Channel list replacing the built-in one
    pub channels: Option<Vec<Channel>>,
}

/// A file holding nothing but `[[channels]]` tables.
#[derive(Debug, Deserialize)]
struct ChannelsFile {
    #[serde(default)]
    channels: Vec<Channel>,
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            PlaylistError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            PlaylistError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load `.cvtv-playlist.toml` from the working directory, falling back to defaults.
    ///
    /// A file that exists but fails to parse is an error; a missing file is not.
    pub fn load_from_standard_locations() -> Result<Self> {
        let path = Path::new(config_files::DEFAULT_FILE_NAME);
        if path.is_file() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load a channel list from a TOML file of `[[channels]]` tables.
    pub fn load_channels_file<P: AsRef<Path>>(path: P) -> Result<Vec<Channel>> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            PlaylistError::Config(format!(
                "Could not read channels file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let file: ChannelsFile = toml::from_str(&content).map_err(|e| {
            PlaylistError::Config(format!(
                "Invalid TOML in channels file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Ok(file.channels)
    }

    /// Build the effective configuration: file (explicit, standard location or
    /// none), then CLI overrides, then a final validation.
    pub fn resolve(cli_config: &CliConfig) -> Result<Self> {
        let mut config = if cli_config.no_config {
            Config::default()
        } else if let Some(ref config_file) = cli_config.config_file {
            Config::load_from_file(config_file)?
        } else {
            Config::load_from_standard_locations()?
        };

        config.merge_with_cli(cli_config);

        if let Some(ref channels_file) = cli_config.channels_file {
            config.channels = Some(Self::load_channels_file(channels_file)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        // Source
        if let Some(ref source) = cli_config.source {
            self.source = Some(source.clone());
        }
        if let Some(ref issue_url) = cli_config.issue_url {
            self.issue_url = Some(issue_url.clone());
        }

        // Output
        if let Some(ref output) = cli_config.output {
            self.output = Some(output.clone());
        }
        if cli_config.no_attribution {
            self.include_attribution = Some(false);
        }

        // Probing
        if let Some(concurrency) = cli_config.concurrency {
            self.concurrency = Some(concurrency);
        }
        if let Some(timeout) = cli_config.timeout {
            self.timeout = Some(timeout);
        }
        if let Some(ref user_agent) = cli_config.user_agent {
            self.user_agent = Some(user_agent.clone());
        }
        if cli_config.no_validate {
            self.validate = Some(false);
        }

        // Verbosity
        if cli_config.verbose {
            self.verbose = Some(true);
        }
    }

    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(probe::DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn concurrency_or_default(&self) -> usize {
        self.concurrency.unwrap_or(probe::DEFAULT_CONCURRENCY)
    }

    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(
            self.output
                .as_deref()
                .unwrap_or(playlist::DEFAULT_OUTPUT_PATH),
        )
    }

    pub fn source_kind(&self) -> &str {
        self.source.as_deref().unwrap_or(sources::DEFAULT)
    }

    pub fn issue_url_or_default(&self) -> &str {
        self.issue_url.as_deref().unwrap_or(issue::DEFAULT_URL)
    }

    pub fn issue_group_or_default(&self) -> &str {
        self.issue_group
            .as_deref()
            .unwrap_or(playlist::DEFAULT_GROUP)
    }

    pub fn should_validate(&self) -> bool {
        self.validate.unwrap_or(true)
    }

    /// Attribution line content, or `None` when disabled.
    pub fn effective_attribution(&self) -> Option<&str> {
        if !self.include_attribution.unwrap_or(true) {
            return None;
        }
        Some(
            self.attribution
                .as_deref()
                .unwrap_or(playlist::DEFAULT_ATTRIBUTION),
        )
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err(PlaylistError::Config(
                    "Timeout cannot be 0. Expected a positive integer representing seconds."
                        .to_string(),
                ));
            }
            if timeout > probe::MAX_TIMEOUT_SECONDS {
                return Err(PlaylistError::Config(format!(
                    "Timeout of {timeout} seconds is too large. Expected at most {} seconds.",
                    probe::MAX_TIMEOUT_SECONDS
                )));
            }
        }

        if let Some(concurrency) = self.concurrency {
            if concurrency == 0 {
                return Err(PlaylistError::Config(
                    "Concurrency cannot be 0. Expected a positive integer.".to_string(),
                ));
            }
            if concurrency > probe::MAX_CONCURRENCY {
                return Err(PlaylistError::Config(format!(
                    "Concurrency of {concurrency} is too high. Expected at most {}.",
                    probe::MAX_CONCURRENCY
                )));
            }
        }

        if let Some(ref output) = self.output
            && output.trim().is_empty()
        {
            return Err(PlaylistError::Config(
                "Output path cannot be empty.".to_string(),
            ));
        }

        if let Some(ref source) = self.source
            && !sources::ALL.contains(&source.as_str())
        {
            return Err(PlaylistError::Config(format!(
                "Invalid source '{source}'. Expected one of: {}.",
                sources::ALL.join(", ")
            )));
        }

        if let Some(ref url) = self.issue_url
            && !is_http_url(url)
        {
            return Err(PlaylistError::Config(format!(
                "Issue URL '{url}' is not an http(s) URL."
            )));
        }

        if let Some(ref channels) = self.channels {
            if self.source_kind() == sources::ISSUE {
                return Err(PlaylistError::Config(format!(
                    "A channel list cannot be combined with source '{}'. Drop the channels or use source '{}'.",
                    sources::ISSUE,
                    sources::STATIC
                )));
            }

            for channel in channels {
                if let Some(field) = channel.field_with_control_char() {
                    return Err(PlaylistError::Config(format!(
                        "Channel {:?} has a control character in its {field}.",
                        channel.name
                    )));
                }
                if channel.name.trim().is_empty() {
                    return Err(PlaylistError::Config(format!(
                        "Channel with URL '{}' has an empty name.",
                        channel.url
                    )));
                }
                if !channel.has_http_url() {
                    return Err(PlaylistError::Config(format!(
                        "Channel '{}' has URL '{}'. Expected an http(s) URL.",
                        channel.name, channel.url
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Source
    pub source: Option<String>,        // --source
    pub issue_url: Option<String>,     // --issue-url
    pub channels_file: Option<String>, // --channels

    // Output
    pub output: Option<String>, // --output
    pub no_attribution: bool,   // --no-attribution

    // Probing
    pub concurrency: Option<usize>, // --concurrency
    pub timeout: Option<u64>,       // --timeout
    pub user_agent: Option<String>, // --user-agent
    pub no_validate: bool,          // --no-validate

    // Output & verbosity
    pub quiet: bool,       // --quiet
    pub verbose: bool,     // --verbose
    pub no_progress: bool, // --no-progress

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.timeout_duration(), Duration::from_secs(10));
        assert_eq!(config.concurrency_or_default(), 6);
        assert_eq!(config.output_path(), PathBuf::from("playlists/missouri.m3u8"));
        assert_eq!(config.source_kind(), "static");
        assert!(config.should_validate());
        assert_eq!(config.effective_attribution(), Some("DisabledAbel/Cvtv-m3u"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_load_from_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(
            b"timeout = 5\nconcurrency = 8\noutput = \"out/x.m3u8\"\n\n\
              [[channels]]\nname = \"KNLJ\"\nurl = \"https://x/knlj.m3u8\"\n\n\
              [[channels]]\nname = \"KPXE ION\"\nurl = \"https://x/ion.m3u8\"\ngroup = \"Subchannel\"\n",
        )?;

        let config = Config::load_from_file(file.path())?;

        assert_eq!(config.timeout, Some(5));
        assert_eq!(config.concurrency, Some(8));
        assert_eq!(config.output_path(), PathBuf::from("out/x.m3u8"));
        let channels = config.channels.unwrap();
        assert_eq!(channels.len(), 2);
        assert_eq!(channels[0].group, "Local");
        assert_eq!(channels[1].group, "Subchannel");

        Ok(())
    }

    #[test]
    fn test_config_load_from_file__invalid_toml() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"timeout = [")?;

        let err = Config::load_from_file(file.path()).unwrap_err();

        assert!(matches!(err, PlaylistError::Config(ref msg) if msg.contains("Invalid TOML")));
        Ok(())
    }

    #[test]
    fn test_config_load_from_file__missing() {
        let err = Config::load_from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, PlaylistError::Config(ref msg) if msg.contains("Could not read")));
    }

    #[test]
    fn test_load_channels_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(
            b"[[channels]]\nname = \"A\"\nurl = \"http://x/a.m3u8\"\n\n\
              [[channels]]\nname = \"B\"\nurl = \"http://x/b.m3u8\"\n",
        )?;

        let channels = Config::load_channels_file(file.path())?;

        assert_eq!(
            channels,
            vec![
                Channel::new("A", "http://x/a.m3u8"),
                Channel::new("B", "http://x/b.m3u8"),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_config_merge_with_cli() {
        let mut config = Config {
            timeout: Some(30),
            output: Some("from-file.m3u8".to_string()),
            ..Default::default()
        };
        let cli_config = CliConfig {
            timeout: Some(3),
            concurrency: Some(2),
            source: Some("issue".to_string()),
            no_validate: true,
            no_attribution: true,
            verbose: true,
            ..Default::default()
        };

        config.merge_with_cli(&cli_config);

        assert_eq!(config.timeout, Some(3));
        assert_eq!(config.concurrency, Some(2));
        assert_eq!(config.output, Some("from-file.m3u8".to_string()));
        assert_eq!(config.source_kind(), "issue");
        assert!(!config.should_validate());
        assert_eq!(config.effective_attribution(), None);
        assert_eq!(config.verbose, Some(true));
    }

    #[test]
    fn test_resolve__no_config_uses_cli_and_channels_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"[[channels]]\nname = \"A\"\nurl = \"http://x/a.m3u8\"\n")?;
        let cli_config = CliConfig {
            no_config: true,
            channels_file: Some(file.path().display().to_string()),
            timeout: Some(2),
            ..Default::default()
        };

        let config = Config::resolve(&cli_config)?;

        assert_eq!(config.timeout, Some(2));
        assert_eq!(config.channels, Some(vec![Channel::new("A", "http://x/a.m3u8")]));
        Ok(())
    }

    #[test]
    fn test_resolve__rejects_invalid_cli_values() {
        let cli_config = CliConfig {
            no_config: true,
            concurrency: Some(0),
            ..Default::default()
        };

        assert!(matches!(
            Config::resolve(&cli_config),
            Err(PlaylistError::Config(_))
        ));
    }

    #[test]
    fn test_validate__timeout_bounds() {
        let zero = Config {
            timeout: Some(0),
            ..Default::default()
        };
        assert!(zero.validate().is_err());

        let huge = Config {
            timeout: Some(probe::MAX_TIMEOUT_SECONDS + 1),
            ..Default::default()
        };
        assert!(huge.validate().is_err());
    }

    #[test]
    fn test_validate__concurrency_bounds() {
        let huge = Config {
            concurrency: Some(probe::MAX_CONCURRENCY + 1),
            ..Default::default()
        };
        assert!(huge.validate().is_err());

        let ok = Config {
            concurrency: Some(10),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_validate__source_kind() {
        let config = Config {
            source: Some("spreadsheet".to_string()),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(format!("{err}").contains("static, issue"));
    }

    #[test]
    fn test_validate__channel_urls() {
        let config = Config {
            channels: Some(vec![Channel::new("A", "rtmp://x/a")]),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            channels: Some(vec![Channel::new("  ", "http://x/a.m3u8")]),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate__empty_output_and_bad_issue_url() {
        let config = Config {
            output: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            issue_url: Some("api.github.com/repos/x".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            issue_url: Some("https://api.github.com/repos/o/r/issues/1\n".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate__url_with_embedded_newline_from_toml() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(
            b"[[channels]]\nname = \"Dead\"\nurl = \"http://x/dead.m3u8\\nhttp://evil/live.m3u8\"\n",
        )?;

        let config = Config::load_from_file(file.path())?;
        assert_eq!(
            config.channels.as_ref().map(|c| c[0].url.as_str()),
            Some("http://x/dead.m3u8\nhttp://evil/live.m3u8")
        );

        let err = config.validate().unwrap_err();
        assert!(format!("{err}").contains("control character in its url"));
        Ok(())
    }

    #[test]
    fn test_validate__control_characters_in_name_and_group() {
        let config = Config {
            channels: Some(vec![Channel::new(
                "KNLJ\nhttp://evil/live.m3u8",
                "http://x/knlj.m3u8",
            )]),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(format!("{err}").contains("control character in its name"));

        let config = Config {
            channels: Some(vec![Channel::with_group(
                "KNLJ",
                "http://x/knlj.m3u8",
                "Local\u{7}",
            )]),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(format!("{err}").contains("control character in its group"));
    }

    #[test]
    fn test_validate__channels_rejected_with_issue_source() {
        let config = Config {
            source: Some("issue".to_string()),
            channels: Some(vec![Channel::new("A", "http://x/a.m3u8")]),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(format!("{err}").contains("cannot be combined with source 'issue'"));

        let config = Config {
            source: Some("static".to_string()),
            channels: Some(vec![Channel::new("A", "http://x/a.m3u8")]),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_resolve__channels_file_with_issue_source() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"[[channels]]\nname = \"A\"\nurl = \"http://x/a.m3u8\"\n")?;
        let cli_config = CliConfig {
            no_config: true,
            source: Some("issue".to_string()),
            channels_file: Some(file.path().display().to_string()),
            ..Default::default()
        };

        assert!(matches!(
            Config::resolve(&cli_config),
            Err(PlaylistError::Config(_))
        ));
        Ok(())
    }
}
