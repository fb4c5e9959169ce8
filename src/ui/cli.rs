// Command-line interface definitions and parsing for cvtv-playlist

use crate::config::CliConfig;
use crate::core::constants::sources;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    // Source
    /// Where channels come from
    #[arg(long, value_name = "KIND", value_parser = sources::ALL, help_heading = "Source")]
    pub source: Option<String>,

    /// GitHub API URL of the issue listing channels (with --source issue)
    #[arg(long, value_name = "URL", help_heading = "Source")]
    pub issue_url: Option<String>,

    /// TOML file of [[channels]] replacing the built-in list
    #[arg(long, value_name = "FILE", help_heading = "Source")]
    pub channels: Option<String>,

    // Output
    /// Playlist file to write (default: playlists/missouri.m3u8)
    #[arg(short = 'o', long, value_name = "PATH", help_heading = "Output")]
    pub output: Option<String>,

    /// Leave out the "# Source:" attribution line
    #[arg(long, help_heading = "Output")]
    pub no_attribution: bool,

    // Probing
    /// Concurrent probes (default: 6)
    #[arg(long, value_name = "COUNT", help_heading = "Probing")]
    pub concurrency: Option<usize>,

    /// Per-request timeout in seconds (default: 10)
    #[arg(short = 't', long, value_name = "SECONDS", help_heading = "Probing")]
    pub timeout: Option<u64>,

    /// Custom User-Agent header
    #[arg(long, value_name = "AGENT", help_heading = "Probing")]
    pub user_agent: Option<String>,

    /// Publish every channel without probing it
    #[arg(long, help_heading = "Probing")]
    pub no_validate: bool,

    // Output & Verbosity
    /// Suppress progress and summary output
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Disable the progress bar
    #[arg(long, help_heading = "Output & Verbosity")]
    pub no_progress: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

/// Convert derive-based CLI arguments directly to CliConfig structure
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        source: cli.source.clone(),
        issue_url: cli.issue_url.clone(),
        channels_file: cli.channels.clone(),
        output: cli.output.clone(),
        no_attribution: cli.no_attribution,
        concurrency: cli.concurrency,
        timeout: cli.timeout,
        user_agent: cli.user_agent.clone(),
        no_validate: cli.no_validate,
        quiet: cli.quiet,
        verbose: cli.verbose,
        no_progress: cli.no_progress,
        config_file: cli.config.clone(),
        no_config: cli.no_config,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_is_valid() {
        let cli = Cli::try_parse_from(["cvtv-playlist"]).unwrap();
        let config = cli_to_config(&cli);

        assert!(config.source.is_none());
        assert!(config.output.is_none());
        assert!(!config.no_validate);
        assert!(!config.quiet);
    }

    #[test]
    fn test_all_arguments() {
        let cli = Cli::try_parse_from([
            "cvtv-playlist",
            "--source",
            "issue",
            "--issue-url",
            "https://api.github.com/repos/o/r/issues/2",
            "--channels",
            "channels.toml",
            "-o",
            "out/list.m3u8",
            "--no-attribution",
            "--concurrency",
            "4",
            "-t",
            "3",
            "--user-agent",
            "agent/2",
            "--no-validate",
            "-q",
            "-v",
            "--no-progress",
            "--config",
            "conf.toml",
            "--no-config",
        ])
        .unwrap();

        let config = cli_to_config(&cli);

        assert_eq!(config.source.as_deref(), Some("issue"));
        assert_eq!(
            config.issue_url.as_deref(),
            Some("https://api.github.com/repos/o/r/issues/2")
        );
        assert_eq!(config.channels_file.as_deref(), Some("channels.toml"));
        assert_eq!(config.output.as_deref(), Some("out/list.m3u8"));
        assert!(config.no_attribution);
        assert_eq!(config.concurrency, Some(4));
        assert_eq!(config.timeout, Some(3));
        assert_eq!(config.user_agent.as_deref(), Some("agent/2"));
        assert!(config.no_validate);
        assert!(config.quiet);
        assert!(config.verbose);
        assert!(config.no_progress);
        assert_eq!(config.config_file.as_deref(), Some("conf.toml"));
        assert!(config.no_config);
    }

    #[test]
    fn test_unknown_source_is_rejected() {
        assert!(Cli::try_parse_from(["cvtv-playlist", "--source", "rss"]).is_err());
    }

    #[test]
    fn test_non_numeric_timeout_is_rejected() {
        assert!(Cli::try_parse_from(["cvtv-playlist", "--timeout", "soon"]).is_err());
    }
}
