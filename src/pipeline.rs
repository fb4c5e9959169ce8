//! One playlist run: load channels, probe them, render, write.

use chrono::{DateTime, Utc};
use std::time::Instant;

use crate::config::Config;
use crate::core::constants::sources;
use crate::core::{Channel, Result};
use crate::playlist::{RenderOptions, render_playlist, write_atomic};
use crate::reporting::logging;
use crate::source::{ChannelSource, IssueSource, StaticSource};
use crate::ui::output;
use crate::ui::{ProgressReporter, RunSummary};
use crate::validation::{ProbeChannels, ProbeSettings, ValidationResult, Validator, build_client};

/// Pick the channel source the configuration asks for.
pub fn build_source(config: &Config, client: reqwest::Client) -> Box<dyn ChannelSource + Send + Sync> {
    match config.source_kind() {
        sources::ISSUE => Box::new(IssueSource::new(
            client,
            config.issue_url_or_default(),
            config.issue_group_or_default(),
        )),
        _ => match config.channels {
            Some(ref channels) => Box::new(StaticSource::new(channels.clone())),
            None => Box::new(StaticSource::default()),
        },
    }
}

/// Probe the channels, or mark them all reachable when validation is off.
pub async fn validate_channels(
    channels: Vec<Channel>,
    validator: &Validator,
    enabled: bool,
    progress: Option<&ProgressReporter>,
) -> Vec<ValidationResult> {
    if !enabled {
        return channels.into_iter().map(ValidationResult::unchecked).collect();
    }

    let total = channels.len();
    logging::log_validation_start(total, validator.settings().concurrency);
    let started = Instant::now();

    let results = validator.probe_channels(channels, progress).await;

    let reachable = results.iter().filter(|r| r.is_reachable()).count();
    logging::log_validation_complete(reachable, total, started.elapsed().as_millis());
    results
}

/// Render and atomically write the playlist, returning the run summary.
pub fn publish(
    config: &Config,
    results: &[ValidationResult],
    generated_at: DateTime<Utc>,
) -> Result<RunSummary> {
    let contents = render_playlist(
        results,
        &RenderOptions {
            generated_at,
            attribution: config.effective_attribution(),
        },
    );

    let output_path = config.output_path();
    write_atomic(&output_path, &contents)?;
    logging::log_playlist_written(&output_path, contents.len());

    Ok(RunSummary {
        output_path,
        total: results.len(),
        reachable: results.iter().filter(|r| r.is_reachable()).count(),
        validated: config.should_validate(),
    })
}

/// Run the whole pipeline for `config`.
///
/// Only a failed source fetch or a failed write is an error; the caller
/// reports it. Unreachable channels end up commented out in the playlist.
pub async fn run(
    config: &Config,
    progress: Option<&ProgressReporter>,
    quiet: bool,
) -> Result<RunSummary> {
    let settings = ProbeSettings::from(config);
    let client = build_client(&settings)?;

    let source = build_source(config, client.clone());
    let channels = source.load().await?;
    logging::log_source_info(&source.describe(), channels.len());

    if !quiet {
        if config.should_validate() {
            output::display_validation_banner(channels.len(), settings.concurrency);
        } else {
            output::display_skipped_validation(channels.len());
        }
    }

    let validator = Validator::new(client, settings);
    let results =
        validate_channels(channels, &validator, config.should_validate(), progress).await;

    publish(config, &results, Utc::now())
}
