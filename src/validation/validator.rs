use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, RANGE};
use reqwest::redirect::Policy;
use std::fmt;
use std::time::Duration;

use crate::config::Config;
use crate::core::constants::{probe, stream};
use crate::core::error::error_reason;
use crate::core::{Channel, ChannelProbeError, PlaylistError, Result};
use crate::reporting::logging;
use crate::ui::ProgressReporter;
use crate::validation::pool::map_bounded;

#[async_trait]
pub trait ProbeChannels {
    /// Probe every channel; the result at index `i` belongs to `channels[i]`.
    async fn probe_channels(
        &self,
        channels: Vec<Channel>,
        progress: Option<&ProgressReporter>,
    ) -> Vec<ValidationResult>;
}

/// Knobs for a probing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeSettings {
    pub concurrency: usize,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            concurrency: probe::DEFAULT_CONCURRENCY,
            timeout: Duration::from_secs(probe::DEFAULT_TIMEOUT_SECONDS),
            user_agent: default_user_agent().to_string(),
        }
    }
}

impl From<&Config> for ProbeSettings {
    fn from(config: &Config) -> Self {
        Self {
            concurrency: config.concurrency_or_default(),
            timeout: config.timeout_duration(),
            user_agent: config
                .user_agent
                .clone()
                .unwrap_or_else(|| default_user_agent().to_string()),
        }
    }
}

pub fn default_user_agent() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"))
}

/// Build the HTTP client shared by the issue source and the probes.
pub fn build_client(settings: &ProbeSettings) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(settings.timeout)
        .redirect(Policy::limited(probe::MAX_REDIRECTS))
        .user_agent(settings.user_agent.as_str())
        .pool_max_idle_per_host(settings.concurrency.min(20))
        .pool_idle_timeout(Duration::from_secs(30))
        .build()
        .map_err(PlaylistError::from)
}

/// Verdict for one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Reachable,
    Unreachable(ChannelProbeError),
}

/// What a probe learned about one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub channel: Channel,
    pub status_code: Option<u16>,
    pub content_type: Option<String>,
    pub outcome: ProbeOutcome,
}

impl ValidationResult {
    pub fn is_reachable(&self) -> bool {
        matches!(self.outcome, ProbeOutcome::Reachable)
    }

    /// Failure reason, if the channel was judged unreachable.
    pub fn failure(&self) -> Option<&ChannelProbeError> {
        match &self.outcome {
            ProbeOutcome::Reachable => None,
            ProbeOutcome::Unreachable(reason) => Some(reason),
        }
    }

    /// Result for a channel that is published without probing.
    pub fn unchecked(channel: Channel) -> Self {
        Self {
            channel,
            status_code: None,
            content_type: None,
            outcome: ProbeOutcome::Reachable,
        }
    }

    /// Result for a probe that never got a response.
    pub fn failed(channel: Channel, reason: ChannelProbeError) -> Self {
        Self {
            channel,
            status_code: None,
            content_type: None,
            outcome: ProbeOutcome::Unreachable(reason),
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.outcome {
            ProbeOutcome::Reachable => match self.status_code {
                Some(status) => write!(f, "{} - {} - {}", status, self.channel.name, self.channel.url),
                None => write!(f, "unchecked - {} - {}", self.channel.name, self.channel.url),
            },
            ProbeOutcome::Unreachable(reason) => {
                write!(f, "{} - {} - {}", self.channel.name, self.channel.url, reason)
            }
        }
    }
}

/// Decide whether a response looks like a live HLS stream.
///
/// Servers often mislabel playlists, so a 2xx answer counts when the content
/// type mentions mpegurl, when the URL itself ends in `.m3u8`, or when the
/// server at least announced a body length.
pub fn classify(
    url: &str,
    status: StatusCode,
    content_type: Option<&str>,
    has_content_length: bool,
) -> ProbeOutcome {
    if !status.is_success() {
        return ProbeOutcome::Unreachable(ChannelProbeError::HttpStatus(status.as_u16()));
    }

    let mpegurl = content_type
        .map(|ct| ct.to_ascii_lowercase().contains(stream::MPEGURL_MARKER))
        .unwrap_or(false);
    let hls_url = url.to_ascii_lowercase().ends_with(stream::HLS_EXTENSION);

    if mpegurl || hls_url || has_content_length {
        ProbeOutcome::Reachable
    } else {
        ProbeOutcome::Unreachable(ChannelProbeError::NotAStream {
            status: status.as_u16(),
            content_type: content_type.map(str::to_string),
        })
    }
}

/// Probes channels over HTTP with a byte-range GET.
#[derive(Debug, Clone)]
pub struct Validator {
    client: reqwest::Client,
    settings: ProbeSettings,
}

impl Validator {
    pub fn new(client: reqwest::Client, settings: ProbeSettings) -> Self {
        Self { client, settings }
    }

    /// Build a validator with its own client.
    pub fn from_settings(settings: ProbeSettings) -> Result<Self> {
        let client = build_client(&settings)?;
        Ok(Self::new(client, settings))
    }

    pub fn settings(&self) -> &ProbeSettings {
        &self.settings
    }

    /// Probe one channel. Never fails: every error becomes an unreachable result.
    pub async fn probe(&self, channel: Channel) -> ValidationResult {
        let request = self
            .client
            .get(&channel.url)
            .header(RANGE, probe::RANGE_HEADER_VALUE)
            .timeout(self.settings.timeout);

        let result = match request.send().await {
            Ok(response) => {
                let status = response.status();
                let content_type = response
                    .headers()
                    .get(CONTENT_TYPE)
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_string);
                let has_content_length = response.headers().contains_key(CONTENT_LENGTH);
                let outcome = classify(
                    &channel.url,
                    status,
                    content_type.as_deref(),
                    has_content_length,
                );

                ValidationResult {
                    channel,
                    status_code: Some(status.as_u16()),
                    content_type,
                    outcome,
                }
            }
            Err(err) if err.is_timeout() => {
                ValidationResult::failed(channel, ChannelProbeError::Timeout(self.settings.timeout))
            }
            Err(err) => {
                ValidationResult::failed(channel, ChannelProbeError::Network(error_reason(&err)))
            }
        };

        logging::log_probe_result(&result);
        result
    }
}

#[async_trait]
impl ProbeChannels for Validator {
    async fn probe_channels(
        &self,
        channels: Vec<Channel>,
        progress: Option<&ProgressReporter>,
    ) -> Vec<ValidationResult> {
        if let Some(prog) = progress {
            prog.start_probing(channels.len());
        }

        let results = map_bounded(channels, self.settings.concurrency, |_, channel| async move {
            let result = self.probe(channel).await;
            if let Some(prog) = progress {
                prog.advance();
            }
            result
        })
        .await;

        if let Some(prog) = progress {
            let reachable = results.iter().filter(|r| r.is_reachable()).count();
            prog.finish_probing(reachable, results.len());
        }

        results
    }
}
