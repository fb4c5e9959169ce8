use async_trait::async_trait;
use serde::Deserialize;

use crate::core::constants::issue;
use crate::core::error::error_reason;
use crate::core::{Channel, PlaylistError, Result};
use crate::source::ChannelSource;

/// The part of a GitHub issue payload we read.
#[derive(Debug, Deserialize)]
struct IssuePayload {
    body: Option<String>,
}

/// Channels listed in the body of a GitHub issue.
///
/// The issue is fetched once per [`ChannelSource::load`] call and scanned with
/// [`parse_issue_body`].
pub struct IssueSource {
    client: reqwest::Client,
    url: String,
    group: String,
}

impl IssueSource {
    pub fn new(client: reqwest::Client, url: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            group: group.into(),
        }
    }

    async fn fetch_body(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, issue::ACCEPT_HEADER)
            .send()
            .await
            .map_err(|err| {
                PlaylistError::SourceFetch(format!("GET {} failed: {}", self.url, error_reason(&err)))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlaylistError::SourceFetch(format!(
                "GET {} returned http {}",
                self.url,
                status.as_u16()
            )));
        }

        let payload: IssuePayload = response.json().await.map_err(|err| {
            PlaylistError::SourceFetch(format!(
                "could not decode issue from {}: {}",
                self.url,
                error_reason(&err)
            ))
        })?;

        payload
            .body
            .ok_or_else(|| PlaylistError::EmptyBody(self.url.clone()))
    }
}

#[async_trait]
impl ChannelSource for IssueSource {
    async fn load(&self) -> Result<Vec<Channel>> {
        let body = self.fetch_body().await?;
        let channels = parse_issue_body(&body, &self.group);
        log::info!("Parsed {} channel(s) from {}", channels.len(), self.url);
        Ok(channels)
    }

    fn describe(&self) -> String {
        format!("issue {}", self.url)
    }
}

/// Scan free-form issue text for channels.
///
/// A non-blank line that is neither a URL nor a markdown heading names the
/// channels on the URL lines that follow it. URL lines seen before any name
/// line are called "Unknown".
pub fn parse_issue_body(body: &str, group: &str) -> Vec<Channel> {
    let mut channels = Vec::new();
    let mut last_name: Option<&str> = None;

    for line in body.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with("http") {
            let name = last_name.unwrap_or(issue::UNKNOWN_NAME);
            channels.push(Channel::with_group(name, line, group));
        } else {
            last_name = Some(line);
        }
    }

    channels
}
