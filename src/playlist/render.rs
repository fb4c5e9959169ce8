use chrono::{DateTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::Channel;
use crate::validation::{ProbeOutcome, ValidationResult};

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static SLUG_DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_.\-]").unwrap());

/// Values that vary between runs, injected so rendering stays deterministic.
#[derive(Debug, Clone)]
pub struct RenderOptions<'a> {
    pub generated_at: DateTime<Utc>,
    pub attribution: Option<&'a str>,
}

/// Derive a `tvg-id` from a channel name: `"KOMU CW"` becomes `komu_cw`.
pub fn slugify(name: &str) -> String {
    let lower = name.to_lowercase();
    let underscored = WHITESPACE_RUN.replace_all(&lower, "_");
    SLUG_DISALLOWED.replace_all(&underscored, "").into_owned()
}

/// M3U attributes have no escape syntax, so a `"` inside a value becomes `'`.
fn attribute_value(value: &str) -> String {
    value.replace('"', "'")
}

pub fn extinf_line(channel: &Channel) -> String {
    format!(
        "#EXTINF:-1 tvg-id=\"{}\" tvg-name=\"{}\" group-title=\"{}\",{}",
        slugify(&channel.name),
        attribute_value(&channel.name),
        attribute_value(&channel.group),
        channel.name
    )
}

/// Render the whole playlist in input order.
///
/// Reachable channels become a normal EXTINF/URL pair. Unreachable ones keep
/// the same lines behind `# ` plus a reason comment, so they can be switched
/// back on by hand.
pub fn render_playlist(results: &[ValidationResult], options: &RenderOptions) -> String {
    let mut out = String::with_capacity(128 + results.len() * 192);

    out.push_str("#EXTM3U\n");
    out.push_str(&format!(
        "# Generated: {}\n",
        options
            .generated_at
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    ));
    if let Some(attribution) = options.attribution {
        out.push_str(&format!("# Source: {attribution}\n"));
    }
    out.push('\n');

    for result in results {
        let channel = &result.channel;
        match &result.outcome {
            ProbeOutcome::Reachable => {
                out.push_str(&extinf_line(channel));
                out.push('\n');
                out.push_str(&channel.url);
                out.push('\n');
            }
            ProbeOutcome::Unreachable(reason) => {
                out.push_str(&format!("# {} -- failed ({})\n", channel.name, reason));
                out.push_str(&format!("# {}\n", extinf_line(channel)));
                out.push_str(&format!("# {}\n", channel.url));
            }
        }
        out.push('\n');
    }

    out
}
