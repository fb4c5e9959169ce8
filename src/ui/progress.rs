use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::OnceLock;
use std::time::Duration;

/// Progress bar for the probing phase, drawn on stderr.
///
/// All methods take `&self` so concurrent probes can share one reporter.
pub struct ProgressReporter {
    bar: OnceLock<ProgressBar>,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self {
            bar: OnceLock::new(),
            enabled,
        }
    }

    pub fn start_probing(&self, total_channels: usize) {
        if !self.enabled {
            return;
        }

        let pb = ProgressBar::with_draw_target(
            Some(total_channels as u64),
            ProgressDrawTarget::stderr(),
        );
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.yellow/red}] {pos}/{len} {msg}",
        ) {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.set_message("Probing channels");
        pb.enable_steady_tick(Duration::from_millis(120));
        let _ = self.bar.set(pb);
    }

    pub fn advance(&self) {
        if let Some(pb) = self.bar.get() {
            pb.inc(1);
        }
    }

    pub fn finish_probing(&self, reachable: usize, total: usize) {
        if let Some(pb) = self.bar.get() {
            let message = if reachable == total {
                "✓ All channels reachable".to_string()
            } else {
                format!("✓ Probing complete ({reachable}/{total} reachable)")
            };
            pb.finish_with_message(message);
        }
    }
}
