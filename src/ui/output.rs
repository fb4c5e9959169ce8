use std::path::PathBuf;

/// Counts reported at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub total: usize,
    pub reachable: usize,
    pub validated: bool,
}

impl RunSummary {
    pub fn unreachable(&self) -> usize {
        self.total - self.reachable
    }

    pub fn summary_line(&self) -> String {
        format!(
            "Playlist written: {}  (ok: {}, failed: {})",
            self.output_path.display(),
            self.reachable,
            self.unreachable()
        )
    }
}

/// Line printed before probing starts.
pub fn validation_banner(channel_count: usize, concurrency: usize) -> String {
    format!("Validating {channel_count} channels (concurrency={concurrency})...")
}

pub fn display_validation_banner(channel_count: usize, concurrency: usize) {
    println!("{}", validation_banner(channel_count, concurrency));
}

pub fn display_skipped_validation(channel_count: usize) {
    println!("Skipping validation; publishing {channel_count} channels as-is");
}

/// Note printed under the summary line, if any.
pub fn summary_note(summary: &RunSummary) -> Option<String> {
    if !summary.validated {
        Some(format!(
            "Channels were not validated; all {} are published live.",
            summary.total
        ))
    } else if summary.unreachable() > 0 {
        Some(format!(
            "Some channels failed; they are included commented out in {}.",
            summary.output_path.display()
        ))
    } else {
        None
    }
}

pub fn display_summary(summary: &RunSummary) {
    println!("{}", summary.summary_line());

    if let Some(note) = summary_note(summary) {
        println!("{note}");
    }
}
