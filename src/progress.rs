//! Terminal progress reporting for file downloads.
//!
//! One carriage-return line per download, redrawn as chunks arrive.
//! Carousel items skip the bar and report per-file instead.

use std::io::{self, Write};
use std::time::Instant;

use crate::core::utils::format_size;

const BAR_BLOCKS: usize = 40;

/// In-place progress line for a single file.
pub struct ProgressBar {
    total: u64,
    downloaded: u64,
    desc: &'static str,
    started: Instant,
}

impl ProgressBar {
    /// Creates a bar for a file of known size.
    pub fn new(total_size: u64) -> Self {
        Self {
            total: total_size,
            downloaded: 0,
            desc: "Downloading",
            started: Instant::now(),
        }
    }

    /// Records a received chunk and redraws the line.
    pub fn update(&mut self, chunk_size: u64) {
        self.downloaded += chunk_size;
        if self.total == 0 {
            return;
        }

        let elapsed = self.started.elapsed().as_secs_f64();
        let speed = self.downloaded as f64 / (elapsed + 0.001);
        print!(
            "\r{}",
            render_progress_line(self.desc, self.downloaded, self.total, speed)
        );
        let _ = io::stdout().flush();
    }

    /// Terminates the in-place line.
    pub fn finish(&self) {
        println!();
    }
}

/// Renders the block bar, e.g. `|████████░░…|`.
fn create_progress_bar(downloaded: u64, total: u64) -> String {
    let filled = if total == 0 {
        0
    } else {
        ((downloaded as f64 / total as f64) * BAR_BLOCKS as f64) as usize
    };
    let filled = filled.min(BAR_BLOCKS);
    format!(
        "|{}{}|",
        "█".repeat(filled),
        "░".repeat(BAR_BLOCKS - filled)
    )
}

fn render_progress_line(desc: &str, downloaded: u64, total: u64, speed: f64) -> String {
    let percent = (downloaded as f64 / total as f64) * 100.0;
    format!(
        "{}: {} {:.1}% {}/{} @ {}/s",
        desc,
        create_progress_bar(downloaded, total),
        percent,
        format_size(downloaded),
        format_size(total),
        format_size(speed as u64)
    )
}
