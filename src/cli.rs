//! Command-line argument parsing and console reporting.

use clap::Parser;
use std::path::PathBuf;

use crate::core::error::AppError;
use crate::download::Quality;

const AFTER_HELP: &str = "\
Examples:
  Download a reel:
    instagrab https://www.instagram.com/reel/ABC123/

  Download a post:
    instagrab https://www.instagram.com/p/ABC123/

  Download profile picture:
    instagrab https://www.instagram.com/username/

  Download with custom output:
    instagrab https://www.instagram.com/reel/ABC123/ -o my_video.mp4

  List available formats:
    instagrab https://www.instagram.com/reel/ABC123/ --list-formats

  Enable verbose logging:
    instagrab https://www.instagram.com/reel/ABC123/ -v

Supported Content:
  ✓ Reels (with audio)
  ✓ Video posts (with audio)
  ✓ Image posts (single & carousel)
  ✓ Profile pictures
  ✗ Stories (requires authentication)
  ✗ Highlights (requires authentication)
  ✗ Private accounts (not supported)

Note: This tool only works with PUBLIC Instagram content.";

#[derive(Parser, Debug)]
#[command(name = "instagrab")]
#[command(author, version, about = "Command-line downloader for public Instagram posts, reels and profile pictures", long_about = None)]
#[command(after_help = AFTER_HELP)]
pub struct Args {
    /// Instagram URL (post, reel, or profile)
    pub url: String,

    /// Output file or directory path
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Video quality preference
    #[arg(short, long, value_enum, default_value_t = Quality::Best)]
    pub quality: Quality,

    /// Enable verbose/debug output
    #[arg(short, long)]
    pub verbose: bool,

    /// List all available formats without downloading
    #[arg(long)]
    pub list_formats: bool,

    /// Disable rate limiting (not recommended)
    #[arg(long)]
    pub no_rate_limit: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Prints the startup banner. Skipped for `--list-formats` so the format
/// table stays clean.
pub fn print_banner() {
    let title = format!("instagrab v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║{:^63}║", title);
    println!("║{:^63}║", "Instagram Media Downloader");
    println!("║{:^63}║", "(Public Content Only)");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
}

/// Reports a failure to stderr with a class prefix and, where it helps,
/// a recovery tip.
pub fn report_error(error: &AppError) {
    match error {
        AppError::Validation(msg) => {
            eprintln!("\n[instagrab] ✗ Invalid input: {}", msg);
        }
        AppError::RateLimit(msg) => {
            eprintln!("\n[instagrab] ✗ Rate limit error: {}", msg);
            eprintln!("Tip: Wait a few minutes before trying again.");
        }
        AppError::Network(msg) => {
            eprintln!("\n[instagrab] ✗ Network error: {}", msg);
            eprintln!("Tip: Check your internet connection and try again.");
        }
        AppError::Download(msg) => {
            eprintln!("\n[instagrab] ✗ Download failed: {}", msg);
        }
    }
}
