use dotenvy::dotenv;
use std::process::ExitCode;
use tokio::signal;

use instagrab::app::Downloader;
use instagrab::cli::{self, Args};
use instagrab::core::error::AppResult;
use instagrab::core::init_logger;

/// Main entry point for the downloader CLI.
///
/// Parses arguments, sets up logging, then runs the requested operation
/// with Ctrl-C turned into a distinct "cancelled" exit (130) instead of a
/// generic failure.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse_args();

    // Load environment variables from .env if present, before any config
    // Lazy is first read
    let _ = dotenv();

    if let Err(e) = init_logger(args.verbose) {
        eprintln!("Failed to initialize logger: {}", e);
        return ExitCode::FAILURE;
    }

    if !args.list_formats {
        cli::print_banner();
    }

    tokio::select! {
        result = run(&args) => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                cli::report_error(&e);
                ExitCode::from(1)
            }
        },
        _ = signal::ctrl_c() => {
            eprintln!("\n\n[instagrab] ⚠ Download cancelled by user");
            ExitCode::from(130)
        }
    }
}

async fn run(args: &Args) -> AppResult<()> {
    let mut downloader = Downloader::new(!args.no_rate_limit)?;

    if args.list_formats {
        downloader.list_formats(&args.url).await
    } else {
        downloader
            .download(&args.url, args.output.as_deref(), args.quality)
            .await?;
        Ok(())
    }
}
