//! Instagrab - command-line downloader for public Instagram content
//!
//! This library provides all the functionality behind the `instagrab`
//! binary: URL recognition, the multi-strategy extraction cascade,
//! format selection, and streaming downloads.
//!
//! # Module Structure
//!
//! - `core`: Configuration, errors, logging, retry, and rate limiting
//! - `extract`: HTTP session and the extraction strategy cascade
//! - `download`: Format selection and file downloads
//! - `media`: The media metadata model
//! - `app`: The downloader facade driven by the CLI
//! - `cli`: Argument parsing and console reporting

pub mod app;
pub mod cli;
pub mod core;
pub mod download;
pub mod extract;
pub mod media;
pub mod progress;

// Re-export commonly used types for convenience
pub use app::Downloader;
pub use crate::core::{AppError, AppResult};
pub use media::{MediaInfo, MediaType};
