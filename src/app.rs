//! The downloader facade: URL routing, extraction, selection, downloads.
//!
//! Ties the pieces together the way the CLI drives them. Console output
//! (banner block, per-file lines, summary) lives here; diagnostics go
//! through `log`.

use std::path::{Path, PathBuf};

use crate::core::config;
use crate::core::error::{AppError, AppResult};
use crate::core::rate_limiter::RateLimiter;
use crate::core::validation::{sanitize_filename, validate_url};
use crate::download::{FileDownloader, Quality, select_format};
use crate::extract::urls::{extract_shortcode, extract_username};
use crate::extract::{Endpoints, Session, extract_media, extract_profile};
use crate::media::MediaInfo;

/// Public-content Instagram downloader.
///
/// Supports reels, posts (single and carousel), and profile pictures.
/// No authentication; private accounts are out of reach by design.
pub struct Downloader {
    session: Session,
    files: FileDownloader,
    rate_limiter: Option<RateLimiter>,
}

impl Downloader {
    /// Creates a downloader against the real Instagram hosts.
    pub fn new(rate_limit: bool) -> AppResult<Self> {
        Self::with_endpoints(Endpoints::default(), rate_limit)
    }

    /// Creates a downloader against custom endpoint bases.
    pub fn with_endpoints(endpoints: Endpoints, rate_limit: bool) -> AppResult<Self> {
        Ok(Self {
            session: Session::with_endpoints(endpoints)?,
            files: FileDownloader::new()?,
            rate_limiter: rate_limit.then(RateLimiter::new),
        })
    }

    /// Resolves a URL to media information without downloading anything.
    ///
    /// Validates the URL, consults the rate limiter once, then routes to
    /// the profile or post cascade.
    pub async fn get_info(&mut self, url: &str) -> AppResult<MediaInfo> {
        validate_url(url)?;

        if let Some(limiter) = &self.rate_limiter {
            limiter.acquire().await;
        }

        if let Some(username) = extract_username(url) {
            log::debug!("Detected profile URL");
            extract_profile(&mut self.session, &username).await
        } else if let Some(shortcode) = extract_shortcode(url) {
            log::debug!("Detected media URL");
            extract_media(&mut self.session, &shortcode).await
        } else {
            Err(AppError::Download(
                "Unsupported URL format. Use post/reel/profile URL.".to_string(),
            ))
        }
    }

    /// Downloads the media behind a URL, returning the written paths.
    ///
    /// `output`: an existing directory means "put files there"; any other
    /// path is taken as an explicit file name for single-file downloads.
    pub async fn download(
        &mut self,
        url: &str,
        output: Option<&Path>,
        quality: Quality,
    ) -> AppResult<Vec<PathBuf>> {
        let info = self.get_info(url).await?;
        let (output_dir, explicit_file) = resolve_output(output);

        println!("\n{}", "=".repeat(70));
        println!("Title: {}", info.title);
        println!("Uploader: @{}", info.uploader);
        println!("Type: {}", info.media_type);
        println!("{}\n", "=".repeat(70));

        let mut downloaded = Vec::new();

        if !info.formats.is_empty() {
            let format = select_format(&info.formats, quality)
                .ok_or_else(|| AppError::Download("No suitable video format found".to_string()))?;

            let path = explicit_file.unwrap_or_else(|| {
                output_dir.join(format!("{}_{}.mp4", sanitize_filename(&info.title), info.id))
            });

            println!(
                "Resolution: {}x{}",
                dimension_label(format.width),
                dimension_label(format.height)
            );
            println!("Audio: {}", if format.has_audio { "✓ YES" } else { "✗ NO" });
            println!("Output: {}\n", path.display());

            self.files.download_file(&format.url, &path, true).await?;
            downloaded.push(path);
        } else if !info.images.is_empty() {
            if info.images.len() == 1 {
                let path = explicit_file.unwrap_or_else(|| {
                    output_dir.join(format!("{}_{}.jpg", sanitize_filename(&info.title), info.id))
                });

                println!("Output: {}\n", path.display());
                self.files
                    .download_file(&info.images[0].url, &path, true)
                    .await?;
                downloaded.push(path);
            } else {
                println!("Downloading {} images from carousel...\n", info.images.len());

                let safe_title = sanitize_filename(&info.title);
                let count = info.images.len();
                for (idx, image) in info.images.iter().enumerate() {
                    let filename = format!("{}_{}_{:02}.jpg", safe_title, info.id, idx + 1);
                    let path = output_dir.join(&filename);

                    println!("[{}/{}] {}", idx + 1, count, filename);
                    self.files.download_file(&image.url, &path, false).await?;
                    downloaded.push(path);
                    println!();
                }
            }
        } else {
            return Err(AppError::Download(
                "No downloadable content found".to_string(),
            ));
        }

        println!("{}", "=".repeat(70));
        println!("✓ Download complete!");
        println!("Files saved: {}", downloaded.len());
        for file in &downloaded {
            println!("  - {}", file.display());
        }
        println!("{}\n", "=".repeat(70));

        Ok(downloaded)
    }

    /// Prints the available formats for a URL without downloading.
    pub async fn list_formats(&mut self, url: &str) -> AppResult<()> {
        let info = self.get_info(url).await?;

        println!("\nMedia: {}", info.title);
        println!("Uploader: @{}", info.uploader);
        println!("Type: {}", info.media_type);
        println!("{}\n", "=".repeat(70));

        if !info.formats.is_empty() {
            println!("Video Formats:");
            for format in &info.formats {
                let audio = if format.has_audio {
                    "🔊 WITH AUDIO"
                } else {
                    "🔇 NO AUDIO"
                };
                println!(
                    "  {}: {}x{} [{}]",
                    format.format_id,
                    dimension_label(format.width),
                    dimension_label(format.height),
                    audio
                );
            }
            println!();
        }

        if !info.images.is_empty() {
            println!("Images: {} image(s)", info.images.len());
            for (idx, image) in info.images.iter().enumerate() {
                println!(
                    "  [{}] {}x{}",
                    idx + 1,
                    dimension_label(image.width),
                    dimension_label(image.height)
                );
            }
            println!();
        }

        if let Some(thumbnail) = &info.thumbnail {
            let short: String = thumbnail.chars().take(60).collect();
            println!("Thumbnail: {}...", short);
            println!();
        }

        Ok(())
    }
}

/// Splits `-o` into (directory, explicit file). An existing directory
/// routes files into it; anything else is a single-file target and the
/// directory falls back to the default.
fn resolve_output(output: Option<&Path>) -> (PathBuf, Option<PathBuf>) {
    if let Some(path) = output {
        if path.is_dir() {
            return (path.to_path_buf(), None);
        }
        return (default_output_dir(), Some(path.to_path_buf()));
    }
    (default_output_dir(), None)
}

fn default_output_dir() -> PathBuf {
    if let Some(dir) = config::OUTPUT_DIR.as_ref() {
        return PathBuf::from(dir);
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn dimension_label(value: Option<u32>) -> String {
    value.map_or_else(|| "?".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_info_rejects_foreign_hosts() {
        let mut downloader = Downloader::new(false).expect("downloader");
        let err = downloader
            .get_info("https://evil.com/p/ABC123/")
            .await
            .expect_err("should fail");
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_info_rejects_unrecognized_paths() {
        let mut downloader = Downloader::new(false).expect("downloader");
        let err = downloader
            .get_info("https://www.instagram.com/explore/tags/cats/")
            .await
            .expect_err("should fail");
        match err {
            AppError::Download(msg) => {
                assert_eq!(msg, "Unsupported URL format. Use post/reel/profile URL.")
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_resolve_output_explicit_file() {
        let (dir, file) = resolve_output(Some(Path::new("/nonexistent/video.mp4")));
        assert_eq!(file.as_deref(), Some(Path::new("/nonexistent/video.mp4")));
        assert!(dir.as_os_str().len() > 0);
    }

    #[test]
    fn test_resolve_output_directory() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let (dir, file) = resolve_output(Some(tmp.path()));
        assert_eq!(dir, tmp.path());
        assert!(file.is_none());
    }

    #[test]
    fn test_dimension_label() {
        assert_eq!(dimension_label(Some(720)), "720");
        assert_eq!(dimension_label(None), "?");
    }
}
