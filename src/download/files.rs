//! Streaming file downloads to disk.
//!
//! The download client has no total timeout (large videos take as long as
//! they take) but keeps connect and read timeouts, so a stalled CDN still
//! fails instead of hanging forever.

use futures_util::StreamExt;
use reqwest::header::{self, HeaderMap, HeaderValue};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::config;
use crate::core::error::{AppError, AppResult};
use crate::core::retry::{RetryConfig, retry};
use crate::core::utils::format_size;
use crate::progress::ProgressBar;

/// Downloads media files referenced by extracted URLs.
pub struct FileDownloader {
    client: reqwest::Client,
}

impl FileDownloader {
    pub fn new() -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config::network::connect_timeout())
            .read_timeout(config::network::read_timeout())
            .build()?;
        Ok(Self { client })
    }

    /// Downloads one URL to `output_path` through the retry layer.
    ///
    /// Each attempt restarts the file from scratch; there is no resume.
    pub async fn download_file(
        &self,
        url: &str,
        output_path: &Path,
        show_progress: bool,
    ) -> AppResult<()> {
        let client = self.client.clone();
        let url_owned = url.to_string();
        let path = output_path.to_path_buf();

        retry(&RetryConfig::new(), || {
            fetch_to_file(client.clone(), url_owned.clone(), path.clone(), show_progress)
        })
        .await
    }
}

/// Headers sent on CDN requests. A plainer user agent than the metadata
/// session; the CDN does not care about the full browser fingerprint.
fn download_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::USER_AGENT,
        HeaderValue::from_static(config::headers::DOWNLOAD_USER_AGENT),
    );
    headers.insert(header::ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(
        header::REFERER,
        HeaderValue::from_static("https://www.instagram.com/"),
    );
    headers
}

/// One download attempt: GET, stream chunks to disk, draw progress.
async fn fetch_to_file(
    client: reqwest::Client,
    url: String,
    path: PathBuf,
    show_progress: bool,
) -> AppResult<()> {
    let response = client
        .get(&url)
        .headers(download_headers())
        .send()
        .await
        .map_err(|e| AppError::Network(format!("Network error: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::Download(format!(
            "HTTP {}: {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("request failed")
        )));
    }

    let total_size = response.content_length().unwrap_or(0);
    let mut progress = (show_progress && total_size > 0).then(|| ProgressBar::new(total_size));

    let mut file = std::fs::File::create(&path)
        .map_err(|e| AppError::Download(format!("Failed to create file: {}", e)))?;

    let mut written: u64 = 0;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| AppError::Network(format!("Network error: {}", e)))?;
        file.write_all(&chunk)
            .map_err(|e| AppError::Download(format!("Failed to write file: {}", e)))?;
        written += chunk.len() as u64;
        if let Some(bar) = progress.as_mut() {
            bar.update(chunk.len() as u64);
        }
    }

    file.flush()
        .map_err(|e| AppError::Download(format!("Failed to flush file: {}", e)))?;
    if let Some(bar) = progress {
        bar.finish();
    }

    log::debug!("Downloaded: {} ({})", path.display(), format_size(written));
    Ok(())
}

