//! Configuration constants for the downloader

use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Optional log file path
/// Read from INSTAGRAB_LOG_FILE environment variable
/// When set, logs are mirrored to this file in addition to the terminal
pub static LOG_FILE_PATH: Lazy<Option<String>> = Lazy::new(|| env::var("INSTAGRAB_LOG_FILE").ok());

/// Default output directory for downloaded files
/// Read from INSTAGRAB_OUTPUT_DIR environment variable
/// When unset, files are written to the current directory
pub static OUTPUT_DIR: Lazy<Option<String>> = Lazy::new(|| env::var("INSTAGRAB_OUTPUT_DIR").ok());

/// Instagram endpoints
pub mod endpoints {
    /// Base for page, GraphQL and web-API requests
    pub const WEB_BASE: &str = "https://www.instagram.com";

    /// Base for the internal media-info API
    pub const API_BASE: &str = "https://i.instagram.com";

    /// doc_id of the shortcode media GraphQL query
    pub const GRAPHQL_DOC_ID: &str = "8845758582119845";
}

/// Request header values
pub mod headers {
    /// Desktop Chrome user agent for page and API requests
    pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

    /// Shorter user agent for media file downloads (CDN is less picky)
    pub const DOWNLOAD_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

    /// Web app id expected by the internal API
    pub const IG_APP_ID: &str = "936619743392459";

    /// Anti-spam block id sent alongside the app id
    pub const ASBD_ID: &str = "198387";
}

/// Rate limiting configuration
pub mod rate_limit {
    use super::Duration;

    /// Maximum requests per sliding window
    pub const MAX_REQUESTS: usize = 30;

    /// Window length (in seconds)
    pub const WINDOW_SECS: u64 = 60;

    /// Extra sleep after a forced wait so the window has really moved on
    /// (in milliseconds)
    pub const WAIT_BUFFER_MS: u64 = 100;

    /// Sliding window duration
    pub fn window() -> Duration {
        Duration::from_secs(WINDOW_SECS)
    }

    /// Post-wait buffer duration
    pub fn wait_buffer() -> Duration {
        Duration::from_millis(WAIT_BUFFER_MS)
    }
}

/// Retry configuration
pub mod retry {
    /// Maximum attempts for network operations
    pub const MAX_ATTEMPTS: u32 = 3;

    /// Base delay for exponential backoff (in seconds)
    pub const BASE_DELAY_SECS: f64 = 1.0;

    /// Cap applied to the computed delay (in seconds)
    pub const MAX_DELAY_SECS: f64 = 60.0;

    /// Fraction of the delay added as random jitter
    pub const JITTER_FACTOR: f64 = 0.1;
}

/// Network client configuration
pub mod network {
    use super::Duration;

    /// Total timeout for metadata requests (in seconds)
    pub const METADATA_TIMEOUT_SECS: u64 = 30;

    /// Connect timeout for all clients (in seconds)
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Per-read timeout for file downloads (in seconds)
    /// Downloads have no total timeout so large files are not cut off
    pub const READ_TIMEOUT_SECS: u64 = 60;

    /// Metadata request timeout duration
    pub fn metadata_timeout() -> Duration {
        Duration::from_secs(METADATA_TIMEOUT_SECS)
    }

    /// Connect timeout duration
    pub fn connect_timeout() -> Duration {
        Duration::from_secs(CONNECT_TIMEOUT_SECS)
    }

    /// Read timeout duration
    pub fn read_timeout() -> Duration {
        Duration::from_secs(READ_TIMEOUT_SECS)
    }
}

/// Media model limits
pub mod media {
    /// Maximum title length kept from captions (in characters)
    pub const TITLE_MAX_CHARS: usize = 100;

    /// Maximum length of a sanitized filename stem (in characters)
    pub const FILENAME_MAX_CHARS: usize = 200;

    /// Uploader name used when the payload has none
    pub const DEFAULT_UPLOADER: &str = "unknown";
}
