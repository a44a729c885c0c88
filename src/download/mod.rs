//! Format selection and file downloads.

pub mod files;
pub mod format;

// Re-exports for convenience
pub use files::FileDownloader;
pub use format::{Quality, select_format};
