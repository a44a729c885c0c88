//! Media metadata model produced by the extraction cascade and consumed by
//! format selection and the downloader.

/// Kind of content a `MediaInfo` describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Video,
    Image,
    Carousel,
    ProfilePicture,
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MediaType::Video => "video",
            MediaType::Image => "image",
            MediaType::Carousel => "carousel",
            MediaType::ProfilePicture => "profile_picture",
        };
        f.write_str(name)
    }
}

/// A downloadable video rendition.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoFormat {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Stable identifier shown by `--list-formats` (e.g. `video-0`)
    pub format_id: String,
    /// Instagram serves muxed files, so extracted videos always carry audio
    pub has_audio: bool,
}

/// A downloadable image rendition.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFormat {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub format_id: String,
}

/// Everything the rest of the tool needs to know about one post, reel,
/// carousel or profile picture.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaInfo {
    /// Shortcode for posts, username for profile pictures
    pub id: String,
    /// Caption-derived title, capped at 100 characters
    pub title: String,
    pub uploader: String,
    pub media_type: MediaType,
    /// Video renditions (empty for image posts and profile pictures)
    pub formats: Vec<VideoFormat>,
    /// Image renditions, including carousel photo items
    pub images: Vec<ImageFormat>,
    pub thumbnail: Option<String>,
    /// Video duration in seconds when the payload carries one
    pub duration: Option<f64>,
}

impl MediaInfo {
    /// An extraction result is worth keeping only if something in it can be
    /// downloaded.
    pub fn is_usable(&self) -> bool {
        !self.formats.is_empty() || !self.images.is_empty()
    }

    /// Title used when a post has no caption.
    pub fn fallback_title(uploader: &str) -> String {
        format!("Media by {}", uploader)
    }
}
