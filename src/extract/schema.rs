//! Parsers for the JSON payload shapes Instagram serves.
//!
//! Two shapes exist in the wild. The internal API returns `items[0]` with
//! `video_versions` / `image_versions2` / `carousel_media`; GraphQL and the
//! legacy embedded payloads return a `shortcode_media` object. Both are
//! navigated as untyped `serde_json::Value` trees (the schema shifts too
//! often to pin down with derive structs) and normalized into [`MediaInfo`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::core::config;
use crate::core::utils::truncate_chars;
use crate::extract::urls::media_id_to_shortcode;
use crate::media::{ImageFormat, MediaInfo, MediaType, VideoFormat};

/// `window.__additionalDataLoaded('path', {json})` call inlined in post and
/// embed pages.
static ADDITIONAL_DATA_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)window\.__additionalDataLoaded\s*\(\s*[^,]+,\s*(\{.+?\})\s*\)")
        .expect("additional-data regex")
});

/// Legacy `window._sharedData = {json};` assignment.
static SHARED_DATA_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)window\._sharedData\s*=\s*(\{.+?\});\s*</script>")
        .expect("shared-data regex")
});

/// Normalizes an API media item (`items[0]` of the info endpoint).
///
/// Returns `None` when the item carries no media id.
pub fn parse_api_item(item: &Value) -> Option<MediaInfo> {
    let id = item.get("pk").and_then(pk_to_shortcode)?;

    let uploader = item
        .pointer("/user/username")
        .and_then(Value::as_str)
        .unwrap_or(config::media::DEFAULT_UPLOADER)
        .to_string();
    let title = caption_or_fallback(item.pointer("/caption/text"), &uploader);

    let video_versions = item.get("video_versions").and_then(Value::as_array);
    let has_video = video_versions.is_some_and(|v| !v.is_empty());

    let mut formats = Vec::new();
    if let Some(versions) = video_versions {
        for (idx, video) in versions.iter().enumerate() {
            if let Some(format) = video_format(video, format!("video-{}", idx)) {
                formats.push(format);
            }
        }
    }

    let candidates = item
        .pointer("/image_versions2/candidates")
        .and_then(Value::as_array);

    // Top-level image candidates double as the video cover, so they only
    // become downloadable images when there is no video track.
    let mut images = Vec::new();
    if !has_video {
        if let Some(candidates) = candidates {
            for (idx, image) in candidates.iter().enumerate() {
                if let Some(image) = image_format(image, format!("image-{}", idx)) {
                    images.push(image);
                }
            }
        }
    }

    let mut media_type = if has_video {
        MediaType::Video
    } else {
        MediaType::Image
    };

    if let Some(children) = item.get("carousel_media").and_then(Value::as_array) {
        if !children.is_empty() {
            media_type = MediaType::Carousel;
        }
        for (idx, child) in children.iter().enumerate() {
            let child_videos = child.get("video_versions").and_then(Value::as_array);
            if child_videos.is_some_and(|v| !v.is_empty()) {
                for video in child_videos.into_iter().flatten() {
                    if let Some(format) = video_format(video, format!("carousel-video-{}", idx)) {
                        formats.push(format);
                    }
                }
            } else if let Some(first) = child
                .pointer("/image_versions2/candidates/0")
                .and_then(|c| image_format(c, format!("carousel-image-{}", idx)))
            {
                images.push(first);
            }
        }
    }

    let thumbnail = candidates
        .and_then(|c| c.first())
        .and_then(|image| image.get("url"))
        .and_then(Value::as_str)
        .map(str::to_string);

    Some(MediaInfo {
        id,
        title,
        uploader,
        media_type,
        formats,
        images,
        thumbnail,
        duration: item.get("video_duration").and_then(Value::as_f64),
    })
}

/// Normalizes a GraphQL `shortcode_media` / `xdt_shortcode_media` object.
pub fn parse_graphql_media(media: &Value) -> MediaInfo {
    let uploader = media
        .pointer("/owner/username")
        .and_then(Value::as_str)
        .unwrap_or(config::media::DEFAULT_UPLOADER)
        .to_string();
    let title = caption_or_fallback(
        media.pointer("/edge_media_to_caption/edges/0/node/text"),
        &uploader,
    );

    let width = media.pointer("/dimensions/width").and_then(dimension);
    let height = media.pointer("/dimensions/height").and_then(dimension);
    let video_url = media.get("video_url").and_then(Value::as_str);

    let mut formats = Vec::new();
    let mut images = Vec::new();
    if let Some(url) = video_url {
        formats.push(VideoFormat {
            url: url.to_string(),
            width,
            height,
            format_id: "graphql-video".to_string(),
            has_audio: true,
        });
    } else if let Some(url) = media.get("display_url").and_then(Value::as_str) {
        images.push(ImageFormat {
            url: url.to_string(),
            width,
            height,
            format_id: "graphql-image".to_string(),
        });
    }

    let thumbnail = media
        .get("display_url")
        .or_else(|| media.get("thumbnail_src"))
        .and_then(Value::as_str)
        .map(str::to_string);

    MediaInfo {
        id: media
            .get("shortcode")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        title,
        uploader,
        media_type: if media.get("is_video").and_then(Value::as_bool).unwrap_or(false) {
            MediaType::Video
        } else {
            MediaType::Image
        },
        formats,
        images,
        thumbnail,
        duration: media.get("video_duration").and_then(Value::as_f64),
    }
}

/// Scans page HTML for an embedded media payload.
///
/// Tries the `__additionalDataLoaded` call first (its JSON carries either
/// the API `items` shape or a GraphQL object), then falls back to the
/// legacy `_sharedData` assignment.
pub fn scan_embedded_payload(html: &str) -> Option<MediaInfo> {
    if let Some(caps) = ADDITIONAL_DATA_RE.captures(html) {
        let data: Value = serde_json::from_str(&caps[1]).ok()?;

        if let Some(info) = data.pointer("/items/0").and_then(parse_api_item) {
            return Some(info);
        }

        let media = data
            .pointer("/graphql/shortcode_media")
            .or_else(|| data.get("shortcode_media"))?;
        return Some(parse_graphql_media(media));
    }

    let caps = SHARED_DATA_RE.captures(html)?;
    let data: Value = serde_json::from_str(&caps[1]).ok()?;
    let media = data.pointer("/entry_data/PostPage/0/graphql/shortcode_media")?;
    Some(parse_graphql_media(media))
}

/// Media id field as a shortcode. Accepts numeric ids and the string form,
/// which may carry a `_<user id>` suffix.
fn pk_to_shortcode(pk: &Value) -> Option<String> {
    let id = match pk {
        Value::Number(n) => n.as_u64()?,
        Value::String(s) => s.split('_').next()?.parse().ok()?,
        _ => return None,
    };
    Some(media_id_to_shortcode(id))
}

fn caption_or_fallback(text: Option<&Value>, uploader: &str) -> String {
    text.and_then(Value::as_str)
        .map(|t| truncate_chars(t, config::media::TITLE_MAX_CHARS))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| MediaInfo::fallback_title(uploader))
}

fn dimension(value: &Value) -> Option<u32> {
    value.as_u64().map(|n| n as u32)
}

fn video_format(video: &Value, format_id: String) -> Option<VideoFormat> {
    Some(VideoFormat {
        url: video.get("url").and_then(Value::as_str)?.to_string(),
        width: video.get("width").and_then(dimension),
        height: video.get("height").and_then(dimension),
        format_id,
        has_audio: true,
    })
}

fn image_format(image: &Value, format_id: String) -> Option<ImageFormat> {
    Some(ImageFormat {
        url: image.get("url").and_then(Value::as_str)?.to_string(),
        width: image.get("width").and_then(dimension),
        height: image.get("height").and_then(dimension),
        format_id,
    })
}
