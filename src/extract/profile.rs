//! Profile-picture extraction strategies.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::core::error::AppResult;
use crate::extract::{ExtractStrategy, Session};
use crate::media::{ImageFormat, MediaInfo, MediaType};

/// Patterns tried in order against the profile page HTML. The picture URL
/// sits in the last capture group of whichever pattern matches.
static PROFILE_PIC_RES: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r#""profile_pic_url_hd":"([^"]+)""#).expect("profile pic hd regex"),
        Regex::new(r#""profile_pic_url":"([^"]+)""#).expect("profile pic regex"),
        Regex::new(r#"profilePage_([0-9]+)\\?"profile_pic_url\\?":\\?"([^"]+)"#)
            .expect("legacy profile page regex"),
    ]
});

/// Scrapes the picture URL straight out of the profile page HTML.
pub struct WebProfileStrategy;

#[async_trait]
impl ExtractStrategy for WebProfileStrategy {
    fn name(&self) -> &str {
        "Web profile"
    }

    async fn extract(
        &self,
        session: &mut Session,
        username: &str,
    ) -> AppResult<Option<MediaInfo>> {
        let url = format!("{}/{}/", session.endpoints().web_base, username);
        let html = session.get_text(&url, Session::base_headers()).await?;
        Ok(scan_profile_page(&html).map(|pic| profile_picture_info(username, pic)))
    }
}

/// Asks the public web-profile-info API for the picture URL.
pub struct ProfileApiStrategy;

#[async_trait]
impl ExtractStrategy for ProfileApiStrategy {
    fn name(&self) -> &str {
        "Profile API"
    }

    async fn extract(
        &self,
        session: &mut Session,
        username: &str,
    ) -> AppResult<Option<MediaInfo>> {
        let url = format!(
            "{}/api/v1/users/web_profile_info/?username={}",
            session.endpoints().web_base,
            username
        );
        let headers = session.xhr_headers();
        let body = session.get_text(&url, headers).await?;

        let data: Value = match serde_json::from_str(&body) {
            Ok(data) => data,
            Err(e) => {
                log::debug!("Profile API response is not JSON: {}", e);
                return Ok(None);
            }
        };

        let pic = data.pointer("/data/user").and_then(|user| {
            user.get("profile_pic_url_hd")
                .and_then(Value::as_str)
                .filter(|url| !url.is_empty())
                .or_else(|| {
                    user.get("profile_pic_url")
                        .and_then(Value::as_str)
                        .filter(|url| !url.is_empty())
                })
        });

        Ok(pic.map(|url| profile_picture_info(username, url.to_string())))
    }
}

/// Finds a profile picture URL in page HTML, JSON-unescaped.
fn scan_profile_page(html: &str) -> Option<String> {
    for pattern in PROFILE_PIC_RES.iter() {
        if let Some(caps) = pattern.captures(html) {
            if let Some(m) = caps.get(caps.len() - 1) {
                return Some(unescape_json_url(m.as_str()));
            }
        }
    }
    None
}

fn unescape_json_url(url: &str) -> String {
    url.replace("\\u0026", "&").replace("\\/", "/")
}

/// Wraps a picture URL in the canonical [`MediaInfo`] shape.
fn profile_picture_info(username: &str, url: String) -> MediaInfo {
    MediaInfo {
        id: username.to_string(),
        title: format!("{}'s profile picture", username),
        uploader: username.to_string(),
        media_type: MediaType::ProfilePicture,
        formats: Vec::new(),
        images: vec![ImageFormat {
            url: url.clone(),
            width: None,
            height: None,
            format_id: "profile-pic-hd".to_string(),
        }],
        thumbnail: Some(url),
        duration: None,
    }
}
