//! Primary extraction strategy: Instagram's internal media-info API.

use async_trait::async_trait;
use reqwest::header::HeaderValue;
use serde_json::Value;

use crate::core::error::AppResult;
use crate::extract::schema::parse_api_item;
use crate::extract::urls::shortcode_to_media_id;
use crate::extract::{ExtractStrategy, Session};
use crate::media::MediaInfo;

/// Hits `{api}/api/v1/media/{id}/info/` after warming the session on the
/// public post page, which is where the `csrftoken` cookie usually lands.
pub struct ApiStrategy;

#[async_trait]
impl ExtractStrategy for ApiStrategy {
    fn name(&self) -> &str {
        "API"
    }

    async fn extract(
        &self,
        session: &mut Session,
        shortcode: &str,
    ) -> AppResult<Option<MediaInfo>> {
        let media_id = match shortcode_to_media_id(shortcode) {
            Some(id) => id,
            None => return Ok(None),
        };
        log::debug!("Converted shortcode '{}' to media id {}", shortcode, media_id);

        // Warm-up failure is not fatal; the API call may still work.
        let post_url = format!("{}/p/{}/", session.endpoints().web_base, shortcode);
        if let Err(e) = session.get_text(&post_url, Session::base_headers()).await {
            log::debug!("Session warm-up failed: {}", e);
        }

        let api_url = format!(
            "{}/api/v1/media/{}/info/",
            session.endpoints().api_base,
            media_id
        );
        let mut headers = session.api_headers();
        if let Some(token) = session.csrf_token() {
            if let Ok(value) = HeaderValue::from_str(token) {
                headers.insert("x-csrftoken", value);
            }
        }

        let body = session.get_text(&api_url, headers).await?;
        let data: Value = match serde_json::from_str(&body) {
            Ok(data) => data,
            Err(e) => {
                log::debug!("API response is not JSON: {}", e);
                return Ok(None);
            }
        };

        Ok(data.pointer("/items/0").and_then(parse_api_item))
    }
}
