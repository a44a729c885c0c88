//! Page-scanning strategies: the public post page and its `/embed/` variant.
//!
//! Both fetch HTML and hand it to the shared embedded-payload scanner;
//! they only differ in which page still inlines data when the API path is
//! blocked.

use async_trait::async_trait;

use crate::core::error::AppResult;
use crate::extract::schema::scan_embedded_payload;
use crate::extract::{ExtractStrategy, Session};
use crate::media::MediaInfo;

/// Scans `{web}/p/{code}/` for embedded payloads.
pub struct DirectPageStrategy;

#[async_trait]
impl ExtractStrategy for DirectPageStrategy {
    fn name(&self) -> &str {
        "Direct Page"
    }

    async fn extract(
        &self,
        session: &mut Session,
        shortcode: &str,
    ) -> AppResult<Option<MediaInfo>> {
        let url = format!("{}/p/{}/", session.endpoints().web_base, shortcode);
        let html = session.get_text(&url, Session::base_headers()).await?;
        log::debug!("Post page loaded, {} chars", html.len());
        Ok(scan_embedded_payload(&html))
    }
}

/// Scans `{web}/p/{code}/embed/`, the last resort for blocked posts.
pub struct EmbedStrategy;

#[async_trait]
impl ExtractStrategy for EmbedStrategy {
    fn name(&self) -> &str {
        "Embed"
    }

    async fn extract(
        &self,
        session: &mut Session,
        shortcode: &str,
    ) -> AppResult<Option<MediaInfo>> {
        let url = format!("{}/p/{}/embed/", session.endpoints().web_base, shortcode);
        let html = session.get_text(&url, Session::base_headers()).await?;
        log::debug!("Embed page loaded, {} chars", html.len());
        Ok(scan_embedded_payload(&html))
    }
}
