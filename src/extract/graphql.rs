//! GraphQL extraction strategy.

use async_trait::async_trait;
use serde_json::Value;

use crate::core::config;
use crate::core::error::AppResult;
use crate::extract::schema::parse_graphql_media;
use crate::extract::{ExtractStrategy, Session};
use crate::media::MediaInfo;

/// Queries the web app's GraphQL endpoint with the fixed document id it
/// uses for single posts.
pub struct GraphQlStrategy;

#[async_trait]
impl ExtractStrategy for GraphQlStrategy {
    fn name(&self) -> &str {
        "GraphQL"
    }

    async fn extract(
        &self,
        session: &mut Session,
        shortcode: &str,
    ) -> AppResult<Option<MediaInfo>> {
        let variables = serde_json::json!({
            "shortcode": shortcode,
            "child_comment_count": 0,
            "fetch_comment_count": 0,
            "parent_comment_count": 0,
            "has_threaded_comments": false,
        });
        let url = format!(
            "{}/graphql/query/?doc_id={}&variables={}",
            session.endpoints().web_base,
            config::endpoints::GRAPHQL_DOC_ID,
            urlencoding::encode(&variables.to_string()),
        );

        let headers = session.xhr_headers();
        let body = session.get_text(&url, headers).await?;
        let data: Value = match serde_json::from_str(&body) {
            Ok(data) => data,
            Err(e) => {
                log::debug!("GraphQL response is not JSON: {}", e);
                return Ok(None);
            }
        };

        Ok(data
            .pointer("/data/xdt_shortcode_media")
            .filter(|media| media.is_object())
            .map(parse_graphql_media))
    }
}
