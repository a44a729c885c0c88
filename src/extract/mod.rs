//! Multi-strategy media extraction layer.
//!
//! Provides the `ExtractStrategy` trait for implementing pluggable
//! extraction backends and cascade runners that try them in a fixed order.
//! New backends are added by implementing `ExtractStrategy` and appending
//! them to the relevant cascade.
//!
//! Post/reel cascade, in order:
//! - `ApiStrategy`: internal media-info API (primary)
//! - `DirectPageStrategy`: embedded payloads on the public post page
//! - `GraphQlStrategy`: GraphQL query endpoint
//! - `EmbedStrategy`: embedded payloads on the `/embed/` page
//!
//! Profile-picture cascade: `WebProfileStrategy`, then `ProfileApiStrategy`.

pub mod api;
pub mod client;
pub mod graphql;
pub mod page;
pub mod profile;
pub mod schema;
pub mod urls;

use async_trait::async_trait;

use crate::core::error::{AppError, AppResult};
use crate::media::MediaInfo;

pub use client::{Endpoints, Session};

/// Trait for extraction strategy implementations.
///
/// `target` is the shortcode for post strategies and the username for
/// profile strategies. `Ok(None)` means the strategy ran but found nothing
/// worth keeping; errors are cascade-level concerns, not the strategy's.
#[async_trait]
pub trait ExtractStrategy: Send + Sync {
    /// Human-readable name used in cascade logs (e.g., "API", "GraphQL").
    fn name(&self) -> &str;

    /// Attempt extraction for the given target.
    async fn extract(&self, session: &mut Session, target: &str)
    -> AppResult<Option<MediaInfo>>;
}

/// The post/reel strategies in cascade order.
pub fn media_strategies() -> Vec<Box<dyn ExtractStrategy>> {
    vec![
        Box::new(api::ApiStrategy),
        Box::new(page::DirectPageStrategy),
        Box::new(graphql::GraphQlStrategy),
        Box::new(page::EmbedStrategy),
    ]
}

/// The profile-picture strategies in cascade order.
pub fn profile_strategies() -> Vec<Box<dyn ExtractStrategy>> {
    vec![
        Box::new(profile::WebProfileStrategy),
        Box::new(profile::ProfileApiStrategy),
    ]
}

/// Runs the post/reel cascade for a shortcode.
pub async fn extract_media(session: &mut Session, shortcode: &str) -> AppResult<MediaInfo> {
    log::info!("Extracting media: {}", shortcode);
    run_cascade(
        session,
        shortcode,
        &media_strategies(),
        "All extraction methods failed. Content might be private or unavailable.",
    )
    .await
}

/// Runs the profile-picture cascade for a username.
pub async fn extract_profile(session: &mut Session, username: &str) -> AppResult<MediaInfo> {
    log::info!("Extracting profile picture for: {}", username);
    run_cascade(
        session,
        username,
        &profile_strategies(),
        &format!("Could not extract profile picture for @{}", username),
    )
    .await
}

/// Tries each strategy in order until one yields a usable [`MediaInfo`].
///
/// Strategy failures are logged and the cascade moves on, with one
/// exception: a rate-limit error propagates immediately, since a throttled
/// session must not keep hammering the remaining endpoints.
async fn run_cascade(
    session: &mut Session,
    target: &str,
    strategies: &[Box<dyn ExtractStrategy>],
    exhausted: &str,
) -> AppResult<MediaInfo> {
    for strategy in strategies {
        log::debug!("Attempting {} extraction...", strategy.name());
        match strategy.extract(session, target).await {
            Ok(Some(info)) if info.is_usable() => {
                log::info!("✓ {} extraction successful", strategy.name());
                return Ok(info);
            }
            Ok(_) => log::debug!("✗ {} returned no data", strategy.name()),
            Err(AppError::RateLimit(msg)) => return Err(AppError::RateLimit(msg)),
            Err(e) => log::warn!("✗ {} failed: {}", strategy.name(), e),
        }
    }
    Err(AppError::Download(exhausted.to_string()))
}
