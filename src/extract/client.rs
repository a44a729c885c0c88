//! HTTP session shared by the extraction strategies.
//!
//! Owns the metadata client, a small cookie jar fed from `Set-Cookie`
//! response headers (Instagram hands out `csrftoken` on the first page
//! load, and the GraphQL endpoint wants it echoed back), and the endpoint
//! bases, which tests point at a local mock server.

use reqwest::StatusCode;
use reqwest::header::{self, HeaderMap, HeaderValue};
use std::collections::HashMap;

use crate::core::config;
use crate::core::error::{AppError, AppResult};
use crate::core::retry::{RetryConfig, retry};

/// Base URLs for the two Instagram hosts.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Pages, GraphQL, web API (`www.instagram.com`)
    pub web_base: String,
    /// Internal media-info API (`i.instagram.com`)
    pub api_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            web_base: config::endpoints::WEB_BASE.to_string(),
            api_base: config::endpoints::API_BASE.to_string(),
        }
    }
}

/// A successful response body plus any cookies the server set.
struct FetchedPage {
    body: String,
    cookies: Vec<(String, String)>,
}

/// Stateful HTTP session for metadata requests.
pub struct Session {
    client: reqwest::Client,
    cookies: HashMap<String, String>,
    endpoints: Endpoints,
}

impl Session {
    /// Creates a session against the real Instagram hosts.
    pub fn new() -> AppResult<Self> {
        Self::with_endpoints(Endpoints::default())
    }

    /// Creates a session against custom endpoint bases.
    pub fn with_endpoints(endpoints: Endpoints) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config::network::metadata_timeout())
            .connect_timeout(config::network::connect_timeout())
            .build()?;

        Ok(Self {
            client,
            cookies: HashMap::new(),
            endpoints,
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Value of a captured cookie, if the server has sent one.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// The csrf token Instagram expects on GraphQL and web-API calls.
    pub fn csrf_token(&self) -> Option<&str> {
        self.cookie("csrftoken")
    }

    /// Browser-shaped headers sent on every request.
    pub fn base_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static(config::headers::USER_AGENT),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("en-US,en;q=0.9"),
        );
        headers.insert(
            header::ORIGIN,
            HeaderValue::from_static("https://www.instagram.com"),
        );
        headers.insert(
            header::REFERER,
            HeaderValue::from_static("https://www.instagram.com/"),
        );
        headers.insert("sec-fetch-dest", HeaderValue::from_static("empty"));
        headers.insert("sec-fetch-mode", HeaderValue::from_static("cors"));
        headers.insert("sec-fetch-site", HeaderValue::from_static("same-site"));
        headers
    }

    /// Base headers plus the internal API identifiers.
    pub fn api_headers(&self) -> HeaderMap {
        let mut headers = Self::base_headers();
        headers.insert(
            "x-ig-app-id",
            HeaderValue::from_static(config::headers::IG_APP_ID),
        );
        headers.insert(
            "x-asbd-id",
            HeaderValue::from_static(config::headers::ASBD_ID),
        );
        headers.insert("x-ig-www-claim", HeaderValue::from_static("0"));
        headers
    }

    /// API headers plus csrf echo and XHR marker, as the web app sends for
    /// GraphQL and web-API calls. The csrf token defaults to empty when no
    /// cookie has been captured yet.
    pub fn xhr_headers(&self) -> HeaderMap {
        let mut headers = self.api_headers();
        let token = self.csrf_token().unwrap_or("");
        if let Ok(value) = HeaderValue::from_str(token) {
            headers.insert("x-csrftoken", value);
        }
        headers.insert("x-requested-with", HeaderValue::from_static("XMLHttpRequest"));
        headers
    }

    /// Performs a GET through the retry layer, returning the body text.
    ///
    /// Cookies set by successful responses are captured for later requests;
    /// failed attempts never touch the jar.
    pub async fn get_text(&mut self, url: &str, headers: HeaderMap) -> AppResult<String> {
        log::debug!("GET {}", url);

        let client = self.client.clone();
        let url_owned = url.to_string();
        let cookie_header = self.cookie_header();

        let page = retry(&RetryConfig::new(), || {
            fetch_once(
                client.clone(),
                url_owned.clone(),
                headers.clone(),
                cookie_header.clone(),
            )
        })
        .await?;

        for (name, value) in page.cookies {
            self.cookies.insert(name, value);
        }
        Ok(page.body)
    }

    /// Cookie request header built from the jar, if anything was captured.
    fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        let joined = self
            .cookies
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; ");
        Some(joined)
    }
}

/// One GET attempt with owned parameters, so the retry closure can mint a
/// fresh future per attempt.
async fn fetch_once(
    client: reqwest::Client,
    url: String,
    headers: HeaderMap,
    cookie_header: Option<String>,
) -> AppResult<FetchedPage> {
    let mut request = client.get(&url).headers(headers);
    if let Some(cookie) = cookie_header {
        request = request.header(header::COOKIE, cookie);
    }

    let response = request
        .send()
        .await
        .map_err(|e| AppError::Network(format!("Network error: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(status_error(status));
    }

    let cookies = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(parse_set_cookie)
        .collect();

    let body = response
        .text()
        .await
        .map_err(|e| AppError::Network(format!("Request failed: {}", e)))?;

    Ok(FetchedPage { body, cookies })
}

/// Maps an unsuccessful HTTP status to the failure taxonomy.
fn status_error(status: StatusCode) -> AppError {
    match status {
        StatusCode::NOT_FOUND => {
            AppError::Download("Content not found. It might be private or deleted.".to_string())
        }
        StatusCode::TOO_MANY_REQUESTS => {
            AppError::RateLimit("Rate limited by Instagram. Please wait before retrying.".to_string())
        }
        StatusCode::FORBIDDEN => {
            AppError::Download("Access forbidden. Content might be private.".to_string())
        }
        other => AppError::Network(format!(
            "HTTP {}: {}",
            other.as_u16(),
            other.canonical_reason().unwrap_or("request failed")
        )),
    }
}

/// Pulls `name=value` out of a `Set-Cookie` header, dropping attributes.
fn parse_set_cookie(header: &str) -> Option<(String, String)> {
    let first = header.split(';').next()?;
    let (name, value) = first.split_once('=')?;
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), value.to_string()))
}
