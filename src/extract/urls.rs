//! Instagram URL recognition and the shortcode codec.
//!
//! Shortcodes are base-64 renditions of the numeric media id over
//! Instagram's private alphabet. Post URLs carry the shortcode directly;
//! the internal API wants the numeric id, so both directions matter.

use once_cell::sync::Lazy;
use regex::Regex;

/// Instagram's base-64 alphabet (index = digit value).
const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Path segments that can never be usernames.
const RESERVED_SEGMENTS: [&str; 7] = ["p", "reel", "reels", "tv", "stories", "explore", "accounts"];

static SHORTCODE_RES: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"instagram\.com/(?:p|tv|reel|reels)/([A-Za-z0-9_-]+)").expect("post regex"),
        Regex::new(r"instagram\.com/[^/]+/(?:p|reel|reels)/([A-Za-z0-9_-]+)")
            .expect("prefixed post regex"),
        Regex::new(r"instagram\.com/stories/[^/]+/([A-Za-z0-9_-]+)").expect("story regex"),
    ]
});

static USERNAME_RES: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        Regex::new(r"instagram\.com/@([A-Za-z0-9_.]+)/?$").expect("at-username regex"),
        Regex::new(r"instagram\.com/([A-Za-z0-9_.]+)/?$").expect("username regex"),
    ]
});

/// Extracts the shortcode (or story id) from a media URL.
///
/// Handles `/p/`, `/tv/`, `/reel/`, `/reels/`, the username-prefixed forms
/// of those, and `/stories/<user>/<id>`. Query string and fragment are
/// ignored.
pub fn extract_shortcode(url: &str) -> Option<String> {
    let without_query = url.split('?').next().unwrap_or(url);
    let clean = without_query.split('#').next().unwrap_or(without_query);

    SHORTCODE_RES
        .iter()
        .find_map(|re| re.captures(clean))
        .map(|caps| caps[1].to_string())
}

/// Extracts the username from a profile URL.
///
/// Accepts `instagram.com/<username>` and `instagram.com/@<username>`,
/// with or without a trailing slash. Reserved path segments (`p`, `reel`,
/// `explore`, ...) are never usernames.
pub fn extract_username(url: &str) -> Option<String> {
    let clean = url.split('?').next().unwrap_or(url);

    USERNAME_RES.iter().find_map(|re| {
        let caps = re.captures(clean)?;
        let name = &caps[1];
        if RESERVED_SEGMENTS.contains(&name.to_lowercase().as_str()) {
            None
        } else {
            Some(name.to_string())
        }
    })
}

/// Whether the URL points at a single post, reel or story item.
pub fn is_media_url(url: &str) -> bool {
    extract_shortcode(url).is_some()
}

/// Whether the URL points at a profile page.
pub fn is_profile_url(url: &str) -> bool {
    extract_username(url).is_some()
}

/// Converts a numeric media id to its shortcode.
pub fn media_id_to_shortcode(mut id: u64) -> String {
    if id == 0 {
        return "A".to_string();
    }

    let mut digits = Vec::new();
    while id > 0 {
        digits.push(ALPHABET[(id % 64) as usize] as char);
        id /= 64;
    }
    digits.iter().rev().collect()
}

/// Converts a shortcode back to its numeric media id.
///
/// Codes longer than 11 characters carry a `_`-separated private-id suffix
/// (`{code}_{user_pk}`); only the part before the underscore encodes the
/// media id. Returns `None` for characters outside the alphabet or values
/// that overflow `u64`.
pub fn shortcode_to_media_id(code: &str) -> Option<u64> {
    let canonical = if code.len() > 11 {
        code.split('_').next().unwrap_or(code)
    } else {
        code
    };

    let mut id: u64 = 0;
    for byte in canonical.bytes() {
        let value = ALPHABET.iter().position(|&b| b == byte)? as u64;
        id = id.checked_mul(64)?.checked_add(value)?;
    }
    Some(id)
}
