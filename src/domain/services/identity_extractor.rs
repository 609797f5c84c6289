//! Stable image identity derivation from remote URLs.
//!
//! The thumbnail service names every wallpaper through its `id` query
//! parameter (`th?id=OHR.Name_EN-US123_UHD.jpg&w=1920`). Any other host is
//! assumed to serve static files whose last path segment names the image.

/// Prefix of identities synthesized for URLs that carry no usable name.
pub const SYNTHESIZED_PREFIX: &str = "bing_image_";

/// A located query parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryParam<'a> {
    /// Raw parameter value, not percent-decoded.
    pub value: &'a str,
    /// Byte offset in the URL just past the value (an `&` or the end).
    pub end: usize,
}

/// Finds the query parameter literally named `name`.
///
/// Pairs split by an HTML-escaped separator (`&amp;`) are accepted, so URLs
/// copied out of markup attributes resolve the same as raw ones.
#[must_use]
pub fn query_param<'a>(url: &'a str, name: &str) -> Option<QueryParam<'a>> {
    let query_start = url.find('?')? + 1;
    let mut offset = query_start;

    for pair in url[query_start..].split('&') {
        let pair_end = offset + pair.len();
        let pair = pair.strip_prefix("amp;").unwrap_or(pair);
        if let Some((key, value)) = pair.split_once('=')
            && key == name
        {
            return Some(QueryParam {
                value,
                end: pair_end,
            });
        }
        offset = pair_end + 1;
    }

    None
}

/// Derives the identity of the image behind `url`.
///
/// Never fails: URLs without an `id` parameter or a usable last path segment
/// get a time-based identity (see [`synthesize_identity`]).
#[must_use]
pub fn extract_identity(url: &str) -> String {
    if let Some(param) = query_param(url, "id") {
        return strip_extension(param.value).to_string();
    }

    path_identity(url).unwrap_or_else(synthesize_identity)
}

/// Identity for URLs that cannot be parsed. Not reproducible across calls.
#[must_use]
pub fn synthesize_identity() -> String {
    format!(
        "{SYNTHESIZED_PREFIX}{}",
        chrono::Utc::now().timestamp_millis()
    )
}

fn path_identity(url: &str) -> Option<String> {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    let after_scheme = without_query
        .split_once("://")
        .map_or(without_query, |(_, rest)| rest);

    let (_, file_name) = after_scheme.rsplit_once('/')?;
    let name = strip_extension(file_name);

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

fn strip_extension(name: &str) -> &str {
    name.rfind('.').map_or(name, |dot| &name[..dot])
}
