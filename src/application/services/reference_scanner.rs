//! Locates remote thumbnail references in markup.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::services::ReferenceShape;

const THUMBNAIL_URL: &str = r"https?://(?:[A-Za-z0-9-]+\.)*bing\.com/th\?id=";

static BACKGROUND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r#"background-image:\s*url\(\s*["']?({THUMBNAIL_URL}[^"'()\s]+)"#
    ))
    .unwrap()
});

static HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r#"\bhref\s*=\s*["']({THUMBNAIL_URL}[^"'\s]+)["']"#)).unwrap()
});

static SRC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r#"\bsrc\s*=\s*["']({THUMBNAIL_URL}[^"'\s]+)["']"#)).unwrap()
});

/// One remote URL occurrence. `start..end` spans the URL only, never the
/// surrounding attribute or CSS syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceMatch<'a> {
    /// Shape the URL was found in.
    pub shape: ReferenceShape,
    /// Byte offset of the URL.
    pub start: usize,
    /// Byte offset just past the URL.
    pub end: usize,
    /// The URL text as written in the markup.
    pub url: &'a str,
}

/// Scans markup for thumbnail URL references.
pub struct ReferenceScanner;

impl ReferenceScanner {
    /// Returns every `shape` reference in `text`, in ascending, non-overlapping
    /// order.
    #[must_use]
    pub fn scan(text: &str, shape: ReferenceShape) -> Vec<ReferenceMatch<'_>> {
        if !text.contains("bing.com/th") {
            return Vec::new();
        }

        let pattern = match shape {
            ReferenceShape::Background => &*BACKGROUND_RE,
            ReferenceShape::Href => &*HREF_RE,
            ReferenceShape::Src => &*SRC_RE,
        };

        pattern
            .captures_iter(text)
            .filter_map(|cap| cap.get(1))
            .map(|url| ReferenceMatch {
                shape,
                start: url.start(),
                end: url.end(),
                url: url.as_str(),
            })
            .collect()
    }
}

/// Replaces `start..end` spans of `text`. Spans must be ascending and
/// non-overlapping.
#[must_use]
pub fn apply_replacements(text: &str, replacements: &[(usize, usize, String)]) -> String {
    let mut result = String::with_capacity(text.len());
    let mut cursor = 0;

    for (start, end, replacement) in replacements {
        result.push_str(&text[cursor..*start]);
        result.push_str(replacement);
        cursor = *end;
    }
    result.push_str(&text[cursor..]);

    result
}
