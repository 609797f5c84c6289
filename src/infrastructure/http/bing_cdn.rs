//! Fetch URL construction for the thumbnail service and static hosts.

use crate::domain::entities::{ResolutionTag, UrlConvention};
use crate::domain::services::query_param;

/// Builds the URL requesting `tag` of the image at `base_url`.
///
/// Thumbnail URLs keep everything up to and including the `id` parameter and
/// replace whatever followed it with the variant's parameters. Other URLs get
/// the variant's parameters appended to their existing query, if any.
#[must_use]
pub fn build_fetch_url(base_url: &str, convention: UrlConvention, tag: ResolutionTag) -> String {
    let suffix = tag.fetch_suffix();

    match convention {
        UrlConvention::Thumbnail => match query_param(base_url, "id") {
            Some(id) => format!("{}{suffix}", &base_url[..id.end]),
            None => format!("{base_url}{suffix}"),
        },
        UrlConvention::StaticFile => {
            if suffix.is_empty() {
                base_url.to_string()
            } else if base_url.contains('?') {
                format!("{base_url}{suffix}")
            } else {
                format!("{base_url}?{}", &suffix[1..])
            }
        }
    }
}

/// Builds the fetch URL of every variant of `base_url`, in fetch order.
#[must_use]
pub fn variant_urls(base_url: &str) -> Vec<(ResolutionTag, String)> {
    let convention = UrlConvention::detect(base_url);
    convention
        .resolutions()
        .iter()
        .map(|tag| (*tag, build_fetch_url(base_url, convention, *tag)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const THUMB: &str = "https://cn.bing.com/th?id=OHR.Test_EN-US1234567_UHD.jpg&pid=hp&w=1920";

    #[test]
    fn test_thumbnail_replaces_trailing_params() {
        let urls = variant_urls(THUMB);

        assert_eq!(
            urls,
            vec![
                (
                    ResolutionTag::W480,
                    "https://cn.bing.com/th?id=OHR.Test_EN-US1234567_UHD.jpg&pid=hp&w=480"
                        .to_string()
                ),
                (
                    ResolutionTag::W1920,
                    "https://cn.bing.com/th?id=OHR.Test_EN-US1234567_UHD.jpg&pid=hp&w=1920"
                        .to_string()
                ),
                (
                    ResolutionTag::Uhd,
                    "https://cn.bing.com/th?id=OHR.Test_EN-US1234567_UHD.jpg".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_thumbnail_with_id_last() {
        let base = "https://cn.bing.com/th?id=OHR.A_UHD.jpg";
        assert_eq!(
            build_fetch_url(base, UrlConvention::Thumbnail, ResolutionTag::W480),
            "https://cn.bing.com/th?id=OHR.A_UHD.jpg&pid=hp&w=480"
        );
        assert_eq!(
            build_fetch_url(base, UrlConvention::Thumbnail, ResolutionTag::Uhd),
            base
        );
    }

    #[test]
    fn test_thumbnail_keeps_params_before_id() {
        let base = "https://cn.bing.com/th?rf=x&id=OHR.A.jpg&w=3840";
        assert_eq!(
            build_fetch_url(base, UrlConvention::Thumbnail, ResolutionTag::W1920),
            "https://cn.bing.com/th?rf=x&id=OHR.A.jpg&pid=hp&w=1920"
        );
    }

    #[test]
    fn test_static_without_query() {
        let urls = variant_urls("https://example.com/img/sunset.jpg");

        assert_eq!(
            urls,
            vec![
                (
                    ResolutionTag::W384x216,
                    "https://example.com/img/sunset.jpg?pid=hp&w=384&h=216&rs=1&c=4".to_string()
                ),
                (
                    ResolutionTag::W1000,
                    "https://example.com/img/sunset.jpg?w=1000".to_string()
                ),
                (
                    ResolutionTag::FourK,
                    "https://example.com/img/sunset.jpg".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_static_with_query() {
        let base = "https://example.com/img/sunset.jpg?token=abc";
        assert_eq!(
            build_fetch_url(base, UrlConvention::StaticFile, ResolutionTag::W1000),
            "https://example.com/img/sunset.jpg?token=abc&w=1000"
        );
    }
}
