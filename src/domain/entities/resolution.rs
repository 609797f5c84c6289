//! Resolution variants and the URL conventions that produce them.

use std::fmt;

use crate::domain::services::query_param;

/// Path fragment identifying the primary host's thumbnail service.
pub const THUMBNAIL_PATH: &str = "bing.com/th";

/// One fetched size or crop of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResolutionTag {
    /// 480 px wide thumbnail.
    W480,
    /// Full HD width.
    W1920,
    /// Host's native maximum.
    Uhd,
    /// 384x216 cropped preview.
    W384x216,
    /// 1000 px wide.
    W1000,
    /// Native maximum on static hosts.
    FourK,
}

impl ResolutionTag {
    /// Tags probed when indexing the local mirror, in probe order.
    pub const INDEXED: [Self; 3] = [Self::W480, Self::W1920, Self::Uhd];

    /// Returns the tag as used in file names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::W480 => "480",
            Self::W1920 => "1920",
            Self::Uhd => "UHD",
            Self::W384x216 => "384x216",
            Self::W1000 => "1000",
            Self::FourK => "4k",
        }
    }

    /// Returns the query suffix requesting this variant. Empty means the
    /// unmodified URL already serves it.
    #[must_use]
    pub const fn fetch_suffix(self) -> &'static str {
        match self {
            Self::W480 => "&pid=hp&w=480",
            Self::W1920 => "&pid=hp&w=1920",
            Self::W384x216 => "&pid=hp&w=384&h=216&rs=1&c=4",
            Self::W1000 => "&w=1000",
            Self::Uhd | Self::FourK => "",
        }
    }

    /// Maps static-host tags onto the indexed tag of comparable size.
    #[must_use]
    pub const fn indexed_equivalent(self) -> Self {
        match self {
            Self::W480 | Self::W384x216 => Self::W480,
            Self::W1920 | Self::W1000 => Self::W1920,
            Self::Uhd | Self::FourK => Self::Uhd,
        }
    }

    /// Returns the order in which local variants are tried when this tag is
    /// wanted. The first entry is the tag itself.
    #[must_use]
    pub const fn fallback_ring(self) -> [Self; 3] {
        match self.indexed_equivalent() {
            Self::W480 => [Self::W480, Self::W1920, Self::Uhd],
            Self::W1920 => [Self::W1920, Self::Uhd, Self::W480],
            _ => [Self::Uhd, Self::W1920, Self::W480],
        }
    }

    /// Guesses the tag of a mirrored file from its name. The first of `_480`,
    /// `_1920`, `_UHD` found wins; names with none are taken as `UHD`.
    #[must_use]
    pub fn infer_from_file_name(name: &str) -> Self {
        Self::INDEXED
            .into_iter()
            .find(|tag| name.contains(&format!("_{}", tag.as_str())))
            .unwrap_or(Self::Uhd)
    }
}

impl fmt::Display for ResolutionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a remote URL is turned into per-resolution fetch URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlConvention {
    /// Thumbnail service addressed by an `id` parameter.
    Thumbnail,
    /// Any other host; sizes requested through plain query parameters.
    StaticFile,
}

impl UrlConvention {
    /// Picks the convention for `url`.
    #[must_use]
    pub fn detect(url: &str) -> Self {
        if url.contains(THUMBNAIL_PATH) && query_param(url, "id").is_some() {
            Self::Thumbnail
        } else {
            Self::StaticFile
        }
    }

    /// Returns the variants fetched under this convention.
    #[must_use]
    pub const fn resolutions(self) -> &'static [ResolutionTag] {
        match self {
            Self::Thumbnail => &[ResolutionTag::W480, ResolutionTag::W1920, ResolutionTag::Uhd],
            Self::StaticFile => &[
                ResolutionTag::W384x216,
                ResolutionTag::W1000,
                ResolutionTag::FourK,
            ],
        }
    }
}
