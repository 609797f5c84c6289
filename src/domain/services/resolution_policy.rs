//! Which local resolution a markup reference should point at.
//!
//! Width hints (`w=` in the reference's query) decide first; without a
//! decisive hint each reference shape has its own default:
//!
//! | shape       | no width | other width |
//! |-------------|----------|-------------|
//! | background  | `1920`   | `1920`      |
//! | `src`       | `UHD`    | `480`       |
//! | `href`      | `UHD`    | `1920`      |

use serde::{Deserialize, Serialize};

use super::identity_extractor::query_param;
use crate::domain::entities::ResolutionTag;

/// Kind of markup reference carrying a remote image URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceShape {
    /// `background-image: url("...")`
    Background,
    /// `href="..."`
    Href,
    /// `src="..."`
    Src,
}

impl ReferenceShape {
    /// All shapes, in rewrite order.
    pub const ALL: [Self; 3] = [Self::Background, Self::Href, Self::Src];

    /// Returns `(no width, non-decisive width)` defaults.
    const fn defaults(self) -> (ResolutionTag, ResolutionTag) {
        match self {
            Self::Background => (ResolutionTag::W1920, ResolutionTag::W1920),
            Self::Src => (ResolutionTag::Uhd, ResolutionTag::W480),
            Self::Href => (ResolutionTag::Uhd, ResolutionTag::W1920),
        }
    }
}

impl std::fmt::Display for ReferenceShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Background => write!(f, "background"),
            Self::Href => write!(f, "href"),
            Self::Src => write!(f, "src"),
        }
    }
}

/// Width bands mapping a `w=` hint to a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionPolicy {
    /// Widths up to this value want the small variant.
    #[serde(default = "default_small_width_max")]
    pub small_width_max: u32,
    /// Widths from this value want the full HD variant.
    #[serde(default = "default_large_width_min")]
    pub large_width_min: u32,
    /// Widths from this value want the native variant.
    #[serde(default = "default_native_width_min")]
    pub native_width_min: u32,
}

const fn default_small_width_max() -> u32 {
    640
}

const fn default_large_width_min() -> u32 {
    1920
}

const fn default_native_width_min() -> u32 {
    3840
}

impl Default for ResolutionPolicy {
    fn default() -> Self {
        Self {
            small_width_max: default_small_width_max(),
            large_width_min: default_large_width_min(),
            native_width_min: default_native_width_min(),
        }
    }
}

impl ResolutionPolicy {
    /// Returns the resolution wanted by a `shape` reference to `url`.
    #[must_use]
    pub fn desired_tag(&self, shape: ReferenceShape, url: &str) -> ResolutionTag {
        self.tag_for(shape, width_hint(url))
    }

    /// Returns the resolution wanted for an optional width hint.
    #[must_use]
    pub fn tag_for(&self, shape: ReferenceShape, width: Option<u32>) -> ResolutionTag {
        let (without_width, with_width) = shape.defaults();
        match width {
            Some(w) if w >= self.native_width_min => ResolutionTag::Uhd,
            Some(w) if w >= self.large_width_min => ResolutionTag::W1920,
            Some(w) if w <= self.small_width_max => ResolutionTag::W480,
            Some(_) => with_width,
            None => without_width,
        }
    }
}

/// Parses the `w=` query parameter. Unparseable values count as absent.
#[must_use]
pub fn width_hint(url: &str) -> Option<u32> {
    query_param(url, "w")?.value.trim().parse().ok()
}
