//! Rewrites remote thumbnail references to locally mirrored variants.

use std::sync::Arc;

use tracing::{debug, trace};

use super::reference_scanner::{ReferenceMatch, ReferenceScanner, apply_replacements};
use crate::domain::entities::{ImageRecord, MirrorIndex, VariantKey};
use crate::domain::ports::VariantIndexPort;
use crate::domain::services::{ReferenceShape, ResolutionPolicy};

/// Rewritten text and the number of references replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    /// Text after all replacements.
    pub text: String,
    /// References pointed at the local mirror.
    pub replacements: usize,
}

impl RewriteOutcome {
    /// Returns true if at least one reference was replaced.
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.replacements > 0
    }
}

/// Points markup at the local mirror.
///
/// Each pass rebuilds its index from the filesystem; nothing is remembered
/// between calls.
pub struct LinkRewriter {
    index_port: Arc<dyn VariantIndexPort>,
    policy: ResolutionPolicy,
}

impl LinkRewriter {
    /// Creates a rewriter using `index_port` to discover local variants.
    #[must_use]
    pub fn new(index_port: Arc<dyn VariantIndexPort>, policy: ResolutionPolicy) -> Self {
        Self { index_port, policy }
    }

    /// Indexes the local variants of `records`. Records without any local
    /// file are left out.
    #[must_use]
    pub fn build_mirror_index(&self, records: &[ImageRecord]) -> MirrorIndex {
        records
            .iter()
            .map(|record| self.index_port.build_index(record))
            .collect()
    }

    /// Rewrites every reference in `text` that has a local variant.
    #[must_use]
    pub fn rewrite(&self, text: &str, records: &[ImageRecord]) -> String {
        let index = self.build_mirror_index(records);
        self.rewrite_with_index(text, &index).text
    }

    /// Rewrites `text` against an index built earlier in the same pass.
    ///
    /// Shapes are applied one after another, each over the output of the
    /// previous one.
    #[must_use]
    pub fn rewrite_with_index(&self, text: &str, index: &MirrorIndex) -> RewriteOutcome {
        let mut current = text.to_string();
        let mut total = 0;

        if index.is_empty() {
            return RewriteOutcome {
                text: current,
                replacements: 0,
            };
        }

        for shape in ReferenceShape::ALL {
            let replacements: Vec<(usize, usize, String)> =
                ReferenceScanner::scan(&current, shape)
                    .into_iter()
                    .filter_map(|m| {
                        self.resolve(&m, index)
                            .map(|local| (m.start, m.end, local))
                    })
                    .collect();

            if replacements.is_empty() {
                continue;
            }

            total += replacements.len();
            current = apply_replacements(&current, &replacements);
        }

        RewriteOutcome {
            text: current,
            replacements: total,
        }
    }

    fn resolve(&self, reference: &ReferenceMatch<'_>, index: &MirrorIndex) -> Option<String> {
        let identity = VariantKey::identity_for_url(reference.url);
        let Some(variants) = index.get(&identity) else {
            trace!(identity = %identity, "No local variants for reference");
            return None;
        };

        let desired = self.policy.desired_tag(reference.shape, reference.url);
        let (tag, local) = variants.resolve(desired)?;

        debug!(
            shape = %reference.shape,
            identity = %identity,
            desired = %desired,
            resolved = %tag,
            local = %local,
            "Rewrote image reference"
        );
        Some(local.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ResolutionTag;
    use crate::domain::ports::mocks::MockVariantIndex;

    const IDENTITY: &str = "OHR.Test_EN-US1234567_UHD";
    const URL: &str = "https://cn.bing.com/th?id=OHR.Test_EN-US1234567_UHD.jpg&pid=hp&w=1920";

    fn record() -> ImageRecord {
        ImageRecord::new("Test", "2024-03-15", URL)
    }

    fn rewriter(index: MockVariantIndex) -> LinkRewriter {
        LinkRewriter::new(Arc::new(index), ResolutionPolicy::default())
    }

    fn local(tag: &str) -> String {
        format!("/local_img/2024-03/{IDENTITY}_{tag}.jpg")
    }

    #[test]
    fn test_src_with_width_hint_resolves_directly() {
        let rewriter = rewriter(MockVariantIndex::new().with(IDENTITY, &ResolutionTag::INDEXED));
        let text = format!(r#"<img src="{URL}">"#);

        let result = rewriter.rewrite(&text, &[record()]);

        assert_eq!(result, format!(r#"<img src="{}">"#, local("1920")));
    }

    #[test]
    fn test_background_falls_back_to_small() {
        let rewriter = rewriter(MockVariantIndex::new().with(IDENTITY, &[ResolutionTag::W480]));
        let bare = "https://cn.bing.com/th?id=OHR.Test_EN-US1234567_UHD.jpg";
        let text = format!(r#"<header style="background-image: url('{bare}')">"#);

        let result = rewriter.rewrite(&text, &[record()]);

        assert_eq!(
            result,
            format!(r#"<header style="background-image: url('{}')">"#, local("480"))
        );
    }

    #[test]
    fn test_uhd_desired_only_small_present() {
        let rewriter = rewriter(MockVariantIndex::new().with(IDENTITY, &[ResolutionTag::W480]));
        let text = r#"<a href="https://cn.bing.com/th?id=OHR.Test_EN-US1234567_UHD.jpg">"#;

        let result = rewriter.rewrite(text, &[record()]);

        assert_eq!(result, format!(r#"<a href="{}">"#, local("480")));
    }

    #[test]
    fn test_no_local_files_leaves_text_untouched() {
        let rewriter = rewriter(MockVariantIndex::new());
        let text = format!(r#"<a href="{URL}"><img src="{URL}"></a>"#);

        assert_eq!(rewriter.rewrite(&text, &[record()]), text);
    }

    #[test]
    fn test_unknown_identity_left_untouched() {
        let rewriter = rewriter(MockVariantIndex::new().with(IDENTITY, &ResolutionTag::INDEXED));
        let text = r#"<img src="https://cn.bing.com/th?id=OHR.Other_EN-US1.jpg&w=480">"#;

        assert_eq!(rewriter.rewrite(text, &[record()]), text);
    }

    #[test]
    fn test_each_shape_resolves_independently() {
        let rewriter = rewriter(MockVariantIndex::new().with(IDENTITY, &ResolutionTag::INDEXED));
        let bare = "https://cn.bing.com/th?id=OHR.Test_EN-US1234567_UHD.jpg";
        let text = format!(
            r#"<div style="background-image: url({bare})"><a href="{bare}"><img src="{bare}&pid=hp&w=480"></a></div>"#
        );

        let index = rewriter.build_mirror_index(&[record()]);
        let outcome = rewriter.rewrite_with_index(&text, &index);

        assert_eq!(outcome.replacements, 3);
        assert_eq!(
            outcome.text,
            format!(
                r#"<div style="background-image: url({})"><a href="{}"><img src="{}"></a></div>"#,
                local("1920"),
                local("UHD"),
                local("480")
            )
        );
    }

    #[test]
    fn test_html_escaped_query_separators() {
        let rewriter = rewriter(MockVariantIndex::new().with(IDENTITY, &ResolutionTag::INDEXED));
        let text = r#"<img src="https://cn.bing.com/th?id=OHR.Test_EN-US1234567_UHD.jpg&amp;pid=hp&amp;w=480">"#;

        let result = rewriter.rewrite(text, &[record()]);

        assert_eq!(result, format!(r#"<img src="{}">"#, local("480")));
    }

    #[test]
    fn test_text_without_references_unchanged() {
        let rewriter = rewriter(MockVariantIndex::new().with(IDENTITY, &ResolutionTag::INDEXED));
        let text = "<p>No wallpapers here</p>";

        let index = rewriter.build_mirror_index(&[record()]);
        let outcome = rewriter.rewrite_with_index(text, &index);

        assert_eq!(outcome.text, text);
        assert!(!outcome.is_modified());
    }
}
