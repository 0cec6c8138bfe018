//! Structural document comparison.
//!
//! Produces a [`DiffReport`] comparing two already-opened documents: document
//! metadata, then a per-page comparison of text, images, and annotations.
//! This module does not extract content itself — callers supply already
//! extracted records (`TextSpan`, `ImageInstance`, `Annotation`) per page, so
//! the diff engine stays independent of any one extraction pipeline version.

pub mod annotation;
pub mod image;
pub mod text;

pub use annotation::{diff_annotations, AnnotationChange, AnnotationDiff};
pub use image::{diff_images, ImageChange, ImageDiff, ImageInstance};
pub use text::{diff_spans, Granularity, Sensitivity, TextChange, TextDiff};

use crate::annotations::Annotation;
use crate::layout::text_block::TextSpan;

/// Document-level metadata fields compared independently of page content.
#[derive(Debug, Clone, Default)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
    pub page_count: usize,
}

/// One changed metadata field, as an (old, new) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataFieldChange {
    pub field: &'static str,
    pub old: Option<String>,
    pub new: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MetadataDiff {
    pub changes: Vec<MetadataFieldChange>,
    pub page_count_changed: Option<(usize, usize)>,
}

impl MetadataDiff {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.page_count_changed.is_none()
    }
}

fn diff_metadata(old: &DocumentMetadata, new: &DocumentMetadata) -> MetadataDiff {
    let mut changes = Vec::new();
    macro_rules! field {
        ($name:literal, $f:ident) => {
            if old.$f != new.$f {
                changes.push(MetadataFieldChange {
                    field: $name,
                    old: old.$f.clone(),
                    new: new.$f.clone(),
                });
            }
        };
    }
    field!("title", title);
    field!("author", author);
    field!("subject", subject);
    field!("keywords", keywords);

    let page_count_changed = if old.page_count != new.page_count {
        Some((old.page_count, new.page_count))
    } else {
        None
    };

    MetadataDiff { changes, page_count_changed }
}

/// One page's worth of already-extracted content, ready for comparison.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    pub spans: Vec<TextSpan>,
    pub images: Vec<ImageInstance>,
    pub annotations: Vec<Annotation>,
}

/// Result of diffing a single page pair (present on both sides).
#[derive(Debug, Clone)]
pub struct PageDiff {
    pub page_index: usize,
    pub text: TextDiff,
    pub images: ImageDiff,
    pub annotations: AnnotationDiff,
}

impl PageDiff {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.images.changes.is_empty() && self.annotations.is_empty()
    }
}

/// A page present in only one of the two documents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PagePresence {
    OnlyInOld,
    OnlyInNew,
}

#[derive(Debug, Clone)]
pub struct UnmatchedPage {
    pub page_index: usize,
    pub presence: PagePresence,
}

/// Full comparison result between two documents.
#[derive(Debug, Clone)]
pub struct DiffReport {
    pub metadata: MetadataDiff,
    pub pages: Vec<PageDiff>,
    pub unmatched_pages: Vec<UnmatchedPage>,
}

impl DiffReport {
    pub fn is_identical(&self) -> bool {
        self.metadata.is_empty()
            && self.unmatched_pages.is_empty()
            && self.pages.iter().all(PageDiff::is_empty)
    }

    pub fn changed_page_count(&self) -> usize {
        self.pages.iter().filter(|p| !p.is_empty()).count()
    }
}

/// Compare two documents page by page, plus document-level metadata.
///
/// Pages are compared by index: page `i` in `old` against page `i` in `new`.
/// Extra pages on either side (document grew or shrank) are reported as
/// [`UnmatchedPage`] entries rather than being forced into a spurious diff
/// against the wrong page.
pub fn diff_documents(
    old_metadata: &DocumentMetadata,
    new_metadata: &DocumentMetadata,
    old_pages: &[PageContent],
    new_pages: &[PageContent],
    granularity: Granularity,
    sensitivity: Sensitivity,
) -> DiffReport {
    let metadata = diff_metadata(old_metadata, new_metadata);

    let common = old_pages.len().min(new_pages.len());
    let mut pages = Vec::with_capacity(common);
    for i in 0..common {
        let text = diff_spans(&old_pages[i].spans, &new_pages[i].spans, granularity, sensitivity);
        let images = diff_images(&old_pages[i].images, &new_pages[i].images);
        let annotations = diff_annotations(&old_pages[i].annotations, &new_pages[i].annotations);
        pages.push(PageDiff {
            page_index: i,
            text,
            images,
            annotations,
        });
    }

    let mut unmatched_pages = Vec::new();
    for i in common..old_pages.len() {
        unmatched_pages.push(UnmatchedPage {
            page_index: i,
            presence: PagePresence::OnlyInOld,
        });
    }
    for i in common..new_pages.len() {
        unmatched_pages.push(UnmatchedPage {
            page_index: i,
            presence: PagePresence::OnlyInNew,
        });
    }

    DiffReport { metadata, pages, unmatched_pages }
}
