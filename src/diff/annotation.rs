//! Annotation-level diffing: additions, removals, and field-level changes
//! (contents, rect, modification date) to annotations that survive between
//! two versions of a page.
//!
//! Annotations are matched across versions by `(subtype, rect)` identity
//! rather than by any persistent ID, since plain PDF annotations carry no
//! stable cross-revision identifier comparable to a form field's `/T` name.

use crate::annotations::Annotation;

#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationChange {
    Added {
        subtype: String,
    },
    Removed {
        subtype: String,
    },
    ContentsChanged {
        subtype: String,
        old: Option<String>,
        new: Option<String>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct AnnotationDiff {
    pub changes: Vec<AnnotationChange>,
}

impl AnnotationDiff {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

fn subtype_label(a: &Annotation) -> String {
    a.subtype.clone().unwrap_or_else(|| "Unknown".to_string())
}

fn rects_match(a: Option<[f64; 4]>, b: Option<[f64; 4]>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 0.01),
        (None, None) => true,
        _ => false,
    }
}

pub fn diff_annotations(old: &[Annotation], new: &[Annotation]) -> AnnotationDiff {
    let mut old_matched = vec![false; old.len()];
    let mut new_matched = vec![false; new.len()];
    let mut changes = Vec::new();

    for (oi, o) in old.iter().enumerate() {
        for (ni, n) in new.iter().enumerate() {
            if new_matched[ni] {
                continue;
            }
            if o.subtype_enum != n.subtype_enum || !rects_match(o.rect, n.rect) {
                continue;
            }
            old_matched[oi] = true;
            new_matched[ni] = true;
            if o.contents != n.contents {
                changes.push(AnnotationChange::ContentsChanged {
                    subtype: subtype_label(o),
                    old: o.contents.clone(),
                    new: n.contents.clone(),
                });
            }
            break;
        }
    }

    for (oi, o) in old.iter().enumerate() {
        if !old_matched[oi] {
            changes.push(AnnotationChange::Removed {
                subtype: subtype_label(o),
            });
        }
    }
    for (ni, n) in new.iter().enumerate() {
        if !new_matched[ni] {
            changes.push(AnnotationChange::Added {
                subtype: subtype_label(n),
            });
        }
    }

    AnnotationDiff { changes }
}
