//! Text-level diffing between two sequences of extracted text spans.
//!
//! Operates purely on [`crate::layout::text_block::TextSpan`] records — this
//! module never touches content streams directly, matching the parse/extract
//! separation used by the rest of the crate.

use crate::layout::text_block::TextSpan;

/// Granularity at which text spans are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Granularity {
    /// Whole spans (one Tj/TJ run) are the unit of comparison.
    #[default]
    Element,
    /// Spans are split on whitespace before comparison.
    Word,
    /// Spans are split into individual characters before comparison.
    Character,
}

/// How strict position/text matching must be before two spans are
/// considered "the same" element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sensitivity {
    /// Position and text must match closely.
    Strict,
    /// Default tolerance for sub-pixel layout jitter.
    #[default]
    Normal,
    /// Wide tolerance; tolerates font substitution and reflow.
    Relaxed,
}

impl Sensitivity {
    fn position_tolerance(&self) -> f32 {
        match self {
            Sensitivity::Strict => 0.5,
            Sensitivity::Normal => 2.0,
            Sensitivity::Relaxed => 8.0,
        }
    }
}

/// One detected difference between two text spans.
#[derive(Debug, Clone, PartialEq)]
pub enum TextChange {
    /// Present only in the new document.
    Added { text: String, index: usize },
    /// Present only in the old document.
    Removed { text: String, index: usize },
    /// Present in both, but text or styling differs.
    Modified {
        old_text: String,
        new_text: String,
        old_index: usize,
        new_index: usize,
    },
    /// Present in both with identical text, but moved beyond tolerance.
    Moved {
        text: String,
        old_index: usize,
        new_index: usize,
    },
}

/// Result of diffing two span sequences for a single page.
#[derive(Debug, Clone, Default)]
pub struct TextDiff {
    pub changes: Vec<TextChange>,
}

impl TextDiff {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn added_count(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, TextChange::Added { .. }))
            .count()
    }

    pub fn removed_count(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, TextChange::Removed { .. }))
            .count()
    }
}

/// Diff two pages' text spans using the four-phase matcher: exact match,
/// same-position modification, same-text move, then Myers/LCS for whatever
/// remains unmatched.
///
/// `granularity` controls the unit of comparison: whole spans, whitespace-
/// separated words, or individual characters. Word/Character granularity
/// explode each span into sub-spans before matching, prorating the original
/// bounding box across the split text so position tolerance still applies.
pub fn diff_spans(old: &[TextSpan], new: &[TextSpan], granularity: Granularity, sensitivity: Sensitivity) -> TextDiff {
    let old = explode_spans(old, granularity);
    let new = explode_spans(new, granularity);
    let old = old.as_slice();
    let new = new.as_slice();

    let tol = sensitivity.position_tolerance();
    let mut old_matched = vec![false; old.len()];
    let mut new_matched = vec![false; new.len()];
    let mut changes = Vec::new();

    // Phase 1: exact position + text + font match — no change to report.
    for (oi, o) in old.iter().enumerate() {
        for (ni, n) in new.iter().enumerate() {
            if new_matched[ni] {
                continue;
            }
            if o.text == n.text && o.font_name == n.font_name && close(o.bbox.x, n.bbox.x, tol) && close(o.bbox.y, n.bbox.y, tol) {
                old_matched[oi] = true;
                new_matched[ni] = true;
                break;
            }
        }
    }

    // Phase 2: same position, different text -> modification.
    for (oi, o) in old.iter().enumerate() {
        if old_matched[oi] {
            continue;
        }
        for (ni, n) in new.iter().enumerate() {
            if new_matched[ni] {
                continue;
            }
            if close(o.bbox.x, n.bbox.x, tol) && close(o.bbox.y, n.bbox.y, tol) && o.text != n.text {
                old_matched[oi] = true;
                new_matched[ni] = true;
                changes.push(TextChange::Modified {
                    old_text: o.text.clone(),
                    new_text: n.text.clone(),
                    old_index: oi,
                    new_index: ni,
                });
                break;
            }
        }
    }

    // Phase 3: same text, different position beyond tolerance -> move.
    for (oi, o) in old.iter().enumerate() {
        if old_matched[oi] {
            continue;
        }
        for (ni, n) in new.iter().enumerate() {
            if new_matched[ni] {
                continue;
            }
            if o.text == n.text {
                old_matched[oi] = true;
                new_matched[ni] = true;
                changes.push(TextChange::Moved {
                    text: o.text.clone(),
                    old_index: oi,
                    new_index: ni,
                });
                break;
            }
        }
    }

    // Phase 4: remaining elements go through an LCS/Myers alignment so that
    // insertions and deletions are reported as a minimal edit script rather
    // than an arbitrary many-to-many mismatch.
    let remaining_old: Vec<usize> = (0..old.len()).filter(|&i| !old_matched[i]).collect();
    let remaining_new: Vec<usize> = (0..new.len()).filter(|&i| !new_matched[i]).collect();

    let old_texts: Vec<&str> = remaining_old.iter().map(|&i| old[i].text.as_str()).collect();
    let new_texts: Vec<&str> = remaining_new.iter().map(|&i| new[i].text.as_str()).collect();

    for op in myers_diff(&old_texts, &new_texts) {
        match op {
            EditOp::Delete(i) => changes.push(TextChange::Removed {
                text: old[remaining_old[i]].text.clone(),
                index: remaining_old[i],
            }),
            EditOp::Insert(j) => changes.push(TextChange::Added {
                text: new[remaining_new[j]].text.clone(),
                index: remaining_new[j],
            }),
        }
    }

    TextDiff { changes }
}

fn close(a: f32, b: f32, tolerance: f32) -> bool {
    (a - b).abs() <= tolerance
}

/// Split spans into sub-spans at the requested granularity, prorating each
/// span's bounding box across the split so downstream position comparisons
/// still work. `Granularity::Element` is a no-op clone.
fn explode_spans(spans: &[TextSpan], granularity: Granularity) -> Vec<TextSpan> {
    match granularity {
        Granularity::Element => spans.to_vec(),
        Granularity::Word => spans.iter().flat_map(|s| split_span(s, false)).collect(),
        Granularity::Character => spans.iter().flat_map(|s| split_span(s, true)).collect(),
    }
}

/// Split one span's text into either whitespace-separated words or
/// individual characters, distributing its bbox.x/width proportionally to
/// how much of the original text each piece covers.
fn split_span(span: &TextSpan, by_char: bool) -> Vec<TextSpan> {
    let pieces: Vec<String> = if by_char {
        span.text.chars().map(|c| c.to_string()).collect()
    } else {
        span.text.split_whitespace().map(|w| w.to_string()).collect()
    };

    if pieces.is_empty() {
        return vec![span.clone()];
    }

    let total_chars = span.text.chars().count().max(1) as f32;
    let mut consumed = 0usize;
    let mut out = Vec::with_capacity(pieces.len());

    for piece in pieces {
        let piece_chars = piece.chars().count();
        let start_frac = consumed as f32 / total_chars;
        let span_frac = piece_chars as f32 / total_chars;

        let mut sub = span.clone();
        sub.bbox.x = span.bbox.x + span.bbox.width * start_frac;
        sub.bbox.width = span.bbox.width * span_frac;
        sub.text = piece;
        out.push(sub);

        consumed += piece_chars;
        if !by_char {
            // account for the whitespace separator consumed between words
            consumed += 1;
        }
    }

    out
}

#[derive(Debug, Clone, Copy)]
enum EditOp {
    Delete(usize),
    Insert(usize),
}

/// Myers O(ND) shortest-edit-script diff over two slices, falling back to the
/// equivalent LCS DP when the edit distance is large relative to the input
/// size (Myers' greedy algorithm degrades to O(N^2) memory in that regime).
fn myers_diff<T: PartialEq>(a: &[T], b: &[T]) -> Vec<EditOp> {
    if a.len() * b.len() <= 4096 {
        lcs_diff(a, b)
    } else {
        myers_shortest_edit_script(a, b)
    }
}

/// Standard LCS dynamic-program diff, used for small inputs where it's both
/// simpler and no slower than Myers' algorithm.
fn lcs_diff<T: PartialEq>(a: &[T], b: &[T]) -> Vec<EditOp> {
    let n = a.len();
    let m = b.len();
    let mut dp = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            dp[i][j] = if a[i] == b[j] {
                dp[i + 1][j + 1] + 1
            } else {
                dp[i + 1][j].max(dp[i][j + 1])
            };
        }
    }

    let mut ops = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if a[i] == b[j] {
            i += 1;
            j += 1;
        } else if dp[i + 1][j] >= dp[i][j + 1] {
            ops.push(EditOp::Delete(i));
            i += 1;
        } else {
            ops.push(EditOp::Insert(j));
            j += 1;
        }
    }
    while i < n {
        ops.push(EditOp::Delete(i));
        i += 1;
    }
    while j < m {
        ops.push(EditOp::Insert(j));
        j += 1;
    }
    ops
}

/// Myers' O(ND) algorithm, used when the LCS table would be too large.
/// Returns the same edit script shape as [`lcs_diff`] (no `Equal` entries).
fn myers_shortest_edit_script<T: PartialEq>(a: &[T], b: &[T]) -> Vec<EditOp> {
    let n = a.len() as isize;
    let m = b.len() as isize;
    let max = n + m;
    let offset = max as usize;
    let mut v = vec![0isize; 2 * max as usize + 1];
    let mut trace: Vec<Vec<isize>> = Vec::new();

    'outer: for d in 0..=max {
        trace.push(v.clone());
        for k in (-d..=d).step_by(2) {
            let idx = (k + offset as isize) as usize;
            let mut x = if k == -d || (k != d && v[idx - 1] < v[idx + 1]) {
                v[idx + 1]
            } else {
                v[idx - 1] + 1
            };
            let mut y = x - k;
            while x < n && y < m && a[x as usize] == b[y as usize] {
                x += 1;
                y += 1;
            }
            v[idx] = x;
            if x >= n && y >= m {
                trace.push(v.clone());
                break 'outer;
            }
        }
    }

    backtrack_myers(n, m, &trace, offset)
}

fn backtrack_myers(n: isize, m: isize, trace: &[Vec<isize>], offset: usize) -> Vec<EditOp> {
    let mut x = n;
    let mut y = m;
    let mut ops = Vec::new();

    for d in (0..trace.len().saturating_sub(1)).rev() {
        let v = &trace[d];
        let k = x - y;
        let idx = (k + offset as isize) as usize;
        let prev_k = if k == -(d as isize) || (k != d as isize && v[idx - 1] < v[idx + 1]) {
            k + 1
        } else {
            k - 1
        };
        let prev_idx = (prev_k + offset as isize) as usize;
        let prev_x = v[prev_idx];
        let prev_y = prev_x - prev_k;

        while x > prev_x && y > prev_y {
            x -= 1;
            y -= 1;
        }

        if x == prev_x {
            if y > prev_y {
                ops.push(EditOp::Insert((y - 1) as usize));
            }
        } else if x > prev_x {
            ops.push(EditOp::Delete((x - 1) as usize));
        }

        x = prev_x;
        y = prev_y;
    }

    ops.reverse();
    ops
}
