//! Text search and replace over the flattened document view
//!
//! Operates on the compact flattening produced by `DocumentTextView`:
//! content is split into lines on the separator and walked in order with
//! a running cursor advancing by `line length + 1`, so reported offsets
//! are absolute within the flattened text. Only the first match in the
//! whole document is reported; "find next" is the caller re-invoking on
//! content sliced past the previous hit.
//!
//! Two observed quirks are part of the contract and preserved on purpose:
//! - literal global replace reports success even with zero matches
//!   (unlike the regex branch, which reports success only when at least
//!   one match existed);
//! - single replace sets `cursor_end` to `cursor_start` plus the length
//!   of the *replacement*, reflecting post-replace cursor placement.

use crate::core::{Result, SubtitleError};
use regex::Regex;

/// Result value of one search or replace call. Produced fresh per call;
/// a miss is `success = false`, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchOutcome {
    /// Whether a match was found (or, for literal global replace, always true)
    pub success: bool,
    /// Absolute byte offset of the match start in the flattened content
    pub cursor_start: usize,
    /// Absolute byte offset of the match end (for single replace: start
    /// plus the replacement length)
    pub cursor_end: usize,
    /// The reconstructed content, where the operation produces one
    pub content: Option<String>,
}

impl SearchOutcome {
    /// A successful match at the given absolute offsets
    #[must_use]
    pub fn hit(cursor_start: usize, cursor_end: usize) -> Self {
        Self {
            success: true,
            cursor_start,
            cursor_end,
            content: None,
        }
    }

    /// A successful whole-content replacement (no meaningful cursor span)
    #[must_use]
    pub fn replaced(content: String) -> Self {
        Self {
            success: true,
            cursor_start: 0,
            cursor_end: 0,
            content: Some(content),
        }
    }
}

/// Split content into lines, dropping exactly one trailing empty segment
/// so that reassembling every line plus a separator reproduces the input.
fn split_lines(content: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = content.split('\n').collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

/// Literal substring search returning the matched byte span in the
/// haystack. The span end can differ from `start + needle.len()` under
/// case folding, where the two sides need not have equal byte lengths.
fn find_literal(haystack: &str, needle: &str, ignore_case: bool) -> Option<(usize, usize)> {
    if ignore_case {
        find_fold(haystack, needle)
    } else {
        haystack.find(needle).map(|pos| (pos, pos + needle.len()))
    }
}

/// Case-insensitive substring search comparing per-char lowercase folds,
/// so byte offsets always refer to the haystack itself. A haystack char
/// whose fold only partially covers the needle tail does not match; a
/// match never splits a character.
fn find_fold(haystack: &str, needle: &str) -> Option<(usize, usize)> {
    if needle.is_empty() {
        return Some((0, 0));
    }
    let needle_folded: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();
    haystack.char_indices().find_map(|(start, _)| {
        fold_match_end(haystack, start, &needle_folded).map(|end| (start, end))
    })
}

/// Match the folded needle against the haystack starting at `start`,
/// returning the byte offset one past the matched region.
fn fold_match_end(haystack: &str, start: usize, needle_folded: &[char]) -> Option<usize> {
    let mut matched = 0;
    for (idx, ch) in haystack[start..].char_indices() {
        for folded in ch.to_lowercase() {
            if needle_folded.get(matched) == Some(&folded) {
                matched += 1;
            } else {
                return None;
            }
        }
        if matched == needle_folded.len() {
            return Some(start + idx + ch.len_utf8());
        }
    }
    None
}

/// Literal global replace ignoring case.
fn replace_literal_ignore_case(content: &str, needle: &str, replacement: &str) -> String {
    if needle.is_empty() {
        return content.to_string();
    }
    let mut out = String::with_capacity(content.len());
    let mut rest = content;
    while let Some((start, end)) = find_fold(rest, needle) {
        out.push_str(&rest[..start]);
        out.push_str(replacement);
        rest = &rest[end..];
    }
    out.push_str(rest);
    out
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| SubtitleError::pattern(pattern, &e))
}

/// Find the first occurrence of `target` anywhere in `content`.
///
/// Walks lines in order and stops at the first hit; the returned offsets
/// are absolute within `content`. `ignore_case` applies to literal
/// search only; the regex branch compiles the pattern with no flags,
/// matching the observed editor behavior.
///
/// # Errors
/// `InvalidPattern` when `is_regex` and `target` fails to compile.
pub fn search(
    content: &str,
    target: &str,
    ignore_case: bool,
    is_regex: bool,
) -> Result<SearchOutcome> {
    let mut cursor = 0;
    if is_regex {
        let re = compile(target)?;
        for line in split_lines(content) {
            if let Some(m) = re.find(line) {
                return Ok(SearchOutcome::hit(cursor + m.start(), cursor + m.end()));
            }
            cursor += line.len() + 1;
        }
    } else {
        for line in split_lines(content) {
            if let Some((pos, end)) = find_literal(line, target, ignore_case) {
                return Ok(SearchOutcome::hit(cursor + pos, cursor + end));
            }
            cursor += line.len() + 1;
        }
    }
    Ok(SearchOutcome::default())
}

/// Replace occurrences of `search_str` with `replace_str` in `content`.
///
/// With `replace_all`, the whole content is rewritten in one pass; the
/// regex branch reports success only when at least one match existed,
/// while the literal branch always reports success (see module docs).
/// Without `replace_all`, only the first occurrence on the first matching
/// line is replaced, and the reconstructed content is returned whether or
/// not a match was found; `success` is authoritative, not the presence
/// of content. Regex replacements support `$n` group expansion.
///
/// # Errors
/// `InvalidPattern` when `is_regex` and `search_str` fails to compile.
pub fn replace(
    content: &str,
    search_str: &str,
    replace_str: &str,
    replace_all: bool,
    ignore_case: bool,
    is_regex: bool,
) -> Result<SearchOutcome> {
    if replace_all {
        if is_regex {
            let re = compile(search_str)?;
            if re.is_match(content) {
                return Ok(SearchOutcome::replaced(
                    re.replace_all(content, replace_str).into_owned(),
                ));
            }
            return Ok(SearchOutcome::default());
        }
        let replaced = if ignore_case {
            replace_literal_ignore_case(content, search_str, replace_str)
        } else {
            content.replace(search_str, replace_str)
        };
        // Zero literal matches still count as success, content unchanged.
        return Ok(SearchOutcome::replaced(replaced));
    }

    let re = if is_regex {
        Some(compile(search_str)?)
    } else {
        None
    };
    let mut out = String::with_capacity(content.len());
    let mut outcome = SearchOutcome::default();
    let mut cursor = 0;
    for line in split_lines(content) {
        if !outcome.success {
            if let Some(re) = &re {
                if let Some(m) = re.find(line) {
                    let start = cursor + m.start();
                    outcome = SearchOutcome::hit(start, start + replace_str.len());
                    out.push_str(&re.replace(line, replace_str));
                    out.push('\n');
                    continue;
                }
            } else if let Some((pos, end)) = find_literal(line, search_str, ignore_case) {
                let start = cursor + pos;
                outcome = SearchOutcome::hit(start, start + replace_str.len());
                out.push_str(&line[..pos]);
                out.push_str(replace_str);
                out.push_str(&line[end..]);
                out.push('\n');
                continue;
            }
        }
        out.push_str(line);
        out.push('\n');
        cursor += line.len() + 1;
    }
    outcome.content = Some(out);
    Ok(outcome)
}
