// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Mention-query detection over a flat text buffer.
//!
//! A query is derived transiently from the text and cursor on every edit; it
//! is never stored across events. The cursor must sit strictly after the `@`
//! and before the next whitespace for a query to exist.

use std::ops::Range;

/// An active `@` query: the byte offset of the `@` itself plus the query text
/// that follows it (without the `@`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionQuery {
    pub start: usize,
    pub raw: String,
}

impl MentionQuery {
    /// The flattened byte range covered by the token: the `@` plus the query
    /// text. This is exactly the range replaced when a suggestion is
    /// accepted.
    pub fn span(&self) -> Range<usize> {
        self.start..self.start + 1 + self.raw.len()
    }
}

/// Scan backward from `cursor` looking for an unterminated `@` token.
///
/// Returns `None` when whitespace, a newline, or the start of the text is
/// reached before an `@`. A found `@` only triggers when it is at the very
/// start of the text, at the very end of the text, or immediately preceded
/// by whitespace, so `foo@bar` never opens a query but a just-typed `foo@`
/// does (with an empty query). The query text runs from just after the `@`
/// to the next whitespace or the end of the text, independent of where
/// inside the token the cursor sits.
pub fn detect(text: &str, cursor: usize) -> Option<MentionQuery> {
    if cursor == 0 || cursor > text.len() || !text.is_char_boundary(cursor) {
        return None;
    }
    for (idx, ch) in text[..cursor].char_indices().rev() {
        if ch.is_whitespace() {
            return None;
        }
        if ch != '@' {
            continue;
        }
        if let Some(prev) = text[..idx].chars().next_back() {
            // a word-attached `@` still triggers while it is the last
            // character of the text
            if !prev.is_whitespace() && idx + 1 != text.len() {
                return None;
            }
        }
        let after = idx + 1;
        let end = text[after..]
            .find(char::is_whitespace)
            .map(|off| after + off)
            .unwrap_or(text.len());
        return Some(MentionQuery { start: idx, raw: text[after..end].to_string() });
    }
    None
}

// ── Tests ────────────────────────────────────────────────────────────────────
