// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Editable comment document with atomic mention tokens.
//!
//! The document is a normalized sequence of plain-text runs and mention
//! tokens plus a byte cursor into the flattened text. A mention flattens to
//! `@username`, so all offsets (cursor, query spans, styling ranges) address
//! the text exactly as displayed. Tokens are atomic: the cursor never rests
//! strictly inside one, deletion removes a whole token, and horizontal
//! movement jumps over it.

use std::ops::Range;

use thiserror::Error;

use crate::query::{self, MentionQuery};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Mention(String),
}

impl Node {
    /// Byte length of the node in the flattened text.
    fn flat_len(&self) -> usize {
        match self {
            Node::Text(s) => s.len(),
            // the `@` plus the username
            Node::Mention(name) => 1 + name.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("splice range {start}..{end} is outside the document (len {len})")]
    OutOfRange { start: usize, end: usize, len: usize },
    #[error("splice range {start}..{end} crosses a mention token")]
    CrossesMention { start: usize, end: usize },
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<Node>,
    cursor: usize,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Flattened text, with every mention rendered as `@username`.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            match node {
                Node::Text(s) => out.push_str(s),
                Node::Mention(name) => {
                    out.push('@');
                    out.push_str(name);
                }
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.nodes.iter().map(Node::flat_len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Empty or whitespace-only. A document holding only a mention token is
    /// not blank.
    pub fn is_blank(&self) -> bool {
        self.text().trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.cursor = 0;
    }

    /// Flattened byte ranges of every mention token, in document order.
    pub fn mention_spans(&self) -> Vec<(Range<usize>, &str)> {
        let mut spans = Vec::new();
        let mut base = 0;
        for node in &self.nodes {
            let len = node.flat_len();
            if let Node::Mention(name) = node {
                spans.push((base..base + len, name.as_str()));
            }
            base += len;
        }
        spans
    }

    /// Mentioned usernames in document order, duplicates included.
    pub fn mentions(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter_map(|n| match n {
                Node::Mention(name) => Some(name.as_str()),
                Node::Text(_) => None,
            })
            .collect()
    }

    /// The active `@` query at the cursor, if any. A candidate whose span
    /// overlaps an existing mention token is discarded, so the text of an
    /// accepted token can never re-open a query.
    pub fn mention_query(&self) -> Option<MentionQuery> {
        let text = self.text();
        let q = query::detect(&text, self.cursor)?;
        let span = q.span();
        let clear = self
            .mention_spans()
            .iter()
            .all(|(m, _)| span.end <= m.start || m.end <= span.start);
        clear.then_some(q)
    }

    // ── Cursor movement ──────────────────────────────────────────────────────

    /// Clamp to the document, align to a char boundary, and snap out of any
    /// mention interior to the nearest token edge.
    pub fn set_cursor(&mut self, offset: usize) {
        let text = self.text();
        let mut at = offset.min(text.len());
        while at > 0 && !text.is_char_boundary(at) {
            at -= 1;
        }
        if let Some(span) = self.mention_span_inside(at) {
            at = if at - span.start <= span.end - at { span.start } else { span.end };
        }
        self.cursor = at;
    }

    pub fn move_left(&mut self) {
        if self.cursor == 0 {
            return;
        }
        if let Some(start) = self.token_start_ending_at(self.cursor) {
            self.cursor = start;
            return;
        }
        let text = self.text();
        self.cursor = prev_char_boundary(&text, self.cursor);
    }

    pub fn move_right(&mut self) {
        let text = self.text();
        if self.cursor >= text.len() {
            return;
        }
        if let Some(end) = self.token_end_starting_at(self.cursor) {
            self.cursor = end;
            return;
        }
        self.cursor = next_char_boundary(&text, self.cursor);
    }

    pub fn move_word_left(&mut self) {
        let text = self.text();
        self.cursor = prev_word_boundary(&text, self.cursor);
        if let Some(span) = self.mention_span_inside(self.cursor) {
            self.cursor = span.start;
        }
    }

    pub fn move_word_right(&mut self) {
        let text = self.text();
        self.cursor = next_word_boundary(&text, self.cursor);
        if let Some(span) = self.mention_span_inside(self.cursor) {
            self.cursor = span.end;
        }
    }

    pub fn move_line_start(&mut self) {
        let text = self.text();
        self.cursor = text[..self.cursor].rfind('\n').map(|i| i + 1).unwrap_or(0);
    }

    pub fn move_line_end(&mut self) {
        let text = self.text();
        self.cursor = text[self.cursor..]
            .find('\n')
            .map(|i| self.cursor + i)
            .unwrap_or(text.len());
    }

    // ── Editing ──────────────────────────────────────────────────────────────

    pub fn insert_char(&mut self, c: char) {
        let at = self.cursor;
        let mut base = 0;
        for node in self.nodes.iter_mut() {
            let len = node.flat_len();
            if let Node::Text(s) = node {
                if at >= base && at <= base + len {
                    s.insert(at - base, c);
                    self.cursor += c.len_utf8();
                    return;
                }
            }
            base += len;
        }
        // cursor sits between tokens, or the document is empty
        let idx = self.boundary_index(at);
        self.nodes.insert(idx, Node::Text(c.to_string()));
        self.cursor += c.len_utf8();
    }

    pub fn insert_str(&mut self, s: &str) {
        for c in s.chars() {
            self.insert_char(c);
        }
    }

    /// Delete backward: one char inside a text run, a whole token when the
    /// cursor touches a mention's trailing edge.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.cursor;
        let mut base = 0;
        for i in 0..self.nodes.len() {
            let len = self.nodes[i].flat_len();
            if at > base && at <= base + len {
                match &mut self.nodes[i] {
                    Node::Mention(_) => {
                        self.nodes.remove(i);
                        self.cursor = base;
                    }
                    Node::Text(s) => {
                        let local = at - base;
                        let start = prev_char_boundary(s, local);
                        s.replace_range(start..local, "");
                        self.cursor = base + start;
                    }
                }
                self.normalize();
                return;
            }
            base += len;
        }
    }

    /// Delete forward: one char inside a text run, a whole token when the
    /// cursor touches a mention's leading edge.
    pub fn delete_forward(&mut self) {
        let at = self.cursor;
        let mut base = 0;
        for i in 0..self.nodes.len() {
            let len = self.nodes[i].flat_len();
            if at >= base && at < base + len {
                match &mut self.nodes[i] {
                    Node::Mention(_) => {
                        self.nodes.remove(i);
                    }
                    Node::Text(s) => {
                        let local = at - base;
                        let end = next_char_boundary(s, local);
                        s.replace_range(local..end, "");
                    }
                }
                self.normalize();
                return;
            }
            base += len;
        }
    }

    /// Replace exactly the flattened byte range `span` with an atomic mention
    /// token followed by a single space, and place the cursor after the
    /// space. The range is located by offset; other `@` occurrences in the
    /// document are untouched. The range must lie within one text run.
    pub fn splice_mention(
        &mut self,
        span: Range<usize>,
        username: &str,
    ) -> Result<(), DocumentError> {
        let total = self.len();
        if span.start > span.end || span.end > total {
            return Err(DocumentError::OutOfRange { start: span.start, end: span.end, len: total });
        }
        let mut base = 0;
        for i in 0..self.nodes.len() {
            let node_len = self.nodes[i].flat_len();
            if span.start >= base && span.end <= base + node_len {
                let Node::Text(s) = &self.nodes[i] else {
                    return Err(DocumentError::CrossesMention {
                        start: span.start,
                        end: span.end,
                    });
                };
                let (lo, hi) = (span.start - base, span.end - base);
                if !s.is_char_boundary(lo) || !s.is_char_boundary(hi) {
                    return Err(DocumentError::OutOfRange {
                        start: span.start,
                        end: span.end,
                        len: total,
                    });
                }
                let prefix = s[..lo].to_string();
                let suffix = s[hi..].to_string();
                let mut replacement = Vec::with_capacity(3);
                if !prefix.is_empty() {
                    replacement.push(Node::Text(prefix));
                }
                replacement.push(Node::Mention(username.to_string()));
                replacement.push(Node::Text(format!(" {suffix}")));
                self.nodes.splice(i..i + 1, replacement);
                self.cursor = span.start + 1 + username.len() + 1;
                self.normalize();
                return Ok(());
            }
            base += node_len;
        }
        Err(DocumentError::CrossesMention { start: span.start, end: span.end })
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Mention span strictly containing `offset`, if any.
    fn mention_span_inside(&self, offset: usize) -> Option<Range<usize>> {
        self.mention_spans()
            .into_iter()
            .map(|(span, _)| span)
            .find(|span| offset > span.start && offset < span.end)
    }

    fn token_start_ending_at(&self, offset: usize) -> Option<usize> {
        self.mention_spans()
            .into_iter()
            .find_map(|(span, _)| (span.end == offset).then_some(span.start))
    }

    fn token_end_starting_at(&self, offset: usize) -> Option<usize> {
        self.mention_spans()
            .into_iter()
            .find_map(|(span, _)| (span.start == offset).then_some(span.end))
    }

    /// Node index at which a new node starting at boundary `offset` belongs.
    fn boundary_index(&self, offset: usize) -> usize {
        let mut base = 0;
        for (i, node) in self.nodes.iter().enumerate() {
            if offset <= base {
                return i;
            }
            base += node.flat_len();
        }
        self.nodes.len()
    }

    /// Drop empty text runs and merge adjacent ones.
    fn normalize(&mut self) {
        let mut out: Vec<Node> = Vec::with_capacity(self.nodes.len());
        for node in self.nodes.drain(..) {
            match node {
                Node::Text(s) if s.is_empty() => {}
                Node::Text(s) => {
                    if let Some(Node::Text(prev)) = out.last_mut() {
                        prev.push_str(&s);
                    } else {
                        out.push(Node::Text(s));
                    }
                }
                mention => out.push(mention),
            }
        }
        self.nodes = out;
    }
}

// ── Boundary helpers ─────────────────────────────────────────────────────────

fn prev_char_boundary(s: &str, idx: usize) -> usize {
    let mut i = idx.saturating_sub(1);
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn next_char_boundary(s: &str, idx: usize) -> usize {
    if idx >= s.len() {
        return s.len();
    }
    let mut i = idx + 1;
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

fn prev_word_boundary(s: &str, idx: usize) -> usize {
    let before = &s[..idx];
    let trimmed = before.trim_end_matches(|c: char| c.is_whitespace());
    trimmed
        .rfind(|c: char| c.is_whitespace())
        .map(|i| i + 1)
        .unwrap_or(0)
}

fn next_word_boundary(s: &str, idx: usize) -> usize {
    let rest = &s[idx..];
    let after_ws = rest.len() - rest.trim_start_matches(|c: char| c.is_whitespace()).len();
    let from = idx + after_ws;
    s[from..]
        .find(|c: char| c.is_whitespace())
        .map(|i| from + i)
        .unwrap_or(s.len())
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_from(text: &str) -> Document {
        let mut doc = Document::new();
        doc.insert_str(text);
        doc
    }

    #[test]
    fn insert_and_flatten_plain_text() {
        let doc = doc_from("hello world");
        assert_eq!(doc.text(), "hello world");
        assert_eq!(doc.cursor(), 11);
        assert_eq!(doc.nodes().len(), 1);
    }

    #[test]
    fn splice_replaces_exactly_the_query_span() {
        let mut doc = doc_from("hiya @bob rest");
        doc.splice_mention(5..9, "bobby").unwrap();
        let text = doc.text();
        // bytes before and after the span are byte-identical
        assert!(text.starts_with("hiya "));
        assert!(text.ends_with(" rest"));
        assert_eq!(text, "hiya @bobby  rest");
        assert_eq!(doc.mentions(), vec!["bobby"]);
    }

    #[test]
    fn splice_cursor_lands_after_the_trailing_space() {
        let mut doc = doc_from("@bo");
        doc.splice_mention(0..3, "bob").unwrap();
        assert_eq!(doc.text(), "@bob ");
        assert_eq!(doc.cursor(), 5);
    }

    #[test]
    fn splice_targets_the_given_span_not_the_last_at_sign() {
        // Two `@` tokens in the text; only the addressed one is replaced.
        let mut doc = doc_from("@al ping @al");
        doc.splice_mention(0..3, "alice").unwrap();
        assert_eq!(doc.text(), "@alice  ping @al");
        assert_eq!(doc.mentions(), vec!["alice"]);
    }

    #[test]
    fn splice_out_of_range_is_an_error() {
        let mut doc = doc_from("abc");
        let err = doc.splice_mention(1..9, "x").unwrap_err();
        assert_eq!(err, DocumentError::OutOfRange { start: 1, end: 9, len: 3 });
    }

    #[test]
    fn splice_across_an_existing_token_is_an_error() {
        let mut doc = doc_from("@bo");
        doc.splice_mention(0..3, "bob").unwrap();
        let err = doc.splice_mention(0..4, "x").unwrap_err();
        assert_eq!(err, DocumentError::CrossesMention { start: 0, end: 4 });
    }

    #[test]
    fn backspace_removes_a_whole_token_at_its_trailing_edge() {
        let mut doc = doc_from("hi @bo");
        doc.splice_mention(3..6, "bob").unwrap();
        assert_eq!(doc.text(), "hi @bob ");
        doc.backspace(); // the trailing space
        doc.backspace(); // the whole token
        assert_eq!(doc.text(), "hi ");
        assert_eq!(doc.cursor(), 3);
        assert!(doc.mentions().is_empty());
    }

    #[test]
    fn backspace_removes_one_char_inside_text() {
        let mut doc = doc_from("abé");
        doc.backspace();
        assert_eq!(doc.text(), "ab");
        assert_eq!(doc.cursor(), 2);
    }

    #[test]
    fn delete_forward_removes_a_whole_token_at_its_leading_edge() {
        let mut doc = doc_from("@bo x");
        doc.splice_mention(0..3, "bob").unwrap();
        doc.set_cursor(0);
        doc.delete_forward();
        assert_eq!(doc.text(), "  x");
        assert_eq!(doc.cursor(), 0);
    }

    #[test]
    fn horizontal_movement_jumps_over_tokens() {
        let mut doc = doc_from("a @bo");
        doc.splice_mention(2..5, "bob").unwrap();
        assert_eq!(doc.text(), "a @bob ");
        doc.set_cursor(7);
        doc.move_left(); // over the space
        assert_eq!(doc.cursor(), 6);
        doc.move_left(); // over the whole token
        assert_eq!(doc.cursor(), 2);
        doc.move_right();
        assert_eq!(doc.cursor(), 6);
    }

    #[test]
    fn set_cursor_snaps_out_of_token_interiors() {
        let mut doc = doc_from("@carol x");
        doc.splice_mention(0..6, "carol").unwrap();
        doc.set_cursor(2); // inside "@carol"
        assert_eq!(doc.cursor(), 0);
        doc.set_cursor(5); // nearer the trailing edge
        assert_eq!(doc.cursor(), 6);
    }

    #[test]
    fn insert_between_tokens_creates_a_text_run() {
        let mut doc = Document::new();
        doc.insert_str("@a");
        doc.splice_mention(0..2, "alice").unwrap();
        doc.backspace(); // drop the trailing space, cursor at token edge
        doc.insert_char('!');
        assert_eq!(doc.text(), "@alice!");
        assert_eq!(doc.mentions(), vec!["alice"]);
    }

    #[test]
    fn mention_query_tracks_the_cursor() {
        let mut doc = doc_from("hey @bo");
        let q = doc.mention_query().unwrap();
        assert_eq!(q.start, 4);
        assert_eq!(q.raw, "bo");
        doc.insert_char(' ');
        assert_eq!(doc.mention_query(), None);
    }

    #[test]
    fn accepted_token_text_never_reopens_a_query() {
        let mut doc = doc_from("@bo");
        doc.splice_mention(0..3, "bob").unwrap();
        doc.backspace(); // cursor now touches the token's trailing edge
        assert_eq!(doc.mention_query(), None);
    }

    #[test]
    fn blankness_ignores_whitespace_but_not_tokens() {
        assert!(Document::new().is_blank());
        assert!(doc_from("  \n ").is_blank());
        let mut doc = doc_from("@a");
        doc.splice_mention(0..2, "alice").unwrap();
        assert!(!doc.is_blank());
    }

    #[test]
    fn mentions_are_listed_in_document_order() {
        let mut doc = doc_from("@a");
        doc.splice_mention(0..2, "alice").unwrap();
        doc.insert_str("@b");
        let q = doc.mention_query().unwrap();
        doc.splice_mention(q.span(), "bob").unwrap();
        assert_eq!(doc.mentions(), vec!["alice", "bob"]);
    }

    #[test]
    fn word_movement_respects_token_edges() {
        let mut doc = doc_from("one @tw");
        doc.splice_mention(4..7, "twofold").unwrap();
        doc.move_word_left();
        assert_eq!(doc.cursor(), 4);
        doc.move_word_left();
        assert_eq!(doc.cursor(), 0);
    }

    #[test]
    fn line_start_and_end_use_newlines() {
        let mut doc = doc_from("ab\ncdef");
        doc.move_line_start();
        assert_eq!(doc.cursor(), 3);
        doc.move_line_end();
        assert_eq!(doc.cursor(), 7);
        doc.set_cursor(1);
        doc.move_line_start();
        assert_eq!(doc.cursor(), 0);
        doc.move_line_end();
        assert_eq!(doc.cursor(), 2);
    }

    #[test]
    fn clear_resets_content_and_cursor() {
        let mut doc = doc_from("something");
        doc.clear();
        assert!(doc.is_empty());
        assert_eq!(doc.cursor(), 0);
    }
}
