// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Submitted comments.

use chrono::{DateTime, Local};

use crate::document::{Document, Node};

/// An immutable comment in the append-only display list.
#[derive(Debug, Clone)]
pub struct Comment {
    pub author: String,
    pub timestamp: DateTime<Local>,
    /// Distinct mentioned usernames, in order of first appearance.
    pub mentions: Vec<String>,
    pub body: Vec<Node>,
}

impl Comment {
    pub fn from_document(author: &str, doc: &Document) -> Self {
        Self::from_document_at(author, doc, Local::now())
    }

    pub fn from_document_at(author: &str, doc: &Document, timestamp: DateTime<Local>) -> Self {
        let mut mentions: Vec<String> = Vec::new();
        for name in doc.mentions() {
            if !mentions.iter().any(|m| m == name) {
                mentions.push(name.to_string());
            }
        }
        Self {
            author: author.to_string(),
            timestamp,
            mentions,
            body: doc.nodes().to_vec(),
        }
    }

    /// Flattened body text, mentions rendered as `@username`.
    pub fn body_text(&self) -> String {
        let mut out = String::new();
        for node in &self.body {
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
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_mentions(names: &[&str]) -> Document {
        let mut doc = Document::new();
        for name in names {
            doc.insert_char('@');
            let q = doc.mention_query().unwrap();
            doc.splice_mention(q.span(), name).unwrap();
        }
        doc
    }

    #[test]
    fn duplicate_mentions_collapse_to_first_appearance_order() {
        let doc = doc_with_mentions(&["alice", "bob", "alice"]);
        let comment = Comment::from_document("me", &doc);
        assert_eq!(comment.mentions, vec!["alice", "bob"]);
    }

    #[test]
    fn body_preserves_document_nodes() {
        let mut doc = Document::new();
        doc.insert_str("cc @a");
        let q = doc.mention_query().unwrap();
        doc.splice_mention(q.span(), "alice").unwrap();
        doc.insert_str("ok");
        let comment = Comment::from_document("me", &doc);
        assert_eq!(comment.body_text(), "cc @alice ok");
        assert_eq!(comment.author, "me");
    }

    #[test]
    fn comment_without_mentions_has_an_empty_list() {
        let mut doc = Document::new();
        doc.insert_str("plain note");
        let comment = Comment::from_document("me", &doc);
        assert!(comment.mentions.is_empty());
    }
}
