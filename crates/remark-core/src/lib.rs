// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Headless comment-composer logic.
//!
//! Everything in this crate is independent of the terminal: the user
//! directory and its suggestion filter, mention-query detection over a text
//! buffer, the editable document with atomic mention tokens, and comment
//! construction. The TUI crate drives these types from its event loop.

pub mod comment;
pub mod directory;
pub mod document;
pub mod query;

pub use comment::Comment;
pub use directory::{User, UserDirectory};
pub use document::{Document, DocumentError, Node};
pub use query::MentionQuery;
