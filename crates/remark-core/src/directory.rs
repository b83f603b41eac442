// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Static user directory and the suggestion filter.

use serde::{Deserialize, Serialize};

/// A mentionable user. Identity is the username, which is assumed unique
/// within a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    /// Avatar image location; rendered as alt text in the suggestion list.
    #[serde(default)]
    pub avatar_url: String,
}

impl User {
    pub fn new(username: impl Into<String>, avatar_url: impl Into<String>) -> Self {
        Self { username: username.into(), avatar_url: avatar_url.into() }
    }
}

/// Ordered, immutable collection of users, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }

    pub fn get(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    /// Case-insensitive substring match against usernames, preserving
    /// directory order. The query is trimmed first; an empty query matches
    /// every user. No fuzzy matching and no ranking.
    pub fn filter(&self, query: &str) -> Vec<&User> {
        let needle = query.trim().to_lowercase();
        self.users
            .iter()
            .filter(|u| u.username.to_lowercase().contains(&needle))
            .collect()
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
