// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Mention suggestion popup state.
//!
//! The overlay only exists while an active mention query has at least one
//! matching user. It is rebuilt from scratch on every edit, so `selected`
//! always starts out as `None`; arrow keys then cycle through the matches
//! circularly.

use remark_core::{MentionQuery, User};

pub struct SuggestionOverlay {
    pub items: Vec<User>,
    /// `None` until the first ArrowDown/ArrowUp after a rebuild.
    pub selected: Option<usize>,
    pub scroll_offset: usize,
    pub max_visible: usize,
    /// Query this overlay was built for. Its span anchors the splice on accept.
    pub query: MentionQuery,
}

impl SuggestionOverlay {
    pub fn new(items: Vec<User>, query: MentionQuery) -> Self {
        Self {
            items,
            selected: None,
            scroll_offset: 0,
            max_visible: 8,
            query,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Move highlight down, wrapping from the last item to the first.
    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1) % self.items.len(),
            None => 0,
        });
        self.adjust_scroll();
    }

    /// Move highlight up, wrapping from the first item to the last.
    pub fn select_prev(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => i.checked_sub(1).unwrap_or(self.items.len() - 1),
            None => self.items.len() - 1,
        });
        self.adjust_scroll();
    }

    /// The user an accept resolves to. With no explicit highlight the
    /// first match wins.
    pub fn accepted_item(&self) -> Option<&User> {
        self.items.get(self.selected.unwrap_or(0))
    }

    /// Items within the current scroll window.
    pub fn visible_items(&self) -> &[User] {
        let end = (self.scroll_offset + self.max_visible).min(self.items.len());
        &self.items[self.scroll_offset..end]
    }

    /// Rows the popup body occupies.
    pub fn height(&self) -> usize {
        self.items.len().min(self.max_visible)
    }

    /// Keep the highlighted item inside the visible window, moving the
    /// window as little as possible.
    fn adjust_scroll(&mut self) {
        let Some(selected) = self.selected else {
            return;
        };
        if selected < self.scroll_offset {
            self.scroll_offset = selected;
        } else if selected >= self.scroll_offset + self.max_visible {
            self.scroll_offset = selected + 1 - self.max_visible;
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
