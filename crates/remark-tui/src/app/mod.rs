// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Application state and the UI event loop.

mod dispatch;
mod term_events;

use std::time::Duration;

use anyhow::Result;
use crossterm::event::EventStream;
use futures::StreamExt;
use ratatui::layout::Rect;
use ratatui::DefaultTerminal;
use remark_config::Config;
use remark_core::{Comment, Document, UserDirectory};
use tokio::time::Instant;
use tracing::debug;

use crate::input_wrap;
use crate::layout::AppLayout;
use crate::overlay::SuggestionOverlay;
use crate::transcript;
use crate::widgets;

/// How long the blank-submission notice stays in the editor pane.
const PLACEHOLDER_TTL: Duration = Duration::from_millis(1500);

pub struct App {
    pub(crate) config: Config,
    pub(crate) directory: UserDirectory,
    pub(crate) document: Document,
    pub(crate) comments: Vec<Comment>,
    pub(crate) suggestions: Option<SuggestionOverlay>,
    /// Set when a blank submission was rejected; cleared by the timer arm.
    pub(crate) placeholder_until: Option<Instant>,
    pub(crate) transcript_lines: Vec<ratatui::text::Line<'static>>,
    pub(crate) scroll_offset: usize,
    /// Follow the newest comment until the user scrolls away.
    pub(crate) auto_scroll: bool,
    pub(crate) input_scroll_offset: usize,
    pub(crate) show_help: bool,
    // Geometry from the last layout pass, used for mouse hit tests and for
    // anchoring the suggestion popup to the caret.
    pub(crate) last_input_pane: Rect,
    pub(crate) last_transcript_pane: Rect,
    pub(crate) last_suggestion_rect: Option<Rect>,
    pub(crate) transcript_height: usize,
}

impl App {
    pub fn new(config: Config) -> Self {
        let directory = UserDirectory::new(config.users.clone());
        debug!(users = directory.len(), author = %config.author, "starting session");
        Self {
            config,
            directory,
            document: Document::new(),
            comments: Vec::new(),
            suggestions: None,
            placeholder_until: None,
            transcript_lines: Vec::new(),
            scroll_offset: 0,
            auto_scroll: true,
            input_scroll_offset: 0,
            show_help: false,
            last_input_pane: Rect::default(),
            last_transcript_pane: Rect::default(),
            last_suggestion_rect: None,
            transcript_height: 1,
        }
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let mut term_events = EventStream::new();
        loop {
            if let Ok(size) = terminal.size() {
                let layout = AppLayout::compute(Rect::new(0, 0, size.width, size.height));
                self.transcript_height = layout.transcript_inner_height().max(1) as usize;
                self.last_input_pane = layout.input_pane;
                self.last_transcript_pane = layout.transcript_pane;
                self.adjust_input_scroll();
                if self.auto_scroll {
                    self.scroll_offset = self.max_scroll();
                }
                self.last_suggestion_rect = self.suggestion_popup_rect(size.width, size.height);
            }

            let ascii = self.config.tui.ascii;
            terminal.draw(|frame| {
                let layout = AppLayout::new(frame);
                widgets::draw_status(
                    frame,
                    layout.status_bar,
                    &self.config.author,
                    self.directory.len(),
                    ascii,
                );
                widgets::draw_transcript(
                    frame,
                    layout.transcript_pane,
                    &self.transcript_lines,
                    self.scroll_offset,
                    ascii,
                );
                widgets::draw_input(
                    frame,
                    layout.input_pane,
                    &self.document,
                    self.input_scroll_offset,
                    self.placeholder(),
                    ascii,
                );
                if let (Some(overlay), Some(rect)) = (&self.suggestions, self.last_suggestion_rect) {
                    widgets::draw_suggestions(frame, rect, overlay, ascii);
                }
                if self.show_help {
                    widgets::draw_help(frame, ascii);
                }
            })?;

            let deadline = self.placeholder_until;
            tokio::select! {
                Some(Ok(event)) = term_events.next() => {
                    if self.handle_term_event(event) {
                        break;
                    }
                }
                _ = sleep_until_opt(deadline) => {
                    self.clear_placeholder();
                }
            }
        }
        Ok(())
    }

    fn placeholder(&self) -> Option<&str> {
        self.placeholder_until
            .is_some()
            .then(|| self.config.tui.placeholder.as_str())
    }

    /// Timer arm of the event loop: the armed deadline has passed.
    pub(crate) fn clear_placeholder(&mut self) {
        self.placeholder_until = None;
    }

    pub(crate) fn input_inner_width(&self) -> usize {
        self.last_input_pane.width.saturating_sub(2).max(1) as usize
    }

    pub(crate) fn input_inner_height(&self) -> usize {
        self.last_input_pane.height.saturating_sub(2).max(1) as usize
    }

    pub(crate) fn adjust_input_scroll(&mut self) {
        let state = input_wrap::wrap_content(
            &self.document.text(),
            self.input_inner_width(),
            self.document.cursor(),
        );
        input_wrap::adjust_scroll(
            state.cursor_row,
            self.input_inner_height(),
            &mut self.input_scroll_offset,
        );
    }

    pub(crate) fn max_scroll(&self) -> usize {
        self.transcript_lines.len().saturating_sub(self.transcript_height)
    }

    pub(crate) fn rebuild_transcript(&mut self) {
        self.transcript_lines = transcript::build_lines(&self.comments, self.config.tui.ascii);
    }

    /// Popup rect for the active suggestion overlay, anchored to the caret.
    /// Placed directly above the caret row, below it when that would clip at
    /// the top of the frame. `None` while the caret is scrolled out of view.
    fn suggestion_popup_rect(&self, frame_w: u16, frame_h: u16) -> Option<Rect> {
        let overlay = self.suggestions.as_ref()?;
        let state = input_wrap::wrap_content(
            &self.document.text(),
            self.input_inner_width(),
            self.document.cursor(),
        );
        let row = state.cursor_row.checked_sub(self.input_scroll_offset)?;
        if row >= self.input_inner_height() {
            return None;
        }
        let caret_x = self.last_input_pane.x + 1 + state.cursor_col as u16;
        let caret_y = self.last_input_pane.y + 1 + row as u16;

        let height = (overlay.height() as u16).saturating_add(2).min(frame_h);
        let width = overlay
            .items
            .iter()
            .map(|u| u.username.len() + 6)
            .max()
            .unwrap_or(0)
            .max(14)
            .min(frame_w as usize) as u16;
        let x = caret_x.min(frame_w.saturating_sub(width));
        // row 0 is the status bar, keep the popup off it
        let y = if caret_y > height {
            caret_y - height
        } else {
            (caret_y + 1).min(frame_h.saturating_sub(height))
        };
        Some(Rect::new(x, y, width, height))
    }
}

async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

// ── Test support ────────────────────────────────────────────────────────────

#[cfg(test)]
impl App {
    pub(crate) fn for_testing(usernames: &[&str]) -> Self {
        use remark_core::User;
        let config = Config {
            author: "tester".into(),
            users: usernames.iter().map(|n| User::new(*n, "")).collect(),
            ..Config::default()
        };
        let mut app = Self::new(config);
        app.last_input_pane = Rect::new(0, 18, 80, 6);
        app.last_transcript_pane = Rect::new(0, 1, 80, 17);
        app.transcript_height = 15;
        app
    }

    pub(crate) fn type_str(&mut self, text: &str) {
        for c in text.chars() {
            self.dispatch(crate::keys::Action::InputChar(c));
        }
    }

    pub(crate) fn suggestion_names(&self) -> Vec<String> {
        self.suggestions
            .as_ref()
            .map(|ov| ov.items.iter().map(|u| u.username.clone()).collect())
            .unwrap_or_default()
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
