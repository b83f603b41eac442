// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Terminal event handling.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use super::App;
use crate::input_wrap;
use crate::keys::{map_key, Action};

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x + area.width
        && row >= area.y
        && row < area.y + area.height
}

impl App {
    /// Handle one terminal event. Returns `true` when the app should exit.
    pub(crate) fn handle_term_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                false
            }
            _ => false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.show_help && key.code != KeyCode::F(1) {
            self.show_help = false;
            return false;
        }
        // While the popup is open a handful of keys act on it instead of the
        // editor; everything else falls through to the normal key table.
        if self.suggestions.is_some() {
            let plain = !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT);
            let overlay_action = match key.code {
                KeyCode::Enter if plain => Some(Action::SuggestAccept),
                KeyCode::Esc => Some(Action::SuggestDismiss),
                KeyCode::Down if plain => Some(Action::SuggestNext),
                KeyCode::Up if plain => Some(Action::SuggestPrev),
                KeyCode::Tab if plain => Some(Action::SuggestNext),
                KeyCode::BackTab => Some(Action::SuggestPrev),
                _ => None,
            };
            if let Some(action) = overlay_action {
                return self.dispatch(action);
            }
        }
        match map_key(key) {
            Some(action) => self.dispatch(action),
            None => false,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => {
                if contains(self.last_transcript_pane, mouse.column, mouse.row) {
                    self.scroll_transcript_up(3);
                }
            }
            MouseEventKind::ScrollDown => {
                if contains(self.last_transcript_pane, mouse.column, mouse.row) {
                    self.scroll_transcript_down(3);
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.handle_click(mouse.column, mouse.row);
            }
            _ => {}
        }
    }

    fn handle_click(&mut self, column: u16, row: u16) {
        // Clicks on a popup row accept that suggestion.
        if let Some(rect) = self.last_suggestion_rect {
            if contains(rect, column, row) {
                let inner_top = rect.y + 1;
                let mut accept = false;
                if let Some(overlay) = &mut self.suggestions {
                    if row >= inner_top {
                        let idx = overlay.scroll_offset + (row - inner_top) as usize;
                        if idx < overlay.len() {
                            overlay.selected = Some(idx);
                            accept = true;
                        }
                    }
                }
                if accept {
                    self.dispatch(Action::SuggestAccept);
                }
                return;
            }
        }
        if contains(self.last_input_pane, column, row) {
            self.click_into_input(column, row);
            return;
        }
        // Anywhere else counts as clicking outside the widget.
        self.suggestions = None;
    }

    /// Place the cursor at the clicked cell; the mention query then tracks
    /// the new cursor position.
    fn click_into_input(&mut self, column: u16, row: u16) {
        let inner_x = self.last_input_pane.x + 1;
        let inner_y = self.last_input_pane.y + 1;
        if column < inner_x || row < inner_y {
            return;
        }
        let visual_row = self.input_scroll_offset + (row - inner_y) as usize;
        let visual_col = (column - inner_x) as usize;
        let offset = input_wrap::byte_offset_at_row_col(
            &self.document.text(),
            self.input_inner_width(),
            visual_row,
            visual_col,
        );
        self.document.set_cursor(offset);
        self.refresh_suggestions();
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
