// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Screen layout.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

pub struct AppLayout {
    pub status_bar: Rect,
    pub transcript_pane: Rect,
    pub input_pane: Rect,
}

impl AppLayout {
    pub fn new(frame: &Frame) -> Self {
        Self::compute(frame.area())
    }

    pub fn compute(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(8),
                Constraint::Length(6),
            ])
            .split(area);
        Self {
            status_bar: chunks[0],
            transcript_pane: chunks[1],
            input_pane: chunks[2],
        }
    }

    /// Rows available for transcript text inside the pane border.
    pub fn transcript_inner_height(&self) -> u16 {
        self.transcript_pane.height.saturating_sub(2)
    }
}
