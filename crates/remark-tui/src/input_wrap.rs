// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Soft wrapping for the comment editor.
//!
//! The editor owns a flat byte cursor; rendering and mouse handling need the
//! cursor as a (row, col) cell position and back. Both directions go through
//! [`wrap_content`], which also records the byte offset each visual line
//! starts at so callers can map byte ranges (mention tokens) onto lines.

use unicode_width::UnicodeWidthChar;

pub struct WrapState {
    pub lines: Vec<String>,
    /// Byte offset into the original content where each visual line begins.
    pub line_starts: Vec<usize>,
    pub cursor_row: usize,
    pub cursor_col: usize,
}

/// Wrap `content` to `width` display cells, breaking at hard newlines and at
/// the cell limit. `cursor` is a byte offset; offsets past the end place the
/// cursor after the last character.
pub fn wrap_content(content: &str, width: usize, cursor: usize) -> WrapState {
    let width = width.max(1);
    let mut lines = vec![String::new()];
    let mut line_starts = vec![0usize];
    let mut col = 0usize;
    let mut cursor_row = 0usize;
    let mut cursor_col = 0usize;
    let mut cursor_placed = false;

    for (idx, ch) in content.char_indices() {
        if idx == cursor {
            cursor_row = lines.len() - 1;
            cursor_col = col;
            cursor_placed = true;
        }
        if ch == '\n' {
            lines.push(String::new());
            line_starts.push(idx + 1);
            col = 0;
            continue;
        }
        let w = ch.width().unwrap_or(0);
        if col + w > width {
            lines.push(String::new());
            line_starts.push(idx);
            col = 0;
            if idx == cursor {
                // the character under the cursor wrapped with it
                cursor_row = lines.len() - 1;
                cursor_col = 0;
            }
        }
        if let Some(line) = lines.last_mut() {
            line.push(ch);
        }
        col += w;
    }
    if !cursor_placed {
        cursor_row = lines.len() - 1;
        cursor_col = col;
    }

    WrapState {
        lines,
        line_starts,
        cursor_row,
        cursor_col,
    }
}

/// Byte offset of the cell at (`row`, `col`) in the wrapped view. Rows past
/// the end map to the end of the content, columns past a line's end to the
/// end of that line.
pub fn byte_offset_at_row_col(content: &str, width: usize, row: usize, col: usize) -> usize {
    let state = wrap_content(content, width, 0);
    let Some(line) = state.lines.get(row) else {
        return content.len();
    };
    let start = state.line_starts[row];
    let mut cells = 0usize;
    for (idx, ch) in line.char_indices() {
        if cells >= col {
            return start + idx;
        }
        cells += ch.width().unwrap_or(0);
    }
    start + line.len()
}

/// Scroll the viewport just far enough to keep `cursor_row` visible.
pub fn adjust_scroll(cursor_row: usize, height: usize, scroll: &mut usize) {
    if height == 0 {
        return;
    }
    if cursor_row < *scroll {
        *scroll = cursor_row;
    } else if cursor_row >= *scroll + height {
        *scroll = cursor_row + 1 - height;
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
