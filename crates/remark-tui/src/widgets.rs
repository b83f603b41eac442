// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Frame drawing helpers.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use remark_core::Document;
use std::ops::Range;

use crate::input_wrap;
use crate::overlay::SuggestionOverlay;
use crate::transcript::mention_style;

fn border_type(ascii: bool) -> BorderType {
    if ascii {
        BorderType::Plain
    } else {
        BorderType::Rounded
    }
}

pub(crate) fn sep(ascii: bool) -> &'static str {
    if ascii {
        "|"
    } else {
        "│"
    }
}

pub(crate) fn pane_block(title: &str, focused: bool, ascii: bool) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(Color::LightBlue)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(border_type(ascii))
        .border_style(border_style)
        .title(format!(" {title} "))
}

fn hint(key: &str, what: &str) -> [Span<'static>; 2] {
    [
        Span::styled(
            key.to_string(),
            Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(":{what} ")),
    ]
}

pub fn draw_status(frame: &mut Frame, area: Rect, author: &str, user_count: usize, ascii: bool) {
    let sep = sep(ascii);
    let mut spans = vec![
        Span::styled(" remark ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!("{sep} {author} {sep} {user_count} users {sep} ")),
    ];
    spans.extend(hint("Enter", "send"));
    spans.extend(hint("Shift+Enter", "newline"));
    spans.extend(hint("@", "mention"));
    spans.extend(hint("F1", "help"));
    spans.extend(hint("^C", "quit"));
    let line = Line::from(spans).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(Paragraph::new(line), area);
}

pub fn draw_transcript(frame: &mut Frame, area: Rect, lines: &[Line<'static>], scroll: usize, ascii: bool) {
    let block = pane_block("Comments", false, ascii);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }
    if lines.is_empty() {
        let empty = Span::styled(
            "No comments yet. Type below and press Enter.",
            Style::default().fg(Color::DarkGray),
        );
        frame.render_widget(Paragraph::new(Line::from(empty)), inner);
        return;
    }
    let visible: Vec<Line> = lines
        .iter()
        .skip(scroll)
        .take(inner.height as usize)
        .cloned()
        .collect();
    frame.render_widget(Paragraph::new(visible).wrap(Wrap { trim: false }), inner);
}

/// Draw the editor pane. When `placeholder` is set the document is blank and
/// the transient validation message is shown instead of content; no cursor is
/// placed in that state.
pub fn draw_input(
    frame: &mut Frame,
    area: Rect,
    doc: &Document,
    scroll: usize,
    placeholder: Option<&str>,
    ascii: bool,
) {
    let block = pane_block("Comment", true, ascii);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }
    if let Some(message) = placeholder {
        let line = Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        ));
        frame.render_widget(Paragraph::new(line), inner);
        return;
    }
    let text = doc.text();
    let state = input_wrap::wrap_content(&text, inner.width as usize, doc.cursor());
    let mention_spans = doc.mention_spans();
    let visible: Vec<Line> = state
        .lines
        .iter()
        .enumerate()
        .skip(scroll)
        .take(inner.height as usize)
        .map(|(i, line)| style_wrapped_line(line, state.line_starts[i], &mention_spans))
        .collect();
    frame.render_widget(Paragraph::new(visible), inner);
    if state.cursor_row >= scroll && state.cursor_row < scroll + inner.height as usize {
        let col = (state.cursor_col as u16).min(inner.width.saturating_sub(1));
        frame.set_cursor_position((inner.x + col, inner.y + (state.cursor_row - scroll) as u16));
    }
}

pub fn draw_suggestions(frame: &mut Frame, area: Rect, overlay: &SuggestionOverlay, ascii: bool) {
    frame.render_widget(Clear, area);
    let block = pane_block("Mentions", true, ascii);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }
    let marker = if ascii { ">" } else { "▸" };
    let lines: Vec<Line> = overlay
        .visible_items()
        .iter()
        .enumerate()
        .map(|(row, user)| {
            let selected = overlay.selected == Some(overlay.scroll_offset + row);
            let prefix = if selected { marker } else { " " };
            let line = Line::from(vec![
                Span::raw(format!("{prefix} ")),
                Span::styled(format!("@{}", user.username), mention_style()),
            ]);
            if selected {
                line.style(Style::default().bg(Color::DarkGray))
            } else {
                line
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

pub fn draw_help(frame: &mut Frame, ascii: bool) {
    let area = centered_rect(46, 12, frame.area());
    frame.render_widget(Clear, area);
    let block = pane_block("Help", true, ascii);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let rows = [
        ("Enter", "submit comment"),
        ("Shift+Enter", "insert newline"),
        ("@name", "open mention suggestions"),
        ("Down/Up, Tab", "cycle suggestions"),
        ("Enter / click", "accept suggestion"),
        ("Esc", "dismiss suggestions"),
        ("PgUp/PgDn, wheel", "scroll comments"),
        ("Ctrl+Arrows", "move by word"),
        ("Ctrl+C", "quit"),
    ];
    let lines: Vec<Line> = rows
        .iter()
        .map(|(key, what)| {
            Line::from(vec![
                Span::styled(
                    format!(" {key:<18}"),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(what.to_string()),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Split one wrapped visual line into spans, styling the parts covered by
/// mention tokens. `line_start` is the line's byte offset in the flattened
/// document text; `mentions` must be sorted and non-overlapping.
fn style_wrapped_line(
    line: &str,
    line_start: usize,
    mentions: &[(Range<usize>, &str)],
) -> Line<'static> {
    let line_end = line_start + line.len();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut pos = line_start;
    for (range, _) in mentions {
        if range.end <= pos || range.start >= line_end {
            continue;
        }
        let start = range.start.max(pos);
        if start > pos {
            spans.push(Span::raw(line[pos - line_start..start - line_start].to_string()));
        }
        let end = range.end.min(line_end);
        spans.push(Span::styled(
            line[start - line_start..end - line_start].to_string(),
            mention_style(),
        ));
        pos = end;
    }
    if pos < line_end {
        spans.push(Span::raw(line[pos - line_start..].to_string()));
    }
    Line::from(spans)
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_line_is_one_raw_span() {
        let line = style_wrapped_line("hello", 0, &[]);
        assert_eq!(line.spans.len(), 1);
        assert_eq!(line.spans[0].content, "hello");
    }

    #[test]
    fn mention_inside_line_gets_styled() {
        // "hi @bob x", mention at 3..7
        let line = style_wrapped_line("hi @bob x", 0, &[(3..7, "bob")]);
        let content: Vec<&str> = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(content, vec!["hi ", "@bob", " x"]);
        assert_eq!(line.spans[1].style, mention_style());
    }

    #[test]
    fn mention_straddling_a_wrap_styles_both_halves() {
        // full text "aa @bob", wrapped as "aa @b" / "ob"
        let spans = [(3..7, "bob")];
        let first = style_wrapped_line("aa @b", 0, &spans);
        let second = style_wrapped_line("ob", 5, &spans);
        assert_eq!(first.spans.last().map(|s| s.content.as_ref()), Some("@b"));
        assert_eq!(first.spans.last().map(|s| s.style), Some(mention_style()));
        assert_eq!(second.spans[0].content, "ob");
        assert_eq!(second.spans[0].style, mention_style());
    }

    #[test]
    fn adjacent_mentions_stay_separate_spans() {
        let line = style_wrapped_line("@a @b", 0, &[(0..2, "a"), (3..5, "b")]);
        let content: Vec<&str> = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(content, vec!["@a", " ", "@b"]);
    }

    #[test]
    fn centered_rect_clamps_to_the_frame() {
        let r = centered_rect(100, 100, Rect::new(0, 0, 40, 10));
        assert_eq!(r, Rect::new(0, 0, 40, 10));
        let r = centered_rect(20, 4, Rect::new(0, 0, 40, 10));
        assert_eq!(r, Rect::new(10, 3, 20, 4));
    }
}
