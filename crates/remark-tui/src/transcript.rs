// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Rendering of submitted comments into transcript lines.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use remark_core::{Comment, Node};

pub(crate) fn mention_style() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

/// One styled line per transcript row, oldest comment first, with a blank
/// line between comments. Each entry is a header, the mentioned users, and
/// the body.
pub fn build_lines(comments: &[Comment], ascii: bool) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, comment) in comments.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.push(header_line(comment, ascii));
        lines.push(mentions_line(comment));
        lines.extend(body_lines(&comment.body));
    }
    lines
}

fn header_line(comment: &Comment, ascii: bool) -> Line<'static> {
    let sep = if ascii { "|" } else { "│" };
    Line::from(vec![
        Span::styled(
            comment.author.clone(),
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" {sep} ")),
        Span::styled(
            comment.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

/// The distinct mentioned usernames, or `None` when the comment has no
/// mentions.
fn mentions_line(comment: &Comment) -> Line<'static> {
    let label = Span::styled("Mentions: ", Style::default().fg(Color::DarkGray));
    let value = if comment.mentions.is_empty() {
        Span::styled("None", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(comment.mentions.join(", "), mention_style())
    };
    Line::from(vec![label, value])
}

fn body_lines(body: &[Node]) -> Vec<Line<'static>> {
    let mut out = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    for node in body {
        match node {
            Node::Mention(name) => {
                current.push(Span::styled(format!("@{name}"), mention_style()));
            }
            Node::Text(text) => {
                let mut parts = text.split('\n');
                if let Some(first) = parts.next() {
                    if !first.is_empty() {
                        current.push(Span::raw(first.to_string()));
                    }
                }
                for part in parts {
                    out.push(Line::from(std::mem::take(&mut current)));
                    if !part.is_empty() {
                        current.push(Span::raw(part.to_string()));
                    }
                }
            }
        }
    }
    out.push(Line::from(current));
    out
}

// ── Tests ───────────────────────────────────────────────────────────────────
