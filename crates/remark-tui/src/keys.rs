// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Keyboard mapping.
//!
//! Keys targeting the suggestion popup are intercepted in the terminal event
//! handler before this table runs, so `map_key` only ever sees keys meant for
//! the editor or the transcript.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    InputChar(char),
    InputNewline,
    InputBackspace,
    InputDelete,
    InputMoveLeft,
    InputMoveRight,
    InputMoveWordLeft,
    InputMoveWordRight,
    InputMoveLineStart,
    InputMoveLineEnd,
    InputMoveLineUp,
    InputMoveLineDown,
    Submit,
    SuggestNext,
    SuggestPrev,
    SuggestAccept,
    SuggestDismiss,
    ScrollPageUp,
    ScrollPageDown,
    ScrollToBottom,
    ToggleHelp,
    Quit,
}

pub fn map_key(event: KeyEvent) -> Option<Action> {
    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    let alt = event.modifiers.contains(KeyModifiers::ALT);
    let shift = event.modifiers.contains(KeyModifiers::SHIFT);
    let plain = !ctrl && !alt;

    match event.code {
        KeyCode::Char('c') if ctrl => Some(Action::Quit),
        KeyCode::Char('q') if ctrl => Some(Action::Quit),
        KeyCode::F(1) => Some(Action::ToggleHelp),

        KeyCode::Enter if shift => Some(Action::InputNewline),
        KeyCode::Enter if plain => Some(Action::Submit),

        KeyCode::Backspace => Some(Action::InputBackspace),
        KeyCode::Delete => Some(Action::InputDelete),

        KeyCode::Left if ctrl => Some(Action::InputMoveWordLeft),
        KeyCode::Right if ctrl => Some(Action::InputMoveWordRight),
        KeyCode::Left => Some(Action::InputMoveLeft),
        KeyCode::Right => Some(Action::InputMoveRight),
        KeyCode::Up if plain => Some(Action::InputMoveLineUp),
        KeyCode::Down if plain => Some(Action::InputMoveLineDown),
        KeyCode::Home => Some(Action::InputMoveLineStart),
        KeyCode::End => Some(Action::InputMoveLineEnd),

        KeyCode::PageUp => Some(Action::ScrollPageUp),
        KeyCode::PageDown => Some(Action::ScrollPageDown),
        KeyCode::Char('u') if ctrl => Some(Action::ScrollPageUp),
        KeyCode::Char('d') if ctrl => Some(Action::ScrollPageDown),
        KeyCode::Char('g') if ctrl => Some(Action::ScrollToBottom),

        KeyCode::Char(c) if plain => Some(Action::InputChar(c)),
        _ => None,
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
