// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Action dispatch.
//!
//! Every edit or cursor move re-derives the mention query from the document,
//! so the suggestion overlay is always a pure function of (text, cursor,
//! directory). The overlay is rebuilt rather than patched, which also resets
//! the highlight on each keystroke.

use remark_core::Comment;
use tokio::time::Instant;
use tracing::debug;

use super::{App, PLACEHOLDER_TTL};
use crate::input_wrap;
use crate::keys::Action;
use crate::overlay::SuggestionOverlay;

impl App {
    /// Apply one action. Returns `true` when the app should exit.
    pub(crate) fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::InputChar(c) => {
                self.document.insert_char(c);
                self.refresh_suggestions();
            }
            Action::InputNewline => {
                self.document.insert_char('\n');
                self.refresh_suggestions();
            }
            Action::InputBackspace => {
                self.document.backspace();
                self.refresh_suggestions();
            }
            Action::InputDelete => {
                self.document.delete_forward();
                self.refresh_suggestions();
            }
            Action::InputMoveLeft => {
                self.document.move_left();
                self.refresh_suggestions();
            }
            Action::InputMoveRight => {
                self.document.move_right();
                self.refresh_suggestions();
            }
            Action::InputMoveWordLeft => {
                self.document.move_word_left();
                self.refresh_suggestions();
            }
            Action::InputMoveWordRight => {
                self.document.move_word_right();
                self.refresh_suggestions();
            }
            Action::InputMoveLineStart => {
                self.document.move_line_start();
                self.refresh_suggestions();
            }
            Action::InputMoveLineEnd => {
                self.document.move_line_end();
                self.refresh_suggestions();
            }
            Action::InputMoveLineUp => self.move_visual_line(-1),
            Action::InputMoveLineDown => self.move_visual_line(1),
            Action::Submit => self.submit_comment(),
            Action::SuggestNext => {
                if let Some(overlay) = &mut self.suggestions {
                    overlay.select_next();
                }
            }
            Action::SuggestPrev => {
                if let Some(overlay) = &mut self.suggestions {
                    overlay.select_prev();
                }
            }
            Action::SuggestAccept => self.accept_suggestion(),
            Action::SuggestDismiss => self.suggestions = None,
            Action::ScrollPageUp => self.scroll_transcript_up(self.transcript_height.max(1) / 2),
            Action::ScrollPageDown => {
                self.scroll_transcript_down(self.transcript_height.max(1) / 2)
            }
            Action::ScrollToBottom => {
                self.scroll_offset = self.max_scroll();
                self.auto_scroll = true;
            }
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::Quit => return true,
        }
        false
    }

    /// Rebuild the overlay from the document's active mention query. Hidden
    /// when there is no query or no user matches it.
    pub(crate) fn refresh_suggestions(&mut self) {
        let Some(query) = self.document.mention_query() else {
            self.suggestions = None;
            return;
        };
        let items: Vec<_> = self
            .directory
            .filter(&query.raw)
            .into_iter()
            .cloned()
            .collect();
        if items.is_empty() {
            self.suggestions = None;
            return;
        }
        let mut overlay = SuggestionOverlay::new(items, query);
        overlay.max_visible = self.config.tui.max_visible_suggestions.max(1);
        self.suggestions = Some(overlay);
    }

    fn accept_suggestion(&mut self) {
        let Some(overlay) = self.suggestions.take() else {
            return;
        };
        let Some(user) = overlay.accepted_item() else {
            return;
        };
        let span = overlay.query.span();
        if let Err(err) = self.document.splice_mention(span, &user.username) {
            // stale span, e.g. the query was edited out from under the popup
            debug!(%err, "mention splice rejected");
        }
        self.refresh_suggestions();
    }

    fn submit_comment(&mut self) {
        self.suggestions = None;
        if self.document.is_blank() {
            self.document.clear();
            self.input_scroll_offset = 0;
            self.placeholder_until = Some(Instant::now() + PLACEHOLDER_TTL);
            return;
        }
        let comment = Comment::from_document(&self.config.author, &self.document);
        debug!(
            author = %comment.author,
            mentions = comment.mentions.len(),
            "comment submitted"
        );
        self.comments.push(comment);
        self.document.clear();
        self.input_scroll_offset = 0;
        self.placeholder_until = None;
        self.rebuild_transcript();
        self.auto_scroll = true;
        self.scroll_offset = self.max_scroll();
    }

    /// Move the cursor one visual (wrapped) line up or down, keeping the
    /// column where possible.
    fn move_visual_line(&mut self, delta: isize) {
        let text = self.document.text();
        let state = input_wrap::wrap_content(&text, self.input_inner_width(), self.document.cursor());
        let target = state.cursor_row as isize + delta;
        if target < 0 || target as usize >= state.lines.len() {
            return;
        }
        let offset = input_wrap::byte_offset_at_row_col(
            &text,
            self.input_inner_width(),
            target as usize,
            state.cursor_col,
        );
        self.document.set_cursor(offset);
        self.refresh_suggestions();
    }

    pub(crate) fn scroll_transcript_up(&mut self, n: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(n.max(1));
        self.auto_scroll = false;
    }

    pub(crate) fn scroll_transcript_down(&mut self, n: usize) {
        let max = self.max_scroll();
        self.scroll_offset = (self.scroll_offset + n.max(1)).min(max);
        if self.scroll_offset == max {
            self.auto_scroll = true;
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_at_opens_suggestions_with_all_users() {
        let mut app = App::for_testing(&["alice", "bob", "carol"]);
        app.type_str("hello @");
        assert_eq!(app.suggestion_names(), vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn trailing_at_after_a_word_opens_the_full_list() {
        let mut app = App::for_testing(&["alice", "bob"]);
        app.type_str("foo@");
        assert_eq!(app.suggestion_names(), vec!["alice", "bob"]);
        // once the token grows it is an email-like word again
        app.type_str("b");
        assert!(app.suggestions.is_none());
    }

    #[test]
    fn query_narrows_matches_case_insensitively() {
        let mut app = App::for_testing(&["alice", "Bob", "bobby"]);
        app.type_str("@B");
        assert_eq!(app.suggestion_names(), vec!["Bob", "bobby"]);
    }

    #[test]
    fn no_matches_hides_the_overlay() {
        let mut app = App::for_testing(&["alice"]);
        app.type_str("@zzz");
        assert!(app.suggestions.is_none());
    }

    #[test]
    fn overlay_rebuild_resets_the_highlight() {
        let mut app = App::for_testing(&["bob", "bobby"]);
        app.type_str("@b");
        app.dispatch(Action::SuggestNext);
        app.dispatch(Action::SuggestNext);
        assert_eq!(app.suggestions.as_ref().and_then(|ov| ov.selected), Some(1));
        app.type_str("o");
        assert_eq!(app.suggestions.as_ref().and_then(|ov| ov.selected), None);
    }

    #[test]
    fn accept_with_no_highlight_takes_the_first_match() {
        let mut app = App::for_testing(&["bob", "bobby"]);
        app.type_str("hi @b");
        app.dispatch(Action::SuggestAccept);
        assert_eq!(app.document.text(), "hi @bob ");
        assert!(app.suggestions.is_none());
        assert_eq!(app.document.cursor(), app.document.len());
    }

    #[test]
    fn accept_follows_the_highlight() {
        let mut app = App::for_testing(&["bob", "bobby"]);
        app.type_str("@b");
        app.dispatch(Action::SuggestNext);
        app.dispatch(Action::SuggestNext);
        app.dispatch(Action::SuggestAccept);
        assert_eq!(app.document.text(), "@bobby ");
    }

    #[test]
    fn dismiss_hides_without_touching_the_text() {
        let mut app = App::for_testing(&["bob"]);
        app.type_str("@b");
        app.dispatch(Action::SuggestDismiss);
        assert!(app.suggestions.is_none());
        assert_eq!(app.document.text(), "@b");
    }

    #[test]
    fn moving_the_cursor_away_closes_the_overlay() {
        let mut app = App::for_testing(&["bob"]);
        app.type_str("@b x");
        assert!(app.suggestions.is_none());
        app.dispatch(Action::InputMoveLeft);
        app.dispatch(Action::InputMoveLeft);
        assert_eq!(app.suggestion_names(), vec!["bob"]);
    }

    #[test]
    fn accepted_mention_does_not_reopen_suggestions() {
        let mut app = App::for_testing(&["bob"]);
        app.type_str("@b");
        app.dispatch(Action::SuggestAccept);
        assert!(app.suggestions.is_none());
        app.dispatch(Action::InputMoveLeft);
        assert!(app.suggestions.is_none());
    }

    #[test]
    fn submit_appends_a_comment_and_clears_the_editor() {
        let mut app = App::for_testing(&["bob"]);
        app.type_str("ping @b");
        app.dispatch(Action::SuggestAccept);
        app.type_str("now");
        app.dispatch(Action::Submit);
        assert_eq!(app.comments.len(), 1);
        assert_eq!(app.comments[0].body_text(), "ping @bob now");
        assert_eq!(app.comments[0].mentions, vec!["bob"]);
        assert_eq!(app.comments[0].author, "tester");
        assert!(app.document.is_empty());
        assert!(app.placeholder_until.is_none());
        assert!(!app.transcript_lines.is_empty());
    }

    #[test]
    fn blank_submit_arms_the_placeholder_instead() {
        let mut app = App::for_testing(&[]);
        app.type_str("   ");
        app.dispatch(Action::Submit);
        assert!(app.comments.is_empty());
        assert!(app.placeholder_until.is_some());
        assert!(app.document.is_empty());
    }

    #[test]
    fn submit_closes_an_open_overlay() {
        let mut app = App::for_testing(&["bob"]);
        app.type_str("see @b");
        assert!(app.suggestions.is_some());
        app.dispatch(Action::Submit);
        assert!(app.suggestions.is_none());
        assert_eq!(app.comments.len(), 1);
    }

    #[test]
    fn comments_accumulate_in_order() {
        let mut app = App::for_testing(&[]);
        app.type_str("first");
        app.dispatch(Action::Submit);
        app.type_str("second");
        app.dispatch(Action::Submit);
        let bodies: Vec<String> = app.comments.iter().map(|c| c.body_text()).collect();
        assert_eq!(bodies, vec!["first", "second"]);
    }

    #[test]
    fn visual_line_movement_respects_wrapping() {
        let mut app = App::for_testing(&[]);
        // inner width is 78 in the test geometry, use hard newlines instead
        app.type_str("abc");
        app.dispatch(Action::InputNewline);
        app.type_str("de");
        app.dispatch(Action::InputMoveLineUp);
        assert_eq!(app.document.cursor(), 2);
        app.dispatch(Action::InputMoveLineDown);
        assert_eq!(app.document.cursor(), 6);
    }

    #[test]
    fn quit_action_exits() {
        let mut app = App::for_testing(&[]);
        assert!(app.dispatch(Action::Quit));
        assert!(!app.dispatch(Action::ToggleHelp));
    }
}
