// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
use remark_core::User;
use serde::{Deserialize, Serialize};

fn default_author() -> String {
    "anonymous".to_string()
}

fn default_max_visible() -> usize {
    8
}

fn default_placeholder() -> String {
    "Please enter a comment before submitting".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Author name attached to every submitted comment.
    #[serde(default = "default_author")]
    pub author: String,
    /// The mentionable user directory, in suggestion order.
    ///
    /// ```toml
    /// [[users]]
    /// username   = "alice"
    /// avatar_url = "https://example.com/avatars/alice.png"
    /// ```
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub tui: TuiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            author: default_author(),
            users: Vec::new(),
            tui: TuiConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuiConfig {
    /// Draw plain ASCII borders and glyphs instead of Unicode box drawing.
    #[serde(default)]
    pub ascii: bool,
    /// Rows shown in the suggestion popup before it scrolls.
    #[serde(default = "default_max_visible")]
    pub max_visible_suggestions: usize,
    /// Transient message shown when submitting an empty comment.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            ascii: false,
            max_visible_suggestions: default_max_visible(),
            placeholder: default_placeholder(),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.author, "anonymous");
        assert!(cfg.users.is_empty());
        assert_eq!(cfg.tui.max_visible_suggestions, 8);
        assert!(!cfg.tui.ascii);
    }

    #[test]
    fn users_parse_in_written_order() {
        let cfg: Config = toml::from_str(
            r#"
            [[users]]
            username = "alice"
            avatar_url = "https://example.com/a.png"

            [[users]]
            username = "bob"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.users.len(), 2);
        assert_eq!(cfg.users[0].username, "alice");
        assert_eq!(cfg.users[1].username, "bob");
        assert!(cfg.users[1].avatar_url.is_empty());
    }

    #[test]
    fn tui_section_overrides_selected_fields_only() {
        let cfg: Config = toml::from_str(
            r#"
            author = "me"

            [tui]
            ascii = true
            "#,
        )
        .unwrap();
        assert_eq!(cfg.author, "me");
        assert!(cfg.tui.ascii);
        assert_eq!(cfg.tui.max_visible_suggestions, 8);
    }
}
