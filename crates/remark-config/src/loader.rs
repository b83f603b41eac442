// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::path::{Path, PathBuf};

use anyhow::Context;
use remark_core::User;
use serde::Deserialize;
use tracing::debug;

use crate::Config;

/// Ordered list of config file locations searched from lowest to highest priority.
/// Later files override earlier ones.
fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // 1. System-wide default
    paths.push(PathBuf::from("/etc/remark/config.toml"));

    // 2. XDG / home
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".config/remark/config.toml"));
    }
    if let Some(cfg) = dirs::config_dir() {
        paths.push(cfg.join("remark/config.toml"));
    }

    // 3. Workspace-local
    paths.push(PathBuf::from(".remark/config.toml"));
    paths.push(PathBuf::from("remark.toml"));

    paths
}

/// Load configuration by merging all discovered TOML files.
/// The `extra` argument may provide an explicit path (e.g. `--config` CLI flag).
pub fn load(extra: Option<&Path>) -> anyhow::Result<Config> {
    let mut merged = toml::Value::Table(toml::map::Map::new());

    for path in config_search_paths() {
        if path.is_file() {
            debug!(path = %path.display(), "loading config layer");
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let layer: toml::Value = toml::from_str(&text)
                .with_context(|| format!("parsing {}", path.display()))?;
            merge_toml(&mut merged, layer);
        }
    }

    if let Some(p) = extra {
        debug!(path = %p.display(), "loading explicit config");
        let text = std::fs::read_to_string(p)
            .with_context(|| format!("reading {}", p.display()))?;
        let layer: toml::Value = toml::from_str(&text)
            .with_context(|| format!("parsing {}", p.display()))?;
        merge_toml(&mut merged, layer);
    }

    let config: Config = merged.try_into().unwrap_or_default();
    Ok(config)
}

/// Load a standalone user-directory file (`--users`). The file holds the same
/// `[[users]]` tables as the main config and replaces the config list
/// entirely.
pub fn load_users(path: &Path) -> anyhow::Result<Vec<User>> {
    #[derive(Deserialize)]
    struct UsersFile {
        #[serde(default)]
        users: Vec<User>,
    }

    debug!(path = %path.display(), "loading user directory");
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let parsed: UsersFile =
        toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(parsed.users)
}

/// Deep-merge `src` into `dst`; src wins on scalar conflicts.
fn merge_toml(dst: &mut toml::Value, src: toml::Value) {
    match (dst, src) {
        (toml::Value::Table(d), toml::Value::Table(s)) => {
            for (k, v) in s {
                let entry = d.entry(k).or_insert(toml::Value::Table(toml::map::Map::new()));
                merge_toml(entry, v);
            }
        }
        (dst, src) => *dst = src,
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn val(s: &str) -> toml::Value {
        toml::from_str(s).unwrap()
    }

    #[test]
    fn merge_scalar_src_wins() {
        let mut dst = val(r#"x = 1"#);
        let src = val(r#"x = 2"#);
        merge_toml(&mut dst, src);
        assert_eq!(dst["x"].as_integer(), Some(2));
    }

    #[test]
    fn merge_preserves_keys_not_in_src() {
        let mut dst = val("a = 1\nb = 2");
        let src = val(r#"b = 99"#);
        merge_toml(&mut dst, src);
        assert_eq!(dst["a"].as_integer(), Some(1));
        assert_eq!(dst["b"].as_integer(), Some(99));
    }

    #[test]
    fn merge_nested_tables() {
        let mut dst = val(
            r#"[tui]
ascii = true
max_visible_suggestions = 4"#,
        );
        let src = val(
            r#"[tui]
max_visible_suggestions = 12"#,
        );
        merge_toml(&mut dst, src);
        assert_eq!(dst["tui"]["ascii"].as_bool(), Some(true));
        assert_eq!(dst["tui"]["max_visible_suggestions"].as_integer(), Some(12));
    }

    #[test]
    fn load_missing_explicit_path_is_an_error() {
        let result = load(Some(Path::new("/tmp/remark_nonexistent_config_xyz.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn load_explicit_file_overrides_defaults() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            f,
            r#"author = "reviewer"

[[users]]
username = "alice"

[tui]
ascii = true"#
        )
        .unwrap();
        let cfg = load(Some(f.path())).unwrap();
        assert_eq!(cfg.author, "reviewer");
        assert_eq!(cfg.users.len(), 1);
        assert!(cfg.tui.ascii);
        assert_eq!(cfg.tui.placeholder, "Please enter a comment before submitting");
    }

    #[test]
    fn load_users_reads_a_standalone_directory_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            f,
            r#"[[users]]
username = "carol"
avatar_url = "https://example.com/c.png"

[[users]]
username = "dave""#
        )
        .unwrap();
        let users = load_users(f.path()).unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].username, "carol");
        assert_eq!(users[1].username, "dave");
    }
}
