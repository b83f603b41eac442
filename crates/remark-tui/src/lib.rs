// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
mod app;
mod input_wrap;
mod keys;
mod layout;
mod overlay;
mod transcript;
mod widgets;

pub use app::App;
pub use keys::{map_key, Action};
pub use overlay::SuggestionOverlay;
