// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "remark",
    about = "A terminal comment composer with @mention autocomplete",
    version,
    long_about = None,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config file (overrides auto-discovery)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Path to a TOML file with a [[users]] table, replacing configured users
    #[arg(long, short = 'u', value_name = "PATH")]
    pub users: Option<PathBuf>,

    /// Author name for submitted comments (overrides config)
    #[arg(long, short = 'a', env = "REMARK_AUTHOR")]
    pub author: Option<String>,

    /// Draw with plain ASCII borders and markers
    #[arg(long)]
    pub ascii: bool,

    /// Increase verbosity (-v = debug, -vv = trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Print the effective configuration and exit
    ShowConfig,
    /// List the users available for @mention completion
    ListUsers {
        /// Output as JSON instead of a formatted table
        #[arg(long)]
        json: bool,
    },
}

pub fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "remark", &mut std::io::stdout());
}
