// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
mod cli;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use remark_tui::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Handle subcommands first (before touching the terminal)
    if let Some(cmd) = &cli.command {
        match cmd {
            Commands::Completions { shell } => {
                cli::print_completions(*shell);
                return Ok(());
            }
            Commands::ShowConfig => {
                let config = load_config(&cli)?;
                println!("{}", serde_yaml::to_string(&config).unwrap_or_default());
                return Ok(());
            }
            Commands::ListUsers { json } => {
                let config = load_config(&cli)?;
                return list_users_cmd(&config, *json);
            }
        }
    }

    let config = load_config(&cli)?;
    run_tui(config).await
}

/// Layered config plus the CLI overrides applied on top.
fn load_config(cli: &Cli) -> anyhow::Result<remark_config::Config> {
    let mut config = remark_config::load(cli.config.as_deref())?;
    if let Some(path) = &cli.users {
        config.users = remark_config::load_users(path)
            .with_context(|| format!("loading users from {}", path.display()))?;
    }
    if let Some(author) = &cli.author {
        config.author = author.clone();
    }
    if cli.ascii {
        config.tui.ascii = true;
    }
    Ok(config)
}

/// Print the mentionable users to stdout.
fn list_users_cmd(config: &remark_config::Config, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(&config.users)?);
        return Ok(());
    }

    if config.users.is_empty() {
        println!("No users configured.");
        println!("Add [[users]] entries to the config file or pass --users <PATH>.");
        return Ok(());
    }

    let name_w = config
        .users
        .iter()
        .map(|u| u.username.len())
        .max()
        .unwrap_or(8)
        .max(8);
    println!("{:<name_w$}  AVATAR", "USERNAME");
    println!("{}", "-".repeat(name_w + 40));
    for user in &config.users {
        let avatar = if user.avatar_url.is_empty() {
            "-"
        } else {
            user.avatar_url.as_str()
        };
        println!("{:<name_w$}  {}", user.username, avatar);
    }
    println!("\nTotal: {} user(s)", config.users.len());
    Ok(())
}

async fn run_tui(config: remark_config::Config) -> anyhow::Result<()> {
    use ratatui::crossterm::{
        event::{DisableMouseCapture, EnableMouseCapture},
        execute,
    };

    let terminal = ratatui::init();
    let _ = execute!(std::io::stderr(), EnableMouseCapture);

    let app = App::new(config);
    let result = app.run(terminal).await;

    let _ = execute!(std::io::stderr(), DisableMouseCapture);
    ratatui::restore();

    result
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
