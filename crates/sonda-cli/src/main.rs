use std::io;
use std::sync::Arc;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use sonda_core::{ApiClient, SessionStore};

mod cli;
mod commands;
mod config;
mod format;

use crate::cli::{Cli, Commands};
use crate::commands::report::ReportArgs;
use crate::commands::watch::WatchArgs;
use crate::config::Config;
use crate::format::FormatOptions;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle completions command early (before tracing init)
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "sonda", &mut io::stdout());
        return Ok(());
    }

    // When quiet mode is enabled, suppress info-level logging
    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::load();
    let opts = FormatOptions {
        no_color: cli.no_color || config.no_color,
    };

    let store = Arc::new(match SessionStore::default_path() {
        Some(path) => SessionStore::open(path),
        None => SessionStore::in_memory(),
    });
    let api_url = cli
        .api_url
        .clone()
        .unwrap_or_else(|| config.api_url.clone());
    let client = ApiClient::new(&api_url, Arc::clone(&store))?;

    match cli.command {
        Commands::Login { username, password } => {
            commands::auth::cmd_login(&client, &store, &username, password).await
        }
        Commands::Register {
            username,
            email,
            password,
        } => commands::auth::cmd_register(&client, &username, &email, password).await,
        Commands::Logout => commands::auth::cmd_logout(&store),
        Commands::Status => commands::status::cmd_status(&client, &store, opts).await,
        Commands::Watch {
            view,
            interval,
            count,
        } => {
            commands::watch::cmd_watch(
                client,
                &config,
                WatchArgs {
                    view,
                    interval,
                    count,
                    opts,
                },
            )
            .await
        }
        Commands::Leds => commands::control::cmd_leds(&client, opts).await,
        Commands::Led { id, action } => {
            commands::control::cmd_switch_led(&client, &store, id, action, opts).await
        }
        Commands::Buttons => commands::control::cmd_buttons(&client, opts).await,
        Commands::Button { id, action } => {
            commands::control::cmd_switch_button(&client, &store, id, action, opts).await
        }
        Commands::Events { limit } => commands::events::cmd_events(&client, limit).await,
        Commands::History { kind, limit } => {
            commands::events::cmd_history(&client, kind, limit, opts).await
        }
        Commands::Board => commands::board::cmd_board(&client, opts).await,
        Commands::Report {
            kind,
            from,
            to,
            format,
            output,
        } => {
            commands::report::cmd_report(
                &client,
                &config,
                ReportArgs {
                    kind,
                    from,
                    to,
                    format,
                    output,
                },
            )
            .await
        }
        Commands::Completions { .. } => {
            // Already handled above
            unreachable!()
        }
    }
}
