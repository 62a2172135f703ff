//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use time::Date;
use time::macros::format_description;

#[derive(Parser)]
#[command(name = "sonda")]
#[command(author, version, about = "Dashboard client for the ESP32 ultrasonic sensor backend", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Backend base URL (overrides config), e.g. http://localhost:5000/api
    #[arg(long, global = true, env = "SONDA_API_URL")]
    pub api_url: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session
    Login {
        username: String,

        /// Password (prompted interactively when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Register a new account
    Register {
        username: String,
        email: String,

        /// Password (prompted interactively when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Clear the stored session
    Logout,

    /// One-shot overview: statistics, LEDs, latest readings
    Status,

    /// Continuously refresh a view at its poll interval
    Watch {
        /// View to watch
        #[arg(value_enum, default_value = "dashboard")]
        view: WatchView,

        /// Refresh interval in seconds (defaults to the view's configured cadence)
        #[arg(short, long)]
        interval: Option<u64>,

        /// Stop after N refresh cycles (0 = until Ctrl+C)
        #[arg(short, long, default_value = "0")]
        count: u32,
    },

    /// List LEDs
    Leds,

    /// Switch a LED
    Led {
        id: i64,

        #[arg(value_enum)]
        action: SwitchAction,
    },

    /// List buttons
    Buttons,

    /// Switch a button
    Button {
        id: i64,

        #[arg(value_enum)]
        action: SwitchAction,
    },

    /// Show recent audit events
    Events {
        /// Number of events to fetch
        #[arg(short, long, default_value = "15")]
        limit: u32,
    },

    /// Show LED or button change history
    History {
        #[arg(value_enum, default_value = "led")]
        kind: HistoryKind,

        /// Number of entries to fetch
        #[arg(short, long, default_value = "100")]
        limit: u32,
    },

    /// One-shot indicator board: histogram, tallies, trend
    Board,

    /// Export a report as PDF or XLSX
    Report {
        /// Record set to report on
        #[arg(value_enum)]
        kind: ReportKindArg,

        /// Start date (YYYY-MM-DD, inclusive). Omit both bounds to export everything.
        #[arg(long, value_parser = parse_date)]
        from: Option<Date>,

        /// End date (YYYY-MM-DD, inclusive of the whole day)
        #[arg(long, value_parser = parse_date)]
        to: Option<Date>,

        /// Artifact format
        #[arg(short, long, value_enum, default_value = "pdf")]
        format: ExportFormat,

        /// Directory to write the artifact into (defaults to config, then Downloads)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// View a `watch` invocation refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WatchView {
    Dashboard,
    Control,
    Board,
}

/// Target state for a LED/button mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SwitchAction {
    On,
    Off,
    Toggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HistoryKind {
    Led,
    Button,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKindArg {
    Sensores,
    Leds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Pdf,
    Xlsx,
}

/// Parse a `YYYY-MM-DD` argument.
pub fn parse_date(raw: &str) -> Result<Date, String> {
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_report_with_range() {
        let cli = Cli::try_parse_from([
            "sonda", "report", "sensores", "--from", "2026-03-01", "--to", "2026-03-07",
            "--format", "xlsx",
        ])
        .unwrap();
        match cli.command {
            Commands::Report {
                kind, from, to, format, ..
            } => {
                assert_eq!(kind, ReportKindArg::Sensores);
                assert!(from.is_some());
                assert!(to.is_some());
                assert_eq!(format, ExportFormat::Xlsx);
            }
            _ => panic!("wrong command"),
        }
    }

    #[test]
    fn rejects_bad_date() {
        let result = Cli::try_parse_from(["sonda", "report", "leds", "--from", "03/01/2026"]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_led_toggle() {
        let cli = Cli::try_parse_from(["sonda", "led", "2", "toggle"]).unwrap();
        match cli.command {
            Commands::Led { id, action } => {
                assert_eq!(id, 2);
                assert_eq!(action, SwitchAction::Toggle);
            }
            _ => panic!("wrong command"),
        }
    }
}
