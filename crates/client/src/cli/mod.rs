//! CLI command definitions.

pub mod appointments;
pub mod dates;
pub mod events;
pub mod recommend;

use clap::{Parser, Subcommand, ValueEnum};

/// CLI client for the meetsync scheduling backend.
#[derive(Debug, Parser)]
#[command(name = "meetsync")]
#[command(about = "CLI client for the meetsync scheduling backend", long_about = None)]
pub struct Cli {
    /// Server base URL.
    #[arg(long, env = "MEETSYNC_URL", default_value = "http://localhost:8000")]
    pub base_url: String,

    /// Bearer credential for calendar calls.
    #[arg(long, env = "MEETSYNC_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Offset of the invite's local day, e.g. +09:00. Overrides
    /// `MEETSYNC_UTC_OFFSET`.
    #[arg(long)]
    pub utc_offset: Option<String>,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Personal calendar events, edited through the overlay.
    Events(events::EventsCommand),
    /// Recommended meeting times for an invite.
    Recommend(recommend::RecommendCommand),
    /// Appointment lookups.
    Appointments(appointments::AppointmentsCommand),
    /// Candidate date selection.
    Dates(dates::DatesCommand),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_utc_offset_env_is_left_to_config() {
        let command = Cli::command();
        let arg = command
            .get_arguments()
            .find(|arg| arg.get_id() == "utc_offset")
            .unwrap();
        assert!(arg.get_env().is_none());
    }

    #[test]
    fn test_utc_offset_flag_is_optional() {
        let cli = Cli::try_parse_from(["meetsync", "dates", "grid", "--year", "2025", "--month", "12"])
            .unwrap();
        assert!(cli.utc_offset.is_none());

        let cli = Cli::try_parse_from([
            "meetsync",
            "--utc-offset=-05:00",
            "dates",
            "grid",
            "--year",
            "2025",
            "--month",
            "12",
        ])
        .unwrap();
        assert_eq!(cli.utc_offset.as_deref(), Some("-05:00"));
    }
}
