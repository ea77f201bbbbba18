//! Date selection CLI commands.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Candidate date selection commands.
#[derive(Debug, Parser)]
pub struct DatesCommand {
    #[command(subcommand)]
    pub action: DatesAction,
}

/// Available date selection actions.
#[derive(Debug, Subcommand)]
pub enum DatesAction {
    /// Simulate one drag from `--from` to `--to` over a selection.
    Paint {
        /// Already selected dates, comma separated.
        #[arg(long, value_delimiter = ',')]
        selected: Vec<NaiveDate>,
        /// Date under the initial press.
        #[arg(long)]
        from: NaiveDate,
        /// Date under the pointer on release.
        #[arg(long)]
        to: NaiveDate,
        /// Override today's date.
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Print a month grid with the selection marked.
    Grid {
        /// Year.
        #[arg(long)]
        year: i32,
        /// Month (1-12).
        #[arg(long)]
        month: u32,
        /// Selected dates, comma separated.
        #[arg(long, value_delimiter = ',')]
        selected: Vec<NaiveDate>,
        /// Override today's date.
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}
