//! Recommendation CLI command.

use clap::Parser;

/// Recommend meeting times for an invite.
#[derive(Debug, Parser)]
pub struct RecommendCommand {
    /// Invite code.
    pub invite: String,
    /// Meeting length in hours (e.g. 1.5).
    #[arg(long)]
    pub duration_hours: f64,
    /// Earliest hour of the day (0-24).
    #[arg(long, default_value = "9")]
    pub start_hour: u8,
    /// Latest hour of the day (0-24).
    #[arg(long, default_value = "18")]
    pub end_hour: u8,
    /// Number of slots shown (defaults to MEETSYNC_DISPLAY_LIMIT or 5).
    #[arg(long)]
    pub limit: Option<usize>,
}
