//! Appointment CLI commands.

use clap::{Parser, Subcommand};

/// Appointment commands.
#[derive(Debug, Parser)]
pub struct AppointmentsCommand {
    #[command(subcommand)]
    pub action: AppointmentsAction,
}

/// Available appointment actions.
#[derive(Debug, Subcommand)]
pub enum AppointmentsAction {
    /// Show an appointment's candidate dates.
    Detail {
        /// Invite code.
        invite: String,
    },
    /// Show an invitee's calendar over the appointment's candidate dates.
    Agenda {
        /// Invite code.
        invite: String,
    },
}
