//! meetsync CLI entry point.

use std::sync::Arc;

use chrono::Local;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use meetsync_client::cli::appointments::AppointmentsAction;
use meetsync_client::cli::dates::DatesAction;
use meetsync_client::cli::events::EventsAction;
use meetsync_client::cli::{Cli, Commands, OutputFormat};
use meetsync_client::config::{parse_utc_offset, Config};
use meetsync_client::error::ClientError;
use meetsync_client::output::{json, pretty, print_output};
use meetsync_client::recommender::Preferences;
use meetsync_client::{AvailabilityOverlay, MeetsyncClient, SlotRecommender};
use meetsync_core::calendar::{ids_on, DateRange};
use meetsync_core::overlay::SyncFailure;
use meetsync_core::selection::{month_grid, DateRangeSelector};
use meetsync_core::source::CalendarSource;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    let default_filter = if cli.quiet {
        "warn"
    } else {
        "meetsync_client=info,meetsync_core=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let format = cli.format;
    if let Err(error) = run(cli).await {
        if error.is::<Reported>() {
            std::process::exit(1);
        }
        match format {
            OutputFormat::Json => println!("{}", json::format_error(error.as_ref())),
            OutputFormat::Pretty => eprintln!("Error: {error}"),
        }
        std::process::exit(1);
    }
}

/// A failure whose details have already been printed.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
struct Reported(SyncFailure);

/// Pushes pending changes and prints the report. A partial failure prints what
/// was confirmed and what is still pending before failing the command.
async fn sync_and_print<S: CalendarSource>(
    overlay: &mut AvailabilityOverlay<S>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match overlay.sync().await {
        Ok(report) => {
            print_output(&report, format, || pretty::format_sync_report(&report));
            Ok(())
        }
        Err(failure) => {
            print_output(&failure, format, || pretty::format_sync_failure(&failure));
            Err(Reported(failure).into())
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::from_env();
    config.base_url = cli.base_url.clone();
    if cli.token.is_some() {
        config.token = cli.token.clone();
    }
    if let Some(offset) = &cli.utc_offset {
        config.utc_offset = parse_utc_offset(offset)
            .ok_or_else(|| ClientError::InvalidInput(format!("invalid UTC offset: {offset}")))?;
    }
    let client = MeetsyncClient::from_config(&config);

    match cli.command {
        Commands::Events(events_cmd) => {
            let mut overlay = AvailabilityOverlay::new(client);
            match events_cmd.action {
                EventsAction::List { range } => {
                    overlay.load_base(range.range()).await?;
                    let events = overlay.effective_view();
                    print_output(&events, cli.format, || pretty::format_events(&events));
                }
                EventsAction::Add { fields } => {
                    let draft = fields.to_draft();
                    let range = DateRange::from_unordered(draft.start.date(), draft.end.date());
                    overlay.load_base(range).await?;
                    overlay.add_local(draft)?;
                    sync_and_print(&mut overlay, cli.format).await?;
                }
                EventsAction::Remove { ids, range } => {
                    overlay.load_base(range.range()).await?;
                    overlay.remove_many(&ids)?;
                    sync_and_print(&mut overlay, cli.format).await?;
                }
                EventsAction::ClearDay { date } => {
                    overlay.load_base(DateRange::single(date)).await?;
                    let ids = ids_on(overlay.effective_view(), date);
                    if ids.is_empty() {
                        if !cli.quiet {
                            println!("Nothing scheduled on {date}");
                        }
                        return Ok(());
                    }
                    overlay.remove_many(&ids)?;
                    sync_and_print(&mut overlay, cli.format).await?;
                }
                EventsAction::Edit { id, range, fields } => {
                    overlay.load_base(range.range()).await?;
                    overlay.edit_local(&id, fields.to_draft())?;
                    sync_and_print(&mut overlay, cli.format).await?;
                }
            }
        }
        Commands::Recommend(cmd) => {
            let preferences = Preferences::from_hours(cmd.duration_hours, cmd.start_hour, cmd.end_hour)?;
            let limit = cmd.limit.unwrap_or(config.display_limit);
            let recommender = SlotRecommender::new(Arc::new(client), cmd.invite)
                .with_quiet_period(config.debounce())
                .with_display_limit(limit);
            recommender.update(preferences).await;
            recommender.wait_idle().await;

            let snapshot = recommender.snapshot().await;
            if let Some(error) = snapshot.error {
                return Err(error.into());
            }
            let shown = recommender.displayed().await;
            print_output(&shown, cli.format, || {
                pretty::format_recommendation(&snapshot, &shown)
            });
        }
        Commands::Appointments(cmd) => match cmd.action {
            AppointmentsAction::Detail { invite } => {
                let detail = client.appointment_detail(&invite).await?;
                print_output(&detail, cli.format, || pretty::format_detail(&detail));
            }
            AppointmentsAction::Agenda { invite } => {
                let detail = client.appointment_detail(&invite).await?;
                let range = detail.date_range().ok_or_else(|| {
                    ClientError::InvalidInput(format!("appointment {invite} has no dates"))
                })?;
                let mut overlay = AvailabilityOverlay::new(client);
                overlay.load_base(range).await?;
                let events = overlay.effective_view();
                print_output(&events, cli.format, || pretty::format_agenda(&overlay.agenda()));
            }
        },
        Commands::Dates(cmd) => match cmd.action {
            DatesAction::Paint {
                selected,
                from,
                to,
                today,
            } => {
                let today = today.unwrap_or_else(|| Local::now().date_naive());
                let mut selector = DateRangeSelector::new(today).with_selection(selected);
                selector.begin_selection(from)?;
                selector.update_selection(to);
                let outcome = selector.pointer_released().ok_or_else(|| {
                    ClientError::InvalidInput("no drag in progress".to_string())
                })?;
                let selection = selector.selection();
                print_output(&(&outcome, selection), cli.format, || {
                    pretty::format_outcome(&outcome, selection)
                });
            }
            DatesAction::Grid {
                year,
                month,
                selected,
                today,
            } => {
                let today = today.unwrap_or_else(|| Local::now().date_naive());
                let weeks = month_grid(year, month).ok_or_else(|| {
                    ClientError::InvalidInput(format!("invalid month {year}-{month}"))
                })?;
                let selector = DateRangeSelector::new(today).with_selection(selected);
                print_output(&weeks, cli.format, || {
                    pretty::format_grid(&weeks, month, selector.selection(), today)
                });
            }
        },
    }

    Ok(())
}
