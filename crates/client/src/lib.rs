//! meetsync_client - Imperative shell around `meetsync_core`.
//!
//! HTTP implementations of the calendar and recommendation sources, the async
//! availability overlay, the debounced slot recommender and the `meetsync`
//! CLI.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod inmemory;
pub mod output;
pub mod overlay;
pub mod recommender;

pub use client::MeetsyncClient;
pub use config::Config;
pub use error::{ClientError, Result};
pub use overlay::AvailabilityOverlay;
pub use recommender::SlotRecommender;
