//! Narrowing server-supplied open intervals into concrete meeting slots.

mod error;
mod filter;
mod sequence;
mod time;
mod types;

pub use error::{TimeParseError, WindowError};
pub use filter::{display, filter, recommend, validate, Recommendation, DEFAULT_DISPLAY_LIMIT};
pub use sequence::{RequestSequence, Ticket};
pub use time::MinuteOfDay;
pub use types::{
    CalculationStatus, CandidateInterval, CandidateSet, PreferenceWindow, RecommendedSlot,
};
