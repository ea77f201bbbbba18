//! Boundaries to the remote systems the core consumes but never owns.

mod error;
mod http_mapping;
mod traits;

pub use error::{Result, SourceError};
pub use http_mapping::{status_to_source_error, AUTH_ERROR_CODES};
pub use traits::{CalendarSource, EventPage, RecommendationSource};
