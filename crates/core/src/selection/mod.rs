//! Drag-based multi-date selection.
//!
//! A two-state machine (idle / dragging) that paints candidate dates onto a
//! persisted [`DateSelection`] when the pointer is released.

mod error;
mod grid;
mod machine;

pub use error::SelectionWarning;
pub use grid::month_grid;
pub use machine::{CommitOutcome, DateRangeSelector, DateSelection, DragState, SelectionMode};
