use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::SelectionWarning;
use crate::calendar::DateRange;

/// The persisted set of candidate dates.
pub type DateSelection = BTreeSet<NaiveDate>;

/// What a drag does to the dates it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    Add,
    Remove,
}

/// State of the drag interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging {
        anchor: NaiveDate,
        current: NaiveDate,
        mode: SelectionMode,
    },
}

/// Result of applying a drag to the selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitOutcome {
    pub mode: SelectionMode,
    pub range: DateRange,
    /// Dates the mode was applied to, in ascending order.
    pub applied: Vec<NaiveDate>,
    /// Dates skipped with a user-facing warning.
    pub warnings: Vec<SelectionWarning>,
}

/// Paints a [`DateSelection`] by dragging across a month grid.
///
/// The mode of a drag is fixed on press: pressing an already selected date
/// removes, anything else adds. Dates before `today` are never selectable.
#[derive(Debug, Clone)]
pub struct DateRangeSelector {
    selection: DateSelection,
    state: DragState,
    today: NaiveDate,
}

impl DateRangeSelector {
    /// Creates an idle selector with an empty selection.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            selection: DateSelection::new(),
            state: DragState::Idle,
            today,
        }
    }

    /// Seeds the persisted selection.
    pub fn with_selection(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.selection = dates.into_iter().collect();
        self
    }

    pub fn selection(&self) -> &DateSelection {
        &self.selection
    }

    pub fn into_selection(self) -> DateSelection {
        self.selection
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Moves the notion of "today" (e.g. when a session crosses midnight).
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    /// Returns true if `date` is strictly before today.
    pub fn is_past(&self, date: NaiveDate) -> bool {
        date < self.today
    }

    /// Presses on `date`, starting a drag.
    ///
    /// A press on a past date is refused and leaves the selector untouched.
    /// A press while already dragging discards the uncommitted preview.
    pub fn begin_selection(&mut self, date: NaiveDate) -> Result<SelectionMode, SelectionWarning> {
        if self.is_past(date) {
            tracing::warn!(%date, "Refusing to start a drag on a past date");
            return Err(SelectionWarning::PastDate(date));
        }

        if let DragState::Dragging { anchor, current, .. } = self.state {
            tracing::debug!(%anchor, %current, "Discarding uncommitted drag");
        }

        let mode = if self.selection.contains(&date) {
            SelectionMode::Remove
        } else {
            SelectionMode::Add
        };
        self.state = DragState::Dragging {
            anchor: date,
            current: date,
            mode,
        };
        Ok(mode)
    }

    /// Moves the live end of the drag. Ignored while idle.
    pub fn update_selection(&mut self, date: NaiveDate) -> Option<DateRange> {
        if let DragState::Dragging { current, .. } = &mut self.state {
            *current = date;
        }
        self.preview()
    }

    /// The order-normalized range currently under the drag.
    pub fn preview(&self) -> Option<DateRange> {
        match self.state {
            DragState::Dragging {
                anchor, current, ..
            } => Some(DateRange::from_unordered(anchor, current)),
            DragState::Idle => None,
        }
    }

    /// Returns true if `date` is inside the live preview.
    pub fn is_in_preview(&self, date: NaiveDate) -> bool {
        self.preview().is_some_and(|range| range.contains(date))
    }

    /// Applies the drag's mode to every date of the preview and returns to idle.
    ///
    /// Past dates inside the range are skipped with a warning while the rest
    /// of the range is still applied. Returns `None` if no drag was active.
    pub fn commit_selection(&mut self) -> Option<CommitOutcome> {
        let DragState::Dragging {
            anchor,
            current,
            mode,
        } = self.state
        else {
            return None;
        };
        self.state = DragState::Idle;

        let range = DateRange::from_unordered(anchor, current);
        let mut applied = Vec::new();
        let mut warnings = Vec::new();

        for date in range.days() {
            if self.is_past(date) {
                tracing::warn!(%date, "Skipping past date in selection");
                warnings.push(SelectionWarning::PastDate(date));
                continue;
            }
            match mode {
                SelectionMode::Add => self.selection.insert(date),
                SelectionMode::Remove => self.selection.remove(&date),
            };
            applied.push(date);
        }

        Some(CommitOutcome {
            mode,
            range,
            applied,
            warnings,
        })
    }

    /// Global pointer release: finalizes any drag in progress, wherever the
    /// pointer was released. A release while idle does nothing.
    pub fn pointer_released(&mut self) -> Option<CommitOutcome> {
        self.commit_selection()
    }
}
