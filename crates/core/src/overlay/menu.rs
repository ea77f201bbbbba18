//! The day/event action popup as a projection of its trigger.
//!
//! Nothing here remembers screen state beyond what was clicked and where;
//! the popup placement is recomputed from the trigger point whenever asked.

use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar::EventId;

const POPUP_OFFSET_TOP: f64 = 155.0;
const POPUP_OFFSET_LEFT: f64 = 50.0;

/// Viewport coordinates of the element that opened the menu.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Top-left corner of the popup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PopupPosition {
    pub top: f64,
    pub left: f64,
}

/// Places the popup above and to the right of `trigger`.
pub fn popup_position(trigger: ScreenPoint) -> PopupPosition {
    PopupPosition {
        top: trigger.y - POPUP_OFFSET_TOP,
        left: trigger.x + POPUP_OFFSET_LEFT,
    }
}

/// What the menu acts on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MenuTarget {
    Day(NaiveDate),
    Event(EventId),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenMenu {
    pub target: MenuTarget,
    pub trigger: ScreenPoint,
}

impl OpenMenu {
    pub fn position(&self) -> PopupPosition {
        popup_position(self.trigger)
    }
}

/// At most one open action menu.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayMenu {
    open: Option<OpenMenu>,
}

impl DayMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the menu for `target`, or closes it if `target` is already open.
    pub fn toggle(&mut self, target: MenuTarget, trigger: ScreenPoint) -> Option<&OpenMenu> {
        if self.open.as_ref().is_some_and(|open| open.target == target) {
            self.open = None;
        } else {
            self.open = Some(OpenMenu { target, trigger });
        }
        self.open.as_ref()
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn current(&self) -> Option<&OpenMenu> {
        self.open.as_ref()
    }

    pub fn is_open_for(&self, target: &MenuTarget) -> bool {
        self.open.as_ref().is_some_and(|open| &open.target == target)
    }
}
