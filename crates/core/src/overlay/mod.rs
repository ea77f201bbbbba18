//! Optimistic local edits over a remote calendar.
//!
//! [`OverlayState`] keeps the last loaded remote events (the base) apart from
//! two ordered queues of unsubmitted changes. What the user sees is always
//! `base - pending_remove + pending_add`. Pushing the queues to the remote
//! source is done by the client crate, which feeds confirmations back through
//! [`OverlayState::confirm_delete`] and [`OverlayState::confirm_create`].

mod error;
mod menu;
mod state;
mod sync;

pub use error::{OverlayError, SyncFailure};
pub use menu::{popup_position, DayMenu, MenuTarget, OpenMenu, PopupPosition, ScreenPoint};
pub use state::{OverlayState, RemovalKind};
pub use sync::{CreatedEvent, PendingMutation, SyncPlan, SyncReport, SyncStage};
