//! meetsync_core - Functional core for the meetsync scheduling client.
//!
//! Everything in this crate is pure data and pure functions: the drag-based
//! date selector, the optimistic availability overlay, and the slot
//! recommendation filter. Remote systems are only described through the
//! traits in [`source`]; the client crate provides the implementations.

pub mod calendar;
pub mod overlay;
pub mod recommend;
pub mod selection;
pub mod serde;
pub mod source;
