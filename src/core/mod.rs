//! Core status types and pure building blocks.
//!
//! This module contains the pure part of the alarm engine:
//! - Status values via the `State` trait and `state_enum!`
//! - Guard predicates for transition control
//! - Immutable history of status changes
//!
//! Nothing here touches a store, a detector or a listener.

mod macros;

mod guard;
mod history;
mod state;
mod status;

pub use guard::Guard;
pub use history::{StatusHistory, StatusTransition};
pub use state::State;
pub use status::{AlarmStatus, ArmingStatus};
