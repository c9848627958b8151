//! The alarm controller: the imperative shell around the rule table.
//!
//! [`AlarmController`] reads the store, asks the rule table what an event
//! means, writes the result back and notifies listeners, all inside the
//! caller's thread. [`SharedController`] puts one mutex around it for
//! hosts that drive it from several threads.
//!
//! # Limitations
//!
//! Store and detector calls are blocking with no timeout. A detector that
//! never returns stalls the controller, and through a `SharedController`
//! every other caller too.

mod alarm;
mod shared;

pub use alarm::AlarmController;
pub use shared::SharedController;
