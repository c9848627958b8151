//! Build errors for transition rules.

use super::Rule;
use thiserror::Error;

/// Errors that can occur when building a transition rule.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Rule '{0}' has no event. Call .on(event) before .build()")]
    MissingEvent(Rule),

    #[error("Rule '{0}' has no outcome. Call .sets(status) or .holds()")]
    MissingOutcome(Rule),
}
