//! Flow-layer errors.
//!
//! Misuse of the public API (unknown states, duplicate inputs) is logged
//! and reported through `bool` returns; these errors surface where user
//! code participates, such as output actions.

use thiserror::Error;

/// Errors raised by the state machine and controllers.
#[derive(Debug, Error)]
pub enum FlowError {
    /// The named state is not registered.
    #[error("unknown state: {0}")]
    UnknownState(String),
    /// The named input is not registered.
    #[error("unknown input: {0}")]
    UnknownInput(String),
    /// A state with this id is already registered.
    #[error("state already registered: {0}")]
    DuplicateState(String),
    /// An input with this name is already registered.
    #[error("input already registered: {0}")]
    DuplicateInput(String),
    /// An output action names a method no owner provides.
    #[error("no output target named {0}")]
    UnknownOutput(String),
    /// A user-supplied output action reported failure.
    #[error("output action failed: {0}")]
    ActionFailed(String),
}
