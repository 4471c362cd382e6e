//! Error types.
//!
//! Configuration-time problems surface as [`ToolbarError`] and halt
//! initialization. Collaborator failures surface as [`HostError`] and are
//! absorbed by the dispatcher; they only ever reach the log.

use thiserror::Error;

/// Errors raised while registering actions or building the toolbar.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ToolbarError {
    #[error("action `{0}` is registered more than once")]
    DuplicateAction(String),

    #[error("action `{0}` is not registered")]
    UnregisteredAction(String),

    #[error("action `{name}` has an invalid query `{query}`: {reason}")]
    InvalidQuery {
        name: String,
        query: String,
        reason: String,
    },

    #[error("toolbar has no actions to build")]
    EmptyRegistry,

    #[error("toolbar has not been built yet")]
    NotBuilt,
}

/// Failures reported by the host document collaborators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("there is no selection inside the editable region")]
    NoSelection,

    #[error("command `{0}` is not supported by the host")]
    UnsupportedCommand(String),

    #[error("custom handler `{name}` failed: {reason}")]
    CustomHandlerFailure { name: String, reason: String },

    #[error("selection refers to a node that no longer exists")]
    InvalidNode,
}

/// Errors raised while parsing an HTML fragment into a document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected end of input inside a tag at byte {0}")]
    UnterminatedTag(usize),

    #[error("closing tag `</{found}>` does not match open `<{expected}>`")]
    MismatchedClose { expected: String, found: String },

    #[error("closing tag `</{0}>` has no matching open tag")]
    UnexpectedClose(String),

    #[error("element `<{0}>` is never closed")]
    Unclosed(String),

    #[error("empty tag name at byte {0}")]
    EmptyTagName(usize),
}
