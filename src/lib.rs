//! Toolbar action engine for rich-text editors.
//!
//! The [`toolbar`] module is host-agnostic: it keeps formatting buttons in
//! sync with the selection and routes button activations to native commands,
//! block toggles or custom handlers. [`document`] provides an in-memory host
//! used by the terminal playground and the tests.

pub mod config;
pub mod document;
pub mod error;
pub mod logging;
pub mod toolbar;
