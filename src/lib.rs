//! Field-level form state for payment method components.
//!
//! A payment method form declares its fields as an enum, one strategy per
//! field (how to read and write it in the state, how to normalize and
//! validate its value) and a mapping from the validated state to a payload.
//! [`application::engine::FormEngine`] drives the rest: it reduces view
//! events into new states, publishes them, and only lets a valid form
//! through to submission.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod forms;
pub mod infrastructure;
pub mod interfaces;
