//! Application layer: the state store and the form engine built on it.
//!
//! `FormEngine` is the entry point used by the view layer. It turns view
//! events into intents, keeps the view state in sync with the domain state,
//! and decides whether a submit attempt produces a payload.

pub mod engine;
pub mod store;
