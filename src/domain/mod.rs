//! Domain layer: field state, per-field strategies, the registry that ties
//! them to field identifiers, and the pure reducer.
//!
//! Nothing in here performs I/O. Collaborators outside the engine are
//! described by the traits in [`ports`].

pub mod component;
pub mod country;
pub mod field;
pub mod intent;
pub mod ports;
pub mod reducer;
pub mod registry;
pub mod strategy;
pub mod view;
