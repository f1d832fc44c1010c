//! Outer surfaces: recorded UI events in, JSON lines out, and text for errors.

pub mod csv;
pub mod json_lines;
pub mod localization;
pub mod text_input;
