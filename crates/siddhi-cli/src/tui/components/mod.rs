//! Reusable TUI widgets.

pub mod form;
pub mod input;
pub mod messages;
