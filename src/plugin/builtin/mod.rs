//! Builtin plugins

pub mod api;
pub mod dump;
pub mod veto;
