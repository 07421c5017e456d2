//! Priority-ordered plugin event dispatch
//!
//! Plugins subscribe to named events; raising an event calls every
//! subscriber in descending priority order and any one of them may veto it.

pub mod app;
pub mod core;
pub mod plugin;
pub mod queue;
