//! Test modules for the plugin system
//!
//! Dispatcher behaviour, manager construction from settings and the
//! end-to-end event flow through builtin plugins.

mod utils;
