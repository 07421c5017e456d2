//! CLI Integration Tests
//!
//! - `cli::config_loading` - configuration files on disk
//! - `cli::dispatch` - events dispatched through a configured manager
//! - `cli::binary` - the `plugdispatch` executable and its exit codes

mod cli;
mod common;
