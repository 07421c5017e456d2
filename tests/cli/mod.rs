//! CLI Integration Test Modules

pub mod binary;
pub mod config_loading;
pub mod dispatch;
