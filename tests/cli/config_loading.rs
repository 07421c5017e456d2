//! Configuration file loading tests

use crate::common::{write_config, BLOG_CONFIG};
use plugdispatch::app::cli::config::{Config, ConfigError};
use plugdispatch::core::error_handling::ContextualError;
use plugdispatch::plugin::api::DispatchPolicy;
use std::path::Path;

#[tokio::test]
async fn test_load_explicit_file() {
    let (_dir, path) = write_config(BLOG_CONFIG);
    let (config, loaded_from) = Config::load(Some(path.as_path())).await.unwrap();

    assert_eq!(loaded_from.as_deref(), Some(path.as_path()));
    assert_eq!(config.events.len(), 2);
    assert_eq!(config.plugins.len(), 4);

    let settings = config.to_settings().unwrap();
    assert_eq!(settings.policy, DispatchPolicy::NotifyAll);
    assert_eq!(settings.plugins[0].priority, 4);
}

#[tokio::test]
async fn test_missing_explicit_file_is_an_error() {
    let result = Config::load(Some(Path::new("/nonexistent/plugdispatch.toml"))).await;
    match result {
        Err(err @ ConfigError::NotFound { .. }) => {
            assert!(err.to_string().contains("/nonexistent/plugdispatch.toml"));
            assert!(!err.is_user_actionable());
        }
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_file_names_the_path() {
    let (_dir, path) = write_config("[[plugin]\nid = ");
    match Config::load(Some(path.as_path())).await {
        Err(err @ ConfigError::Parse { .. }) => {
            assert!(err.is_user_actionable());
            assert!(err.to_string().contains("plugdispatch.toml"));
        }
        other => panic!("Expected Parse error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_directory_is_unreadable() {
    let dir = tempfile::TempDir::new().unwrap();
    let result = Config::load(Some(dir.path())).await;
    assert!(matches!(result, Err(ConfigError::Io { .. })));
}
