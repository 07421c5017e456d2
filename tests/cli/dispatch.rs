//! End-to-end dispatch through a configuration file

use crate::common::{write_config, BLOG_CONFIG};
use plugdispatch::app::cli::config::Config;
use plugdispatch::plugin::api::{EventArgs, PluginError, PluginManager};
use serde_json::json;

async fn blog_manager() -> PluginManager {
    let (_dir, path) = write_config(BLOG_CONFIG);
    let (config, _) = Config::load(Some(path.as_path())).await.unwrap();
    PluginManager::from_settings(config.to_settings().unwrap()).unwrap()
}

#[tokio::test]
async fn test_subscribers_in_priority_order() {
    let manager = blog_manager().await;
    let repository = manager.repository();

    assert_eq!(
        repository.subscribers("blog_new_entry"),
        vec!["audit", "guard", "blog"]
    );
    assert_eq!(repository.subscribers("blog_delete"), vec!["audit", "guard"]);
    assert_eq!(repository.subscribers("user_login"), vec!["audit"]);
    assert!(repository.subscribers("unknown_event").is_empty());
    assert!(repository.is_plugin("spam"));
    assert!(repository.subscriptions_of("spam").is_empty());
}

#[tokio::test]
async fn test_new_entry_is_accepted() {
    let mut manager = blog_manager().await;
    let mut args = EventArgs::new();
    args.insert("title".to_string(), json!("Hello"));

    let outcome = manager.handle_event("blog_new_entry", &args, Some(30)).unwrap();
    assert!(outcome.result);
    assert_eq!(outcome.subscribers, 3);
    assert_eq!(outcome.next_action.as_deref(), Some("blog_read"));
}

#[tokio::test]
async fn test_delete_is_vetoed() {
    let mut manager = blog_manager().await;
    let outcome = manager
        .handle_event("BLOG_DELETE", &EventArgs::new(), None)
        .unwrap();

    assert_eq!(outcome.event, "blog_delete");
    assert!(!outcome.result);
    assert_eq!(outcome.next_action.as_deref(), Some("blog_read"));
    assert_eq!(manager.last_result(), Some(false));
}

#[tokio::test]
async fn test_access_denied_below_required_level() {
    let mut manager = blog_manager().await;
    let result = manager.handle_event("blog_new_entry", &EventArgs::new(), Some(5));
    assert!(matches!(
        result,
        Err(PluginError::AccessDenied {
            required_level: 30,
            user_level: 5,
            ..
        })
    ));
    assert_eq!(manager.last_event(), None);
}

#[tokio::test]
async fn test_event_history() {
    let mut manager = blog_manager().await;
    manager.handle_event("user_login", &EventArgs::new(), None).unwrap();
    manager.handle_event("blog_delete", &EventArgs::new(), None).unwrap();
    manager.handle_event("nobody_listens", &EventArgs::new(), None).unwrap();

    assert_eq!(manager.first_event(), Some("user_login"));
    assert_eq!(manager.last_event(), Some("nobody_listens"));
    assert_eq!(manager.last_result(), Some(true));
}
