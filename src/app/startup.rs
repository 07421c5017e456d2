//! Application startup
//!
//! Parses the command line, loads the configuration, starts logging, builds
//! the plugin manager and dispatches the requested event.

use crate::app::cli::args::Args;
use crate::app::cli::config::{Config, ConfigError};
use crate::app::cli::display::display_listing;
use crate::core::error_handling::{log_error_with_context, ContextualError};
use crate::core::logging::{init_logging, set_log_level};
use crate::core::styles::{palette_to_clap, StyleRole};
use crate::core::validation::ValidationError;
use crate::core::version::long_version;
use crate::plugin::api::{
    builtin_plugins, DispatchOutcome, DispatchPolicy, PluginError, PluginManager,
};
use clap::{CommandFactory, FromArgMatches};
use std::io::IsTerminal;
use std::str::FromStr;

pub const EXIT_ACCEPTED: i32 = 0;
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_VETOED: i32 = 2;

/// Anything that can stop a run after logging is up
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Plugin(#[from] PluginError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ContextualError for StartupError {
    fn is_user_actionable(&self) -> bool {
        match self {
            StartupError::Config(e) => e.is_user_actionable(),
            StartupError::Plugin(e) => e.is_user_actionable(),
            StartupError::Validation(e) => e.is_user_actionable(),
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            StartupError::Config(e) => e.user_message(),
            StartupError::Plugin(e) => e.user_message(),
            StartupError::Validation(e) => e.user_message(),
        }
    }
}

/// Colour when stdout is a terminal and `NO_COLOR` is unset
fn auto_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

fn parse_args() -> Args {
    let command = Args::command()
        .styles(palette_to_clap(auto_color()))
        .long_version(long_version());
    let matches = command.get_matches();
    Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
}

/// Run the application and return the process exit code
pub async fn startup() -> i32 {
    let args = parse_args();

    let config = match Config::load(args.config_file.as_deref()).await {
        Ok((config, _)) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_ERROR;
        }
    };

    let use_color = args
        .color_override()
        .or(config.color)
        .unwrap_or_else(auto_color);
    colored::control::set_override(use_color);

    let log_file = args
        .log_file
        .as_ref()
        .map(|path| path.to_string_lossy().to_string())
        .or_else(|| config.log_file.clone());
    if let Err(e) = init_logging(
        config.log_level.as_deref(),
        args.log_format.as_deref().or(config.log_format.as_deref()),
        log_file.as_deref(),
        use_color,
    ) {
        eprintln!("Error: failed to initialise logging: {}", e);
        return EXIT_ERROR;
    }
    // --log-level applies on top of the configured level
    if let Some(level) = args.log_level.as_deref() {
        if let Err(e) = set_log_level(level) {
            log::warn!("Ignoring --log-level '{}': {}", level, e);
        }
    }
    log::debug!("plugdispatch {}", long_version());

    match run(&args, &config, use_color) {
        Ok(code) => code,
        Err(e) => {
            log_error_with_context(&e, "Event dispatch failed");
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    }
}

/// Build the manager described by the configuration and command line
pub fn build_manager(args: &Args, config: &Config) -> Result<PluginManager, StartupError> {
    let mut settings = config.to_settings()?;
    if let Some(policy) = &args.policy {
        settings.policy = DispatchPolicy::from_str(policy).map_err(|_| {
            ValidationError::new(format!("Unknown dispatch policy '{}'", policy))
        })?;
    }
    Ok(PluginManager::from_settings(settings)?)
}

/// Dispatch the requested event, or list the configuration
pub fn run(args: &Args, config: &Config, use_color: bool) -> Result<i32, StartupError> {
    let mut manager = build_manager(args, config)?;

    let event_name = match args.event_name()? {
        Some(name) if !args.list => name,
        _ => {
            display_listing(&manager, &builtin_plugins(), use_color);
            return Ok(EXIT_ACCEPTED);
        }
    };

    let event_args = args.event_args()?;
    let outcome = manager.handle_event(&event_name, &event_args, args.user_level)?;
    println!("{}", outcome_line(&outcome, use_color));
    Ok(exit_code(&outcome))
}

pub fn exit_code(outcome: &DispatchOutcome) -> i32 {
    if outcome.result {
        EXIT_ACCEPTED
    } else {
        EXIT_VETOED
    }
}

/// `blog_new_entry: accepted (2 subscribers) -> blog_read`
pub fn outcome_line(outcome: &DispatchOutcome, use_color: bool) -> String {
    let (role, verdict) = if outcome.result {
        (StyleRole::Accepted, "accepted")
    } else {
        (StyleRole::Vetoed, "vetoed")
    };
    let mut line = format!(
        "{}: {} ({} subscriber{})",
        StyleRole::Event.paint(&outcome.event, use_color),
        role.paint(verdict, use_color),
        outcome.subscribers,
        if outcome.subscribers == 1 { "" } else { "s" }
    );
    if let Some(next) = &outcome.next_action {
        line.push_str(" -> ");
        line.push_str(&StyleRole::Event.paint(next, use_color));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("plugdispatch").chain(argv.iter().copied())).unwrap()
    }

    fn config(source: &str) -> Config {
        Config::parse(source, "test").unwrap()
    }

    const GUARDED: &str = r#"
[[event]]
name = "blog_delete"
on-error = "blog_read"
[[event.user]]
level = 50

[[plugin]]
id = "guard"
class = "veto"
priority = "highest"
subscribe = "blog_delete"
"#;

    #[test]
    fn test_outcome_line() {
        let outcome = DispatchOutcome {
            event: "blog_delete".to_string(),
            result: false,
            next_action: Some("blog_read".to_string()),
            subscribers: 1,
        };
        assert_eq!(
            outcome_line(&outcome, false),
            "blog_delete: vetoed (1 subscriber) -> blog_read"
        );
        assert_eq!(exit_code(&outcome), EXIT_VETOED);

        let outcome = DispatchOutcome {
            event: "user_login".to_string(),
            result: true,
            next_action: None,
            subscribers: 0,
        };
        assert_eq!(outcome_line(&outcome, false), "user_login: accepted (0 subscribers)");
        assert_eq!(exit_code(&outcome), EXIT_ACCEPTED);
    }

    #[test]
    fn test_run_vetoed_event() {
        let code = run(&args(&["-u", "50", "blog_delete"]), &config(GUARDED), false).unwrap();
        assert_eq!(code, EXIT_VETOED);
    }

    #[test]
    fn test_run_access_denied() {
        let result = run(&args(&["-u", "10", "blog_delete"]), &config(GUARDED), false);
        assert!(matches!(
            result,
            Err(StartupError::Plugin(PluginError::AccessDenied { .. }))
        ));
    }

    #[test]
    fn test_run_unknown_event_accepted() {
        let code = run(&args(&["user_login"]), &config(GUARDED), false).unwrap();
        assert_eq!(code, EXIT_ACCEPTED);
    }

    #[test]
    fn test_policy_override() {
        let manager = build_manager(&args(&["--policy", "stop-on-veto"]), &config(GUARDED)).unwrap();
        assert_eq!(manager.dispatcher().policy(), DispatchPolicy::StopOnVeto);

        let manager = build_manager(&args(&[]), &config(GUARDED)).unwrap();
        assert_eq!(manager.dispatcher().policy(), DispatchPolicy::NotifyAll);
    }

    #[test]
    fn test_errors_are_reported_with_user_message() {
        let err = run(&args(&["-a", "oops", "blog_delete"]), &config(GUARDED), false).unwrap_err();
        assert!(err.is_user_actionable());
        assert_eq!(err.user_message(), Some("argument 'oops' is not in KEY=VALUE form"));

        let err = build_manager(&args(&[]), &config("[[plugin]]\nid = \"x\"\nclass = \"nope\""))
            .unwrap_err();
        assert!(matches!(err, StartupError::Plugin(PluginError::PluginNotFound { .. })));
    }
}
