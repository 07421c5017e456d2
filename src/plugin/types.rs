//! Type definitions for the plugin system
//!
//! Plugin (class) and event (method) configurations, plus the enumerations
//! used in configuration files.

use strum_macros::{Display, EnumIter, EnumString};

/// Named arguments passed along with an event
pub type EventArgs = serde_json::Map<String, serde_json::Value>;

/// Named priority levels accepted in configuration files
///
/// Priorities are plain integers; these names map onto `0..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PluginPriority {
    Lowest = 0,
    Low = 1,
    Normal = 2,
    High = 3,
    Highest = 4,
}

impl PluginPriority {
    pub fn value(self) -> i32 {
        self as i32
    }
}

/// Activation state of a plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ActiveState {
    Inactive,
    #[default]
    Active,
    /// Active and not meant to be switched off by configuration overrides
    Always,
}

impl ActiveState {
    pub fn is_active(self) -> bool {
        !matches!(self, ActiveState::Inactive)
    }
}

/// Functional category of a plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PluginType {
    #[default]
    Default,
    Primary,
    Library,
    Security,
    Read,
    Write,
    Config,
}

/// Functional category of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EventType {
    #[default]
    Default,
    Primary,
    Read,
    Write,
    Security,
    Config,
}

/// One alternative access requirement of an event
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserRequirement {
    pub role: Option<String>,
    pub group: Option<String>,
    pub level: u32,
}

/// Static description of a plugin, loaded once from configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PluginConfiguration {
    /// Lower-case plugin identifier
    pub id: String,
    /// Built-in plugin class used to instantiate the handler
    pub class_name: String,
    pub priority: i32,
    pub active: ActiveState,
    pub plugin_type: PluginType,
    /// Event names this plugin subscribes to
    pub subscriptions: Vec<String>,
    /// Free-form settings handed to the plugin factory
    pub settings: toml::Table,
}

impl PluginConfiguration {
    pub fn new(id: &str, class_name: &str) -> Self {
        Self {
            id: id.to_string(),
            class_name: class_name.to_string(),
            priority: PluginPriority::Normal.value(),
            active: ActiveState::default(),
            plugin_type: PluginType::default(),
            subscriptions: Vec::new(),
            settings: toml::Table::new(),
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_active(mut self, active: ActiveState) -> Self {
        self.active = active;
        self
    }

    pub fn with_type(mut self, plugin_type: PluginType) -> Self {
        self.plugin_type = plugin_type;
        self
    }

    pub fn with_subscriptions<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subscriptions = events.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_settings(mut self, settings: toml::Table) -> Self {
        self.settings = settings;
        self
    }

    pub fn is_active(&self) -> bool {
        self.active.is_active()
    }
}

/// Static description of an event, one per distinct event name
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MethodConfiguration {
    /// Event (method) name
    pub name: String,
    pub event_type: EventType,
    pub template: Option<String>,
    pub title: Option<String>,
    /// Alternative access requirements; any one of them grants access
    pub user_requirements: Vec<UserRequirement>,
    /// Action suggested after a successful dispatch
    pub on_success: Option<String>,
    /// Action suggested after a vetoed dispatch
    pub on_error: Option<String>,
    pub safe_mode: bool,
}

impl MethodConfiguration {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn method_name(&self) -> &str {
        &self.name
    }

    pub fn with_type(mut self, event_type: EventType) -> Self {
        self.event_type = event_type;
        self
    }

    pub fn with_template(mut self, template: &str) -> Self {
        self.template = Some(template.to_string());
        self
    }

    pub fn with_requirement(mut self, requirement: UserRequirement) -> Self {
        self.user_requirements.push(requirement);
        self
    }

    pub fn with_follow_up(mut self, on_success: Option<&str>, on_error: Option<&str>) -> Self {
        self.on_success = on_success.map(str::to_string);
        self.on_error = on_error.map(str::to_string);
        self
    }

    /// Lowest level that satisfies one of the requirements (0 when unrestricted)
    pub fn required_level(&self) -> u32 {
        self.user_requirements
            .iter()
            .map(|req| req.level)
            .min()
            .unwrap_or(0)
    }

    /// Whether a user with the given level may trigger this event
    pub fn is_permitted(&self, user_level: u32) -> bool {
        user_level >= self.required_level()
    }

    /// Follow-up action for a dispatch result
    pub fn next_action(&self, result: bool) -> Option<&str> {
        if result {
            self.on_success.as_deref()
        } else {
            self.on_error.as_deref()
        }
    }
}
