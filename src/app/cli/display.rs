//! CLI display utilities for `--list`

use crate::core::styles::StyleRole;
use crate::plugin::api::{BuiltinPluginInfo, PluginManager};
use prettytable::{format, Cell, Row, Table};

fn cell(text: &str, role: StyleRole, use_color: bool) -> Cell {
    let cell = Cell::new(text);
    match role.to_prettytable_spec() {
        Some(spec) if use_color => cell.style_spec(&spec),
        _ => cell,
    }
}

fn titles(names: &[&str], use_color: bool) -> Row {
    Row::new(
        names
            .iter()
            .map(|name| cell(name, StyleRole::Header, use_color))
            .collect(),
    )
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);
    table
}

/// Configured plugins with their priority, state and subscriptions
pub fn plugin_table(manager: &PluginManager, use_color: bool) -> Table {
    let repository = manager.repository();
    let mut table = new_table();
    table.set_titles(titles(
        &["Plugin", "Class", "Priority", "State", "Subscriptions"],
        use_color,
    ));

    for id in repository.plugin_ids() {
        let Some(plugin) = repository.plugin(&id) else {
            continue;
        };
        table.add_row(Row::new(vec![
            cell(&id, StyleRole::Plugin, use_color),
            Cell::new(&plugin.class_name),
            cell(&plugin.priority.to_string(), StyleRole::Priority, use_color),
            Cell::new(&plugin.active.to_string()),
            Cell::new(&repository.subscriptions_of(&id).join(", ")),
        ]));
    }
    table
}

/// Events with their access level, subscribers in call order and follow-ups
pub fn event_table(manager: &PluginManager, use_color: bool) -> Table {
    let repository = manager.repository();
    let mut table = new_table();
    table.set_titles(titles(
        &["Event", "Type", "Level", "Subscribers", "On success", "On error"],
        use_color,
    ));

    for name in repository.event_names() {
        let Some(event) = repository.event(&name) else {
            continue;
        };
        table.add_row(Row::new(vec![
            cell(&name, StyleRole::Event, use_color),
            Cell::new(&event.event_type.to_string()),
            Cell::new(&event.required_level().to_string()),
            Cell::new(&repository.subscribers(&name).join(" > ")),
            Cell::new(event.on_success.as_deref().unwrap_or("-")),
            Cell::new(event.on_error.as_deref().unwrap_or("-")),
        ]));
    }
    table
}

/// Builtin plugin classes available to configuration files
pub fn builtin_table(plugins: &[BuiltinPluginInfo], use_color: bool) -> Table {
    let mut table = new_table();
    table.set_titles(titles(&["Class", "API", "Description"], use_color));
    for info in plugins {
        table.add_row(Row::new(vec![
            cell(info.class_name, StyleRole::Plugin, use_color),
            cell(&info.api_version.to_string(), StyleRole::Dim, use_color),
            Cell::new(info.description),
        ]));
    }
    table
}

/// Print every listing table
pub fn display_listing(manager: &PluginManager, plugins: &[BuiltinPluginInfo], use_color: bool) {
    let sections = [
        ("Plugins", plugin_table(manager, use_color)),
        ("Events", event_table(manager, use_color)),
        ("Builtin classes", builtin_table(plugins, use_color)),
    ];
    for (index, (heading, table)) in sections.iter().enumerate() {
        if index > 0 {
            println!();
        }
        println!("{}", StyleRole::Header.paint(heading, use_color));
        if table.is_empty() {
            println!("  {}", StyleRole::Dim.paint("(none)", use_color));
        } else if table.print_tty(use_color).is_err() {
            table.printstd();
        }
    }
}
