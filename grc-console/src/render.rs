//! Plain-text output

use shared::{NavigationItem, RequestTypeFormConfig, User};

pub fn print_navigation(items: &[NavigationItem]) {
    print_level(items, 0);
}

fn print_level(items: &[NavigationItem], depth: usize) {
    for item in items {
        println!("{:indent$}{:<28} {}", "", item.name, item.path, indent = depth * 2);
        if let Some(children) = &item.children {
            print_level(children, depth + 1);
        }
    }
}

pub fn print_user(user: &User, logged_in_at: Option<i64>) {
    println!("{} <{}>", user.name, user.email);
    println!("  id:         {}", user.id);
    println!("  department: {}", user.department);
    println!("  role:       {} ({})", user.role.display_name(), user.role);
    if let Some(at) = logged_in_at.and_then(chrono::DateTime::from_timestamp_millis) {
        println!("  signed in:  {}", at.format("%Y-%m-%d %H:%M:%S UTC"));
    }
}

pub fn print_form(config: &RequestTypeFormConfig, include_disabled: bool) {
    let state = if config.enabled { "enabled" } else { "disabled" };
    println!("{} [{}] - {}", config.name, state, config.description);

    let mut fields: Vec<_> = config
        .fields
        .iter()
        .filter(|f| include_disabled || f.enabled)
        .collect();
    fields.sort_by_key(|f| f.order);

    for field in fields {
        let mut flags = Vec::new();
        if field.required {
            flags.push("required");
        }
        if !field.enabled {
            flags.push("disabled");
        }
        let field_type = serde_json::to_value(field.field_type)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        println!(
            "  {:>3}  {:<20} {:<26} {:<9} {}",
            field.order,
            field.id,
            field.label,
            field_type,
            flags.join(", ")
        );
    }
}
