//! List rules command implementation.

use anyhow::Result;
use railway_lint_rules::{Preset, PLUGIN_NAMESPACE, RULES};
use serde_json::{json, Map, Value};

/// Runs the list-rules command.
pub fn run(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&catalog()?)?);
        return Ok(());
    }

    println!("Available rules:\n");
    println!("{:<10} {:<45} Description", "Code", "Name");
    println!("{}", "-".repeat(100));

    for rule in RULES {
        println!(
            "{:<10} {:<45} {}",
            rule.code,
            rule.qualified_id(),
            rule.description
        );
    }

    println!("\nPresets:");
    println!("  recommended  - void/Promise<void>/never allowed; test hooks, logging and mock/stub helpers exempt");
    println!("  strict       - only void/never allowed; built-in exemptions only");

    println!("\nSelect a preset in railway-lint.toml or on the command line, e.g.:");
    println!("  railway-lint check --preset strict");

    Ok(())
}

/// Rule metadata and preset contents as one JSON document.
fn catalog() -> Result<Value> {
    let rules: Vec<Value> = RULES
        .iter()
        .map(|rule| {
            let messages: Map<String, Value> = rule
                .messages
                .iter()
                .map(|(id, template)| ((*id).to_string(), json!(template)))
                .collect();
            json!({
                "name": rule.name,
                "qualifiedId": rule.qualified_id(),
                "code": rule.code,
                "description": rule.description,
                "optionsSchema": (rule.options_schema)(),
                "messages": messages,
            })
        })
        .collect();

    let mut presets = Map::new();
    for preset in Preset::ALL {
        presets.insert(
            preset.name().to_string(),
            json!({
                "files": preset.files(),
                "ignores": preset.ignores(),
                "options": serde_json::to_value(preset.options())?,
            }),
        );
    }

    Ok(json!({
        "namespace": PLUGIN_NAMESPACE,
        "rules": rules,
        "presets": presets,
    }))
}
