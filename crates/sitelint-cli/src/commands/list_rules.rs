//! List rules command implementation.

use sitelint_core::FileKind;
use sitelint_rules::{all_rules, strict_rules, Audit};

use crate::settings::Settings;

/// Runs the list-rules command.
pub fn run(settings: &Settings) {
    let Settings {
        config,
        pattern_rules,
        origin,
        root,
        root_origin,
    } = settings;
    let opt_in: Vec<String> = strict_rules().iter().map(|r| r.name().to_string()).collect();

    println!("Config: {origin}");
    println!("Site root: {} ({root_origin})\n", root.display());
    println!("Available rules:\n");
    println!(
        "{:<8} {:<22} {:<10} {:<8} Description",
        "Code", "Name", "Files", "Default"
    );
    println!("{}", "-".repeat(96));

    for rule in all_rules(config) {
        let default = if opt_in.iter().any(|n| n == rule.name()) {
            "opt-in"
        } else {
            "on"
        };
        println!(
            "{:<8} {:<22} {:<10} {:<8} {}",
            rule.code(),
            rule.name(),
            kinds(rule.file_kinds()),
            default,
            rule.description()
        );
    }

    if !pattern_rules.is_empty() {
        println!("\nPattern rules (from config):");
        for rule in pattern_rules {
            println!(
                "{:<8} {:<22} {:<10} {:<8} {}",
                rule.code(),
                rule.name(),
                kinds(rule.file_kinds()),
                "on",
                rule.description()
            );
        }
    }

    println!("\nAudits:");
    for audit in Audit::ALL {
        let names: Vec<String> = audit
            .rules(false, config)
            .iter()
            .map(|r| r.name().to_string())
            .collect();
        println!("  {:<13} {}", audit.name(), names.join(", "));
    }

    println!("\nUse --strict to add the opt-in rules, or pick rules directly:");
    println!("  sitelint check --rules img-alt,link-integrity");
    println!("  sitelint check --rules SL001,SL020");
}

fn kinds(kinds: &[FileKind]) -> String {
    kinds
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
