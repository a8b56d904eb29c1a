//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

/// File name written by `sitelint init`.
pub const CONFIG_FILE: &str = "sitelint.toml";

const DEFAULT_CONFIG: &str = r#"# sitelint configuration

# Lowest severity that makes the run exit with status 1: info, warning, error
fail_on = "info"

[analyzer]
# Site root to audit (default: HTML_TEMPLATE)
root = "HTML_TEMPLATE"

# Glob patterns, relative to the root, to leave out of the audit
exclude = [
    "vendor/**",
]

# Worker threads (default: one per CPU)
# parallelism = 4

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.img-alt]
enabled = true
# severity = "warning"

[rules.theme-asset-variants]
# Literal substrings marking a theme-switching page
markers = ["themeswitch", "themeSwitch"]

# Declarative rules: fail a page when `selector` matches but `require`
# does not (scope: "document" or "head").
#
# [[pattern-rule]]
# name = "has-favicon"
# selector = '(?i)<head\b'
# require = '(?i)<link[^>]+rel="icon"'
# scope = "head"
# message = "page has no favicon"
# severity = "warning"
"#;

/// Runs the init command in `dir`.
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to point `root` at your site");
    println!("  2. Run: sitelint all");

    Ok(())
}
