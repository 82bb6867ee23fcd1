//! Init command implementation.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "railway-lint.toml";

const DEFAULT_CONFIG: &str = r#"# railway-lint configuration

# Preset: "recommended" (lenient) or "strict"
preset = "recommended"

# Exit non-zero when violations reach this severity: error | warning | info
fail_on = "error"

[analyzer]
# Root directory to analyze (default: current directory)
# root = "."

# Glob patterns, relative to the root. Leave include empty to use the
# preset's file set (src/**/*.ts, src/**/*.tsx).
# include = ["src/**/*.ts"]
exclude = [
    "**/node_modules/**",
    "**/dist/**",
]

# Respect .gitignore files
respect_gitignore = true

[rules.require-result-return-type]
enabled = true
# severity = "warning"  # Override default severity
# Each list below replaces the preset's list when set.
# allowedReturnTypes = ["void", "Promise<void>", "never"]
# exemptFunctions = ["main", "setup", "teardown"]
# exemptPatterns = ["^handle"]
"#;

/// Runs the init command in the current directory.
pub fn run(force: bool) -> Result<()> {
    let path = write_config(Path::new("."), force)?;

    println!("Created {}", path.display());
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE_NAME} to configure the rule");
    println!("  2. Run: railway-lint check");

    Ok(())
}

/// Writes the starter config into `dir`, returning its path.
fn write_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)?;
    Ok(config_path)
}
