//! CLI command for showing or initializing configuration

use std::io::Write;

use crate::config::{ExpensePaths, Settings};
use crate::error::{ExpenseError, ExpenseResult};

/// Handle `config`
///
/// With `init`, writes the current settings to the default location unless a
/// settings file already exists there.
pub fn handle_config_command<W: Write>(
    paths: &ExpensePaths,
    settings: &Settings,
    init: bool,
    out: &mut W,
) -> ExpenseResult<()> {
    if init {
        if paths.is_initialized() {
            writeln!(
                out,
                "Settings already exist at: {}",
                paths.settings_file().display()
            )?;
        } else {
            settings.save(paths)?;
            writeln!(
                out,
                "Wrote default settings to: {}",
                paths.settings_file().display()
            )?;
        }
        return Ok(());
    }

    writeln!(out, "expense-watch configuration")?;
    writeln!(out, "===========================")?;
    writeln!(out, "Config directory: {}", paths.base_dir().display())?;
    writeln!(
        out,
        "Settings file:    {}{}",
        paths.settings_file().display(),
        if paths.is_initialized() { "" } else { " (not written)" }
    )?;
    writeln!(out)?;
    writeln!(out, "Settings:")?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| ExpenseError::Config(format!("Failed to serialize settings: {}", e)))?;
    writeln!(out, "{}", json)?;

    Ok(())
}
