use colored::*;
use hound_common::config::Setting;
use hound_core::launcher::LaunchError;
use hound_core::scanner::ScanError;

use crate::terminal::colors;

pub fn settings_to_details(settings: &[Setting]) -> Vec<(String, ColoredString)> {
    settings
        .iter()
        .map(|setting| {
            let value: String = format!(
                "{} {}",
                setting.value,
                format!("(default: '{}')", setting.default).color(colors::DEFAULT_VALUE)
            );
            (setting.var.to_string(), value.normal())
        })
        .collect()
}

/// Diagnostics for a failed run, most specific first.
pub fn failure_lines(err: &anyhow::Error) -> Vec<String> {
    match err.downcast_ref::<LaunchError>() {
        Some(LaunchError::ConfigAll(errors)) => {
            let mut lines = vec![format!(
                "Invalid configuration, {} problems found:",
                errors.len()
            )];
            lines.extend(errors.iter().map(|err| format!("  {err}")));
            lines
        }
        Some(LaunchError::Scan(ScanError::Failed {
            command,
            code,
            stderr,
        })) => vec![
            format!("Nuclei scan failed: {}", stderr.trim_end()),
            format!("Command: {command}"),
            format!(
                "Return code: {}",
                code.map_or_else(|| "none".to_string(), |code| code.to_string())
            ),
        ],
        _ => vec![format!("{err:#}")],
    }
}
