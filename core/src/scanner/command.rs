use std::fmt;

use hound_common::config::Config;
use hound_common::network::address::ResolvedHeader;

/// A nuclei invocation: program plus its arguments, in order.
///
/// The flag set is nuclei's contract and is reproduced as-is:
/// JSON-lines output, one request per `-rld` seconds, update check disabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanCommand {
    program: String,
    args: Vec<String>,
}

impl ScanCommand {
    pub fn build(config: &Config, header: &ResolvedHeader) -> Self {
        let args: Vec<String> = vec![
            "-t".to_string(),
            config.templates().join(","),
            "-jsonl".to_string(),
            "-rl".to_string(),
            "1".to_string(),
            "-rld".to_string(),
            config.request_delay().to_string(),
            "-list".to_string(),
            config.targets_file().display().to_string(),
            "-duc".to_string(),
            "-H".to_string(),
            header.to_string(),
        ];

        Self {
            program: config.nuclei_binary().to_string(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for ScanCommand {
    /// Renders the command the way it would be typed into a shell.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

fn quote(word: &str) -> String {
    if !word.is_empty() && !word.contains(|c: char| c.is_whitespace() || c == '\'') {
        return word.to_string();
    }
    format!("'{}'", word.replace('\'', r"'\''"))
}
