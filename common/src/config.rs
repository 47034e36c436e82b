//! # Launcher Configuration
//!
//! Every setting is sourced from an environment variable and falls back to a
//! documented default. Values arrive as a [`RawConfig`] of plain strings and
//! only become a [`Config`] after validation, so nothing downstream ever sees
//! a half-valid configuration.

use std::env::{self, VarError};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::network::address::HeaderValue;
use crate::warn;

pub const NUCLEI_BINARY: &str = "NUCLEI_BINARY";
pub const TARGETS_FILE: &str = "TARGETS_FILE";
pub const TEMPLATES_LIST: &str = "TEMPLATES_LIST";
pub const OUTPUT_FILE: &str = "OUTPUT_FILE";
pub const ENABLE_OUTPUT_FILE: &str = "ENABLE_OUTPUT_FILE";
pub const REQUEST_DELAY: &str = "REQUEST_DELAY";
pub const CUSTOM_HEADER_NAME: &str = "CUSTOM_HEADER_NAME";
pub const CUSTOM_HEADER_VALUE: &str = "CUSTOM_HEADER_VALUE";

pub const DEFAULT_NUCLEI_BINARY: &str = "nuclei";
pub const DEFAULT_TARGETS_FILE: &str = "targets.txt";
pub const DEFAULT_TEMPLATES_LIST: &str = "cves,misconfiguration,vulnerabilities";
pub const DEFAULT_OUTPUT_FILE: &str = "results.json";
pub const DEFAULT_ENABLE_OUTPUT_FILE: &str = "false";
pub const DEFAULT_REQUEST_DELAY: &str = "1";
pub const DEFAULT_HEADER_NAME: &str = "X-Real-IP";
pub const DEFAULT_HEADER_VALUE: &str = "random-ip";

const OUTPUT_EXTENSION: &str = ".json";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must not be empty")]
    Empty { var: &'static str },

    #[error("TEMPLATES_LIST must name at least one template category (got '{value}')")]
    NoTemplates { value: String },

    #[error("TEMPLATES_LIST contains a blank template category (got '{value}')")]
    BlankTemplate { value: String },

    #[error("OUTPUT_FILE must end with '.json' (got '{value}')")]
    OutputExtension { value: String },

    #[error("REQUEST_DELAY must be an integer of at least 1 (got '{value}')")]
    InvalidDelay { value: String },

    #[error("CUSTOM_HEADER_VALUE must be 'random-ip' or an IPv4 address (got '{value}')")]
    InvalidHeaderValue { value: String },
}

/// Settings exactly as read from the environment, before any validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawConfig {
    pub nuclei_binary: String,
    pub targets_file: String,
    pub templates_list: String,
    pub output_file: String,
    pub enable_output_file: String,
    pub request_delay: String,
    pub header_name: String,
    pub header_value: String,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            nuclei_binary: DEFAULT_NUCLEI_BINARY.to_string(),
            targets_file: DEFAULT_TARGETS_FILE.to_string(),
            templates_list: DEFAULT_TEMPLATES_LIST.to_string(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            enable_output_file: DEFAULT_ENABLE_OUTPUT_FILE.to_string(),
            request_delay: DEFAULT_REQUEST_DELAY.to_string(),
            header_name: DEFAULT_HEADER_NAME.to_string(),
            header_value: DEFAULT_HEADER_VALUE.to_string(),
        }
    }
}

impl RawConfig {
    /// Reads the process environment. Unset or non-UTF-8 variables take their default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| match env::var(key) {
            Ok(value) => Some(value),
            Err(VarError::NotPresent) => None,
            Err(VarError::NotUnicode(_)) => {
                warn!("{key} is not valid UTF-8, falling back to its default");
                None
            }
        })
    }

    /// Builds the raw settings from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Self {
            nuclei_binary: get(NUCLEI_BINARY, DEFAULT_NUCLEI_BINARY),
            targets_file: get(TARGETS_FILE, DEFAULT_TARGETS_FILE),
            templates_list: get(TEMPLATES_LIST, DEFAULT_TEMPLATES_LIST),
            output_file: get(OUTPUT_FILE, DEFAULT_OUTPUT_FILE),
            enable_output_file: get(ENABLE_OUTPUT_FILE, DEFAULT_ENABLE_OUTPUT_FILE),
            request_delay: get(REQUEST_DELAY, DEFAULT_REQUEST_DELAY),
            header_name: get(CUSTOM_HEADER_NAME, DEFAULT_HEADER_NAME),
            header_value: get(CUSTOM_HEADER_VALUE, DEFAULT_HEADER_VALUE),
        }
    }

    /// Validates every field in a fixed order and stops at the first violation.
    pub fn validate(&self) -> Result<Config, ConfigError> {
        let targets_file = self.check_targets_file()?;
        let templates = self.check_templates()?;
        let output_file = self.check_output_file()?;
        let enable_output_file = self.output_enabled();
        let request_delay = self.check_request_delay()?;
        let header_name = self.check_header_name()?;
        let header_value = self.check_header_value()?;

        Ok(Config {
            nuclei_binary: self.nuclei_binary.clone(),
            targets_file,
            templates,
            output_file,
            enable_output_file,
            request_delay,
            header_name,
            header_value,
        })
    }

    /// Like [`RawConfig::validate`], but reports every violated field at once.
    pub fn validate_all(&self) -> Result<Config, Vec<ConfigError>> {
        let mut errors = Vec::new();

        let targets_file = keep(self.check_targets_file(), &mut errors);
        let templates = keep(self.check_templates(), &mut errors);
        let output_file = keep(self.check_output_file(), &mut errors);
        let request_delay = keep(self.check_request_delay(), &mut errors);
        let header_name = keep(self.check_header_name(), &mut errors);
        let header_value = keep(self.check_header_value(), &mut errors);

        match (
            targets_file,
            templates,
            output_file,
            request_delay,
            header_name,
            header_value,
        ) {
            (
                Some(targets_file),
                Some(templates),
                Some(output_file),
                Some(request_delay),
                Some(header_name),
                Some(header_value),
            ) => Ok(Config {
                nuclei_binary: self.nuclei_binary.clone(),
                targets_file,
                templates,
                output_file,
                enable_output_file: self.output_enabled(),
                request_delay,
                header_name,
                header_value,
            }),
            _ => Err(errors),
        }
    }

    fn check_targets_file(&self) -> Result<PathBuf, ConfigError> {
        if self.targets_file.is_empty() {
            return Err(ConfigError::Empty { var: TARGETS_FILE });
        }
        Ok(PathBuf::from(&self.targets_file))
    }

    /// Empty pieces between commas are dropped; whitespace-only pieces are an error.
    fn check_templates(&self) -> Result<Vec<String>, ConfigError> {
        let templates: Vec<String> = self
            .templates_list
            .split(',')
            .filter(|template| !template.is_empty())
            .map(str::to_string)
            .collect();

        if templates.is_empty() {
            return Err(ConfigError::NoTemplates {
                value: self.templates_list.clone(),
            });
        }

        if templates.iter().any(|template| template.trim().is_empty()) {
            return Err(ConfigError::BlankTemplate {
                value: self.templates_list.clone(),
            });
        }

        Ok(templates)
    }

    fn check_output_file(&self) -> Result<PathBuf, ConfigError> {
        if self.output_file.is_empty() {
            return Err(ConfigError::Empty { var: OUTPUT_FILE });
        }
        if !self.output_file.ends_with(OUTPUT_EXTENSION) {
            return Err(ConfigError::OutputExtension {
                value: self.output_file.clone(),
            });
        }
        Ok(PathBuf::from(&self.output_file))
    }

    /// Anything other than a case-insensitive `true` means disabled.
    fn output_enabled(&self) -> bool {
        self.enable_output_file.eq_ignore_ascii_case("true")
    }

    /// Plain ASCII digits with a non-zero value. The text is kept as written,
    /// so values beyond `u64` still pass and no sign or padding is rewritten.
    fn check_request_delay(&self) -> Result<String, ConfigError> {
        let delay = self.request_delay.as_str();
        let digits_only = !delay.is_empty() && delay.bytes().all(|b| b.is_ascii_digit());

        if !digits_only || delay.bytes().all(|b| b == b'0') {
            return Err(ConfigError::InvalidDelay {
                value: self.request_delay.clone(),
            });
        }
        Ok(self.request_delay.clone())
    }

    fn check_header_name(&self) -> Result<String, ConfigError> {
        if self.header_name.is_empty() {
            return Err(ConfigError::Empty {
                var: CUSTOM_HEADER_NAME,
            });
        }
        Ok(self.header_name.clone())
    }

    fn check_header_value(&self) -> Result<HeaderValue, ConfigError> {
        HeaderValue::parse(&self.header_value).ok_or_else(|| ConfigError::InvalidHeaderValue {
            value: self.header_value.clone(),
        })
    }
}

fn keep<T>(result: Result<T, ConfigError>, errors: &mut Vec<ConfigError>) -> Option<T> {
    result.map_err(|err| errors.push(err)).ok()
}

/// Validated, read-only launcher configuration.
///
/// Only obtainable through [`RawConfig::validate`] or [`RawConfig::validate_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    nuclei_binary: String,
    targets_file: PathBuf,
    templates: Vec<String>,
    output_file: PathBuf,
    enable_output_file: bool,
    request_delay: String,
    header_name: String,
    header_value: HeaderValue,
}

/// One line of the configuration echo: variable, effective value and default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    pub var: &'static str,
    pub value: String,
    pub default: &'static str,
}

impl Config {
    /// Path or name of the scanner executable.
    pub fn nuclei_binary(&self) -> &str {
        &self.nuclei_binary
    }

    pub fn targets_file(&self) -> &Path {
        &self.targets_file
    }

    /// Template categories in the order they were configured.
    pub fn templates(&self) -> &[String] {
        &self.templates
    }

    pub fn output_file(&self) -> &Path {
        &self.output_file
    }

    pub fn output_enabled(&self) -> bool {
        self.enable_output_file
    }

    /// Delay between scanner requests in seconds, exactly as configured.
    pub fn request_delay(&self) -> &str {
        &self.request_delay
    }

    pub fn header_name(&self) -> &str {
        &self.header_name
    }

    pub fn header_value(&self) -> &HeaderValue {
        &self.header_value
    }

    /// Effective values next to their documented defaults, in a stable order.
    pub fn settings(&self) -> Vec<Setting> {
        vec![
            Setting {
                var: NUCLEI_BINARY,
                value: self.nuclei_binary.clone(),
                default: DEFAULT_NUCLEI_BINARY,
            },
            Setting {
                var: TARGETS_FILE,
                value: self.targets_file.display().to_string(),
                default: DEFAULT_TARGETS_FILE,
            },
            Setting {
                var: TEMPLATES_LIST,
                value: self.templates.join(","),
                default: DEFAULT_TEMPLATES_LIST,
            },
            Setting {
                var: OUTPUT_FILE,
                value: self.output_file.display().to_string(),
                default: DEFAULT_OUTPUT_FILE,
            },
            Setting {
                var: ENABLE_OUTPUT_FILE,
                value: self.enable_output_file.to_string(),
                default: DEFAULT_ENABLE_OUTPUT_FILE,
            },
            Setting {
                var: REQUEST_DELAY,
                value: self.request_delay.clone(),
                default: DEFAULT_REQUEST_DELAY,
            },
            Setting {
                var: CUSTOM_HEADER_NAME,
                value: self.header_name.clone(),
                default: DEFAULT_HEADER_NAME,
            },
            Setting {
                var: CUSTOM_HEADER_VALUE,
                value: self.header_value.to_string(),
                default: DEFAULT_HEADER_VALUE,
            },
        ]
    }
}
