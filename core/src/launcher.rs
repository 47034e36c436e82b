//! # Launch Use Case
//!
//! One complete run: validate the configuration, load the targets file, then
//! scan. Every stage fails fast, and the scanner is never started unless the
//! configuration and targets are both valid.

use hound_common::config::{Config, ConfigError, RawConfig};
use hound_common::network::target::{TargetError, TargetList};
use thiserror::Error;

use crate::scanner::{ScanError, ScanOutcome, ScanService, ScannerProcess};

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("invalid configuration")]
    Config(#[from] ConfigError),

    #[error("invalid configuration: {} problems found", .0.len())]
    ConfigAll(Vec<ConfigError>),

    #[error(transparent)]
    Targets(#[from] TargetError),

    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// How configuration violations are reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// Stop at the first invalid field.
    #[default]
    FailFast,
    /// Check every field and report all violations together.
    ReportAll,
}

#[derive(Debug, Clone)]
pub struct LaunchReport {
    pub config: Config,
    pub targets: TargetList,
    pub outcome: ScanOutcome,
}

type ConfigHook = Box<dyn Fn(&Config) + Send + Sync>;

pub struct Launcher {
    service: ScanService,
    mode: ValidationMode,
    on_validated: Option<ConfigHook>,
}

impl Launcher {
    pub fn new(process: Box<dyn ScannerProcess>) -> Self {
        Self {
            service: ScanService::new(process),
            mode: ValidationMode::default(),
            on_validated: None,
        }
    }

    pub fn mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Called once with the validated configuration, before targets are read.
    pub fn on_validated(mut self, hook: ConfigHook) -> Self {
        self.on_validated = Some(hook);
        self
    }

    pub async fn run(&self, raw: &RawConfig) -> Result<LaunchReport, LaunchError> {
        let config = match self.mode {
            ValidationMode::FailFast => raw.validate()?,
            ValidationMode::ReportAll => raw.validate_all().map_err(LaunchError::ConfigAll)?,
        };

        if let Some(hook) = &self.on_validated {
            hook(&config);
        }

        let targets = TargetList::from_file(config.targets_file())?;
        let outcome = self.service.execute(&config).await?;

        Ok(LaunchReport {
            config,
            targets,
            outcome,
        })
    }
}
