//! The **boundary** between the launcher and the external nuclei process.
//!
//! This module assembles the scanner command line, hands it to a
//! [`ScannerProcess`] implementation and routes the captured output.
//!
//! **Architectural Note:**
//! The launcher depends on the [`ScannerProcess`] abstraction rather than on
//! [`NucleiProcess`] directly, so a run can be driven end to end against a
//! simulated scanner.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use hound_common::config::Config;
use hound_common::network::address::{AddressError, ResolvedHeader};
use hound_common::{info, success};
use thiserror::Error;
use tracing::{Instrument, debug, info_span};

use crate::output;

mod command;
mod process;

pub use command::ScanCommand;
pub use process::NucleiProcess;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Header(#[from] AddressError),

    #[error("failed to start `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("nuclei scan failed with {}", exit_label(.code))]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("failed to write results to {}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Everything the scanner left behind once it exited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs a fully assembled scanner command to completion.
///
/// Implementations buffer all output in memory and only return once the
/// process has exited. There is no timeout.
#[async_trait]
pub trait ScannerProcess: Send + Sync {
    async fn run(&self, command: &ScanCommand) -> Result<ProcessOutput, ScanError>;
}

/// Result of one successful scanner invocation.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub command: ScanCommand,
    pub header: ResolvedHeader,
    /// Where stdout was written, if persistence was enabled.
    pub saved_to: Option<PathBuf>,
    pub stdout: String,
}

/// Application service for a single scan.
///
/// Resolves the spoofed header, builds the command, runs it through the
/// [`ScannerProcess`] and persists the output when configured to.
pub struct ScanService {
    process: Box<dyn ScannerProcess>,
}

impl ScanService {
    pub fn new(process: Box<dyn ScannerProcess>) -> Self {
        Self { process }
    }

    pub async fn execute(&self, config: &Config) -> Result<ScanOutcome, ScanError> {
        // A fresh header per invocation, random-ip draws a new address every time
        let header = ResolvedHeader::resolve(config.header_name(), config.header_value())?;
        let command = ScanCommand::build(config, &header);
        debug!("Command: {command}");

        let span = info_span!("nuclei", templates = %config.templates().join(","));
        let output = self.process.run(&command).instrument(span).await?;

        if !output.success() {
            return Err(ScanError::Failed {
                command: command.to_string(),
                code: output.code,
                stderr: output.stderr,
            });
        }

        let saved_to = if config.output_enabled() {
            let path = config.output_file();
            output::persist(path, &output.stdout).await?;
            success!("Scan completed. Results saved to {}", path.display());
            Some(path.to_path_buf())
        } else {
            info!("Output file writing is disabled. Results are not saved.");
            None
        };

        Ok(ScanOutcome {
            command,
            header,
            saved_to,
            stdout: output.stdout,
        })
    }
}
