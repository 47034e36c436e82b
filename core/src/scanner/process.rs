use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::{ProcessOutput, ScanCommand, ScanError, ScannerProcess};

/// Runs nuclei as a child process and buffers everything it prints.
pub struct NucleiProcess;

#[async_trait]
impl ScannerProcess for NucleiProcess {
    async fn run(&self, command: &ScanCommand) -> Result<ProcessOutput, ScanError> {
        let output = Command::new(command.program())
            .args(command.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| ScanError::Spawn {
                command: command.to_string(),
                source,
            })?;

        debug!(
            "{} exited with {:?} ({} bytes of output)",
            command.program(),
            output.status.code(),
            output.stdout.len()
        );

        Ok(ProcessOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
