#![cfg(test)]
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hound_common::config::{ConfigError, RawConfig};
use hound_common::network::address::is_excluded;
use hound_common::network::target::TargetError;
use hound_core::launcher::{LaunchError, Launcher};
use hound_core::scanner::{ProcessOutput, ScanCommand, ScanError, ScannerProcess};

/// Stands in for nuclei: remembers the command and replies with fixed output.
struct SimulatedNuclei {
    code: Option<i32>,
    stdout: &'static str,
    stderr: &'static str,
    commands: Arc<Mutex<Vec<ScanCommand>>>,
}

#[async_trait]
impl ScannerProcess for SimulatedNuclei {
    async fn run(&self, command: &ScanCommand) -> Result<ProcessOutput, ScanError> {
        self.commands.lock().unwrap().push(command.clone());
        Ok(ProcessOutput {
            code: self.code,
            stdout: self.stdout.to_string(),
            stderr: self.stderr.to_string(),
        })
    }
}

fn simulated(
    code: Option<i32>,
    stdout: &'static str,
    stderr: &'static str,
) -> (Launcher, Arc<Mutex<Vec<ScanCommand>>>) {
    let commands = Arc::new(Mutex::new(Vec::new()));
    let process = SimulatedNuclei {
        code,
        stdout,
        stderr,
        commands: commands.clone(),
    };
    (Launcher::new(Box::new(process)), commands)
}

fn environment(pairs: &[(&str, String)]) -> RawConfig {
    let env: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect();
    RawConfig::from_lookup(|key| env.get(key).cloned())
}

fn path_str(path: &Path) -> String {
    path.display().to_string()
}

/// This test covers the documented happy path: two targets, output enabled,
/// and the scanner's JSON lines written verbatim to the output file.
#[tokio::test]
async fn launch_persists_scanner_output() {
    let dir = tempfile::tempdir().unwrap();
    let targets = dir.path().join("targets.txt");
    let output = dir.path().join("out.json");
    std::fs::write(&targets, "10.0.0.1\nexample.com:8080\n").unwrap();

    let raw = environment(&[
        ("TEMPLATES_LIST", "cves,misconfiguration".to_string()),
        ("TARGETS_FILE", path_str(&targets)),
        ("ENABLE_OUTPUT_FILE", "true".to_string()),
        ("OUTPUT_FILE", path_str(&output)),
    ]);
    let (launcher, commands) = simulated(Some(0), "{\"a\":1}\n", "");

    let result = launcher.run(&raw).await;

    assert!(result.is_ok(), "Launch failed: {:?}", result.err());
    let report = result.unwrap();
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "{\"a\":1}\n");
    assert_eq!(report.targets.len(), 2);
    assert_eq!(report.outcome.saved_to.as_deref(), Some(output.as_path()));

    let commands = commands.lock().unwrap();
    assert_eq!(commands.len(), 1, "scanner should run exactly once");
    let args = commands[0].args();
    assert_eq!(commands[0].program(), "nuclei");
    assert_eq!(&args[..2], ["-t", "cves,misconfiguration"]);
    assert_eq!(&args[7..10], ["-list", path_str(&targets).as_str(), "-duc"]);

    // Default header value is random-ip, so a fresh public address is sent
    let header = &args[11];
    let ip = header.strip_prefix("X-Real-IP: ").unwrap();
    assert!(!is_excluded(ip.parse().unwrap()), "excluded address sent: {ip}");
}

#[tokio::test]
async fn launch_without_output_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let targets = dir.path().join("targets.txt");
    let output = dir.path().join("results.json");
    std::fs::write(&targets, "scanme.nmap.org\n").unwrap();

    let raw = environment(&[
        ("TARGETS_FILE", path_str(&targets)),
        ("OUTPUT_FILE", path_str(&output)),
        ("CUSTOM_HEADER_NAME", "X-Forwarded-For".to_string()),
        ("CUSTOM_HEADER_VALUE", "203.0.113.99".to_string()),
    ]);
    let (launcher, commands) = simulated(Some(0), "{\"a\":1}\n", "");

    let report = launcher.run(&raw).await.unwrap();

    assert!(report.outcome.saved_to.is_none());
    assert!(!output.exists());
    assert_eq!(
        commands.lock().unwrap()[0].args().last().unwrap(),
        "X-Forwarded-For: 203.0.113.99"
    );
}

#[tokio::test]
async fn scanner_failure_is_reported_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let targets = dir.path().join("targets.txt");
    let output = dir.path().join("out.json");
    std::fs::write(&targets, "192.0.2.10:443\n").unwrap();

    let raw = environment(&[
        ("TARGETS_FILE", path_str(&targets)),
        ("ENABLE_OUTPUT_FILE", "TRUE".to_string()),
        ("OUTPUT_FILE", path_str(&output)),
    ]);
    let (launcher, _) = simulated(Some(1), "", "[FTL] Could not run nuclei\n");

    let err = launcher.run(&raw).await.unwrap_err();

    match err {
        LaunchError::Scan(ScanError::Failed {
            command,
            code,
            stderr,
        }) => {
            assert_eq!(code, Some(1));
            assert_eq!(stderr, "[FTL] Could not run nuclei\n");
            assert!(command.contains("-rl 1 -rld 1"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!output.exists());
}

#[tokio::test]
async fn bad_target_line_aborts_before_scanning() {
    let dir = tempfile::tempdir().unwrap();
    let targets = dir.path().join("targets.txt");
    std::fs::write(&targets, "10.0.0.1\nnot a valid target!!\n").unwrap();

    let raw = environment(&[("TARGETS_FILE", path_str(&targets))]);
    let (launcher, commands) = simulated(Some(0), "", "");

    let err = launcher.run(&raw).await.unwrap_err();

    assert!(matches!(
        err,
        LaunchError::Targets(TargetError::InvalidLine { line_number: 2, .. })
    ));
    assert!(commands.lock().unwrap().is_empty());
}

#[tokio::test]
async fn blank_targets_file_aborts_before_scanning() {
    let dir = tempfile::tempdir().unwrap();
    let targets = dir.path().join("targets.txt");
    std::fs::write(&targets, "\n   \n\n").unwrap();

    let raw = environment(&[("TARGETS_FILE", path_str(&targets))]);
    let (launcher, commands) = simulated(Some(0), "", "");

    let err = launcher.run(&raw).await.unwrap_err();

    assert!(matches!(err, LaunchError::Targets(TargetError::Empty { .. })));
    assert!(commands.lock().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_environment_aborts_before_reading_targets() {
    // The targets file does not exist, but the delay is checked first
    let raw = environment(&[
        ("TARGETS_FILE", "/nonexistent/targets.txt".to_string()),
        ("REQUEST_DELAY", "0".to_string()),
    ]);
    let (launcher, commands) = simulated(Some(0), "", "");

    let err = launcher.run(&raw).await.unwrap_err();

    assert!(matches!(
        err,
        LaunchError::Config(ConfigError::InvalidDelay { .. })
    ));
    assert!(commands.lock().unwrap().is_empty());
}
