#![cfg(test)]
//! Runs the real process adapter against throwaway shell scripts posing as nuclei.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use hound_common::config::RawConfig;
use hound_core::launcher::{LaunchError, Launcher};
use hound_core::scanner::{NucleiProcess, ScanError};

fn fake_nuclei(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Both scenarios share one test so only a single thread ever executes
/// freshly written scripts.
#[tokio::test]
async fn script_scanner_success_and_failure() {
    let dir = tempfile::tempdir().unwrap();
    let targets = dir.path().join("targets.txt");
    let output = dir.path().join("out.json");
    fs::write(&targets, "example.com\n10.1.2.3:8443\n").unwrap();

    // Echoes its arguments to stderr so the flag set can be checked on failure
    let ok = fake_nuclei(dir.path(), "nuclei-ok", "printf '{\"a\":1}\\n'");
    let fail = fake_nuclei(dir.path(), "nuclei-fail", "echo \"bad flags: $*\" >&2\nexit 3");

    let raw = RawConfig {
        nuclei_binary: ok.display().to_string(),
        targets_file: targets.display().to_string(),
        output_file: output.display().to_string(),
        enable_output_file: "true".to_string(),
        ..RawConfig::default()
    };
    let report = Launcher::new(Box::new(NucleiProcess)).run(&raw).await.unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), "{\"a\":1}\n");
    assert_eq!(report.outcome.stdout, "{\"a\":1}\n");

    fs::remove_file(&output).unwrap();
    let raw = RawConfig {
        nuclei_binary: fail.display().to_string(),
        ..raw
    };
    let err = Launcher::new(Box::new(NucleiProcess)).run(&raw).await.unwrap_err();

    match err {
        LaunchError::Scan(ScanError::Failed { code, stderr, .. }) => {
            assert_eq!(code, Some(3));
            assert!(stderr.starts_with("bad flags: -t cves,misconfiguration,vulnerabilities -jsonl"));
            assert!(stderr.contains("-duc -H X-Real-IP: "));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!output.exists());
}
