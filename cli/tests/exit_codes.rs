#![cfg(unix)]
//! Runs the `hound` binary end to end against shell scripts posing as nuclei.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const SETTINGS: &[&str] = &[
    "NUCLEI_BINARY",
    "TARGETS_FILE",
    "TEMPLATES_LIST",
    "OUTPUT_FILE",
    "ENABLE_OUTPUT_FILE",
    "REQUEST_DELAY",
    "CUSTOM_HEADER_NAME",
    "CUSTOM_HEADER_VALUE",
];

fn fake_nuclei(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn hound(env: &[(&str, &str)]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_hound"));
    command
        .arg("--no-banner")
        .env("RUST_LOG", "info")
        .env("NO_COLOR", "1");

    for var in SETTINGS {
        command.env_remove(var);
    }
    for (key, value) in env {
        command.env(key, value);
    }

    command.output().unwrap()
}

fn transcript(output: &Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

/// All runs share one test so scripts are never written while another
/// thread is spawning processes.
#[test]
fn exit_status_follows_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let targets = dir.path().join("targets.txt");
    let output = dir.path().join("out.json");
    fs::write(&targets, "example.com\n10.1.2.3:8443\n").unwrap();

    let ok = fake_nuclei(dir.path(), "nuclei-ok", "printf '{\"a\":1}\\n'");
    let fail = fake_nuclei(dir.path(), "nuclei-fail", "echo 'no templates loaded' >&2\nexit 3");

    let ok = ok.display().to_string();
    let fail = fail.display().to_string();
    let targets = targets.display().to_string();
    let out = output.display().to_string();
    let base = [
        ("TARGETS_FILE", targets.as_str()),
        ("TEMPLATES_LIST", "cves,misconfiguration"),
        ("OUTPUT_FILE", out.as_str()),
        ("ENABLE_OUTPUT_FILE", "true"),
    ];

    // Successful scan writes the scanner's stdout verbatim
    let mut env = base.to_vec();
    env.push(("NUCLEI_BINARY", ok.as_str()));
    let run = hound(&env);
    assert_eq!(run.status.code(), Some(0), "{}", transcript(&run));
    assert_eq!(fs::read_to_string(&output).unwrap(), "{\"a\":1}\n");

    // Invalid configuration never reaches the scanner
    fs::remove_file(&output).unwrap();
    let mut env = base.to_vec();
    env.push(("NUCLEI_BINARY", ok.as_str()));
    env.push(("REQUEST_DELAY", "0"));
    let run = hound(&env);
    assert_eq!(run.status.code(), Some(1), "{}", transcript(&run));
    assert!(transcript(&run).contains("REQUEST_DELAY"));
    assert!(!output.exists());

    // Scanner failure is reported with its exit code
    let mut env = base.to_vec();
    env.push(("NUCLEI_BINARY", fail.as_str()));
    let run = hound(&env);
    assert_eq!(run.status.code(), Some(1), "{}", transcript(&run));
    let text = transcript(&run);
    assert!(text.contains("no templates loaded"), "{text}");
    assert!(text.contains("Return code: 3"), "{text}");
    assert!(!output.exists());
}
