use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;

use crate::commands::CommandLine;
use crate::terminal::{colors, format, print};
use hound_common::config::{Config, RawConfig};
use hound_core::launcher::{LaunchReport, Launcher, ValidationMode};
use hound_core::scanner::NucleiProcess;

pub async fn scan(commands: &CommandLine) -> anyhow::Result<()> {
    let quiet: u8 = commands.quiet;
    let mode = if commands.report_all {
        ValidationMode::ReportAll
    } else {
        ValidationMode::FailFast
    };

    let launcher = Launcher::new(Box::new(NucleiProcess))
        .mode(mode)
        .on_validated(Box::new(move |config: &Config| echo_config(config, quiet)));

    print::header("starting scanner", quiet);
    let start_time: Instant = Instant::now();
    let report: LaunchReport = launcher
        .run(&RawConfig::from_env())
        .await
        .context("scan aborted")?;

    scan_ends(&report, start_time.elapsed(), quiet);
    Ok(())
}

fn echo_config(config: &Config, quiet: u8) {
    if quiet > 1 {
        return;
    }

    print::header("environment variable configuration", quiet);
    let details = format::settings_to_details(&config.settings());
    print::aligned_details(&details);
}

fn scan_ends(report: &LaunchReport, total_time: Duration, quiet: u8) {
    let len: usize = report.targets.len();
    let unit: &str = if len == 1 { "target" } else { "targets" };
    let targets: ColoredString = format!("{len} {unit}").bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: ColoredString =
        format!("Scan Complete: {targets} scanned in {total_time}").color(colors::TEXT_DEFAULT);

    match quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output.to_string());
            print::end_of_program();
        }
        _ => hound_common::success!("{}", output),
    }
}
