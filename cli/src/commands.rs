pub mod scan;

use clap::{ArgAction, Parser};

const ENV_HELP: &str = "\
Environment:
  NUCLEI_BINARY        scanner executable            [default: nuclei]
  TARGETS_FILE         one target per line           [default: targets.txt]
  TEMPLATES_LIST       comma-separated categories    [default: cves,misconfiguration,vulnerabilities]
  OUTPUT_FILE          results path, must be .json   [default: results.json]
  ENABLE_OUTPUT_FILE   'true' to save results        [default: false]
  REQUEST_DELAY        seconds between requests      [default: 1]
  CUSTOM_HEADER_NAME   spoofed header                [default: X-Real-IP]
  CUSTOM_HEADER_VALUE  'random-ip' or an IPv4        [default: random-ip]";

#[derive(Parser, Debug)]
#[command(name = "hound", version)]
#[command(about = "Runs nuclei against a validated target list behind a spoofed client address.")]
#[command(after_help = ENV_HELP)]
pub struct CommandLine {
    /// Do not print the startup banner
    #[arg(long)]
    pub no_banner: bool,

    /// Less output: -q drops banner and headers, -qq also the configuration echo
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,

    /// Report every configuration problem instead of stopping at the first
    #[arg(long)]
    pub report_all: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
