mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, scan};
use terminal::{logging, print};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();

    logging::init_logging();
    print::banner(commands.no_banner, commands.quiet);

    match scan::scan(&commands).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print::failure(&err);
            ExitCode::FAILURE
        }
    }
}
