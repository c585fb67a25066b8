use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use webp_convert_rs::cli::{self, Cli, CliError};
use webp_convert_rs::logger;

use tracing::debug;

fn main() -> ExitCode {
    let args = Cli::parse();
    if args.verbose {
        logger::init_with_default("debug");
    } else {
        logger::init();
    }

    debug!("Starting webp_convert...");

    match cli::run(args) {
        Ok(converted) => {
            eprintln!("{}", converted);
            if let Some(timings) = &converted.timings {
                println!("{}", timings);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            if let Some(usage) = err.downcast_ref::<CliError>() {
                eprintln!("{}", usage);
                eprintln!("{}", Cli::command().render_usage());
                return ExitCode::from(cli::EXIT_USAGE);
            }
            debug!("conversion failed: {:?}", err);
            eprintln!("{:#}", err);
            ExitCode::from(cli::EXIT_FAILURE)
        }
    }
}
