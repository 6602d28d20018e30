//! rnws entry point: parse arguments, set up logging, dispatch.

use clap::Parser;
use miette::Result;
use rnws::{cli, commands, config::Invocation, error, logger, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match Invocation::from_process() {
        Ok(invocation) => match args.command {
            cli::Command::Start(start_args) => {
                commands::start_execute(start_args, &invocation).await
            }
            cli::Command::Bundle(bundle_args) => {
                commands::bundle_execute(bundle_args, &invocation).await
            }
        },
        Err(e) => Err(e),
    };

    result.map_err(error::cli_error_to_miette)
}
