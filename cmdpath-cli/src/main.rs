//! Main entry point for the cmdpath CLI.
//!
//! A `which`-style tool: each NAME argument is resolved to an absolute,
//! canonical, symlink-free path and printed on its own line. Names that
//! cannot be resolved are reported on stderr and reflected in the exit
//! code.

mod cli;
mod error;

use clap::Parser;
use cli::Cli;
use cmdpath::{Logger, PathSearcher};
use error::CliError;

fn main() {
    // A parse failure must map to the invalid-arguments exit code; help
    // and version are not failures and keep exiting 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() {
                CliError::InvalidArguments(e.to_string()).exit_code()
            } else {
                0
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    // Initialize logging based on verbosity
    let logger = cmdpath::init_logger(cli.verbose, cli.quiet);

    match run(&cli, &logger) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: &Cli, logger: &Logger) -> Result<(), CliError> {
    let searcher = PathSearcher::new();
    let mut missing = Vec::new();

    for name in &cli.names {
        logger.debug(&format!("resolving {name}"));
        match searcher.find_path(name)? {
            Some(path) => println!("{}", path.display()),
            None => missing.push(name.clone()),
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CliError::NotFound(missing))
    }
}
