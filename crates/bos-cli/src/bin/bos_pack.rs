//! `bos-pack`: encode JSON (stdin) as BOS (stdout).

use std::io::{self, Read, Write};
use std::process::ExitCode;

use bos_cli::{init_tracing, pack, CliError};
use clap::{ArgAction, Parser};

#[derive(Parser)]
#[command(name = "bos-pack", version, about = "Encode JSON from stdin as BOS on stdout")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn run() -> Result<(), CliError> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    let bytes = pack(buf.trim())?;
    io::stdout().write_all(&bytes)?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
