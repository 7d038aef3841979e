//! `bos-validate`: check a BOS buffer. Exits 0 when valid, 1 otherwise.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use bos_cli::{init_tracing, inspect, CliError, DecodeArgs};
use clap::{ArgAction, Parser};

#[derive(Parser)]
#[command(name = "bos-validate", version, about = "Check that a BOS buffer is well formed")]
struct Cli {
    /// Buffer to check; stdin when omitted.
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,
    #[command(flatten)]
    decode: DecodeArgs,
    /// Print why the buffer was accepted or rejected.
    #[arg(long)]
    explain: bool,
    /// Print the declared size from the header.
    #[arg(long)]
    size: bool,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn read_input(file: Option<&PathBuf>) -> Result<Vec<u8>, CliError> {
    match file {
        Some(path) => Ok(std::fs::read(path)?),
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let bytes = match read_input(cli.file.as_ref()) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let inspection = inspect(&bytes, cli.decode.options());
    if cli.size {
        println!("{}", inspection.declared_size);
    }
    if cli.explain {
        println!("{}", inspection.explain());
    }
    if inspection.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
