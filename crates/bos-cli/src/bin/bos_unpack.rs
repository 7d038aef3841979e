//! `bos-unpack`: decode BOS (stdin) to pretty JSON (stdout).

use std::io::{self, Read, Write};
use std::process::ExitCode;

use bos::UnknownTagPolicy;
use bos_cli::{init_tracing, unpack, CliError, DecodeArgs};
use clap::{ArgAction, Parser};

#[derive(Parser)]
#[command(name = "bos-unpack", version, about = "Decode BOS from stdin as JSON on stdout")]
struct Cli {
    #[command(flatten)]
    decode: DecodeArgs,
    /// Decode unknown type tags as null instead of failing.
    #[arg(long)]
    legacy_null_tags: bool,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let mut options = cli.decode.options();
    if cli.legacy_null_tags {
        options = options.with_unknown_tags(UnknownTagPolicy::Null);
    }
    let mut buf = Vec::new();
    io::stdin().read_to_end(&mut buf)?;
    let json = unpack(&buf, options)?;
    let mut stdout = io::stdout();
    stdout.write_all(json.as_bytes())?;
    stdout.write_all(b"\n")?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
