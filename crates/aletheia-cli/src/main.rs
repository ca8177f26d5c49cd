use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    compare::{self, CompareArgs},
    compile::{self, CompileArgs},
    sweep::{self, SweepArgs},
    verify::{self, VerifyArgs},
};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "aletheia",
    about = "Falsification-driven claim evaluation with belief certificates"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a claim set and emit a belief certificate.
    Compile(CompileArgs),
    /// Recompute the hashes of an existing certificate.
    Verify(VerifyArgs),
    /// Evaluate the nearly-sorted performance claim.
    Compare(CompareArgs),
    /// Synthesize the distinctness-ratio decision threshold.
    Sweep(SweepArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    match cli.command {
        Command::Compile(args) => compile::run(&args),
        Command::Verify(args) => verify::run(&args),
        Command::Compare(args) => compare::run(&args),
        Command::Sweep(args) => sweep::run(&args),
    }
}
