//! Rivet CLI - assemble and inspect RISC-V instruction words.

// Allow print in the CLI binary, and unwrap in its tests
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// Rivet - RISC-V instruction word builder
#[derive(Parser, Debug)]
#[command(name = "rivet")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode an instruction word from explicit field values
    Encode {
        /// Instruction field values
        #[command(flatten)]
        spec: cli::SpecArgs,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        output: cli::OutputFormat,
    },

    /// Show the labeled bit-field breakdown of an instruction
    Fields {
        /// Instruction field values
        #[command(flatten)]
        spec: cli::SpecArgs,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        output: cli::OutputFormat,
    },

    /// List the six base instruction formats and their layouts
    Formats,

    /// List the general-purpose registers and their ABI names
    Registers,

    /// Interactive TUI builder
    Build {
        /// Start from this instruction format
        #[arg(short, long, default_value = "r")]
        format: cli::FormatArg,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Encode { spec, output } => cli::encode::execute(&spec, output),

        Commands::Fields { spec, output } => cli::fields::execute(&spec, output),

        Commands::Formats => cli::formats::execute(),

        Commands::Registers => cli::registers::execute(),

        Commands::Build { format } => cli::build::execute(format.as_format()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
