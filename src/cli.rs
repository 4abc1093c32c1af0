//! Command-line interface.
//!
//! `skein FILE` type-checks a source file and prints the principal type
//! of each top-level expression; `skein` alone starts the REPL. The
//! long flags toggle debug dumps for each pipeline stage.

use std::fs;
use std::path::PathBuf;

use clap::Parser;

use crate::intern::Interner;
use crate::pipeline::{infer_source, Options};
use crate::repl::Repl;

#[derive(Parser)]
#[command(name = "skein")]
#[command(about = "Typechecker and REPL for the skein language", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Source file to check; omit to start an interactive session
    pub file: Option<PathBuf>,

    /// Print each α-converted expression before inference
    #[arg(long)]
    pub vast: bool,

    /// Print the lexed token stream before parsing
    #[arg(long)]
    pub vtok: bool,

    /// Trace type inference rule applications
    #[arg(long)]
    pub vtype: bool,

    /// Enable parser debugging output
    #[arg(long)]
    pub dparser: bool,
}

impl Cli {
    pub fn options(&self) -> Options {
        Options {
            show_tokens: self.vtok,
            show_ast: self.vast,
            trace_types: self.vtype,
            trace_parser: self.dparser,
        }
    }
}

/// Entry point for the binary.
pub fn run_cli() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let options = cli.options();

    match &cli.file {
        Some(path) => check_file(path, options),
        None => {
            let mut repl = Repl::new(options);
            repl.run()?;
            Ok(())
        }
    }
}

fn check_file(path: &PathBuf, options: Options) -> Result<(), Box<dyn std::error::Error>> {
    let source = fs::read_to_string(path)
        .map_err(|err| format!("cannot read {}: {}", path.display(), err))?;

    let mut interner = Interner::new();
    match infer_source(&source, &mut interner, options) {
        Ok(types) => {
            for ty in types {
                println!("- : {}", ty);
            }
            Ok(())
        }
        Err(rendered) => {
            eprintln!("{}", rendered);
            std::process::exit(1);
        }
    }
}
