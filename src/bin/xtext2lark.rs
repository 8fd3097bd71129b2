//! Command-line interface for xtext2lark
//!
//! Usage:
//!   xtext2lark `<FILES>...` [-o `<output>`] [--start `<rule>`] [--no-start]
//!
//! Files (or directories of `.xtext` files) are merged in the order given.
//! Log verbosity is controlled through `RUST_LOG` (default: `warn`).

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use xtext2lark::project::{ConvertError, ConvertOptions, convert, load_sources};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("xtext2lark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Xtext grammar definitions into a Lark grammar")
        .arg_required_else_help(true)
        .arg(
            Arg::new("files")
                .help("Xtext grammar files or directories, in override order")
                .required(true)
                .num_args(1..)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Write the Lark grammar to this file instead of stdout")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("start")
                .long("start")
                .help("Rule the synthetic start rule points at (default: first rule)")
                .conflicts_with("no-start"),
        )
        .arg(
            Arg::new("no-start")
                .long("no-start")
                .help("Do not emit a start rule")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if let Err(e) = run(&matches) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), ConvertError> {
    let files: Vec<PathBuf> = matches
        .get_many::<PathBuf>("files")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    let mut options = ConvertOptions::default();
    options.emit.start_rule = matches.get_one::<String>("start").cloned();
    options.emit.emit_start = !matches.get_flag("no-start");

    let sources = load_sources(&files)?;
    let conversion = convert(&sources, &options)?;

    for failure in &conversion.failures {
        eprintln!("warning: {}: {}", failure.name, failure.error);
    }

    match matches.get_one::<PathBuf>("output") {
        Some(path) => std::fs::write(path, &conversion.grammar)?,
        None => print!("{}", conversion.grammar),
    }
    Ok(())
}
