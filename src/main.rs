//! catalog-suggest CLI binary.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use catalog_suggest::VERSION;
use catalog_suggest::cli::args::*;
use catalog_suggest::cli::commands::*;

/// Log level for a verbosity count; `RUST_LOG` still overrides it per module.
fn log_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

fn main() {
    let args = SuggestArgs::parse();

    Builder::new()
        .filter_level(log_level(args.verbosity()))
        .parse_default_env()
        .format(|buf, record| {
            writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())
        })
        .init();

    log::debug!(
        "catalog-suggest {VERSION}, catalog at {}, {} output",
        args.data_dir.display(),
        match args.output_format {
            OutputFormat::Human => "human",
            OutputFormat::Json => "json",
        }
    );

    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
