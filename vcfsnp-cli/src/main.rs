mod convert;

use anyhow::Result;
use clap::{Arg, Command};
use tracing_subscriber::{EnvFilter, fmt};

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "vcfsnp";
    pub const DEFAULT_LOG_LEVEL: &str = "info";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Convert VCF variant calls into SNP-style genotype tables.")
        .subcommand_required(true)
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .default_value(consts::DEFAULT_LOG_LEVEL)
                .help("Log filter, e.g. warn, info, debug or an EnvFilter directive"),
        )
        .subcommand(convert::cli::create_convert_cli())
}

/// Logs go to stderr so the table can be piped from stdout.
fn init_logging(level: &str) {
    let filter =
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(consts::DEFAULT_LOG_LEVEL));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    let level = matches
        .get_one::<String>("log-level")
        .map(String::as_str)
        .unwrap_or(consts::DEFAULT_LOG_LEVEL);
    init_logging(level);

    match matches.subcommand() {
        //
        // CONVERT
        //
        Some((convert::cli::CONVERT_CMD, matches)) => {
            convert::handlers::run_convert(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
