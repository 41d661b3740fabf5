use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use clap::ArgMatches;
use tracing::info;

use vcfsnp_convert::{ConversionSummary, ConvertOptions, convert_vcf};

pub fn options_from_matches(matches: &ArgMatches) -> ConvertOptions {
    ConvertOptions {
        input: matches.get_one::<String>("input").cloned(),
        output: matches.get_one::<String>("output").cloned(),
        skip_polyploid: matches.get_flag("skip-polyploid"),
        progress: matches.get_flag("progress"),
    }
}

fn write_summary(path: &str, summary: &ConversionSummary) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create summary file: {}", path))?;
    serde_json::to_writer_pretty(BufWriter::new(file), summary)
        .with_context(|| format!("Failed to write summary file: {}", path))?;
    Ok(())
}

pub fn run_convert(matches: &ArgMatches) -> Result<()> {
    let options = options_from_matches(matches);
    let summary = convert_vcf(&options)?;

    if let Some(path) = matches.get_one::<String>("summary") {
        write_summary(path, &summary)?;
        info!("wrote run summary to {}", path);
    }

    Ok(())
}
