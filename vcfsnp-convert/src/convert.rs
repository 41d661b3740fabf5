use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::time::Instant;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use vcfsnp_core::utils::get_dynamic_writer;

use crate::aggregate::{aggregate_record, header_line};
use crate::consts::PROGRESS_INTERVAL;
use crate::vcf::VcfReader;

/// Settings for one conversion run.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// VCF to read, stdin when `None` or `-`
    pub input: Option<String>,
    /// TSV to append to, stdout when `None` or `-`
    pub output: Option<String>,
    /// Skip records with a sample above diploid instead of aborting
    pub skip_polyploid: bool,
    /// Show a spinner on stderr
    pub progress: bool,
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConversionSummary {
    pub records_read: u64,
    pub records_written: u64,
    pub records_skipped: u64,
    /// Skipped records keyed by error kind
    pub skipped_by_reason: BTreeMap<String, u64>,
    pub elapsed_seconds: f64,
}

fn progress_spinner(enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) =
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed}] {msg} ({per_sec})")
    {
        spinner.set_style(style.tick_strings(&["-", "\\", "|", "/"]));
    }
    spinner.set_message("Converting records...");
    spinner
}

///
/// Convert every record from `reader` into rows on `writer`.
///
/// The header row is written first. Records that fail with a recoverable
/// error are logged and skipped. A sample with more than two called alleles
/// aborts the run unless `options.skip_polyploid` is set. Reader errors
/// always abort.
///
/// # Arguments
/// - reader: an opened VCF, header already consumed
/// - writer: destination for the TSV
/// - options: run settings
///
pub fn convert_records<R: BufRead, W: Write>(
    reader: &mut VcfReader<R>,
    writer: &mut W,
    options: &ConvertOptions,
) -> Result<ConversionSummary> {
    let start = Instant::now();
    let mut summary = ConversionSummary::default();
    let sample_names = reader.sample_names().to_vec();

    debug!(samples = sample_names.len(), "read VCF header");
    writeln!(writer, "{}", header_line(&sample_names)).context("Failed to write header")?;

    let spinner = progress_spinner(options.progress);

    while let Some(record) = reader.read_record().inspect_err(|e| error!("{}", e))? {
        summary.records_read += 1;

        match aggregate_record(&record, &sample_names) {
            Ok(row) => {
                writeln!(writer, "{}", row)
                    .with_context(|| format!("Failed to write row for {}", record.locus()))?;
                summary.records_written += 1;
            }
            Err(e) if e.is_recoverable() || options.skip_polyploid => {
                warn!(
                    line = reader.line_number(),
                    locus = %record.locus(),
                    "skipping record: {}",
                    e
                );
                summary.records_skipped += 1;
                *summary
                    .skipped_by_reason
                    .entry(e.kind().to_string())
                    .or_insert(0) += 1;
            }
            Err(e) => {
                error!(line = reader.line_number(), locus = %record.locus(), "{}", e);
                return Err(e).with_context(|| format!("Aborting at {}", record.locus()));
            }
        }

        if summary.records_read % PROGRESS_INTERVAL == 0 {
            spinner.set_position(summary.records_read);
        }
    }

    writer.flush().context("Failed to flush output")?;
    spinner.finish_and_clear();

    summary.elapsed_seconds = start.elapsed().as_secs_f64();
    info!(
        read = summary.records_read,
        written = summary.records_written,
        skipped = summary.records_skipped,
        "conversion finished in {:.1}s",
        summary.elapsed_seconds
    );

    Ok(summary)
}

///
/// Open the configured input and output and run the conversion.
///
pub fn convert_vcf(options: &ConvertOptions) -> Result<ConversionSummary> {
    let mut reader = VcfReader::from_path(options.input.as_deref()).with_context(|| {
        format!(
            "Failed to open VCF input: {}",
            options.input.as_deref().unwrap_or("<stdin>")
        )
    })?;
    let mut writer = get_dynamic_writer(options.output.as_deref())?;

    convert_records(&mut reader, &mut writer, options)
}
