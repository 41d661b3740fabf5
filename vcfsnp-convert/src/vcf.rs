//! Streaming VCF reader.
//!
//! Reads VCF text (plain or gzipped/bgzipped, file or stdin) one data line at
//! a time and yields [`VariantRecord`]s. Only the columns the converter needs
//! are parsed: CHROM, POS, REF, ALT and the GT entry of each sample. Phasing
//! is ignored and missing genotype alleles (`.`) are dropped, so `1/.` reads
//! as the haploid call `1`.

use std::io::{BufRead, BufReader, Read};

use anyhow::Result;
use vcfsnp_core::utils::get_dynamic_reader_w_stdin;
use vcfsnp_core::{SampleGenotype, VariantRecord, VcfError};

use crate::consts::GT_KEY;

/// CHROM POS ID REF ALT QUAL FILTER INFO
const MIN_FIELDS: usize = 8;
const FORMAT_FIELD: usize = 8;

pub struct VcfReader<R: BufRead> {
    reader: R,
    sample_names: Vec<String>,
    line_buf: String,
    line_number: usize,
}

impl VcfReader<BufReader<Box<dyn Read>>> {
    ///
    /// Open a VCF file, or stdin when `path` is `None` or `-`.
    ///
    pub fn from_path(path: Option<&str>) -> Result<Self> {
        let reader = get_dynamic_reader_w_stdin(path)?;
        Ok(Self::new(reader)?)
    }
}

impl<R: BufRead> VcfReader<R> {
    ///
    /// Wrap a reader and consume the header, up to and including `#CHROM`.
    ///
    pub fn new(reader: R) -> Result<Self, VcfError> {
        let mut vcf = Self {
            reader,
            sample_names: Vec::new(),
            line_buf: String::new(),
            line_number: 0,
        };
        vcf.read_header()?;
        Ok(vcf)
    }

    pub fn sample_names(&self) -> &[String] {
        &self.sample_names
    }

    /// Line number of the last line read, 1-based.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    fn next_line(&mut self) -> Result<bool, VcfError> {
        self.line_buf.clear();
        if self.reader.read_line(&mut self.line_buf)? == 0 {
            return Ok(false);
        }
        self.line_number += 1;
        let trimmed = self.line_buf.trim_end_matches(['\n', '\r']).len();
        self.line_buf.truncate(trimmed);
        Ok(true)
    }

    fn read_header(&mut self) -> Result<(), VcfError> {
        while self.next_line()? {
            let line = self.line_buf.as_str();
            if line.is_empty() || line.starts_with("##") {
                continue;
            }
            if line.starts_with("#CHROM") {
                self.sample_names = line
                    .split('\t')
                    .skip(FORMAT_FIELD + 1)
                    .map(str::to_string)
                    .collect();
                return Ok(());
            }
            return Err(VcfError::MissingHeader(self.line_number));
        }
        Err(VcfError::MissingHeader(self.line_number))
    }

    fn malformed(&self, reason: impl Into<String>) -> VcfError {
        VcfError::MalformedLine {
            line: self.line_number,
            reason: reason.into(),
        }
    }

    ///
    /// Read the next data line.
    ///
    /// Returns `Ok(None)` at end of input.
    ///
    pub fn read_record(&mut self) -> Result<Option<VariantRecord>, VcfError> {
        loop {
            if !self.next_line()? {
                return Ok(None);
            }
            if !self.line_buf.is_empty() && !self.line_buf.starts_with('#') {
                break;
            }
        }

        let fields: Vec<&str> = self.line_buf.split('\t').collect();
        let expected = if self.sample_names.is_empty() {
            MIN_FIELDS
        } else {
            FORMAT_FIELD + 1 + self.sample_names.len()
        };
        if fields.len() < expected {
            return Err(self.malformed(format!(
                "expected at least {} columns, found {}",
                expected,
                fields.len()
            )));
        }

        let position = fields[1]
            .parse::<u64>()
            .map_err(|_| self.malformed(format!("invalid POS: {}", fields[1])))?;

        // ALT `.` is kept as an allele so the normalizer rejects the site
        let alternates = fields[4].split(',').map(str::to_string).collect();

        let samples = if self.sample_names.is_empty() {
            Vec::new()
        } else {
            let gt_index = fields[FORMAT_FIELD].split(':').position(|k| k == GT_KEY);
            fields[FORMAT_FIELD + 1..FORMAT_FIELD + 1 + self.sample_names.len()]
                .iter()
                .map(|sample| match gt_index {
                    Some(i) => parse_genotype(sample.split(':').nth(i).unwrap_or(".")),
                    None => Ok(SampleGenotype::default()),
                })
                .collect::<Result<Vec<_>, String>>()
                .map_err(|reason| self.malformed(reason))?
        };

        Ok(Some(VariantRecord {
            contig: fields[0].to_string(),
            position,
            reference: fields[3].to_string(),
            alternates,
            samples,
        }))
    }
}

impl<R: BufRead> Iterator for VcfReader<R> {
    type Item = Result<VariantRecord, VcfError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

///
/// Parse a GT value such as `0/1`, `1|2`, `./.` or `1`.
///
fn parse_genotype(gt: &str) -> Result<SampleGenotype, String> {
    let mut indices = Vec::with_capacity(2);
    for allele in gt.split(['/', '|']) {
        if allele == "." || allele.is_empty() {
            continue;
        }
        let index = allele
            .parse::<usize>()
            .map_err(|_| format!("invalid genotype: {}", gt))?;
        indices.push(index);
    }
    Ok(SampleGenotype::new(indices))
}
