use thiserror::Error;

/// Errors raised while turning one record into an output row.
///
/// Most of these only invalidate the record at hand; see
/// [`ConvertError::is_recoverable`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("Invalid allele {allele}: {reason}")]
    InvalidAllele { allele: String, reason: String },

    #[error("Position {position} shifted by a {shift} base deletion does not fit in 64 bits")]
    PositionOverflow { position: u64, shift: u64 },

    #[error("Genotype index {index} out of range for {alternates} alternate allele(s)")]
    GenotypeIndexOutOfRange { index: usize, alternates: usize },

    #[error("Sample {sample} has ploidy {ploidy}, only haploid and diploid calls are supported")]
    PloidyExceeded { sample: String, ploidy: usize },
}

impl ConvertError {
    pub fn invalid_bases(allele: &str) -> Self {
        ConvertError::InvalidAllele {
            allele: allele.to_string(),
            reason: "alleles must be composed of ACGT".to_string(),
        }
    }

    pub fn empty_insertion(position: u64, reference: &str, alternate: &str) -> Self {
        ConvertError::InvalidAllele {
            allele: alternate.to_string(),
            reason: format!(
                "insertion at {} against ref {} adds no bases",
                position, reference
            ),
        }
    }

    ///
    /// Whether the run may continue after skipping the offending record.
    ///
    /// Ploidy above two is outside what the converter is designed for and
    /// aborts the run unless the caller explicitly opts into skipping.
    ///
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ConvertError::PloidyExceeded { .. })
    }

    /// Short label used when tallying skipped records.
    pub fn kind(&self) -> &'static str {
        match self {
            ConvertError::InvalidAllele { .. } => "invalid_allele",
            ConvertError::PositionOverflow { .. } => "position_overflow",
            ConvertError::GenotypeIndexOutOfRange { .. } => "genotype_index_out_of_range",
            ConvertError::PloidyExceeded { .. } => "ploidy_exceeded",
        }
    }
}

/// Errors raised by the VCF reader. All of these end the run.
#[derive(Error, Debug)]
pub enum VcfError {
    #[error("Missing #CHROM header line before first data line (line {0})")]
    MissingHeader(usize),

    #[error("Malformed VCF line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
