use std::fmt::{self, Display};

/// Maximum number of genotype indices a sample may carry (diploid).
pub const MAX_PLOIDY: usize = 2;

///
/// Genotype call for one sample at one locus.
///
/// Each index points into the allele list of the record: `0` is the
/// reference, `k` is `alternates[k - 1]`. Missing alleles (`.` in VCF) are
/// not stored, so `./.` becomes an empty genotype.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Default)]
pub struct SampleGenotype {
    pub indices: Vec<usize>,
}

impl SampleGenotype {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    ///
    /// Number of called alleles for this sample
    ///
    pub fn ploidy(&self) -> usize {
        self.indices.len()
    }

    pub fn is_missing(&self) -> bool {
        self.indices.is_empty()
    }

    ///
    /// True when the call stays within the diploid design envelope
    ///
    pub fn is_at_most_diploid(&self) -> bool {
        self.ploidy() <= MAX_PLOIDY
    }
}

impl Display for SampleGenotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.indices.is_empty() {
            return write!(f, "./.");
        }
        let calls: Vec<String> = self.indices.iter().map(|i| i.to_string()).collect();
        write!(f, "{}", calls.join("/"))
    }
}

///
/// One parsed VCF data line: a single locus with its alleles and per-sample calls.
///
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VariantRecord {
    pub contig: String,
    /// 1-based position of the first reference base
    pub position: u64,
    pub reference: String,
    pub alternates: Vec<String>,
    pub samples: Vec<SampleGenotype>,
}

impl VariantRecord {
    ///
    /// Locus string used in log messages, e.g. `chr1:12345`
    ///
    pub fn locus(&self) -> String {
        format!("{}:{}", self.contig, self.position)
    }

    pub fn num_samples(&self) -> usize {
        self.samples.len()
    }
}

impl Display for VariantRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let alts = if self.alternates.is_empty() {
            ".".to_string()
        } else {
            self.alternates.join(",")
        };
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.contig, self.position, self.reference, alts
        )
    }
}
