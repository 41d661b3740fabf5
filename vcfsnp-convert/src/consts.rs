/// Fixed leading columns of the output header, sample names follow.
pub const HEADER_COLUMNS: [&str; 6] = [
    "Fragment",
    "Position",
    "Reference",
    "Type",
    "Alleles",
    "Allele_Counts",
];

pub const CHR_PREFIX: &str = "chr";

/// Placeholder per-sample confidence, VCF does not require GQ.
pub const DEFAULT_CONFIDENCE: u8 = 1;

/// Code emitted for a sample with no called alleles (`./.`).
pub const NO_CALL_CODE: char = 'N';

pub const DELETION_HOM_CODE: char = 'D';
pub const DELETION_HET_CODE: char = 'E';
pub const INSERTION_HOM_CODE: char = 'I';
pub const INSERTION_HET_CODE: char = 'H';

/// VCF FORMAT key holding the genotype.
pub const GT_KEY: &str = "GT";

/// Number of records between progress spinner updates.
pub const PROGRESS_INTERVAL: u64 = 10_000;
