//! # VCF to SNP-style TSV conversion
//!
//! Turns VCF records into one denormalized row per locus:
//!
//! - [`normalize`]: rewrite left-anchored VCF indels into right-anchored, minimal alleles
//!   (`-3` for a three base deletion, `+CG` for an insertion of `CG`)
//! - [`genotype`]: collapse each sample's genotype into a single code (IUPAC base, `D`/`E`, `I`/`H`)
//!   while tallying alleles across the cohort
//! - [`aggregate`]: classify the locus (SNP/INS/DEL/MULTIALLELIC) and assemble the row
//! - [`vcf`]: a streaming VCF text reader
//! - [`convert`]: the read, normalize, resolve, write loop
pub mod aggregate;
pub mod consts;
pub mod convert;
pub mod genotype;
pub mod normalize;
pub mod vcf;

pub use aggregate::{CallType, OutputRow, aggregate_record, header_line};
pub use convert::{ConversionSummary, ConvertOptions, convert_records, convert_vcf};
pub use genotype::{GenotypeTally, SampleCall, iupac_code, resolve_sample};
pub use normalize::{AlleleType, NormalizedAllele, NormalizedCall, normalize_alleles};
pub use vcf::VcfReader;
