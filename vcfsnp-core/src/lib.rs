//! # Core types for vcfsnp
//!
//! Variant records as delivered by a VCF reader, the error types shared by the
//! conversion crates, and small helpers for opening (possibly gzipped) input and
//! append-mode output.
pub mod errors;
pub mod models;
pub mod utils;

pub use errors::*;
pub use models::{SampleGenotype, VariantRecord};
