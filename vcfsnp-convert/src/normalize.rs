//! Allele normalization.
//!
//! VCF pads indels with the preceding reference base and anchors them on the
//! left: a three base deletion is `ACGT > A` at the position of the `A`. Here
//! every allele is rewritten against a single reference base, the last one of
//! the VCF reference:
//!
//! | VCF ref/alt  | type         | allele | position      |
//! |--------------|--------------|--------|---------------|
//! | `ACGT > A`   | Deletion     | `-3`   | `pos + 3`     |
//! | `A > ACG`    | Insertion    | `+CG`  | `pos`         |
//! | `AC > AT`    | Substitution | `T`    | `pos`         |
//!
//! Deletions are right-anchored on the last deleted base, so they are the only
//! type that moves the position.

use std::fmt::{self, Display};

use vcfsnp_core::ConvertError;

/// Kind of change an alternate allele makes relative to the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlleleType {
    Substitution,
    Insertion,
    Deletion,
}

impl AlleleType {
    ///
    /// Classify an alternate by comparing its length to the reference
    ///
    pub fn classify(reference: &str, alternate: &str) -> Self {
        match reference.len().cmp(&alternate.len()) {
            std::cmp::Ordering::Greater => AlleleType::Deletion,
            std::cmp::Ordering::Less => AlleleType::Insertion,
            std::cmp::Ordering::Equal => AlleleType::Substitution,
        }
    }
}

impl Display for AlleleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            AlleleType::Substitution => "S",
            AlleleType::Insertion => "I",
            AlleleType::Deletion => "D",
        };
        write!(f, "{}", tag)
    }
}

/// One alternate allele after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedAllele {
    pub allele_type: AlleleType,
    /// `-N`, `+BASES` or a single base
    pub allele: String,
}

/// A record's alleles after normalization.
///
/// `alleles` is parallel to the VCF ALT list, genotype index `k` refers to
/// `alleles[k - 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedCall {
    pub position: u64,
    /// Last base of the VCF reference
    pub reference: String,
    pub alleles: Vec<NormalizedAllele>,
}

impl NormalizedCall {
    pub fn allele(&self, genotype_index: usize) -> Option<&NormalizedAllele> {
        genotype_index
            .checked_sub(1)
            .and_then(|i| self.alleles.get(i))
    }
}

#[inline]
fn is_nucleotide_string(allele: &str) -> bool {
    !allele.is_empty()
        && allele
            .bytes()
            .all(|b| matches!(b, b'A' | b'C' | b'G' | b'T'))
}

/// Inserted bases only, the reference prefix is dropped: `A > ACG` gives `+CG`.
fn insertion_allele(position: u64, reference: &str, alternate: &str) -> Result<String, ConvertError> {
    let inserted = alternate.get(reference.len()..).unwrap_or("");
    if inserted.is_empty() {
        return Err(ConvertError::empty_insertion(position, reference, alternate));
    }
    Ok(format!("+{}", inserted))
}

///
/// Normalize a VCF reference and its alternates.
///
/// Position rule: a deletion always wins over insertions and substitutions.
/// With several deletions on one record, the last one in ALT order sets the
/// position. Without any deletion the input position is kept.
///
/// # Arguments
/// - position: 1-based VCF position
/// - reference: VCF reference allele
/// - alternates: VCF alternate alleles, in ALT order
///
/// # Errors
/// - [`ConvertError::InvalidAllele`] if any allele has a character outside `ACGT`
///   (including the VCF missing-ALT `.`) or an insertion adds no bases
/// - [`ConvertError::PositionOverflow`] if the deletion shift overflows `u64`
///
pub fn normalize_alleles<S: AsRef<str>>(
    position: u64,
    reference: &str,
    alternates: &[S],
) -> Result<NormalizedCall, ConvertError> {
    if !is_nucleotide_string(reference) {
        return Err(ConvertError::invalid_bases(reference));
    }

    let ref_len = reference.len();
    let mut deletion_shift: Option<u64> = None;
    let mut alleles = Vec::with_capacity(alternates.len());

    for alternate in alternates {
        let alternate = alternate.as_ref();
        if !is_nucleotide_string(alternate) {
            return Err(ConvertError::invalid_bases(alternate));
        }

        let allele_type = AlleleType::classify(reference, alternate);
        let allele = match allele_type {
            AlleleType::Deletion => {
                let size = ref_len - alternate.len();
                deletion_shift = Some(size as u64);
                format!("-{}", size)
            }
            AlleleType::Insertion => insertion_allele(position, reference, alternate)?,
            AlleleType::Substitution => alternate[ref_len - 1..].to_string(),
        };

        alleles.push(NormalizedAllele {
            allele_type,
            allele,
        });
    }

    let shift = deletion_shift.unwrap_or(0);
    let position = position
        .checked_add(shift)
        .ok_or(ConvertError::PositionOverflow { position, shift })?;

    Ok(NormalizedCall {
        position,
        reference: reference[ref_len - 1..].to_string(),
        alleles,
    })
}
