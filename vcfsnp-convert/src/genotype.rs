//! Per-sample genotype resolution.
//!
//! Each sample collapses to one code: an IUPAC base for reference and
//! substitution calls, `D`/`E` when a deletion is involved, `I`/`H` when an
//! insertion is involved. Every called allele is also counted in the
//! record-wide [`GenotypeTally`].

use std::fmt::{self, Display};

use arrayvec::ArrayVec;
use vcfsnp_core::models::variant::MAX_PLOIDY;
use vcfsnp_core::{ConvertError, SampleGenotype};

use crate::consts::*;
use crate::normalize::{AlleleType, NormalizedCall};

///
/// IUPAC ambiguity code for the bases one sample carries at a locus.
///
/// Order does not matter (`AC` and `CA` are both `M`). A single base maps to
/// itself. Returns `None` for anything that is not one or two of `ACGT`.
///
pub fn iupac_code(bases: &[u8]) -> Option<char> {
    let (a, b) = match *bases {
        [a] => (a, a),
        [a, b] if a <= b => (a, b),
        [a, b] => (b, a),
        _ => return None,
    };

    match (a, b) {
        (b'A', b'A') => Some('A'),
        (b'C', b'C') => Some('C'),
        (b'G', b'G') => Some('G'),
        (b'T', b'T') => Some('T'),
        (b'A', b'C') => Some('M'),
        (b'A', b'G') => Some('R'),
        (b'A', b'T') => Some('W'),
        (b'C', b'G') => Some('S'),
        (b'C', b'T') => Some('Y'),
        (b'G', b'T') => Some('K'),
        _ => None,
    }
}

/// What a tally key was first observed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservedAllele {
    Reference,
    Alternate(AlleleType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TallyEntry {
    pub allele: String,
    pub observed_as: ObservedAllele,
    pub count: u32,
}

///
/// Count of each allele across all samples of one record.
///
/// Entries keep the order in which alleles were first seen so the output is
/// reproducible. Records rarely carry more than a handful of distinct alleles,
/// so lookups are a linear scan.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenotypeTally {
    entries: Vec<TallyEntry>,
}

impl GenotypeTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, allele: &str, observed_as: ObservedAllele) {
        match self.entries.iter_mut().find(|e| e.allele == allele) {
            Some(entry) => entry.count += 1,
            None => self.entries.push(TallyEntry {
                allele: allele.to_string(),
                observed_as,
                count: 1,
            }),
        }
    }

    pub fn count(&self, allele: &str) -> u32 {
        self.entries
            .iter()
            .find(|e| e.allele == allele)
            .map_or(0, |e| e.count)
    }

    pub fn contains(&self, allele: &str) -> bool {
        self.entries.iter().any(|e| e.allele == allele)
    }

    pub fn entries(&self) -> &[TallyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The resolved call for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleCall {
    pub code: char,
}

impl Display for SampleCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.code, DEFAULT_CONFIDENCE)
    }
}

///
/// Resolve one sample's genotype into its output code.
///
/// Deletions take precedence over insertions, which take precedence over
/// plain bases. A call is homozygous (`D`/`I`) only when every called allele
/// is of that type.
///
/// # Arguments
/// - sample: sample name, for error reporting
/// - genotype: the sample's genotype indices
/// - call: the record's normalized alleles
/// - tally: record-wide allele counts, updated in place
///
/// # Errors
/// - [`ConvertError::PloidyExceeded`] for more than two called alleles
/// - [`ConvertError::GenotypeIndexOutOfRange`] for an index past the ALT list
///
pub fn resolve_sample(
    sample: &str,
    genotype: &SampleGenotype,
    call: &NormalizedCall,
    tally: &mut GenotypeTally,
) -> Result<SampleCall, ConvertError> {
    if !genotype.is_at_most_diploid() {
        return Err(ConvertError::PloidyExceeded {
            sample: sample.to_string(),
            ploidy: genotype.ploidy(),
        });
    }

    let mut deletions = 0;
    let mut insertions = 0;
    let mut bases: ArrayVec<u8, MAX_PLOIDY> = ArrayVec::new();

    for &index in &genotype.indices {
        if index == 0 {
            bases.push(call.reference.as_bytes()[0]);
            tally.observe(&call.reference, ObservedAllele::Reference);
            continue;
        }

        let alt = call
            .allele(index)
            .ok_or(ConvertError::GenotypeIndexOutOfRange {
                index,
                alternates: call.alleles.len(),
            })?;

        match alt.allele_type {
            AlleleType::Deletion => deletions += 1,
            AlleleType::Insertion => insertions += 1,
            AlleleType::Substitution => bases.push(alt.allele.as_bytes()[0]),
        }
        tally.observe(&alt.allele, ObservedAllele::Alternate(alt.allele_type));
    }

    let ploidy = genotype.ploidy();
    let code = if deletions > 0 {
        if deletions == ploidy {
            DELETION_HOM_CODE
        } else {
            DELETION_HET_CODE
        }
    } else if insertions > 0 {
        if insertions == ploidy {
            INSERTION_HOM_CODE
        } else {
            INSERTION_HET_CODE
        }
    } else {
        // bases are validated ACGT, so only an empty call has no code
        iupac_code(&bases).unwrap_or(NO_CALL_CODE)
    };

    Ok(SampleCall { code })
}
