//! Record classification and output row assembly.

use std::fmt::{self, Display};

use vcfsnp_core::{ConvertError, VariantRecord};

use crate::consts::*;
use crate::genotype::{GenotypeTally, ObservedAllele, SampleCall, resolve_sample};
use crate::normalize::{AlleleType, normalize_alleles};

/// Overall type of a record, judged from the alleles the cohort carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallType {
    Snp,
    Ins,
    Del,
    Multiallelic,
}

impl CallType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallType::Snp => "SNP",
            CallType::Ins => "INS",
            CallType::Del => "DEL",
            CallType::Multiallelic => "MULTIALLELIC",
        }
    }
}

impl Display for CallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

///
/// Classify a record from its cohort-wide allele tally.
///
/// More than one distinct non-reference allele makes the record
/// `MULTIALLELIC`, whatever the per-sample mix. Otherwise the single observed
/// alternate decides, and a record where nobody carries an alternate is a
/// `SNP`.
///
pub fn classify(tally: &GenotypeTally, reference: &str) -> CallType {
    let saw_ref = usize::from(tally.contains(reference));
    if tally.len() - saw_ref > 1 {
        return CallType::Multiallelic;
    }

    let observed = |allele_type: AlleleType| {
        tally.entries().iter().any(|e| {
            e.allele != reference && e.observed_as == ObservedAllele::Alternate(allele_type)
        })
    };

    if observed(AlleleType::Deletion) {
        CallType::Del
    } else if observed(AlleleType::Insertion) {
        CallType::Ins
    } else {
        CallType::Snp
    }
}

///
/// Prepend `chr` to contig names that lack it (`1` becomes `chr1`).
///
pub fn normalize_contig(contig: &str) -> String {
    if contig.starts_with(CHR_PREFIX) {
        contig.to_string()
    } else {
        format!("{}{}", CHR_PREFIX, contig)
    }
}

/// Header row: the fixed columns followed by one column per sample.
pub fn header_line(sample_names: &[String]) -> String {
    HEADER_COLUMNS
        .iter()
        .copied()
        .chain(sample_names.iter().map(String::as_str))
        .collect::<Vec<&str>>()
        .join("\t")
}

/// One line of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    pub contig: String,
    pub position: u64,
    pub reference: String,
    pub call_type: CallType,
    pub alleles: Vec<String>,
    /// Parallel to `alleles`
    pub counts: Vec<u32>,
    pub samples: Vec<SampleCall>,
}

impl Display for OutputRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: Vec<String> = self.counts.iter().map(|c| c.to_string()).collect();
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.contig,
            self.position,
            self.reference,
            self.call_type,
            self.alleles.join(","),
            counts.join(","),
        )?;
        for sample in &self.samples {
            write!(f, "\t{}", sample)?;
        }
        Ok(())
    }
}

fn sample_name(sample_names: &[String], index: usize) -> String {
    sample_names
        .get(index)
        .map_or_else(|| format!("#{}", index + 1), |n| n.clone())
}

///
/// Normalize a record, resolve every sample and build its output row.
///
/// # Arguments
/// - record: the parsed VCF record
/// - sample_names: header sample names, parallel to `record.samples`
///
/// # Errors
/// Any [`ConvertError`] from normalization or genotype resolution. The
/// caller decides, via [`ConvertError::is_recoverable`], whether to skip the
/// record or stop. Ploidy is checked for every sample before anything else,
/// so [`ConvertError::PloidyExceeded`] is never hidden behind a recoverable
/// error on the same record.
///
pub fn aggregate_record(
    record: &VariantRecord,
    sample_names: &[String],
) -> Result<OutputRow, ConvertError> {
    if let Some((i, genotype)) = record
        .samples
        .iter()
        .enumerate()
        .find(|(_, gt)| !gt.is_at_most_diploid())
    {
        return Err(ConvertError::PloidyExceeded {
            sample: sample_name(sample_names, i),
            ploidy: genotype.ploidy(),
        });
    }

    let call = normalize_alleles(record.position, &record.reference, &record.alternates)?;

    let mut tally = GenotypeTally::new();
    let mut samples = Vec::with_capacity(record.num_samples());
    for (i, genotype) in record.samples.iter().enumerate() {
        let name = sample_name(sample_names, i);
        samples.push(resolve_sample(&name, genotype, &call, &mut tally)?);
    }

    let call_type = classify(&tally, &call.reference);
    let (alleles, counts) = tally
        .entries()
        .iter()
        .map(|e| (e.allele.clone(), e.count))
        .unzip();

    Ok(OutputRow {
        contig: normalize_contig(&record.contig),
        position: call.position,
        reference: call.reference,
        call_type,
        alleles,
        counts,
        samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use vcfsnp_core::SampleGenotype;

    fn record(reference: &str, alternates: &[&str], genotypes: &[&[usize]]) -> VariantRecord {
        VariantRecord {
            contig: "1".to_string(),
            position: 1000,
            reference: reference.to_string(),
            alternates: alternates.iter().map(|a| a.to_string()).collect(),
            samples: genotypes
                .iter()
                .map(|gt| SampleGenotype::new(gt.to_vec()))
                .collect(),
        }
    }

    fn names(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("S{}", i)).collect()
    }

    #[rstest]
    #[case("A", &["G"], &[&[0, 0][..], &[0, 1][..]], CallType::Snp)]
    #[case("ACG", &["A"], &[&[0, 0][..], &[0, 1][..]], CallType::Del)]
    #[case("A", &["AT"], &[&[0, 1][..], &[0, 0][..]], CallType::Ins)]
    #[case("A", &["G", "T"], &[&[0, 1][..], &[0, 2][..]], CallType::Multiallelic)]
    #[case("A", &["G", "AT"], &[&[1, 2][..]], CallType::Multiallelic)]
    #[case("A", &["G", "T"], &[&[0, 0][..], &[0, 0][..]], CallType::Snp)]
    #[case("AC", &["A", "GC"], &[&[2, 2][..]], CallType::Snp)]
    fn test_call_type(
        #[case] reference: &str,
        #[case] alternates: &[&str],
        #[case] genotypes: &[&[usize]],
        #[case] expected: CallType,
    ) {
        let rec = record(reference, alternates, genotypes);
        let row = aggregate_record(&rec, &names(genotypes.len())).unwrap();
        assert_eq!(row.call_type, expected);
    }

    #[test]
    fn test_deletion_type_comes_from_cohort_not_last_sample() {
        let rec = record("AC", &["A"], &[&[0, 1], &[0, 0]]);
        let row = aggregate_record(&rec, &names(2)).unwrap();
        assert_eq!(row.call_type, CallType::Del);
    }

    #[test]
    fn test_row_formatting() {
        let rec = record("ACGT", &["A", "ACGG"], &[&[0, 1], &[2, 2], &[1, 1]]);
        let row = aggregate_record(&rec, &names(3)).unwrap();

        assert_eq!(row.contig, "chr1");
        assert_eq!(row.position, 1003);
        assert_eq!(row.reference, "T");
        assert_eq!(row.alleles, vec!["T", "-3", "G"]);
        assert_eq!(row.counts, vec![1, 3, 2]);
        assert_eq!(
            row.to_string(),
            "chr1\t1003\tT\tMULTIALLELIC\tT,-3,G\t1,3,2\tE\t1\tG\t1\tD\t1"
        );
    }

    #[test]
    fn test_row_without_samples() {
        let rec = record("A", &["C"], &[]);
        let row = aggregate_record(&rec, &[]).unwrap();
        assert_eq!(row.to_string(), "chr1\t1000\tA\tSNP\t\t");
    }

    #[test]
    fn test_invalid_allele_is_recoverable() {
        let rec = record("A", &["<NON_REF>"], &[&[0, 0]]);
        let err = aggregate_record(&rec, &names(1)).unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_ploidy_error_names_sample() {
        let rec = record("A", &["C"], &[&[0, 0], &[0, 1, 1]]);
        let err = aggregate_record(&rec, &names(2)).unwrap_err();
        assert_eq!(
            err,
            ConvertError::PloidyExceeded {
                sample: "S2".to_string(),
                ploidy: 3
            }
        );
    }

    #[rstest]
    #[case("A", &["G"], &[&[0, 5][..], &[0, 1, 1][..]])]
    #[case("A", &["<DEL>"], &[&[0, 1][..], &[1, 1, 1][..]])]
    fn test_ploidy_outranks_recoverable_errors(
        #[case] reference: &str,
        #[case] alternates: &[&str],
        #[case] genotypes: &[&[usize]],
    ) {
        let rec = record(reference, alternates, genotypes);
        let err = aggregate_record(&rec, &names(2)).unwrap_err();
        assert!(!err.is_recoverable());
        assert!(matches!(
            err,
            ConvertError::PloidyExceeded { ploidy: 3, .. }
        ));
    }

    #[rstest]
    #[case("1", "chr1")]
    #[case("chrX", "chrX")]
    #[case("MT", "chrMT")]
    fn test_normalize_contig(#[case] contig: &str, #[case] expected: &str) {
        assert_eq!(normalize_contig(contig), expected);
    }

    #[test]
    fn test_header_line() {
        let header = header_line(&["NA12878".to_string(), "NA12891".to_string()]);
        assert_eq!(
            header,
            "Fragment\tPosition\tReference\tType\tAlleles\tAllele_Counts\tNA12878\tNA12891"
        );
        assert_eq!(
            header_line(&[]),
            "Fragment\tPosition\tReference\tType\tAlleles\tAllele_Counts"
        );
    }
}
