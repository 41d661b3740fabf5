use clap::{Arg, ArgAction, Command};

pub const CONVERT_CMD: &str = "convert";

pub fn create_convert_cli() -> Command {
    Command::new(CONVERT_CMD)
        .about("Convert a VCF into a SNP-style table: normalized indels, one genotype code per sample.")
        .arg(
            Arg::new("input")
                .long("input")
                .short('i')
                .required(false)
                .help("Path to the VCF (.vcf, .vcf.gz or .vcf.bgz). Reads stdin if omitted or '-'"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .required(false)
                .help("Path to append the table to. Writes stdout if omitted or '-'"),
        )
        .arg(
            Arg::new("skip-polyploid")
                .long("skip-polyploid")
                .action(ArgAction::SetTrue)
                .help("Skip records with a sample above diploid instead of aborting"),
        )
        .arg(
            Arg::new("progress")
                .long("progress")
                .action(ArgAction::SetTrue)
                .help("Show a progress spinner on stderr"),
        )
        .arg(
            Arg::new("summary")
                .long("summary")
                .required(false)
                .help("Write a JSON run summary (records read, written, skipped) to this path"),
        )
}
