use std::ffi::OsStr;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

/// 256KB buffers, VCFs are large and read line by line.
const BUFFER_CAPACITY: usize = 256 * 1024;

///
/// Check whether a path looks gzip/bgzip compressed.
///
pub fn is_gzipped(path: &Path) -> bool {
    matches!(
        path.extension().and_then(OsStr::to_str),
        Some("gz") | Some("bgz")
    )
}

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// bgzip files are a series of gzip members, so they go through
/// `MultiGzDecoder` as well.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped(path) {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::with_capacity(BUFFER_CAPACITY, file))
}

/// Get a reader for either a gzipped, non-gzipped file, or stdin
///
/// # Arguments
///
/// - file_path: path to the file to read, `None` or `-` for stdin
///
pub fn get_dynamic_reader_w_stdin(file_path: Option<&str>) -> Result<BufReader<Box<dyn Read>>> {
    match file_path {
        None | Some("-") => Ok(BufReader::with_capacity(
            BUFFER_CAPACITY,
            Box::new(std::io::stdin()) as Box<dyn Read>,
        )),
        Some(path) => get_dynamic_reader(Path::new(path)),
    }
}

///
/// Get a writer that appends to a file (creating it if needed), or stdout.
///
/// # Arguments
///
/// - file_path: path to append to, `None` or `-` for stdout
///
pub fn get_dynamic_writer(file_path: Option<&str>) -> Result<BufWriter<Box<dyn Write>>> {
    let sink: Box<dyn Write> = match file_path {
        None | Some("-") => Box::new(std::io::stdout()),
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open output file for appending: {}", path))?;
            Box::new(file)
        }
    };

    Ok(BufWriter::with_capacity(BUFFER_CAPACITY, sink))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufRead;

    use flate2::Compression;
    use flate2::write::GzEncoder;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use tempfile::tempdir;

    #[rstest]
    #[case("calls.vcf", false)]
    #[case("calls.vcf.gz", true)]
    #[case("calls.vcf.bgz", true)]
    #[case("calls", false)]
    fn test_is_gzipped(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_gzipped(Path::new(name)), expected);
    }

    #[rstest]
    fn test_read_gzipped_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("small.vcf.gz");
        {
            let file = File::create(&path).unwrap();
            let mut encoder = GzEncoder::new(file, Compression::default());
            writeln!(encoder, "##fileformat=VCFv4.2").unwrap();
            writeln!(encoder, "#CHROM\tPOS").unwrap();
            encoder.finish().unwrap();
        }

        let reader = get_dynamic_reader(&path).unwrap();
        let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["##fileformat=VCFv4.2", "#CHROM\tPOS"]);
    }

    #[rstest]
    fn test_missing_input_reports_path() {
        let err = get_dynamic_reader(Path::new("/no/such/file.vcf")).err().unwrap();
        assert!(format!("{:?}", err).contains("/no/such/file.vcf"));
    }

    #[rstest]
    fn test_writer_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.tsv");
        let path_str = path.to_str().unwrap();

        for line in ["first", "second"] {
            let mut writer = get_dynamic_writer(Some(path_str)).unwrap();
            writeln!(writer, "{}", line).unwrap();
            writer.flush().unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "first\nsecond\n");
    }
}
