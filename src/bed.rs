//! BED line parsing, printing and whole-file loading.

use crate::config::is_skipped_header;
use crate::record::BedLine;
use crate::validation::SortValidator;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while reading, validating or querying BED data.
///
/// Line numbers are 1-based. Errors from [`parse_line`] called outside a
/// reader carry line 0.
#[derive(Error, Debug)]
pub enum BedError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Format error at line {line}: {message}")]
    Format { line: usize, message: String },

    #[error("Interval error at line {line}: {start}-{end} is not a single-nucleotide interval")]
    Interval { line: usize, start: u64, end: u64 },

    #[error("Ordering error at line {line}: {message}")]
    Ordering { line: usize, message: String },

    #[error("Invalid query at line {line}: {message}")]
    Query { line: usize, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl BedError {
    /// Attach a line number to a line-level error.
    pub fn at_line(self, n: usize) -> Self {
        match self {
            BedError::Format { message, .. } => BedError::Format { line: n, message },
            BedError::Interval { start, end, .. } => BedError::Interval {
                line: n,
                start,
                end,
            },
            BedError::Ordering { message, .. } => BedError::Ordering { line: n, message },
            BedError::Query { message, .. } => BedError::Query { line: n, message },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, BedError>;

/// Parse a base-10 position, ignoring `_` and `,` grouping separators.
///
/// The first and last characters must be digits.
pub(crate) fn parse_position(s: &str) -> Option<u64> {
    let bytes = s.as_bytes();
    if !bytes.first()?.is_ascii_digit() || !bytes.last()?.is_ascii_digit() {
        return None;
    }
    let mut n: u64 = 0;
    for &b in bytes {
        match b {
            b'0'..=b'9' => n = n.checked_mul(10)?.checked_add(u64::from(b - b'0'))?,
            b'_' | b',' => {}
            _ => return None,
        }
    }
    Some(n)
}

fn position_field(s: &str, field_name: &str) -> Result<u64> {
    parse_position(s).ok_or_else(|| BedError::Format {
        line: 0,
        message: format!("Invalid {} position: '{}'", field_name, s),
    })
}

/// Parse one line into a [`BedLine`].
///
/// The line must split on whitespace into exactly `chrom start end name`
/// and the interval must be exactly one base wide.
pub fn parse_line(line: &str) -> Result<BedLine> {
    let fields: Vec<&str> = line.split_whitespace().collect();

    if fields.len() != 4 {
        return Err(BedError::Format {
            line: 0,
            message: format!("Expected 4 fields, got {}", fields.len()),
        });
    }

    let start = position_field(fields[1], "start")?;
    let end = position_field(fields[2], "end")?;

    if end.checked_sub(start) != Some(1) {
        return Err(BedError::Interval { line: 0, start, end });
    }

    Ok(BedLine::new(fields[0], start, end, fields[3]))
}

/// Write a record as `chrom\tstart\tend\tname\n`.
pub fn print_line<W: Write>(record: &BedLine, sink: &mut W) -> io::Result<()> {
    writeln!(sink, "{}", record)
}

/// A line-oriented BED reader.
///
/// Skips blank lines (and header lines when [`crate::config::skip_headers`]
/// is on) and tags parse errors with their line number.
pub struct BedReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    buffer: String,
}

impl BedReader<File> {
    /// Open a BED file from a path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(file))
    }
}

impl<R: Read> BedReader<R> {
    /// Create a new BED reader from any readable source.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
            buffer: String::with_capacity(256),
        }
    }

    /// Line number of the most recently read line.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read the next non-blank line, trimmed. Returns `None` at end of stream.
    pub fn next_line(&mut self) -> Result<Option<&str>> {
        loop {
            self.buffer.clear();
            let bytes_read = self.reader.read_line(&mut self.buffer)?;
            if bytes_read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let line = self.buffer.trim();
            if !line.is_empty() && !is_skipped_header(line) {
                break;
            }
        }
        Ok(Some(self.buffer.trim()))
    }

    /// Read the next BED record.
    pub fn read_record(&mut self) -> Result<Option<BedLine>> {
        let Some(line) = self.next_line()? else {
            return Ok(None);
        };
        let parsed = parse_line(line);
        parsed.map(Some).map_err(|e| e.at_line(self.line_number))
    }

    /// Get an iterator over all records.
    pub fn records(self) -> BedRecordIter<R> {
        BedRecordIter { reader: self }
    }
}

/// Iterator over BED records.
pub struct BedRecordIter<R: Read> {
    reader: BedReader<R>,
}

impl<R: Read> Iterator for BedRecordIter<R> {
    type Item = Result<BedLine>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_record().transpose()
    }
}

/// Read an entire sorted BED file.
///
/// Fails with [`BedError::Ordering`] at the first record that breaks the
/// (chromosome, start) order.
pub fn read_bed_file<R: Read>(input: R) -> Result<Vec<BedLine>> {
    let mut reader = BedReader::new(input);
    let mut validator = SortValidator::new();
    let mut records = Vec::new();

    while let Some(rec) = reader.read_record()? {
        validator.validate(&rec.chrom, rec.chrom_start, reader.line_number())?;
        records.push(rec);
    }

    Ok(records)
}

/// Read every record from a BED file without checking sort order.
pub fn read_unsorted<R: Read>(input: R) -> Result<Vec<BedLine>> {
    BedReader::new(input).records().collect()
}

/// Open `path` for reading; `-` means stdin.
pub fn open_input(path: &Path) -> Result<Box<dyn Read>> {
    if path.as_os_str() == "-" {
        Ok(Box::new(io::stdin().lock()))
    } else {
        Ok(Box::new(File::open(path)?))
    }
}

/// Read an entire sorted BED file from a path (`-` for stdin).
pub fn read_bed_path<P: AsRef<Path>>(path: P) -> Result<Vec<BedLine>> {
    read_bed_file(open_input(path.as_ref())?)
}

/// Parse sorted records from a string (useful for testing).
pub fn parse_records(content: &str) -> Result<Vec<BedLine>> {
    read_bed_file(content.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;
    use serial_test::serial;

    #[test]
    fn test_works_with_different_bedlines() {
        let expected = BedLine::new("chr1", 20100, 20101, "foo");
        assert_eq!(parse_line("chr1 20_100 20_101 foo").unwrap(), expected);
        assert_eq!(
            parse_line("chr1 20100     20101         foo").unwrap(),
            expected
        );
        assert_eq!(parse_line("chr1 20100\t20101\nfoo").unwrap(), expected);
        assert_eq!(parse_line("chr1 20,100 20,101 foo").unwrap(), expected);
    }

    #[test]
    fn test_wrong_field_count_is_format_error() {
        assert!(matches!(
            parse_line("chr1 20100 20101"),
            Err(BedError::Format { .. })
        ));
        assert!(matches!(
            parse_line("chr1 20100 20101 foo 10"),
            Err(BedError::Format { .. })
        ));
    }

    #[test]
    fn test_bad_position_is_format_error() {
        for line in [
            "chr1 abc 20101 foo",
            "chr1 _20100 20101 foo",
            "chr1 20100_ 20101 foo",
            "chr1 -5 -4 foo",
            "chr1 99999999999999999999 1 foo",
        ] {
            assert!(
                matches!(parse_line(line), Err(BedError::Format { .. })),
                "{line}"
            );
        }
    }

    #[test]
    fn test_wide_interval_is_interval_error() {
        let err = parse_line("chr1 20100 20201 foo").unwrap_err();
        assert!(matches!(
            err,
            BedError::Interval {
                start: 20100,
                end: 20201,
                ..
            }
        ));
        assert!(matches!(
            parse_line("chr1 20101 20100 foo"),
            Err(BedError::Interval { .. })
        ));
        assert!(matches!(
            parse_line("chr1 20100 20100 foo"),
            Err(BedError::Interval { .. })
        ));
    }

    #[test]
    fn test_print_line() {
        let mut out = Vec::new();
        print_line(&BedLine::new("chrom1", 201, 202, "Feature01"), &mut out).unwrap();
        assert_eq!(out, b"chrom1\t201\t202\tFeature01\n");
    }

    #[test]
    fn test_round_trip_normalizes_separators() {
        let rec = parse_line("  chrX   1_000_000 1_000_001\tgene-7 ").unwrap();
        let mut out = Vec::new();
        print_line(&rec, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "chrX\t1000000\t1000001\tgene-7\n"
        );
    }

    #[test]
    fn test_read_sorted_file() {
        let content = "chrom1 201 202 a\n\nchrom1 201 202 b\nchrom2 5 6 c\n";
        let records = parse_records(content).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].name, "b");
        assert_eq!(records[2].chrom, "chrom2");
    }

    #[test]
    fn test_read_empty_file() {
        assert!(parse_records("").unwrap().is_empty());
    }

    #[test]
    fn test_error_if_input_not_sorted() {
        let chroms_not_sorted =
            "chrom5 201 202 Feature01\n chrom8 203 204 Feature02\nchrom1 404 405 Feature03";
        let starts_not_sorted =
            "chrom1 506 507 Feature01\n chrom1 203 204 Feature02\nchrom1 404 405 Feature03";
        assert!(matches!(
            parse_records(chroms_not_sorted),
            Err(BedError::Ordering { line: 3, .. })
        ));
        assert!(matches!(
            parse_records(starts_not_sorted),
            Err(BedError::Ordering { line: 2, .. })
        ));
    }

    #[test]
    fn test_reader_reports_line_number() {
        let content = "chr1 1 2 a\n\nchr1 3 5 b\n";
        let err = parse_records(content).unwrap_err();
        assert!(matches!(err, BedError::Interval { line: 3, .. }));
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_read_unsorted_accepts_any_order() {
        let records = read_unsorted("chr2 1 2 a\nchr1 1 2 b\n".as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    #[serial]
    fn test_headers_fail_by_default() {
        config::set_skip_headers(false);
        let content = "track name=test\nchr1 1 2 a\n";
        assert!(matches!(
            parse_records(content),
            Err(BedError::Format { line: 1, .. })
        ));
    }

    #[test]
    #[serial]
    fn test_headers_skipped_when_enabled() {
        config::set_skip_headers(true);
        let content = "# comment\ntrack name=test\nbrowser position chr1:1-2\nchr1 1 2 a\n";
        let result = parse_records(content);
        config::set_skip_headers(false);
        assert_eq!(result.unwrap().len(), 1);
    }
}
