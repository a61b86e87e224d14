//! Sort command implementation.
//!
//! Produces input acceptable to `merge` and `query`: records ordered by
//! chromosome (lexicographic) then start, ties kept in input order.

use crate::bed::{open_input, read_unsorted, Result};
use crate::output::BedWriter;
use crate::record::BedLine;
use log::info;
use std::io::Write;
use std::path::Path;

/// Sort command configuration.
#[derive(Debug, Clone, Default)]
pub struct SortCommand;

impl SortCommand {
    pub fn new() -> Self {
        Self
    }

    /// Sort records by (chromosome, start). Stable.
    pub fn sort(&self, mut records: Vec<BedLine>) -> Vec<BedLine> {
        records.sort_by(|a, b| a.cmp_position(b));
        records
    }

    /// Read `input` (`-` for stdin), sort and write it to `output`.
    ///
    /// Returns the number of records written.
    pub fn run<P: AsRef<Path>, W: Write>(&self, input: P, output: W) -> Result<usize> {
        let input = input.as_ref();
        let records = read_unsorted(open_input(input)?)?;
        info!("Loaded {} records from {}", records.len(), input.display());

        let sorted = self.sort(records);

        let mut writer = BedWriter::new(output);
        writer.write_all(&sorted)?;
        writer.flush()?;
        Ok(writer.records_written())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bed::parse_records;
    use tempfile::NamedTempFile;

    fn make_record(chrom: &str, start: u64, name: &str) -> BedLine {
        BedLine::new(chrom, start, start + 1, name)
    }

    #[test]
    fn test_default_sort() {
        let cmd = SortCommand::new();
        let records = vec![
            make_record("chr2", 100, "x"),
            make_record("chr1", 300, "y"),
            make_record("chr1", 100, "z"),
        ];

        let sorted = cmd.sort(records);

        assert_eq!(sorted[0].chrom, "chr1");
        assert_eq!(sorted[0].chrom_start, 100);
        assert_eq!(sorted[1].chrom_start, 300);
        assert_eq!(sorted[2].chrom, "chr2");
    }

    #[test]
    fn test_lexicographic_sort() {
        let cmd = SortCommand::new();
        let records = vec![
            make_record("chr10", 100, "a"),
            make_record("chr2", 100, "b"),
            make_record("chr1", 100, "c"),
        ];

        let sorted = cmd.sort(records);

        // Lexicographic: chr1 < chr10 < chr2
        let chroms: Vec<_> = sorted.iter().map(|r| r.chrom.as_str()).collect();
        assert_eq!(chroms, ["chr1", "chr10", "chr2"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let cmd = SortCommand::new();
        let records = vec![
            make_record("chr1", 5, "first"),
            make_record("chr1", 1, "early"),
            make_record("chr1", 5, "second"),
        ];

        let sorted = cmd.sort(records);

        let names: Vec<_> = sorted.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["early", "first", "second"]);
    }

    #[test]
    fn test_run_output_is_valid_sorted_input() {
        let mut input = NamedTempFile::new().unwrap();
        writeln!(
            input,
            "chrom8 203 204 Feature02\nchrom5 201 202 Feature01\nchrom1 404 405 Feature03"
        )
        .unwrap();

        let mut out = Vec::new();
        let written = SortCommand::new().run(input.path(), &mut out).unwrap();
        assert_eq!(written, 3);

        let text = String::from_utf8(out).unwrap();
        let reloaded = parse_records(&text).unwrap();
        let chroms: Vec<_> = reloaded.iter().map(|r| r.chrom.as_str()).collect();
        assert_eq!(chroms, ["chrom1", "chrom5", "chrom8"]);
    }
}
