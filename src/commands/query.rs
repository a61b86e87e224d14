//! Region query command implementation.
//!
//! Each query line `chrom start end` is answered independently against one
//! chromosome's records: a lower-bound search finds the first record starting
//! at or after `start`, then a forward scan runs until starts reach `end`.

use crate::bed::{open_input, parse_position, BedError, BedReader, Result};
use crate::bounds::lower_bound_by_key;
use crate::index::BedFile;
use crate::output::BedWriter;
use crate::record::BedLine;
use log::{debug, info};
use std::io::{Read, Write};
use std::path::Path;

/// Check if two half-open intervals overlap.
#[inline]
pub fn is_overlapping(a: (u64, u64), b: (u64, u64)) -> bool {
    a.0.max(b.0) < a.1.min(b.1)
}

/// Check if a feature overlaps `[start, end)`.
#[inline]
pub fn is_feature_in(feature: &BedLine, start: u64, end: u64) -> bool {
    is_overlapping((feature.chrom_start, feature.chrom_end), (start, end))
}

/// Extract the features overlapping `[start, end)` from one chromosome's
/// records, sorted by start.
///
/// Exact for single-base records, where overlap reduces to
/// `start <= chrom_start < end`. Use [`BedFile::find_overlaps`] for wider
/// intervals.
pub fn extract_region(features: &[BedLine], start: u64, end: u64) -> &[BedLine] {
    let lo = lower_bound_by_key(features, &start, |r| &r.chrom_start);
    let stop = lo
        + features[lo..]
            .iter()
            .take_while(|r| r.chrom_start < end)
            .count();

    debug_assert!(features[lo..stop]
        .iter()
        .all(|r| r.len() != 1 || is_feature_in(r, start, end)));
    &features[lo..stop]
}

/// A parsed query region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
}

impl Region {
    pub fn new(chrom: impl Into<String>, start: u64, end: u64) -> Self {
        Self {
            chrom: chrom.into(),
            start,
            end,
        }
    }

    /// Parse a `chrom start end` query line.
    pub fn parse(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(BedError::Query {
                line: 0,
                message: format!("Expected 3 fields, got {}", fields.len()),
            });
        }

        let position = |s: &str, field_name: &str| {
            parse_position(s).ok_or_else(|| BedError::Query {
                line: 0,
                message: format!("Invalid {} position: '{}'", field_name, s),
            })
        };
        let start = position(fields[1], "start")?;
        let end = position(fields[2], "end")?;

        if start > end {
            return Err(BedError::Query {
                line: 0,
                message: format!("Start ({}) > end ({})", start, end),
            });
        }

        Ok(Self::new(fields[0], start, end))
    }
}

/// Query command configuration.
#[derive(Debug, Clone, Default)]
pub struct QueryCommand;

impl QueryCommand {
    pub fn new() -> Self {
        Self
    }

    /// Features of `file` overlapping `region`.
    pub fn query<'a>(&self, file: &'a BedFile, region: &Region) -> &'a [BedLine] {
        extract_region(file.get_chrom(&region.chrom), region.start, region.end)
    }

    /// Answer every query line in `queries`, writing matches in query order.
    pub fn run_queries<R: Read, W: Write>(
        &self,
        file: &BedFile,
        queries: R,
        output: W,
    ) -> Result<QueryStats> {
        let mut reader = BedReader::new(queries);
        let mut writer = BedWriter::new(output);
        let mut stats = QueryStats::default();

        while let Some(line) = reader.next_line()? {
            let parsed = Region::parse(line);
            let region = parsed.map_err(|e| e.at_line(reader.line_number()))?;
            let hits = self.query(file, &region);
            debug!(
                "{}:{}-{} matched {} features",
                region.chrom,
                region.start,
                region.end,
                hits.len()
            );
            writer.write_all(hits)?;
            stats.queries += 1;
        }

        writer.flush()?;
        stats.records_written = writer.records_written();
        Ok(stats)
    }

    /// Load a sorted BED file and answer the queries read from `query_path`.
    ///
    /// Either path may be `-` for stdin, but not both.
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>, W: Write>(
        &self,
        bed_path: P,
        query_path: Q,
        output: W,
    ) -> Result<QueryStats> {
        let (bed_path, query_path) = (bed_path.as_ref(), query_path.as_ref());
        if bed_path.as_os_str() == "-" && query_path.as_os_str() == "-" {
            return Err(BedError::InvalidInput(
                "BED file and queries cannot both be read from stdin".to_string(),
            ));
        }

        let file = BedFile::from_path(bed_path)?;
        info!(
            "Loaded {} records on {} chromosomes from {}",
            file.len(),
            file.chrom_count(),
            bed_path.display()
        );

        let stats = self.run_queries(&file, open_input(query_path)?, output)?;
        info!("Query finished: {}", stats);
        Ok(stats)
    }
}

/// Statistics from a query run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryStats {
    /// Query lines answered
    pub queries: usize,
    /// Records written across all queries
    pub records_written: usize,
}

impl std::fmt::Display for QueryStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Queries: {}, Written: {}",
            self.queries, self.records_written
        )
    }
}
