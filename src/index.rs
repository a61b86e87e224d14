//! Per-chromosome view over a sorted record arena.

use crate::bed::{read_bed_file, read_bed_path, Result};
use crate::bounds::lower_bound_by_key;
use crate::commands::query::is_feature_in;
use crate::record::BedLine;
use rustc_hash::FxHashMap;
use std::io::Read;
use std::ops::Range;
use std::path::Path;

/// A sorted BED file held in memory.
///
/// Records live in one `Vec` in file order; each chromosome maps to the
/// contiguous index range it occupies, which holds because load-time
/// validation enforces (chromosome, start) order.
#[derive(Debug, Default)]
pub struct BedFile {
    records: Vec<BedLine>,
    chroms: FxHashMap<String, ChromSpan>,
}

#[derive(Debug, Clone)]
struct ChromSpan {
    range: Range<usize>,
    max_width: u64,
}

impl BedFile {
    /// Build from records already sorted by (chromosome, start).
    pub fn from_sorted(records: Vec<BedLine>) -> Self {
        let mut chroms: FxHashMap<String, ChromSpan> = FxHashMap::default();

        let mut run_start = 0;
        for i in 1..=records.len() {
            if i == records.len() || records[i].chrom != records[run_start].chrom {
                let run = &records[run_start..i];
                let max_width = run.iter().map(BedLine::len).max().unwrap_or(0);
                chroms.insert(
                    records[run_start].chrom.clone(),
                    ChromSpan {
                        range: run_start..i,
                        max_width,
                    },
                );
                run_start = i;
            }
        }

        Self { records, chroms }
    }

    /// Load and validate a sorted BED stream.
    pub fn from_reader<R: Read>(input: R) -> Result<Self> {
        Ok(Self::from_sorted(read_bed_file(input)?))
    }

    /// Load and validate a sorted BED file (`-` for stdin).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_sorted(read_bed_path(path)?))
    }

    /// All records, in file order.
    pub fn records(&self) -> &[BedLine] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct chromosomes.
    pub fn chrom_count(&self) -> usize {
        self.chroms.len()
    }

    /// Records on `chrom`, sorted by start. Empty if the chromosome is absent.
    pub fn get_chrom(&self, chrom: &str) -> &[BedLine] {
        match self.chroms.get(chrom) {
            Some(span) => &self.records[span.range.clone()],
            None => &[],
        }
    }

    /// Records on `chrom` overlapping `[start, end)`, for records of any width.
    ///
    /// The lower-bound target is pulled back by the widest record on the
    /// chromosome so intervals starting before `start` are still seen.
    pub fn find_overlaps(&self, chrom: &str, start: u64, end: u64) -> Vec<&BedLine> {
        let Some(span) = self.chroms.get(chrom) else {
            return Vec::new();
        };
        let features = &self.records[span.range.clone()];
        let from = start.saturating_sub(span.max_width.saturating_sub(1));
        let lo = lower_bound_by_key(features, &from, |r| &r.chrom_start);

        features[lo..]
            .iter()
            .take_while(|r| r.chrom_start < end)
            .filter(|r| is_feature_in(r, start, end))
            .collect()
    }
}
