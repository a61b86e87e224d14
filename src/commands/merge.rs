//! Merge command implementation.
//!
//! Two-pointer merge of two files that are each sorted by
//! (chromosome, start). O(n + m) time, records are emitted as they are
//! chosen so no intermediate buffer is kept.

use crate::bed::{read_bed_path, BedError, Result};
use crate::output::BedWriter;
use crate::record::BedLine;
use log::info;
use std::cmp::Ordering;
use std::convert::Infallible;
use std::io::Write;
use std::path::Path;

/// Which input wins when two records share (chromosome, start).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Emit the record from the first input first.
    #[default]
    First,
    /// Emit the record from the second input first.
    Second,
}

/// Merge command configuration.
#[derive(Debug, Clone, Default)]
pub struct MergeCommand {
    pub tie_break: TieBreak,
}

impl MergeCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tie-break rule for equal (chromosome, start).
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Returns true if `a` must be emitted before `b`.
    #[inline]
    fn takes_first(&self, a: &BedLine, b: &BedLine) -> bool {
        match a.chrom.cmp(&b.chrom) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => match a.chrom_start.cmp(&b.chrom_start) {
                Ordering::Less => true,
                Ordering::Greater => false,
                Ordering::Equal => self.tie_break == TieBreak::First,
            },
        }
    }

    /// Merge two sorted slices, passing each record to `emit` in output order.
    ///
    /// Stops at the first error returned by `emit`.
    pub fn merge_with<E, F>(
        &self,
        a: &[BedLine],
        b: &[BedLine],
        mut emit: F,
    ) -> std::result::Result<(), E>
    where
        F: FnMut(&BedLine) -> std::result::Result<(), E>,
    {
        let (mut i, mut j) = (0, 0);

        while i < a.len() && j < b.len() {
            if self.takes_first(&a[i], &b[j]) {
                emit(&a[i])?;
                i += 1;
            } else {
                emit(&b[j])?;
                j += 1;
            }
        }

        // At most one of these is non-empty
        a[i..].iter().chain(&b[j..]).try_for_each(emit)
    }

    /// Merge two sorted slices into a new vector.
    pub fn merge(&self, a: &[BedLine], b: &[BedLine]) -> Vec<BedLine> {
        let mut result = Vec::with_capacity(a.len() + b.len());
        let merged = self.merge_with(a, b, |rec| {
            result.push(rec.clone());
            Ok::<(), Infallible>(())
        });
        if let Err(never) = merged {
            match never {}
        }
        result
    }

    /// Load two sorted BED files and write their merge to `output`.
    ///
    /// Either path may be `-` for stdin, but not both.
    pub fn run<P: AsRef<Path>, W: Write>(
        &self,
        file_a: P,
        file_b: P,
        output: W,
    ) -> Result<MergeStats> {
        let (file_a, file_b) = (file_a.as_ref(), file_b.as_ref());
        if file_a.as_os_str() == "-" && file_b.as_os_str() == "-" {
            return Err(BedError::InvalidInput(
                "at most one merge input can be read from stdin".to_string(),
            ));
        }

        let a = read_bed_path(file_a)?;
        info!("Loaded {} records from {}", a.len(), file_a.display());
        let b = read_bed_path(file_b)?;
        info!("Loaded {} records from {}", b.len(), file_b.display());

        let mut writer = BedWriter::new(output);
        self.merge_with(&a, &b, |rec| writer.write_record(rec))?;
        writer.flush()?;

        let stats = MergeStats {
            records_a: a.len(),
            records_b: b.len(),
            records_written: writer.records_written(),
        };
        info!("Merge finished: {}", stats);
        Ok(stats)
    }
}

/// Statistics from a merge run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Records read from the first input
    pub records_a: usize,
    /// Records read from the second input
    pub records_b: usize,
    /// Records written
    pub records_written: usize,
}

impl std::fmt::Display for MergeStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Read: {} + {}, Written: {}",
            self.records_a, self.records_b, self.records_written
        )
    }
}
