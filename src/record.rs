//! Core record type for single-nucleotide BED features.

use std::cmp::Ordering;
use std::fmt;

/// A BED feature: chromosome, 0-based half-open interval and a name.
///
/// Records produced by the parser always have `chrom_end == chrom_start + 1`.
/// Records built directly with [`BedLine::new`] are not checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BedLine {
    pub chrom: String,
    pub chrom_start: u64,
    pub chrom_end: u64,
    pub name: String,
}

impl BedLine {
    /// Create a new record.
    #[inline]
    pub fn new(
        chrom: impl Into<String>,
        chrom_start: u64,
        chrom_end: u64,
        name: impl Into<String>,
    ) -> Self {
        Self {
            chrom: chrom.into(),
            chrom_start,
            chrom_end,
            name: name.into(),
        }
    }

    /// Width of the interval in bases.
    #[inline]
    pub fn len(&self) -> u64 {
        self.chrom_end.saturating_sub(self.chrom_start)
    }

    /// Returns true if the interval covers no bases.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chrom_start >= self.chrom_end
    }

    /// The key the sorted invariant is defined over.
    #[inline]
    pub fn sort_key(&self) -> (&str, u64) {
        (&self.chrom, self.chrom_start)
    }

    /// Compare two records by (chromosome, start) only.
    #[inline]
    pub fn cmp_position(&self, other: &BedLine) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl fmt::Display for BedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.chrom, self.chrom_start, self.chrom_end, self.name
        )
    }
}
