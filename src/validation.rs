//! Sort validation for loaded BED files.
//!
//! Merge and query require input sorted by (chromosome, start) with
//! chromosomes in lexicographic byte order. The check runs once per file
//! while records are loaded.

use crate::bed::BedError;

/// Inline sort validator, fed one record at a time in file order.
///
/// Validates that:
/// 1. Chromosome names are non-decreasing (lexicographic)
/// 2. Within a chromosome, start positions are non-decreasing
#[derive(Debug, Default)]
pub struct SortValidator {
    prev_chrom: Option<String>,
    prev_start: u64,
    record_count: usize,
}

impl SortValidator {
    /// Create a new sort validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate that the record at `line` maintains sort order.
    #[inline]
    pub fn validate(&mut self, chrom: &str, start: u64, line: usize) -> Result<(), BedError> {
        self.record_count += 1;

        if let Some(pc) = self.prev_chrom.as_deref() {
            if chrom < pc {
                return Err(BedError::Ordering {
                    line,
                    message: format!(
                        "File not sorted: chromosome '{}' comes after '{}'",
                        chrom, pc
                    ),
                });
            }
            if chrom == pc && start < self.prev_start {
                return Err(BedError::Ordering {
                    line,
                    message: format!(
                        "File not sorted: position {} comes after {} on {}",
                        start, self.prev_start, chrom
                    ),
                });
            }
        }

        if self.prev_chrom.as_deref() != Some(chrom) {
            self.prev_chrom = Some(chrom.to_string());
        }
        self.prev_start = start;
        Ok(())
    }

    /// Get the number of records validated.
    pub fn record_count(&self) -> usize {
        self.record_count
    }
}
