//! snpbed: tools for sorted single-nucleotide BED files
//!
//! Every record is `chrom start end name` with `end == start + 1`. Input files
//! must be sorted by (chromosome, start); the order is checked once at load
//! time.
//!
//! # Features
//!
//! - **Merge**: two-pointer merge of two sorted files
//! - **Query**: binary-search region lookups per chromosome
//! - **Sort**: stable sort to produce valid merge/query input
//!
//! # Example
//!
//! ```rust
//! use snpbed::bed::parse_records;
//! use snpbed::commands::{extract_region, MergeCommand};
//!
//! let a = parse_records("chr1 10 11 a\nchr2 5 6 b\n").unwrap();
//! let b = parse_records("chr1 20 21 c\n").unwrap();
//!
//! let merged = MergeCommand::new().merge(&a, &b);
//! assert_eq!(merged[1].name, "c");
//!
//! let hits = extract_region(&merged[..2], 0, 15);
//! assert_eq!(hits.len(), 1);
//! ```

pub mod bed;
pub mod bounds;
pub mod commands;
pub mod config;
pub mod index;
pub mod output;
pub mod record;
pub mod validation;

// Re-export commonly used types
pub use bed::{parse_line, print_line, read_bed_file, BedError, BedReader};
pub use bounds::{lower_bound, upper_bound};
pub use index::BedFile;
pub use record::BedLine;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bed::{parse_line, print_line, read_bed_file, BedError};
    pub use crate::commands::{
        extract_region, MergeCommand, QueryCommand, Region, SortCommand, TieBreak,
    };
    pub use crate::index::BedFile;
    pub use crate::record::BedLine;
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_sort_then_merge_workflow() {
        use crate::bed::{parse_records, read_unsorted};
        use crate::commands::{MergeCommand, SortCommand};

        let raw = "chr2\t5\t6\tx\nchr1\t9\t10\ty\n";
        let a = SortCommand::new().sort(read_unsorted(raw.as_bytes()).unwrap());
        let b = parse_records("chr1\t1\t2\tz\n").unwrap();

        let merged = MergeCommand::new().merge(&a, &b);
        let names: Vec<_> = merged.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["z", "y", "x"]);
    }

    #[test]
    fn test_query_workflow() {
        use crate::commands::{QueryCommand, Region};
        use crate::index::BedFile;

        let file = BedFile::from_reader("chr1 100 101 a\nchr1 300 301 b\n".as_bytes()).unwrap();
        let hits = QueryCommand::new().query(&file, &Region::new("chr1", 50, 200));

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "a");
    }
}
