//! Buffered record output.
//!
//! Uses itoa for integer formatting to avoid going through `fmt` for every
//! coordinate.

use crate::bed::BedError;
use crate::record::BedLine;
use std::io::{BufWriter, Write};

/// Buffer size for BedWriter (1MB default).
const DEFAULT_BUFFER_SIZE: usize = 1024 * 1024;

/// Buffered writer producing `chrom\tstart\tend\tname\n` lines.
///
/// Output matches [`crate::bed::print_line`] byte for byte.
pub struct BedWriter<W: Write> {
    writer: BufWriter<W>,
    itoa_buf: itoa::Buffer,
    records_written: usize,
}

impl<W: Write> BedWriter<W> {
    /// Create a new BedWriter with the default buffer.
    pub fn new(output: W) -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE, output)
    }

    /// Create a new BedWriter with specified buffer size.
    pub fn with_capacity(capacity: usize, output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, output),
            itoa_buf: itoa::Buffer::new(),
            records_written: 0,
        }
    }

    /// Write one record followed by newline.
    #[inline]
    pub fn write_record(&mut self, record: &BedLine) -> Result<(), BedError> {
        self.writer.write_all(record.chrom.as_bytes())?;
        self.writer.write_all(b"\t")?;
        self.writer
            .write_all(self.itoa_buf.format(record.chrom_start).as_bytes())?;
        self.writer.write_all(b"\t")?;
        self.writer
            .write_all(self.itoa_buf.format(record.chrom_end).as_bytes())?;
        self.writer.write_all(b"\t")?;
        self.writer.write_all(record.name.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.records_written += 1;
        Ok(())
    }

    /// Write every record of a slice in order.
    pub fn write_all(&mut self, records: &[BedLine]) -> Result<(), BedError> {
        records.iter().try_for_each(|r| self.write_record(r))
    }

    /// Number of records written so far.
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flush the buffer.
    pub fn flush(&mut self) -> Result<(), BedError> {
        self.writer.flush()?;
        Ok(())
    }
}
