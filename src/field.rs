//! Shared machinery for fixed-size, little-endian binary records.
//!
//! Each record type (sample, pad, program sections) declares its fields as
//! `Field` / `NameField` descriptors carrying the field name and its
//! inclusive bounds or allowed character set. `RecordReader` and
//! `RecordWriter` consume those descriptors to decode and encode the
//! declared layout, validating every value on the way in.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{PgmError, Result};

/// Descriptor for a bounded numeric field: name plus inclusive bounds.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub min: i32,
    pub max: i32,
}

impl Field {
    pub const fn new(name: &'static str, min: i32, max: i32) -> Self {
        Field { name, min, max }
    }

    /// Validate a value against the inclusive bounds.
    pub fn check(&self, value: i32) -> Result<()> {
        if value < self.min || value > self.max {
            return Err(PgmError::OutOfRange {
                field: self.name,
                min: self.min,
                max: self.max,
                value,
            });
        }
        Ok(())
    }

    /// Validate then store, leaving the old value intact on failure.
    pub fn store_u8(&self, slot: &mut u8, value: u8) -> Result<()> {
        self.check(i32::from(value))?;
        *slot = value;
        Ok(())
    }

    pub fn store_i8(&self, slot: &mut i8, value: i8) -> Result<()> {
        self.check(i32::from(value))?;
        *slot = value;
        Ok(())
    }

    pub fn store_i16(&self, slot: &mut i16, value: i16) -> Result<()> {
        self.check(i32::from(value))?;
        *slot = value;
        Ok(())
    }
}

/// Characters the MPC 1000 accepts in a sample name, plus the NUL padding
/// byte that fills unused positions.
const NAME_CHARSET: &str = "abcdefghijklmnopqrstuvwxyz\
                            ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                            1234567890\
                            !#$%&'()-@_{} \x00";

/// Descriptor for a fixed-width, NUL-padded string field.
#[derive(Debug, Clone, Copy)]
pub struct NameField {
    pub name: &'static str,
    pub width: usize,
}

impl NameField {
    pub const fn new(name: &'static str, width: usize) -> Self {
        NameField { name, width }
    }

    /// Validate length and character set.
    pub fn check(&self, value: &str) -> Result<()> {
        if value.len() > self.width {
            return Err(PgmError::NameTooLong {
                field: self.name,
                len: value.len(),
                max: self.width,
            });
        }
        for ch in value.chars() {
            if !NAME_CHARSET.contains(ch) {
                return Err(PgmError::InvalidNameChar {
                    field: self.name,
                    ch,
                });
            }
        }
        Ok(())
    }

    /// Validate then store, leaving the old value intact on failure.
    pub fn store(&self, slot: &mut String, value: &str) -> Result<()> {
        self.check(value)?;
        *slot = value.to_string();
        Ok(())
    }
}

/// Sequential decoder for one fixed-layout record.
///
/// Construction fails up front if the buffer cannot hold the declared
/// record size, so a parse never produces a partially decoded record.
#[derive(Debug)]
pub struct RecordReader<'a> {
    record: &'static str,
    buf: &'a [u8],
    pos: usize,
}

impl<'a> RecordReader<'a> {
    pub fn new(record: &'static str, buf: &'a [u8], need: usize) -> Result<Self> {
        if buf.len() < need {
            return Err(PgmError::Truncated {
                record,
                need,
                have: buf.len(),
            });
        }
        Ok(RecordReader {
            record,
            buf: &buf[..need],
            pos: 0,
        })
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.pos + n > self.buf.len() {
            return Err(PgmError::Truncated {
                record: self.record,
                need: self.pos + n,
                have: self.buf.len(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Skip declared padding bytes.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.take(n).map(|_| ())
    }

    /// Decode an unvalidated little-endian u16 (e.g. the file size header).
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    /// Decode and bounds-check a one-byte unsigned field.
    pub fn read_u8(&mut self, field: &Field) -> Result<u8> {
        let value = self.take(1)?[0];
        field.check(i32::from(value))?;
        Ok(value)
    }

    /// Decode and bounds-check a one-byte signed field.
    pub fn read_i8(&mut self, field: &Field) -> Result<i8> {
        let value = self.take(1)?[0] as i8;
        field.check(i32::from(value))?;
        Ok(value)
    }

    /// Decode and bounds-check a two-byte signed little-endian field.
    pub fn read_i16(&mut self, field: &Field) -> Result<i16> {
        let value = LittleEndian::read_i16(self.take(2)?);
        field.check(i32::from(value))?;
        Ok(value)
    }

    /// Decode an opaque byte run (e.g. the file type header).
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.take(n)
    }

    /// Decode a NUL-padded string field, trimming the padding and
    /// validating length and character set.
    pub fn read_name(&mut self, field: &NameField) -> Result<String> {
        let raw = self.take(field.width)?;
        let trimmed = match raw.iter().rposition(|&b| b != 0) {
            Some(last) => &raw[..=last],
            None => &raw[..0],
        };
        let value: String = trimmed.iter().map(|&b| b as char).collect();
        field.check(&value)?;
        Ok(value)
    }
}

/// Sequential encoder for one fixed-layout record.
///
/// Field values have already been validated on mutation, so encoding
/// cannot fail; `finish` returns a buffer of exactly the declared size.
pub struct RecordWriter {
    buf: Vec<u8>,
}

impl RecordWriter {
    pub fn with_capacity(n: usize) -> Self {
        RecordWriter {
            buf: Vec::with_capacity(n),
        }
    }

    /// Emit declared padding bytes.
    pub fn pad(&mut self, n: usize) {
        self.buf.resize(self.buf.len() + n, 0);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_i8(&mut self, value: i8) {
        self.buf.push(value as u8);
    }

    pub fn write_u16(&mut self, value: u16) {
        let mut raw = [0u8; 2];
        LittleEndian::write_u16(&mut raw, value);
        self.buf.extend_from_slice(&raw);
    }

    pub fn write_i16(&mut self, value: i16) {
        let mut raw = [0u8; 2];
        LittleEndian::write_i16(&mut raw, value);
        self.buf.extend_from_slice(&raw);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Emit a string field right-padded with NUL to its fixed width.
    pub fn write_name(&mut self, field: &NameField, value: &str) {
        let start = self.buf.len();
        self.buf.extend(value.bytes());
        self.buf.resize(start + field.width, 0);
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL: Field = Field::new("level", 0, 100);
    const TUNING: Field = Field::new("tuning", -3600, 3600);
    const NAME: NameField = NameField::new("sample_name", 16);

    #[test]
    fn test_field_bounds_inclusive() {
        assert!(LEVEL.check(0).is_ok());
        assert!(LEVEL.check(100).is_ok());
        assert!(matches!(
            LEVEL.check(-1),
            Err(PgmError::OutOfRange { value: -1, .. })
        ));
        assert!(matches!(
            LEVEL.check(101),
            Err(PgmError::OutOfRange { value: 101, .. })
        ));
    }

    #[test]
    fn test_store_keeps_old_value_on_failure() {
        let mut slot = 42u8;
        assert!(LEVEL.store_u8(&mut slot, 101).is_err());
        assert_eq!(slot, 42);
        assert!(LEVEL.store_u8(&mut slot, 100).is_ok());
        assert_eq!(slot, 100);
    }

    #[test]
    fn test_reader_rejects_short_buffer_up_front() {
        let buf = [0u8; 3];
        let err = RecordReader::new("sample", &buf, 24).unwrap_err();
        assert_eq!(
            err,
            PgmError::Truncated {
                record: "sample",
                need: 24,
                have: 3
            }
        );
        assert!(err.is_format_error());
    }

    #[test]
    fn test_reader_validates_decoded_values() {
        let buf = [200u8];
        let mut r = RecordReader::new("pad", &buf, 1).unwrap();
        let err = r.read_u8(&LEVEL).unwrap_err();
        assert!(matches!(err, PgmError::OutOfRange { value: 200, .. }));
        assert!(err.is_range_error());
    }

    #[test]
    fn test_reader_signed_decode() {
        // -3600 little-endian
        let buf = [0xF0, 0xF1];
        let mut r = RecordReader::new("sample", &buf, 2).unwrap();
        assert_eq!(r.read_i16(&TUNING).unwrap(), -3600);
    }

    #[test]
    fn test_name_charset() {
        assert!(NAME.check("Kick 01").is_ok());
        assert!(NAME.check("!#$%&'()-@_{}").is_ok());
        assert!(NAME.check("").is_ok());
        assert!(matches!(
            NAME.check("bad/name"),
            Err(PgmError::InvalidNameChar { ch: '/', .. })
        ));
        assert!(matches!(
            NAME.check("seventeen chars!!"),
            Err(PgmError::NameTooLong { len: 17, .. })
        ));
    }

    #[test]
    fn test_name_round_trip_trims_and_pads() {
        let mut w = RecordWriter::with_capacity(16);
        w.write_name(&NAME, "Snare");
        let bytes = w.finish();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[..5], b"Snare");
        assert!(bytes[5..].iter().all(|&b| b == 0));

        let mut r = RecordReader::new("sample", &bytes, 16).unwrap();
        assert_eq!(r.read_name(&NAME).unwrap(), "Snare");
    }

    #[test]
    fn test_writer_layout_widths() {
        let mut w = RecordWriter::with_capacity(8);
        w.write_u16(0x2A04);
        w.pad(2);
        w.write_i16(-1);
        w.write_u8(7);
        w.write_i8(-7);
        let bytes = w.finish();
        assert_eq!(bytes, [0x04, 0x2A, 0, 0, 0xFF, 0xFF, 7, 0xF9]);
    }
}
