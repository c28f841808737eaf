//! Sample-slot records: 24 bytes of playback metadata for one assigned
//! sample within a pad (not the audio data itself).

use std::fmt;

use crate::error::Result;
use crate::field::{Field, NameField, RecordReader, RecordWriter};

const SAMPLE_NAME: NameField = NameField::new("sample_name", 16);
const LEVEL: Field = Field::new("level", 0, 100);
const RANGE_UPPER: Field = Field::new("range_upper", 0, 127);
const RANGE_LOWER: Field = Field::new("range_lower", 0, 127);
const TUNING: Field = Field::new("tuning", -3600, 3600);
const PLAY_MODE: Field = Field::new("play_mode", 0, 1);

/// One of the four velocity-layer sample slots in a pad.
///
/// Layout (little-endian, 24 bytes):
/// name(16, NUL-padded), pad(1), level(1), range_upper(1), range_lower(1),
/// tuning(2, signed cents), play_mode(1, 0="One Shot" 1="Note On"), pad(1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    name: String,
    level: u8,
    range_upper: u8,
    range_lower: u8,
    tuning: i16,
    play_mode: u8,
}

impl Sample {
    /// Encoded size in bytes.
    pub const SIZE: usize = 24;

    /// Decode a sample record from the first 24 bytes of `buf`.
    pub fn parse(buf: &[u8]) -> Result<Sample> {
        let mut r = RecordReader::new("sample", buf, Self::SIZE)?;
        let name = r.read_name(&SAMPLE_NAME)?;
        r.skip(1)?;
        let level = r.read_u8(&LEVEL)?;
        let range_upper = r.read_u8(&RANGE_UPPER)?;
        let range_lower = r.read_u8(&RANGE_LOWER)?;
        let tuning = r.read_i16(&TUNING)?;
        let play_mode = r.read_u8(&PLAY_MODE)?;
        r.skip(1)?;
        Ok(Sample {
            name,
            level,
            range_upper,
            range_lower,
            tuning,
            play_mode,
        })
    }

    /// Encode this sample as exactly 24 bytes.
    pub fn serialize(&self) -> Vec<u8> {
        let mut w = RecordWriter::with_capacity(Self::SIZE);
        w.write_name(&SAMPLE_NAME, &self.name);
        w.pad(1);
        w.write_u8(self.level);
        w.write_u8(self.range_upper);
        w.write_u8(self.range_lower);
        w.write_i16(self.tuning);
        w.write_u8(self.play_mode);
        w.pad(1);
        w.finish()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn range_upper(&self) -> u8 {
        self.range_upper
    }

    pub fn range_lower(&self) -> u8 {
        self.range_lower
    }

    /// Tuning offset in cents.
    pub fn tuning(&self) -> i16 {
        self.tuning
    }

    /// 0="One Shot", 1="Note On".
    pub fn play_mode(&self) -> u8 {
        self.play_mode
    }

    pub fn set_name(&mut self, value: &str) -> Result<()> {
        SAMPLE_NAME.store(&mut self.name, value)
    }

    pub fn set_level(&mut self, value: u8) -> Result<()> {
        LEVEL.store_u8(&mut self.level, value)
    }

    pub fn set_range_upper(&mut self, value: u8) -> Result<()> {
        RANGE_UPPER.store_u8(&mut self.range_upper, value)
    }

    pub fn set_range_lower(&mut self, value: u8) -> Result<()> {
        RANGE_LOWER.store_u8(&mut self.range_lower, value)
    }

    pub fn set_tuning(&mut self, value: i16) -> Result<()> {
        TUNING.store_i16(&mut self.tuning, value)
    }

    pub fn set_play_mode(&mut self, value: u8) -> Result<()> {
        PLAY_MODE.store_u8(&mut self.play_mode, value)
    }
}

impl Default for Sample {
    /// The empty sample slot from the factory program image.
    fn default() -> Self {
        Sample {
            name: String::new(),
            level: 70,
            range_upper: 0,
            range_lower: 127,
            tuning: 0,
            play_mode: 0,
        }
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "sample_name = {}", self.name)?;
        writeln!(f, "level = {}", self.level)?;
        writeln!(f, "range_upper = {}", self.range_upper)?;
        writeln!(f, "range_lower = {}", self.range_lower)?;
        writeln!(f, "tuning = {}", self.tuning)?;
        write!(f, "play_mode = {}", self.play_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PgmError;
    use crate::DEFAULT_PGM_DATA;

    // First sample slot of pad 0 in the factory image.
    fn default_sample_bytes() -> &'static [u8] {
        &DEFAULT_PGM_DATA[24..24 + Sample::SIZE]
    }

    #[test]
    fn test_parse_factory_sample() {
        let s = Sample::parse(default_sample_bytes()).unwrap();
        assert_eq!(s.name(), "");
        assert_eq!(s.level(), 70);
        assert_eq!(s.range_upper(), 0);
        assert_eq!(s.range_lower(), 127);
        assert_eq!(s.tuning(), 0);
        assert_eq!(s.play_mode(), 0);
    }

    #[test]
    fn test_default_matches_factory_image() {
        assert_eq!(Sample::default().serialize(), default_sample_bytes());
    }

    #[test]
    fn test_round_trip_unmodified() {
        let s = Sample::parse(default_sample_bytes()).unwrap();
        assert_eq!(s.serialize(), default_sample_bytes());
    }

    #[test]
    fn test_round_trip_modified() {
        let mut s = Sample::default();
        s.set_name("Kick 01").unwrap();
        s.set_level(100).unwrap();
        s.set_tuning(-3600).unwrap();
        s.set_play_mode(1).unwrap();
        let bytes = s.serialize();
        assert_eq!(bytes.len(), Sample::SIZE);
        assert_eq!(Sample::parse(&bytes).unwrap(), s);
    }

    #[test]
    fn test_truncated_buffer() {
        let err = Sample::parse(&[0u8; 23]).unwrap_err();
        assert!(err.is_format_error());
    }

    #[test]
    fn test_bounds_enforced_on_mutation() {
        let mut s = Sample::default();
        assert!(s.set_level(101).is_err());
        assert_eq!(s.level(), 70);
        assert!(s.set_level(0).is_ok());
        assert!(s.set_level(100).is_ok());

        assert!(s.set_range_upper(128).is_err());
        assert!(s.set_range_upper(127).is_ok());
        assert!(s.set_tuning(3601).is_err());
        assert!(s.set_tuning(-3601).is_err());
        assert!(s.set_tuning(3600).is_ok());
        assert!(s.set_play_mode(2).is_err());
        assert!(s.set_play_mode(1).is_ok());
    }

    #[test]
    fn test_name_validation_on_mutation() {
        let mut s = Sample::default();
        assert!(matches!(
            s.set_name("Tom/Floor"),
            Err(PgmError::InvalidNameChar { ch: '/', .. })
        ));
        assert_eq!(s.name(), "");
        assert!(s.set_name("Tom{1} @100%").is_ok());
        assert_eq!(s.name(), "Tom{1} @100%");
    }

    #[test]
    fn test_parse_rejects_bad_name_byte() {
        let mut bytes = default_sample_bytes().to_vec();
        bytes[0] = b'*';
        let err = Sample::parse(&bytes).unwrap_err();
        assert!(matches!(err, PgmError::InvalidNameChar { ch: '*', .. }));
    }

    #[test]
    fn test_parse_rejects_out_of_range_level() {
        let mut bytes = default_sample_bytes().to_vec();
        bytes[17] = 101;
        let err = Sample::parse(&bytes).unwrap_err();
        assert!(err.is_range_error());
    }
}
