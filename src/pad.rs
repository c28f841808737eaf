//! Pad records: four sample slots plus the pad's own voice, envelope,
//! filter, and mixer settings. 164 bytes per pad on disk.

use std::fmt;

use crate::error::Result;
use crate::field::{Field, RecordReader, RecordWriter};
use crate::sample::Sample;
use crate::text::indent;

const VOICE_OVERLAP: Field = Field::new("voice_overlap", 0, 1);
const MUTE_GROUP: Field = Field::new("mute_group", 0, 32);
const UNKNOWN: Field = Field::new("unknown", 0, 255);
const ATTACK: Field = Field::new("attack", 0, 100);
const DECAY: Field = Field::new("decay", 0, 100);
const DECAY_MODE: Field = Field::new("decay_mode", 0, 1);
const VEL_TO_LEVEL: Field = Field::new("vel_to_level", 0, 100);
const FILTER_1_TYPE: Field = Field::new("filter_1_type", 0, 3);
const FILTER_1_FREQ: Field = Field::new("filter_1_freq", 0, 100);
const FILTER_1_RES: Field = Field::new("filter_1_res", 0, 100);
const FILTER_1_VEL_TO_FREQ: Field = Field::new("filter_1_vel_to_freq", 0, 100);
// Type 4 = "Link": filter 2 reuses filter 1's parameters. Only the numeric
// range is enforced here.
const FILTER_2_TYPE: Field = Field::new("filter_2_type", 0, 4);
const FILTER_2_FREQ: Field = Field::new("filter_2_freq", 0, 100);
const FILTER_2_RES: Field = Field::new("filter_2_res", 0, 100);
const FILTER_2_VEL_TO_FREQ: Field = Field::new("filter_2_vel_to_freq", 0, 100);
const MIXER_LEVEL: Field = Field::new("mixer_level", 0, 100);
const MIXER_PAN: Field = Field::new("mixer_pan", 0, 100);
const OUTPUT: Field = Field::new("output", 0, 2);
const FX_SEND: Field = Field::new("fx_send", 0, 2);
const FX_SEND_LEVEL: Field = Field::new("fx_send_level", 0, 100);
const FILTER_ATTENUATION: Field = Field::new("filter_attenuation", 0, 2);
const MIDI_NOTE: Field = Field::new("midi_note", 0, 127);

/// One of the 64 playable drum trigger slots.
///
/// On disk: 4 sample records (96 bytes) followed by a 68-byte scalar block.
/// The pad's MIDI note is not part of this range; it lives in the
/// program-level pad→note table and is stitched in after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pad {
    samples: [Sample; 4],
    voice_overlap: u8,
    mute_group: u8,
    unknown: u8,
    attack: u8,
    decay: u8,
    decay_mode: u8,
    vel_to_level: u8,
    filter_1_type: u8,
    filter_1_freq: u8,
    filter_1_res: u8,
    filter_1_vel_to_freq: u8,
    filter_2_type: u8,
    filter_2_freq: u8,
    filter_2_res: u8,
    filter_2_vel_to_freq: u8,
    mixer_level: u8,
    mixer_pan: u8,
    output: u8,
    fx_send: u8,
    fx_send_level: u8,
    filter_attenuation: u8,
    midi_note: u8,
}

impl Pad {
    /// Encoded size in bytes: 4 samples plus the scalar block.
    pub const SIZE: usize = 4 * Sample::SIZE + 68;

    /// Decode a pad record from the first 164 bytes of `buf`.
    ///
    /// `midi_note` is left at 0; the owning `Program` assigns it from the
    /// pad→note table.
    pub fn parse(buf: &[u8]) -> Result<Pad> {
        let mut r = RecordReader::new("pad", buf, Self::SIZE)?;
        let samples = [
            Sample::parse(r.read_bytes(Sample::SIZE)?)?,
            Sample::parse(r.read_bytes(Sample::SIZE)?)?,
            Sample::parse(r.read_bytes(Sample::SIZE)?)?,
            Sample::parse(r.read_bytes(Sample::SIZE)?)?,
        ];

        r.skip(2)?;
        let voice_overlap = r.read_u8(&VOICE_OVERLAP)?;
        let mute_group = r.read_u8(&MUTE_GROUP)?;
        r.skip(1)?;
        let unknown = r.read_u8(&UNKNOWN)?;
        let attack = r.read_u8(&ATTACK)?;
        let decay = r.read_u8(&DECAY)?;
        let decay_mode = r.read_u8(&DECAY_MODE)?;
        r.skip(2)?;
        let vel_to_level = r.read_u8(&VEL_TO_LEVEL)?;
        r.skip(5)?;
        let filter_1_type = r.read_u8(&FILTER_1_TYPE)?;
        let filter_1_freq = r.read_u8(&FILTER_1_FREQ)?;
        let filter_1_res = r.read_u8(&FILTER_1_RES)?;
        r.skip(4)?;
        let filter_1_vel_to_freq = r.read_u8(&FILTER_1_VEL_TO_FREQ)?;
        let filter_2_type = r.read_u8(&FILTER_2_TYPE)?;
        let filter_2_freq = r.read_u8(&FILTER_2_FREQ)?;
        let filter_2_res = r.read_u8(&FILTER_2_RES)?;
        r.skip(4)?;
        let filter_2_vel_to_freq = r.read_u8(&FILTER_2_VEL_TO_FREQ)?;
        r.skip(14)?;
        let mixer_level = r.read_u8(&MIXER_LEVEL)?;
        let mixer_pan = r.read_u8(&MIXER_PAN)?;
        let output = r.read_u8(&OUTPUT)?;
        let fx_send = r.read_u8(&FX_SEND)?;
        let fx_send_level = r.read_u8(&FX_SEND_LEVEL)?;
        let filter_attenuation = r.read_u8(&FILTER_ATTENUATION)?;
        r.skip(15)?;

        Ok(Pad {
            samples,
            voice_overlap,
            mute_group,
            unknown,
            attack,
            decay,
            decay_mode,
            vel_to_level,
            filter_1_type,
            filter_1_freq,
            filter_1_res,
            filter_1_vel_to_freq,
            filter_2_type,
            filter_2_freq,
            filter_2_res,
            filter_2_vel_to_freq,
            mixer_level,
            mixer_pan,
            output,
            fx_send,
            fx_send_level,
            filter_attenuation,
            midi_note: 0,
        })
    }

    /// Encode this pad as exactly 164 bytes. The MIDI note is not included;
    /// it is emitted by the program-level tables.
    pub fn serialize(&self) -> Vec<u8> {
        let mut w = RecordWriter::with_capacity(Self::SIZE);
        for sample in &self.samples {
            w.write_bytes(&sample.serialize());
        }

        w.pad(2);
        w.write_u8(self.voice_overlap);
        w.write_u8(self.mute_group);
        w.pad(1);
        w.write_u8(self.unknown);
        w.write_u8(self.attack);
        w.write_u8(self.decay);
        w.write_u8(self.decay_mode);
        w.pad(2);
        w.write_u8(self.vel_to_level);
        w.pad(5);
        w.write_u8(self.filter_1_type);
        w.write_u8(self.filter_1_freq);
        w.write_u8(self.filter_1_res);
        w.pad(4);
        w.write_u8(self.filter_1_vel_to_freq);
        w.write_u8(self.filter_2_type);
        w.write_u8(self.filter_2_freq);
        w.write_u8(self.filter_2_res);
        w.pad(4);
        w.write_u8(self.filter_2_vel_to_freq);
        w.pad(14);
        w.write_u8(self.mixer_level);
        w.write_u8(self.mixer_pan);
        w.write_u8(self.output);
        w.write_u8(self.fx_send);
        w.write_u8(self.fx_send_level);
        w.write_u8(self.filter_attenuation);
        w.pad(15);
        w.finish()
    }

    /// The four velocity-layer sample slots, in layer order.
    pub fn samples(&self) -> &[Sample; 4] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [Sample; 4] {
        &mut self.samples
    }

    /// 0="Poly", 1="Mono".
    pub fn voice_overlap(&self) -> u8 {
        self.voice_overlap
    }

    /// 0="Off", 1 to 32.
    pub fn mute_group(&self) -> u8 {
        self.mute_group
    }

    /// Unknown byte; the factory image uses 1.
    pub fn unknown(&self) -> u8 {
        self.unknown
    }

    pub fn attack(&self) -> u8 {
        self.attack
    }

    pub fn decay(&self) -> u8 {
        self.decay
    }

    /// 0="End", 1="Start".
    pub fn decay_mode(&self) -> u8 {
        self.decay_mode
    }

    pub fn vel_to_level(&self) -> u8 {
        self.vel_to_level
    }

    /// 0="Off", 1="Lowpass", 2="Bandpass", 3="Highpass".
    pub fn filter_1_type(&self) -> u8 {
        self.filter_1_type
    }

    pub fn filter_1_freq(&self) -> u8 {
        self.filter_1_freq
    }

    pub fn filter_1_res(&self) -> u8 {
        self.filter_1_res
    }

    pub fn filter_1_vel_to_freq(&self) -> u8 {
        self.filter_1_vel_to_freq
    }

    /// 0="Off", 1="Lowpass", 2="Bandpass", 3="Highpass", 4="Link".
    pub fn filter_2_type(&self) -> u8 {
        self.filter_2_type
    }

    pub fn filter_2_freq(&self) -> u8 {
        self.filter_2_freq
    }

    pub fn filter_2_res(&self) -> u8 {
        self.filter_2_res
    }

    pub fn filter_2_vel_to_freq(&self) -> u8 {
        self.filter_2_vel_to_freq
    }

    pub fn mixer_level(&self) -> u8 {
        self.mixer_level
    }

    /// 0 to 49=Left, 50=Center, 51 to 100=Right.
    pub fn mixer_pan(&self) -> u8 {
        self.mixer_pan
    }

    /// 0="Stereo", 1="1-2", 2="3-4".
    pub fn output(&self) -> u8 {
        self.output
    }

    /// 0="Off", 1="1", 2="2".
    pub fn fx_send(&self) -> u8 {
        self.fx_send
    }

    pub fn fx_send_level(&self) -> u8 {
        self.fx_send_level
    }

    /// 0="0dB", 1="-6dB", 2="-12dB".
    pub fn filter_attenuation(&self) -> u8 {
        self.filter_attenuation
    }

    /// The MIDI note assigned to this pad by the owning program.
    pub fn midi_note(&self) -> u8 {
        self.midi_note
    }

    pub fn set_voice_overlap(&mut self, value: u8) -> Result<()> {
        VOICE_OVERLAP.store_u8(&mut self.voice_overlap, value)
    }

    pub fn set_mute_group(&mut self, value: u8) -> Result<()> {
        MUTE_GROUP.store_u8(&mut self.mute_group, value)
    }

    pub fn set_unknown(&mut self, value: u8) -> Result<()> {
        UNKNOWN.store_u8(&mut self.unknown, value)
    }

    pub fn set_attack(&mut self, value: u8) -> Result<()> {
        ATTACK.store_u8(&mut self.attack, value)
    }

    pub fn set_decay(&mut self, value: u8) -> Result<()> {
        DECAY.store_u8(&mut self.decay, value)
    }

    pub fn set_decay_mode(&mut self, value: u8) -> Result<()> {
        DECAY_MODE.store_u8(&mut self.decay_mode, value)
    }

    pub fn set_vel_to_level(&mut self, value: u8) -> Result<()> {
        VEL_TO_LEVEL.store_u8(&mut self.vel_to_level, value)
    }

    pub fn set_filter_1_type(&mut self, value: u8) -> Result<()> {
        FILTER_1_TYPE.store_u8(&mut self.filter_1_type, value)
    }

    pub fn set_filter_1_freq(&mut self, value: u8) -> Result<()> {
        FILTER_1_FREQ.store_u8(&mut self.filter_1_freq, value)
    }

    pub fn set_filter_1_res(&mut self, value: u8) -> Result<()> {
        FILTER_1_RES.store_u8(&mut self.filter_1_res, value)
    }

    pub fn set_filter_1_vel_to_freq(&mut self, value: u8) -> Result<()> {
        FILTER_1_VEL_TO_FREQ.store_u8(&mut self.filter_1_vel_to_freq, value)
    }

    pub fn set_filter_2_type(&mut self, value: u8) -> Result<()> {
        FILTER_2_TYPE.store_u8(&mut self.filter_2_type, value)
    }

    pub fn set_filter_2_freq(&mut self, value: u8) -> Result<()> {
        FILTER_2_FREQ.store_u8(&mut self.filter_2_freq, value)
    }

    pub fn set_filter_2_res(&mut self, value: u8) -> Result<()> {
        FILTER_2_RES.store_u8(&mut self.filter_2_res, value)
    }

    pub fn set_filter_2_vel_to_freq(&mut self, value: u8) -> Result<()> {
        FILTER_2_VEL_TO_FREQ.store_u8(&mut self.filter_2_vel_to_freq, value)
    }

    pub fn set_mixer_level(&mut self, value: u8) -> Result<()> {
        MIXER_LEVEL.store_u8(&mut self.mixer_level, value)
    }

    pub fn set_mixer_pan(&mut self, value: u8) -> Result<()> {
        MIXER_PAN.store_u8(&mut self.mixer_pan, value)
    }

    pub fn set_output(&mut self, value: u8) -> Result<()> {
        OUTPUT.store_u8(&mut self.output, value)
    }

    pub fn set_fx_send(&mut self, value: u8) -> Result<()> {
        FX_SEND.store_u8(&mut self.fx_send, value)
    }

    pub fn set_fx_send_level(&mut self, value: u8) -> Result<()> {
        FX_SEND_LEVEL.store_u8(&mut self.fx_send_level, value)
    }

    pub fn set_filter_attenuation(&mut self, value: u8) -> Result<()> {
        FILTER_ATTENUATION.store_u8(&mut self.filter_attenuation, value)
    }

    pub fn set_midi_note(&mut self, value: u8) -> Result<()> {
        MIDI_NOTE.store_u8(&mut self.midi_note, value)
    }
}

impl Default for Pad {
    /// The empty pad from the factory program image.
    fn default() -> Self {
        Pad {
            samples: [
                Sample::default(),
                Sample::default(),
                Sample::default(),
                Sample::default(),
            ],
            voice_overlap: 0,
            mute_group: 0,
            unknown: 1,
            attack: 0,
            decay: 5,
            decay_mode: 0,
            vel_to_level: 100,
            filter_1_type: 0,
            filter_1_freq: 100,
            filter_1_res: 0,
            filter_1_vel_to_freq: 0,
            filter_2_type: 0,
            filter_2_freq: 100,
            filter_2_res: 0,
            filter_2_vel_to_freq: 0,
            mixer_level: 100,
            mixer_pan: 50,
            output: 0,
            fx_send: 0,
            fx_send_level: 33,
            filter_attenuation: 0,
            midi_note: 0,
        }
    }
}

impl fmt::Display for Pad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "voice_overlap = {}", self.voice_overlap)?;
        writeln!(f, "mute_group = {}", self.mute_group)?;
        writeln!(f, "unknown = {}", self.unknown)?;
        writeln!(f, "attack = {}", self.attack)?;
        writeln!(f, "decay = {}", self.decay)?;
        writeln!(f, "decay_mode = {}", self.decay_mode)?;
        writeln!(f, "vel_to_level = {}", self.vel_to_level)?;
        writeln!(f, "filter_1_type = {}", self.filter_1_type)?;
        writeln!(f, "filter_1_freq = {}", self.filter_1_freq)?;
        writeln!(f, "filter_1_res = {}", self.filter_1_res)?;
        writeln!(f, "filter_1_vel_to_freq = {}", self.filter_1_vel_to_freq)?;
        writeln!(f, "filter_2_type = {}", self.filter_2_type)?;
        writeln!(f, "filter_2_freq = {}", self.filter_2_freq)?;
        writeln!(f, "filter_2_res = {}", self.filter_2_res)?;
        writeln!(f, "filter_2_vel_to_freq = {}", self.filter_2_vel_to_freq)?;
        writeln!(f, "mixer_level = {}", self.mixer_level)?;
        writeln!(f, "mixer_pan = {}", self.mixer_pan)?;
        writeln!(f, "output = {}", self.output)?;
        writeln!(f, "fx_send = {}", self.fx_send)?;
        writeln!(f, "fx_send_level = {}", self.fx_send_level)?;
        writeln!(f, "filter_attenuation = {}", self.filter_attenuation)?;
        writeln!(f, "midi_note = {}", self.midi_note)?;
        for (i, sample) in self.samples.iter().enumerate() {
            writeln!(f, "Sample {i}:")?;
            if i < self.samples.len() - 1 {
                writeln!(f, "{}", indent(&sample.to_string(), 4))?;
            } else {
                write!(f, "{}", indent(&sample.to_string(), 4))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_PGM_DATA;

    // Pad 0 of the factory image (immediately after the 24-byte header).
    fn default_pad_bytes() -> &'static [u8] {
        &DEFAULT_PGM_DATA[24..24 + Pad::SIZE]
    }

    #[test]
    fn test_size() {
        assert_eq!(Pad::SIZE, 164);
    }

    #[test]
    fn test_parse_factory_pad() {
        let p = Pad::parse(default_pad_bytes()).unwrap();
        assert_eq!(p.voice_overlap(), 0);
        assert_eq!(p.mute_group(), 0);
        assert_eq!(p.unknown(), 1);
        assert_eq!(p.attack(), 0);
        assert_eq!(p.decay(), 5);
        assert_eq!(p.vel_to_level(), 100);
        assert_eq!(p.filter_1_freq(), 100);
        assert_eq!(p.filter_2_freq(), 100);
        assert_eq!(p.mixer_level(), 100);
        assert_eq!(p.mixer_pan(), 50);
        assert_eq!(p.fx_send_level(), 33);
        assert_eq!(p.samples()[0].level(), 70);
    }

    #[test]
    fn test_default_matches_factory_image() {
        assert_eq!(Pad::default().serialize(), default_pad_bytes());
    }

    #[test]
    fn test_round_trip_unmodified() {
        let p = Pad::parse(default_pad_bytes()).unwrap();
        assert_eq!(p.serialize(), default_pad_bytes());
    }

    #[test]
    fn test_round_trip_modified() {
        let mut p = Pad::default();
        p.set_voice_overlap(1).unwrap();
        p.set_mute_group(32).unwrap();
        p.set_filter_2_type(4).unwrap();
        p.set_mixer_pan(0).unwrap();
        p.samples_mut()[2].set_name("Hat Open").unwrap();
        let bytes = p.serialize();
        assert_eq!(bytes.len(), Pad::SIZE);

        let mut reparsed = Pad::parse(&bytes).unwrap();
        // midi_note lives outside the pad's byte range.
        reparsed.set_midi_note(p.midi_note()).unwrap();
        assert_eq!(reparsed, p);
    }

    #[test]
    fn test_midi_note_not_serialized() {
        let mut p = Pad::default();
        let before = p.serialize();
        p.set_midi_note(64).unwrap();
        assert_eq!(p.serialize(), before);
    }

    #[test]
    fn test_filter_type_bounds() {
        let mut p = Pad::default();
        assert!(p.set_filter_1_type(3).is_ok());
        assert!(p.set_filter_1_type(4).is_err()); // no "Link" on filter 1
        assert!(p.set_filter_2_type(4).is_ok());
        assert!(p.set_filter_2_type(5).is_err());
    }

    #[test]
    fn test_scalar_bounds() {
        let mut p = Pad::default();
        assert!(p.set_mute_group(33).is_err());
        assert!(p.set_mute_group(32).is_ok());
        assert!(p.set_output(3).is_err());
        assert!(p.set_fx_send(3).is_err());
        assert!(p.set_filter_attenuation(3).is_err());
        assert!(p.set_midi_note(128).is_err());
        assert!(p.set_midi_note(127).is_ok());
    }

    #[test]
    fn test_truncated_buffer() {
        let err = Pad::parse(&DEFAULT_PGM_DATA[24..24 + 163]).unwrap_err();
        assert!(err.is_format_error());
    }
}
