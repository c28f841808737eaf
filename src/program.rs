//! Program records: the complete .pgm file. A 24-byte header, 64 pads,
//! two redundant note/pad index tables, and a 44-byte block of global
//! MIDI-program and slider mapping fields.

use std::fmt;

use log::debug;

use crate::error::Result;
use crate::field::{Field, RecordReader, RecordWriter};
use crate::pad::Pad;
use crate::text::{hex_byte_grid, indent};
use crate::DEFAULT_PGM_DATA;

const MIDI_PROGRAM_CHANGE: Field = Field::new("midi_program_change", 0, 128);
const SLIDER_PAD: Field = Field::new("slider_pad", 0, 63);
const SLIDER_UNKNOWN: Field = Field::new("slider_unknown", 0, 255);
const SLIDER_PARAMETER: Field = Field::new("slider_parameter", 0, 4);
const SLIDER_TUNE: Field = Field::new("slider_tune", -120, 120);
const SLIDER_FILTER: Field = Field::new("slider_filter", -50, 50);
const SLIDER_LAYER: Field = Field::new("slider_layer", 0, 127);
const SLIDER_ATTACK: Field = Field::new("slider_attack", 0, 100);
const SLIDER_DECAY: Field = Field::new("slider_decay", 0, 100);

/// Table value meaning "no pad assigned to this MIDI note".
pub const NO_PAD: u8 = 64;

/// One assignable slider: a target pad, the modulated parameter, and a
/// (low, high) range for each of the five parameters it can drive.
///
/// Every range pair keeps low <= high. Setting one bound past the other
/// drags the other bound along instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slider {
    pad: u8,
    unknown: u8,
    parameter: u8,
    tune_low: i8,
    tune_high: i8,
    filter_low: i8,
    filter_high: i8,
    layer_low: u8,
    layer_high: u8,
    attack_low: u8,
    attack_high: u8,
    decay_low: u8,
    decay_high: u8,
}

impl Slider {
    /// Encoded size within the global record.
    const SIZE: usize = 13;

    /// Decode slider fields in declared order through the corrective
    /// setter path, so an out-of-order pair in the file loads with the
    /// low bound clamped down to the high bound.
    fn read(r: &mut RecordReader<'_>) -> Result<Slider> {
        let mut s = Slider::default();
        s.set_pad(r.read_u8(&SLIDER_PAD)?)?;
        s.set_unknown(r.read_u8(&SLIDER_UNKNOWN)?)?;
        s.set_parameter(r.read_u8(&SLIDER_PARAMETER)?)?;
        s.set_tune_low(r.read_i8(&SLIDER_TUNE)?)?;
        s.set_tune_high(r.read_i8(&SLIDER_TUNE)?)?;
        s.set_filter_low(r.read_i8(&SLIDER_FILTER)?)?;
        s.set_filter_high(r.read_i8(&SLIDER_FILTER)?)?;
        s.set_layer_low(r.read_u8(&SLIDER_LAYER)?)?;
        s.set_layer_high(r.read_u8(&SLIDER_LAYER)?)?;
        s.set_attack_low(r.read_u8(&SLIDER_ATTACK)?)?;
        s.set_attack_high(r.read_u8(&SLIDER_ATTACK)?)?;
        s.set_decay_low(r.read_u8(&SLIDER_DECAY)?)?;
        s.set_decay_high(r.read_u8(&SLIDER_DECAY)?)?;
        Ok(s)
    }

    fn write(&self, w: &mut RecordWriter) {
        w.write_u8(self.pad);
        w.write_u8(self.unknown);
        w.write_u8(self.parameter);
        w.write_i8(self.tune_low);
        w.write_i8(self.tune_high);
        w.write_i8(self.filter_low);
        w.write_i8(self.filter_high);
        w.write_u8(self.layer_low);
        w.write_u8(self.layer_high);
        w.write_u8(self.attack_low);
        w.write_u8(self.attack_high);
        w.write_u8(self.decay_low);
        w.write_u8(self.decay_high);
    }

    /// Target pad number, 0 to 63.
    pub fn pad(&self) -> u8 {
        self.pad
    }

    /// Unknown byte; the factory image uses 1.
    pub fn unknown(&self) -> u8 {
        self.unknown
    }

    /// 0="Tune", 1="Filter", 2="Layer", 3="Attack", 4="Decay".
    pub fn parameter(&self) -> u8 {
        self.parameter
    }

    pub fn tune_low(&self) -> i8 {
        self.tune_low
    }

    pub fn tune_high(&self) -> i8 {
        self.tune_high
    }

    pub fn filter_low(&self) -> i8 {
        self.filter_low
    }

    pub fn filter_high(&self) -> i8 {
        self.filter_high
    }

    pub fn layer_low(&self) -> u8 {
        self.layer_low
    }

    pub fn layer_high(&self) -> u8 {
        self.layer_high
    }

    pub fn attack_low(&self) -> u8 {
        self.attack_low
    }

    pub fn attack_high(&self) -> u8 {
        self.attack_high
    }

    pub fn decay_low(&self) -> u8 {
        self.decay_low
    }

    pub fn decay_high(&self) -> u8 {
        self.decay_high
    }

    pub fn set_pad(&mut self, value: u8) -> Result<()> {
        SLIDER_PAD.store_u8(&mut self.pad, value)
    }

    pub fn set_unknown(&mut self, value: u8) -> Result<()> {
        SLIDER_UNKNOWN.store_u8(&mut self.unknown, value)
    }

    pub fn set_parameter(&mut self, value: u8) -> Result<()> {
        SLIDER_PARAMETER.store_u8(&mut self.parameter, value)
    }

    /// Raises `tune_high` to match if set above it.
    pub fn set_tune_low(&mut self, value: i8) -> Result<()> {
        SLIDER_TUNE.store_i8(&mut self.tune_low, value)?;
        if value > self.tune_high {
            self.tune_high = value;
        }
        Ok(())
    }

    /// Lowers `tune_low` to match if set below it.
    pub fn set_tune_high(&mut self, value: i8) -> Result<()> {
        SLIDER_TUNE.store_i8(&mut self.tune_high, value)?;
        if value < self.tune_low {
            self.tune_low = value;
        }
        Ok(())
    }

    /// Raises `filter_high` to match if set above it.
    pub fn set_filter_low(&mut self, value: i8) -> Result<()> {
        SLIDER_FILTER.store_i8(&mut self.filter_low, value)?;
        if value > self.filter_high {
            self.filter_high = value;
        }
        Ok(())
    }

    /// Lowers `filter_low` to match if set below it.
    pub fn set_filter_high(&mut self, value: i8) -> Result<()> {
        SLIDER_FILTER.store_i8(&mut self.filter_high, value)?;
        if value < self.filter_low {
            self.filter_low = value;
        }
        Ok(())
    }

    /// Raises `layer_high` to match if set above it.
    pub fn set_layer_low(&mut self, value: u8) -> Result<()> {
        SLIDER_LAYER.store_u8(&mut self.layer_low, value)?;
        if value > self.layer_high {
            self.layer_high = value;
        }
        Ok(())
    }

    /// Lowers `layer_low` to match if set below it.
    pub fn set_layer_high(&mut self, value: u8) -> Result<()> {
        SLIDER_LAYER.store_u8(&mut self.layer_high, value)?;
        if value < self.layer_low {
            self.layer_low = value;
        }
        Ok(())
    }

    /// Raises `attack_high` to match if set above it.
    pub fn set_attack_low(&mut self, value: u8) -> Result<()> {
        SLIDER_ATTACK.store_u8(&mut self.attack_low, value)?;
        if value > self.attack_high {
            self.attack_high = value;
        }
        Ok(())
    }

    /// Lowers `attack_low` to match if set below it.
    pub fn set_attack_high(&mut self, value: u8) -> Result<()> {
        SLIDER_ATTACK.store_u8(&mut self.attack_high, value)?;
        if value < self.attack_low {
            self.attack_low = value;
        }
        Ok(())
    }

    /// Raises `decay_high` to match if set above it.
    pub fn set_decay_low(&mut self, value: u8) -> Result<()> {
        SLIDER_DECAY.store_u8(&mut self.decay_low, value)?;
        if value > self.decay_high {
            self.decay_high = value;
        }
        Ok(())
    }

    /// Lowers `decay_low` to match if set below it.
    pub fn set_decay_high(&mut self, value: u8) -> Result<()> {
        SLIDER_DECAY.store_u8(&mut self.decay_high, value)?;
        if value < self.decay_low {
            self.decay_low = value;
        }
        Ok(())
    }
}

impl Default for Slider {
    /// Slider 1 of the factory image: full range on every pair.
    fn default() -> Self {
        Slider {
            pad: 0,
            unknown: 1,
            parameter: 0,
            tune_low: -120,
            tune_high: 120,
            filter_low: -50,
            filter_high: 50,
            layer_low: 0,
            layer_high: 127,
            attack_low: 0,
            attack_high: 100,
            decay_low: 0,
            decay_high: 100,
        }
    }
}

impl fmt::Display for Slider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "pad = {}", self.pad)?;
        writeln!(f, "unknown = {}", self.unknown)?;
        writeln!(f, "parameter = {}", self.parameter)?;
        writeln!(f, "tune_low = {}", self.tune_low)?;
        writeln!(f, "tune_high = {}", self.tune_high)?;
        writeln!(f, "filter_low = {}", self.filter_low)?;
        writeln!(f, "filter_high = {}", self.filter_high)?;
        writeln!(f, "layer_low = {}", self.layer_low)?;
        writeln!(f, "layer_high = {}", self.layer_high)?;
        writeln!(f, "attack_low = {}", self.attack_low)?;
        writeln!(f, "attack_high = {}", self.attack_high)?;
        writeln!(f, "decay_low = {}", self.decay_low)?;
        write!(f, "decay_high = {}", self.decay_high)
    }
}

/// A complete MPC 1000 program: header, 64 pads, note mapping tables, and
/// global MIDI/slider fields.
///
/// The pad→note table (one MIDI note per pad) is authoritative and lives
/// in the pads themselves; the inverse note→pad table is derived on demand
/// and never stored. A loaded file's inverse table is read and discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    file_size: u16,
    file_type: [u8; 16],
    pads: Vec<Pad>,
    midi_program_change: u8,
    sliders: [Slider; 2],
}

impl Program {
    pub const PAD_COUNT: usize = 64;
    pub const NOTE_COUNT: usize = 128;

    const HEADER_SIZE: usize = 24;
    const GLOBAL_SIZE: usize = 1 + 2 * Slider::SIZE + 17;

    /// Encoded size in bytes of a complete program file.
    pub const SIZE: usize = Self::HEADER_SIZE
        + Self::PAD_COUNT * Pad::SIZE
        + Self::PAD_COUNT
        + Self::NOTE_COUNT
        + Self::GLOBAL_SIZE;

    /// Decode a program from the first 10756 bytes of `buf`.
    pub fn parse(buf: &[u8]) -> Result<Program> {
        let mut r = RecordReader::new("program", buf, Self::SIZE)?;

        let file_size = r.read_u16()?;
        r.skip(2)?;
        let mut file_type = [0u8; 16];
        file_type.copy_from_slice(r.read_bytes(16)?);
        r.skip(4)?;
        debug!(
            "parsing program: file_size={} file_type={:?}",
            file_size,
            String::from_utf8_lossy(&file_type)
        );

        let mut pads = Vec::with_capacity(Self::PAD_COUNT);
        for _ in 0..Self::PAD_COUNT {
            pads.push(Pad::parse(r.read_bytes(Pad::SIZE)?)?);
        }

        // Pad→note table: authoritative, stitched into the pads.
        let notes = r.read_bytes(Self::PAD_COUNT)?;
        for (pad, &note) in pads.iter_mut().zip(notes) {
            pad.set_midi_note(note)?;
        }

        // Note→pad table: redundant with the above; read and discarded,
        // regenerated from the pads on serialize.
        r.read_bytes(Self::NOTE_COUNT)?;

        let midi_program_change = r.read_u8(&MIDI_PROGRAM_CHANGE)?;
        let sliders = [Slider::read(&mut r)?, Slider::read(&mut r)?];
        r.skip(17)?;

        Ok(Program {
            file_size,
            file_type,
            pads,
            midi_program_change,
            sliders,
        })
    }

    /// Encode this program as exactly 10756 bytes, regenerating both note
    /// tables from the pads' live MIDI note assignments.
    pub fn serialize(&self) -> Vec<u8> {
        let mut w = RecordWriter::with_capacity(Self::SIZE);
        w.write_u16(self.file_size);
        w.pad(2);
        w.write_bytes(&self.file_type);
        w.pad(4);
        for pad in &self.pads {
            w.write_bytes(&pad.serialize());
        }
        w.write_bytes(&self.pad_midi_notes());
        w.write_bytes(&self.midi_note_pads());
        w.write_u8(self.midi_program_change);
        self.sliders[0].write(&mut w);
        self.sliders[1].write(&mut w);
        w.pad(17);
        w.finish()
    }

    /// Declared file length from the header.
    pub fn file_size(&self) -> u16 {
        self.file_size
    }

    /// Opaque 16-byte file type field ("MPC1000 PGM 1.00" in the factory
    /// image), preserved verbatim.
    pub fn file_type(&self) -> &[u8; 16] {
        &self.file_type
    }

    pub fn pads(&self) -> &[Pad] {
        &self.pads
    }

    pub fn pads_mut(&mut self) -> &mut [Pad] {
        &mut self.pads
    }

    /// 0="Off", 1 to 128.
    pub fn midi_program_change(&self) -> u8 {
        self.midi_program_change
    }

    pub fn set_midi_program_change(&mut self, value: u8) -> Result<()> {
        MIDI_PROGRAM_CHANGE.store_u8(&mut self.midi_program_change, value)
    }

    pub fn sliders(&self) -> &[Slider; 2] {
        &self.sliders
    }

    pub fn sliders_mut(&mut self) -> &mut [Slider; 2] {
        &mut self.sliders
    }

    /// The authoritative pad→note table, read live from the pads.
    pub fn pad_midi_notes(&self) -> [u8; Self::PAD_COUNT] {
        let mut table = [0u8; Self::PAD_COUNT];
        for (entry, pad) in table.iter_mut().zip(&self.pads) {
            *entry = pad.midi_note();
        }
        table
    }

    /// The derived note→pad table: `NO_PAD` (64) for unassigned notes,
    /// last-writer-wins if two pads share a note.
    pub fn midi_note_pads(&self) -> [u8; Self::NOTE_COUNT] {
        let mut table = [NO_PAD; Self::NOTE_COUNT];
        for (i, pad) in self.pads.iter().enumerate() {
            table[pad.midi_note() as usize] = i as u8;
        }
        table
    }
}

impl Default for Program {
    /// The factory program: every pad empty, chromatic-kit note layout.
    fn default() -> Self {
        Program::parse(DEFAULT_PGM_DATA).expect("embedded factory program image is well-formed")
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "file_size = {}", self.file_size)?;
        writeln!(f, "file_type = {}", String::from_utf8_lossy(&self.file_type))?;
        writeln!(f, "pad_midi_notes =")?;
        writeln!(f, "{}", hex_byte_grid(&self.pad_midi_notes(), 4))?;
        writeln!(f, "midi_note_pads =")?;
        writeln!(f, "{}", hex_byte_grid(&self.midi_note_pads(), 4))?;
        writeln!(f, "midi_program_change = {}", self.midi_program_change)?;
        for (i, slider) in self.sliders.iter().enumerate() {
            writeln!(f, "Slider {}:", i + 1)?;
            writeln!(f, "{}", indent(&slider.to_string(), 4))?;
        }
        for (i, pad) in self.pads.iter().enumerate() {
            writeln!(f, "Pad {i}:")?;
            writeln!(f, "{}", indent(&pad.to_string(), 4))?;
        }
        Ok(())
    }
}
