//! Codec for Akai MPC 1000 program (.pgm) files.
//!
//! A program file holds 64 pad configurations (4 sample slots each), two
//! redundant note/pad mapping tables, and global MIDI/slider settings in a
//! fixed little-endian layout. This crate decodes that layout into typed
//! structs with validated accessors and encodes it back byte-exactly.
//!
//! ```
//! use mpc_pgm::Program;
//!
//! let program = Program::default();
//! let bytes = program.serialize();
//! assert_eq!(bytes.len(), Program::SIZE);
//! assert_eq!(Program::parse(&bytes).unwrap(), program);
//! ```

pub mod error;
pub mod field;
pub mod pad;
pub mod program;
pub mod sample;
mod text;

pub use error::{PgmError, Result};
pub use pad::Pad;
pub use program::{NO_PAD, Program, Slider};
pub use sample::Sample;

/// The factory default program image, byte-for-byte what the device ships
/// with: every pad empty, chromatic-kit note layout, sliders at full range.
pub const DEFAULT_PGM_DATA: &[u8] = include_bytes!("../data/default.pgm");
