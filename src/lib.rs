//! Enigma: a rotor cipher machine simulator.
//!
//! Simulates the family of rotor machines built around a plugboard, a stack
//! of interchangeable rotors and a reflector. Before every keystroke the
//! rotors step (including the historical double step of the middle rotor),
//! then the signal runs through the plugboard, the rotors, the reflector and
//! back. The machine is its own inverse: enciphering the ciphertext with the
//! same starting configuration yields the plaintext.
//!
//! # Architecture
//!
//! ```text
//! Alphabet     (symbol <-> index)
//!     ↓ shared via Arc
//! Permutation  (cycle notation, O(1) forward/inverse tables)
//!     ↓ wiring of
//! Rotor        (Reflector | Fixed | Moving{notches}, mutable setting)
//!     ↓ blueprints stored in
//! RotorCatalog (arena addressed by RotorId, name index)
//!     ↓ borrowed by
//! Machine      (per-slot rotor state + plugboard, stepping, signal path)
//!     ↓ driven by
//! Session      (settings lines, message lines, five-letter groups)
//! ```
//!
//! # Examples
//!
//! Encipher and decipher with an M4 configuration:
//!
//! ```
//! use enigma::{MachineConfig, Settings};
//!
//! let config = MachineConfig::parse(
//!     "ABCDEFGHIJKLMNOPQRSTUVWXYZ
//!      5 3
//!      I MQ      (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
//!      III MV    (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
//!      IV MJ     (AEPLIYWCOXMRFZBSTGJQNH) (DV) (KU)
//!      Beta N    (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
//!      B R       (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)",
//! )
//! .unwrap();
//! let settings = Settings::parse("* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)", 5).unwrap();
//!
//! let mut encoder = config.build_machine().unwrap();
//! encoder.apply_settings(&settings).unwrap();
//! let cipher = encoder.convert_message("FROMHISSHOULDERHIAWATHA").unwrap();
//! assert_eq!(cipher, "QVPQSOKOILPUBKJZPISFXDW");
//!
//! let mut decoder = config.build_machine().unwrap();
//! decoder.apply_settings(&settings).unwrap();
//! assert_eq!(decoder.convert_message(&cipher).unwrap(), "FROMHISSHOULDERHIAWATHA");
//! ```

#![deny(clippy::all)]

pub mod alphabet;
pub mod catalog;
pub mod config;
pub mod error;
pub mod machine;
pub mod permutation;
pub mod rotor;
pub mod session;
pub mod trace;

pub use alphabet::Alphabet;
pub use catalog::{RotorCatalog, RotorId};
pub use config::{MachineConfig, Settings};
pub use error::{EnigmaError, Result, SessionError};
pub use machine::Machine;
pub use permutation::Permutation;
pub use rotor::{Rotor, RotorKind};
pub use session::Session;
pub use trace::{ConvertTrace, LogSink, TraceSink, WriterSink};
