//! Configuration and settings-line parsing.
//!
//! A configuration describes the hardware: the alphabet, the slot and pawl
//! counts, and the catalog of available rotors. A settings line picks
//! rotors from that catalog, sets their initial positions and wires the
//! plugboard.
//!
//! # Configuration format
//!
//! ```text
//! ABCDEFGHIJKLMNOPQRSTUVWXYZ          alphabet (first non-empty line)
//! 5 3                                 slots, pawls
//! I MQ      (AELTPHQXRU) (BKNW) ...   NAME TYPE CYCLES...
//! Beta N    (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
//! B R       (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP)
//!           (RX) (SZ) (TV)
//! ```
//!
//! `TYPE` is `R` for a reflector, `N` for a fixed rotor and `M` followed
//! by the notch symbols for a moving rotor. Cycles may continue across
//! lines; every token starting with `(` belongs to the preceding rotor.
//!
//! # Settings format
//!
//! ```text
//! * B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)
//! ```

use std::fmt;
use std::iter::Peekable;
use std::path::Path;
use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::catalog::RotorCatalog;
use crate::error::{EnigmaError, Result, SessionError};
use crate::machine::Machine;
use crate::permutation::Permutation;
use crate::rotor::Rotor;

/// Marker token opening a settings line.
pub const SETTINGS_MARKER: &str = "*";

/// Parsed machine configuration.
#[derive(Debug, Clone)]
pub struct MachineConfig {
    alphabet: Arc<Alphabet>,
    num_rotors: usize,
    num_pawls: usize,
    catalog: RotorCatalog,
}

impl MachineConfig {
    /// Parses configuration text.
    ///
    /// # Errors
    /// - [`EnigmaError::ConfigTruncated`] if the alphabet, either count or
    ///   every rotor description is missing.
    /// - [`EnigmaError::InvalidNumber`] for a non-numeric count.
    /// - [`EnigmaError::BadRotorDescription`] for an unknown type tag or a
    ///   missing rotor name.
    /// - Any error raised while building the alphabet, a permutation or a
    ///   rotor.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines();
        let alphabet_line = lines
            .by_ref()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .ok_or(EnigmaError::ConfigTruncated("alphabet"))?;
        let alphabet = Arc::new(Alphabet::new(alphabet_line)?);

        let mut tokens = lines.flat_map(str::split_whitespace).peekable();
        let num_rotors = parse_count(tokens.next(), "rotor count")?;
        let num_pawls = parse_count(tokens.next(), "pawl count")?;

        let mut catalog = RotorCatalog::new(alphabet.clone());
        while tokens.peek().is_some() {
            let rotor = parse_rotor(&mut tokens, &alphabet)?;
            catalog.insert(rotor)?;
        }
        if catalog.is_empty() {
            return Err(EnigmaError::ConfigTruncated("rotor descriptions"));
        }

        tracing::debug!(
            alphabet = %alphabet,
            num_rotors,
            num_pawls,
            rotors = catalog.len(),
            "configuration loaded"
        );
        Ok(MachineConfig {
            alphabet,
            num_rotors,
            num_pawls,
            catalog,
        })
    }

    /// Reads and parses the configuration file at `path`.
    ///
    /// # Errors
    /// [`SessionError::Io`] if the file cannot be read, otherwise any error
    /// of [`parse`](Self::parse).
    pub fn from_path(path: impl AsRef<Path>) -> std::result::Result<Self, SessionError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Ok(Self::parse(&text)?)
    }

    /// Returns the configured alphabet.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// Returns the number of rotor slots.
    pub fn num_rotors(&self) -> usize {
        self.num_rotors
    }

    /// Returns the number of pawls.
    pub fn num_pawls(&self) -> usize {
        self.num_pawls
    }

    /// Returns the rotor catalog.
    pub fn catalog(&self) -> &RotorCatalog {
        &self.catalog
    }

    /// Builds an empty machine over this configuration's catalog.
    ///
    /// # Errors
    /// Any error of [`Machine::new`].
    pub fn build_machine(&self) -> Result<Machine<'_>> {
        Machine::new(
            self.alphabet.clone(),
            self.num_rotors,
            self.num_pawls,
            &self.catalog,
        )
    }
}

fn parse_count(token: Option<&str>, what: &'static str) -> Result<usize> {
    let token = token.ok_or(EnigmaError::ConfigTruncated(what))?;
    token
        .parse()
        .map_err(|_| EnigmaError::InvalidNumber(token.to_string()))
}

fn parse_rotor<'a, I>(tokens: &mut Peekable<I>, alphabet: &Arc<Alphabet>) -> Result<Rotor>
where
    I: Iterator<Item = &'a str>,
{
    let name = tokens
        .next()
        .ok_or(EnigmaError::ConfigTruncated("rotor name"))?;
    if name.starts_with('(') {
        return Err(EnigmaError::BadRotorDescription(format!(
            "expected a rotor name, found '{}'",
            name
        )));
    }
    let tag = tokens
        .next()
        .ok_or(EnigmaError::ConfigTruncated("rotor type"))?;

    let mut cycles = Vec::new();
    while let Some(token) = tokens.next_if(|t| t.starts_with('(')) {
        cycles.push(token);
    }
    let perm = Permutation::new(&cycles.join(" "), alphabet.clone())?;

    let mut chars = tag.chars();
    match (chars.next(), chars.as_str()) {
        (Some('R'), "") => Rotor::reflector(name, perm),
        (Some('N'), "") => Ok(Rotor::fixed(name, perm)),
        (Some('M'), notches) => Rotor::moving(name, perm, notches),
        _ => Err(EnigmaError::BadRotorDescription(format!(
            "unknown type '{}' for rotor '{}'",
            tag, name
        ))),
    }
}

/// A parsed settings line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Rotor names, reflector first.
    pub rotors: Vec<String>,
    /// Initial positions of slots `1..num_rotors`.
    pub positions: String,
    /// Plugboard cycle text, possibly empty.
    pub plugboard: String,
}

impl Settings {
    /// Parses a settings line for a machine with `num_rotors` slots.
    ///
    /// Only the shape of the line is checked here; rotor names, positions
    /// and plugboard cycles are validated when the settings are applied.
    ///
    /// # Errors
    /// - [`EnigmaError::MissingSettingsMarker`] unless the line starts with `*`.
    /// - [`EnigmaError::RotorCountMismatch`] unless exactly `num_rotors`
    ///   names follow the marker.
    /// - [`EnigmaError::SettingLengthMismatch`] if the positions are missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::Settings;
    ///
    /// let s = Settings::parse("* B Beta III IV I AXLE (YF) (ZH)", 5).unwrap();
    /// assert_eq!(s.rotors, ["B", "Beta", "III", "IV", "I"]);
    /// assert_eq!(s.positions, "AXLE");
    /// assert_eq!(s.plugboard, "(YF) (ZH)");
    /// ```
    pub fn parse(line: &str, num_rotors: usize) -> Result<Self> {
        let mut tokens = line.split_whitespace().peekable();
        if tokens.next() != Some(SETTINGS_MARKER) {
            return Err(EnigmaError::MissingSettingsMarker);
        }

        let mut words = Vec::with_capacity(num_rotors + 1);
        while let Some(word) = tokens.next_if(|t| !t.starts_with('(')) {
            words.push(word);
        }
        // Rotor names followed by exactly one positions token.
        let positions = match words.len() {
            n if n < num_rotors => {
                return Err(EnigmaError::RotorCountMismatch {
                    expected: num_rotors,
                    actual: n,
                })
            }
            n if n == num_rotors => {
                return Err(EnigmaError::SettingLengthMismatch {
                    expected: num_rotors.saturating_sub(1),
                    actual: 0,
                })
            }
            n if n > num_rotors + 1 => {
                return Err(EnigmaError::RotorCountMismatch {
                    expected: num_rotors,
                    actual: n - 1,
                })
            }
            _ => words.pop().unwrap_or_default().to_string(),
        };
        let rotors = words.into_iter().map(str::to_string).collect();
        let plugboard = tokens.collect::<Vec<_>>().join(" ");

        Ok(Settings {
            rotors,
            positions,
            plugboard,
        })
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", SETTINGS_MARKER, self.rotors.join(" "), self.positions)?;
        if !self.plugboard.is_empty() {
            write!(f, " {}", self.plugboard)?;
        }
        Ok(())
    }
}
