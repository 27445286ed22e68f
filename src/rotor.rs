//! Rotor: a permutation wheel with a mutable rotational offset.
//!
//! The three historical rotor types share one struct and differ only in
//! their [`RotorKind`]: reflectors never move and sit in slot 0, fixed
//! rotors take part in the signal path but never step, and moving rotors
//! step and carry notches that drive their left neighbour.

use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};
use crate::permutation::Permutation;

/// Capability set of a rotor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotorKind {
    /// Non-rotating wheel that sends the signal back through the stack.
    Reflector,
    /// Non-rotating wheel in the signal path.
    Fixed,
    /// Rotating wheel; `notches` are alphabet indices.
    Moving { notches: Vec<usize> },
}

/// A rotor: immutable wiring plus its current setting.
///
/// Cloning is cheap; the permutation is shared through an [`Arc`]. A
/// [`Machine`](crate::Machine) clones catalog rotors into its slots so
/// that rotor state never leaks between machines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotor {
    name: String,
    kind: RotorKind,
    permutation: Arc<Permutation>,
    setting: usize,
}

impl Rotor {
    /// Creates a reflector named `name` wired by `perm`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidReflector`] unless `perm` is its own
    /// inverse and has no fixed points.
    pub fn reflector(name: impl Into<String>, perm: Permutation) -> Result<Self> {
        let name = name.into();
        if !perm.is_involution() || !perm.derangement() {
            return Err(EnigmaError::InvalidReflector(name));
        }
        Ok(Self::build(name, RotorKind::Reflector, perm))
    }

    /// Creates a non-moving rotor named `name` wired by `perm`.
    pub fn fixed(name: impl Into<String>, perm: Permutation) -> Self {
        Self::build(name.into(), RotorKind::Fixed, perm)
    }

    /// Creates a moving rotor with the given notch symbols.
    ///
    /// # Errors
    /// - [`EnigmaError::MissingNotch`] if `notches` is empty.
    /// - [`EnigmaError::UnknownSymbol`] if a notch is outside the alphabet.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use enigma::{Alphabet, Permutation, Rotor};
    ///
    /// let alpha = Arc::new(Alphabet::default());
    /// let perm = Permutation::new("(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)", alpha).unwrap();
    /// let mut rotor = Rotor::moving("I", perm, "Q").unwrap();
    /// rotor.set_symbol('Q').unwrap();
    /// assert!(rotor.at_notch());
    /// rotor.advance();
    /// assert_eq!(rotor.setting(), 17);
    /// ```
    pub fn moving(name: impl Into<String>, perm: Permutation, notches: &str) -> Result<Self> {
        let name = name.into();
        let mut indices = Vec::new();
        for c in notches.chars() {
            let index = perm.alphabet().to_int(c)?;
            if !indices.contains(&index) {
                indices.push(index);
            }
        }
        if indices.is_empty() {
            return Err(EnigmaError::MissingNotch(name));
        }
        Ok(Self::build(
            name,
            RotorKind::Moving { notches: indices },
            perm,
        ))
    }

    fn build(name: String, kind: RotorKind, perm: Permutation) -> Self {
        Rotor {
            name,
            kind,
            permutation: Arc::new(perm),
            setting: 0,
        }
    }

    /// Returns the rotor's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the rotor's capability set.
    pub fn kind(&self) -> &RotorKind {
        &self.kind
    }

    /// Returns the rotor's wiring.
    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    /// Returns the alphabet the wiring is defined over.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        self.permutation.alphabet()
    }

    /// Returns the alphabet size.
    pub fn size(&self) -> usize {
        self.permutation.size()
    }

    /// Returns the current setting, an index into the alphabet.
    pub fn setting(&self) -> usize {
        self.setting
    }

    /// Returns true for reflectors.
    pub fn is_reflector(&self) -> bool {
        matches!(self.kind, RotorKind::Reflector)
    }

    /// Returns true iff this rotor takes part in stepping.
    pub fn rotates(&self) -> bool {
        matches!(self.kind, RotorKind::Moving { .. })
    }

    /// Sets the rotational offset to `position`.
    ///
    /// # Errors
    /// - [`EnigmaError::IndexOutOfRange`] if `position >= size()`.
    /// - [`EnigmaError::ReflectorPositioned`] for a non-zero reflector setting.
    pub fn set(&mut self, position: usize) -> Result<()> {
        if position >= self.size() {
            return Err(EnigmaError::IndexOutOfRange {
                index: position,
                size: self.size(),
            });
        }
        if self.is_reflector() && position != 0 {
            return Err(EnigmaError::ReflectorPositioned(self.name.clone()));
        }
        self.setting = position;
        Ok(())
    }

    /// Sets the rotational offset to the index of `symbol`.
    ///
    /// # Errors
    /// As [`set`](Self::set), plus [`EnigmaError::UnknownSymbol`].
    pub fn set_symbol(&mut self, symbol: char) -> Result<()> {
        let position = self.alphabet().to_int(symbol)?;
        self.set(position)
    }

    /// Signal entering from the right: `wrap(permute(wrap(i + s)) - s)`.
    pub fn convert_forward(&self, index: usize) -> usize {
        let perm = &self.permutation;
        let offset = self.setting as isize;
        let contact = perm.wrap(index as isize + offset);
        perm.wrap(perm.permute(contact) as isize - offset)
    }

    /// Signal entering from the left: `wrap(invert(wrap(i + s)) - s)`.
    pub fn convert_backward(&self, index: usize) -> usize {
        let perm = &self.permutation;
        let offset = self.setting as isize;
        let contact = perm.wrap(index as isize + offset);
        perm.wrap(perm.invert(contact) as isize - offset)
    }

    /// Returns true iff the symbol at the current setting is a notch.
    pub fn at_notch(&self) -> bool {
        match &self.kind {
            RotorKind::Moving { notches } => notches.contains(&self.setting),
            _ => false,
        }
    }

    /// Steps a moving rotor forward by one position; no-op otherwise.
    pub fn advance(&mut self) {
        if self.rotates() {
            self.setting = (self.setting + 1) % self.size();
        }
    }

    /// Returns the notch symbols, empty for non-moving rotors.
    pub fn notches(&self) -> String {
        match &self.kind {
            RotorKind::Moving { notches } => notches
                .iter()
                .map(|&i| self.alphabet().symbol(i))
                .collect(),
            _ => String::new(),
        }
    }
}
