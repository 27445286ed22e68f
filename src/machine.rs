//! Machine: the complete rotor cipher.
//!
//! Composes a plugboard and an ordered stack of rotor slots. Slot 0 holds
//! the reflector and slot `num_rotors - 1` the fast rotor. Each symbol is
//! enciphered by stepping the rotors and then sending the signal through
//! plugboard, rotors right to left, reflector, rotors left to right and
//! plugboard again. Enciphering and deciphering are the same operation.

use std::fmt;
use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::catalog::RotorCatalog;
use crate::config::Settings;
use crate::error::{EnigmaError, Result};
use crate::permutation::Permutation;
use crate::rotor::Rotor;
use crate::trace::{ConvertTrace, TraceSink};

/// A configured rotor machine borrowing its rotors from a [`RotorCatalog`].
///
/// # Architecture
///
/// The catalog holds immutable rotor blueprints. [`insert_rotors`] clones
/// the named blueprints into the machine's own slots, so stepping one
/// machine never disturbs another machine built over the same catalog.
///
/// Every conversion mutates rotor settings: the same plaintext symbol
/// enciphers differently at different message positions. Calls must be
/// serialized by the caller; all mutating methods take `&mut self`.
///
/// [`insert_rotors`]: Self::insert_rotors
pub struct Machine<'c> {
    alphabet: Arc<Alphabet>,
    num_rotors: usize,
    num_pawls: usize,
    catalog: &'c RotorCatalog,
    slots: Vec<Rotor>,
    plugboard: Permutation,
    trace: Option<Box<dyn TraceSink>>,
}

impl fmt::Debug for Machine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.slots.iter().map(Rotor::name).collect();
        f.debug_struct("Machine")
            .field("num_rotors", &self.num_rotors)
            .field("num_pawls", &self.num_pawls)
            .field("slots", &names)
            .field("positions", &self.positions())
            .field("plugboard", &self.plugboard.to_string())
            .field("traced", &self.trace.is_some())
            .finish()
    }
}

impl<'c> Machine<'c> {
    /// Creates a machine with `num_rotors` slots and `num_pawls` pawls.
    ///
    /// No rotors are inserted and the plugboard is the identity.
    ///
    /// # Errors
    /// - [`EnigmaError::InvalidMachineShape`] unless `1 < num_rotors` and
    ///   `num_pawls < num_rotors`.
    /// - [`EnigmaError::AlphabetMismatch`] if the catalog uses another
    ///   alphabet.
    pub fn new(
        alphabet: Arc<Alphabet>,
        num_rotors: usize,
        num_pawls: usize,
        catalog: &'c RotorCatalog,
    ) -> Result<Self> {
        if num_rotors < 2 || num_pawls >= num_rotors {
            return Err(EnigmaError::InvalidMachineShape {
                num_rotors,
                num_pawls,
            });
        }
        if **catalog.alphabet() != *alphabet {
            return Err(EnigmaError::AlphabetMismatch);
        }
        let plugboard = Permutation::identity(alphabet.clone());
        Ok(Machine {
            alphabet,
            num_rotors,
            num_pawls,
            catalog,
            slots: Vec::with_capacity(num_rotors),
            plugboard,
            trace: None,
        })
    }

    /// Returns the number of rotor slots.
    pub fn num_rotors(&self) -> usize {
        self.num_rotors
    }

    /// Returns the number of pawls.
    pub fn num_pawls(&self) -> usize {
        self.num_pawls
    }

    /// Returns the machine alphabet.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// Returns the current plugboard.
    pub fn plugboard(&self) -> &Permutation {
        &self.plugboard
    }

    /// Returns the rotor catalog the machine draws from.
    pub fn catalog(&self) -> &'c RotorCatalog {
        self.catalog
    }

    /// Returns the rotor in slot `k`, or `None` if the slot is empty.
    pub fn get_rotor(&self, k: usize) -> Option<&Rotor> {
        self.slots.get(k)
    }

    /// Returns the settings of slots `1..num_rotors` as symbols.
    pub fn positions(&self) -> String {
        self.slots
            .iter()
            .skip(1)
            .map(|r| self.alphabet.symbol(r.setting()))
            .collect()
    }

    /// Installs a sink receiving one [`ConvertTrace`] per converted symbol.
    pub fn set_trace_sink(&mut self, sink: Box<dyn TraceSink>) {
        self.trace = Some(sink);
    }

    /// Removes and returns the installed trace sink.
    pub fn clear_trace_sink(&mut self) -> Option<Box<dyn TraceSink>> {
        self.trace.take()
    }

    /// Fills the slots with the named rotors, `names[0]` being the reflector.
    ///
    /// Every inserted rotor starts at setting 0. On error the previous slot
    /// assignment is left unchanged.
    ///
    /// # Errors
    /// - [`EnigmaError::RotorCountMismatch`] if `names.len() != num_rotors`.
    /// - [`EnigmaError::UnknownRotorName`] for a name not in the catalog.
    /// - [`EnigmaError::RepeatedRotor`] if a name is given twice.
    /// - [`EnigmaError::ReflectorMisplaced`] for a reflector after slot 0.
    /// - [`EnigmaError::MissingReflector`] if slot 0 is not a reflector.
    pub fn insert_rotors<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        if names.len() != self.num_rotors {
            return Err(EnigmaError::RotorCountMismatch {
                expected: self.num_rotors,
                actual: names.len(),
            });
        }

        let mut slots = Vec::with_capacity(self.num_rotors);
        let names: Vec<&str> = names.iter().map(|n| n.as_ref()).collect();
        for (slot, &name) in names.iter().enumerate() {
            let blueprint = self.catalog.lookup(name)?;
            if slot == 0 && !blueprint.is_reflector() {
                return Err(EnigmaError::MissingReflector(name.to_string()));
            }
            if slot > 0 && blueprint.is_reflector() {
                return Err(EnigmaError::ReflectorMisplaced {
                    name: name.to_string(),
                    slot,
                });
            }
            if names[..slot].contains(&name) {
                return Err(EnigmaError::RepeatedRotor(name.to_string()));
            }
            let mut rotor = blueprint.clone();
            rotor.set(0)?;
            slots.push(rotor);
        }

        let moving = slots.iter().filter(|r| r.rotates()).count();
        tracing::debug!(
            rotors = ?names,
            moving,
            pawls = self.num_pawls,
            "inserted rotors"
        );
        self.slots = slots;
        Ok(())
    }

    /// Sets slots `1..num_rotors` from `positions`, leftmost first.
    ///
    /// # Errors
    /// - [`EnigmaError::RotorsNotInserted`] before [`insert_rotors`](Self::insert_rotors).
    /// - [`EnigmaError::SettingLengthMismatch`] unless there are exactly
    ///   `num_rotors - 1` symbols.
    /// - [`EnigmaError::UnknownSymbol`] for a symbol outside the alphabet.
    pub fn set_rotors(&mut self, positions: &str) -> Result<()> {
        let indices = positions
            .chars()
            .map(|c| self.alphabet.to_int(c))
            .collect::<Result<Vec<_>>>();
        self.ensure_inserted()?;
        self.check_setting_length(positions.chars().count())?;
        self.set_rotor_indices(&indices?)
    }

    /// Index-based form of [`set_rotors`](Self::set_rotors).
    ///
    /// # Errors
    /// As [`set_rotors`](Self::set_rotors), with
    /// [`EnigmaError::IndexOutOfRange`] for an index outside the alphabet.
    pub fn set_rotor_indices(&mut self, positions: &[usize]) -> Result<()> {
        self.ensure_inserted()?;
        self.check_setting_length(positions.len())?;
        let size = self.alphabet.size();
        if let Some(&index) = positions.iter().find(|&&p| p >= size) {
            return Err(EnigmaError::IndexOutOfRange { index, size });
        }
        for (rotor, &position) in self.slots[1..].iter_mut().zip(positions) {
            rotor.set(position)?;
        }
        Ok(())
    }

    /// Replaces the plugboard.
    ///
    /// # Errors
    /// Returns [`EnigmaError::AlphabetMismatch`] if `plugboard` is built over
    /// another alphabet.
    pub fn set_plugboard(&mut self, plugboard: Permutation) -> Result<()> {
        if **plugboard.alphabet() != *self.alphabet {
            return Err(EnigmaError::AlphabetMismatch);
        }
        self.plugboard = plugboard;
        Ok(())
    }

    /// Parses `cycles` and installs the result as the plugboard.
    ///
    /// # Errors
    /// Any error of [`Permutation::new`].
    pub fn set_plugboard_cycles(&mut self, cycles: &str) -> Result<()> {
        self.plugboard = Permutation::new(cycles, self.alphabet.clone())?;
        Ok(())
    }

    /// Empties every slot. A fresh [`insert_rotors`](Self::insert_rotors)
    /// is required before converting again.
    pub fn reset_rotors(&mut self) {
        self.slots.clear();
    }

    /// Configures the machine from a parsed settings line.
    ///
    /// Rotors, positions and plugboard are all replaced. On error the
    /// machine keeps its previous configuration.
    ///
    /// # Errors
    /// Any error of [`insert_rotors`](Self::insert_rotors),
    /// [`set_rotors`](Self::set_rotors) or [`Permutation::new`].
    pub fn apply_settings(&mut self, settings: &Settings) -> Result<()> {
        let plugboard = Permutation::new(&settings.plugboard, self.alphabet.clone())?;
        let previous = std::mem::take(&mut self.slots);
        let applied = self
            .insert_rotors(&settings.rotors)
            .and_then(|()| self.set_rotors(&settings.positions));
        if let Err(err) = applied {
            self.slots = previous;
            return Err(err);
        }
        self.plugboard = plugboard;
        tracing::debug!(
            positions = %self.positions(),
            plugboard = %self.plugboard,
            "machine configured"
        );
        Ok(())
    }

    /// Steps the rotors once, as happens before every keystroke.
    ///
    /// Scanning from the fast rotor down to slot 1, every rotor sitting at
    /// a notch whose left neighbour rotates marks itself and that neighbour.
    /// The fast rotor is always marked. Each marked rotor advances exactly
    /// once, which reproduces the double step of the middle rotor.
    pub fn advance_rotors(&mut self) {
        let n = self.slots.len();
        if n == 0 {
            return;
        }
        let mut marked = vec![false; n];
        for slot in (1..n).rev() {
            if self.slots[slot].at_notch() && self.slots[slot - 1].rotates() {
                marked[slot] = true;
                marked[slot - 1] = true;
            }
        }
        marked[n - 1] = true;
        for (rotor, _) in self.slots.iter_mut().zip(marked).filter(|(_, m)| *m) {
            rotor.advance();
        }
    }

    /// Steps the rotors, then enciphers the symbol with index `c`.
    ///
    /// # Errors
    /// - [`EnigmaError::RotorsNotInserted`] if the slots are empty.
    /// - [`EnigmaError::IndexOutOfRange`] if `c` is not a valid index.
    pub fn convert(&mut self, c: usize) -> Result<usize> {
        self.ensure_inserted()?;
        let size = self.alphabet.size();
        if c >= size {
            return Err(EnigmaError::IndexOutOfRange { index: c, size });
        }
        self.advance_rotors();

        let plugged = self.plugboard.permute(c);
        let mut signal = plugged;
        for rotor in self.slots[1..].iter().rev() {
            signal = rotor.convert_forward(signal);
        }
        signal = self.slots[0].convert_forward(signal);
        for rotor in &self.slots[1..] {
            signal = rotor.convert_backward(signal);
        }
        let output = self.plugboard.permute(signal);

        if self.trace.is_some() {
            let event = ConvertTrace {
                positions: self.positions(),
                input: self.alphabet.symbol(c),
                plugged: self.alphabet.symbol(plugged),
                output: self.alphabet.symbol(output),
            };
            if let Some(sink) = self.trace.as_mut() {
                sink.record(&event);
            }
        }
        Ok(output)
    }

    /// Enciphers every symbol of `msg` in order.
    ///
    /// The whole message is validated before the first rotor step, so a
    /// failure leaves the rotor settings untouched.
    ///
    /// # Errors
    /// - [`EnigmaError::RotorsNotInserted`] if the slots are empty.
    /// - [`EnigmaError::UnknownSymbol`] for a symbol outside the alphabet.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::MachineConfig;
    ///
    /// let config = MachineConfig::parse(
    ///     "ABCDEFGHIJKLMNOPQRSTUVWXYZ
    ///      4 3
    ///      I MQ   (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
    ///      II ME  (FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)
    ///      III MV (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
    ///      B R    (AY) (BR) (CU) (DH) (EQ) (FS) (GL) (IP) (JX) (KN) (MO) (TZ) (VW)",
    /// )
    /// .unwrap();
    /// let mut machine = config.build_machine().unwrap();
    /// machine.insert_rotors(&["B", "I", "II", "III"]).unwrap();
    /// machine.set_rotors("AAA").unwrap();
    /// assert_eq!(machine.convert_message("AAAAA").unwrap(), "BDZGO");
    /// ```
    pub fn convert_message(&mut self, msg: &str) -> Result<String> {
        self.ensure_inserted()?;
        let indices = msg
            .chars()
            .map(|c| self.alphabet.to_int(c))
            .collect::<Result<Vec<_>>>()?;
        let mut out = String::with_capacity(msg.len());
        for index in indices {
            let converted = self.convert(index)?;
            out.push(self.alphabet.symbol(converted));
        }
        Ok(out)
    }

    fn ensure_inserted(&self) -> Result<()> {
        if self.slots.is_empty() {
            return Err(EnigmaError::RotorsNotInserted);
        }
        Ok(())
    }

    fn check_setting_length(&self, actual: usize) -> Result<()> {
        let expected = self.num_rotors - 1;
        if actual != expected {
            return Err(EnigmaError::SettingLengthMismatch { expected, actual });
        }
        Ok(())
    }
}
