//! RotorCatalog: the registry of available rotors.
//!
//! Rotors are stored in an arena and addressed by [`RotorId`]; a name index
//! resolves the names used on settings lines. The catalog only holds
//! blueprints at setting 0. Machines borrow it immutably and keep their own
//! per-slot copies, so one catalog can back any number of machines.

use std::collections::HashMap;
use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};
use crate::rotor::Rotor;

/// Identifier of a rotor within a [`RotorCatalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RotorId(pub usize);

/// Arena of rotor blueprints sharing one alphabet.
#[derive(Debug, Clone)]
pub struct RotorCatalog {
    alphabet: Arc<Alphabet>,
    rotors: Vec<Rotor>,
    by_name: HashMap<String, RotorId>,
}

impl RotorCatalog {
    /// Creates an empty catalog over `alphabet`.
    pub fn new(alphabet: Arc<Alphabet>) -> Self {
        RotorCatalog {
            alphabet,
            rotors: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Adds `rotor` to the catalog.
    ///
    /// # Errors
    /// - [`EnigmaError::DuplicateRotorName`] if the name is taken.
    /// - [`EnigmaError::AlphabetMismatch`] if the rotor is wired over a
    ///   different alphabet.
    pub fn insert(&mut self, rotor: Rotor) -> Result<RotorId> {
        if **rotor.alphabet() != *self.alphabet {
            return Err(EnigmaError::AlphabetMismatch);
        }
        if self.by_name.contains_key(rotor.name()) {
            return Err(EnigmaError::DuplicateRotorName(rotor.name().to_string()));
        }
        let id = RotorId(self.rotors.len());
        self.by_name.insert(rotor.name().to_string(), id);
        self.rotors.push(rotor);
        Ok(id)
    }

    /// Returns the rotor with the given id.
    pub fn get(&self, id: RotorId) -> Option<&Rotor> {
        self.rotors.get(id.0)
    }

    /// Resolves a rotor name.
    pub fn find(&self, name: &str) -> Option<RotorId> {
        self.by_name.get(name).copied()
    }

    /// Resolves a rotor name straight to its blueprint.
    ///
    /// # Errors
    /// Returns [`EnigmaError::UnknownRotorName`] if no rotor has that name.
    pub fn lookup(&self, name: &str) -> Result<&Rotor> {
        self.find(name)
            .and_then(|id| self.get(id))
            .ok_or_else(|| EnigmaError::UnknownRotorName(name.to_string()))
    }

    /// Returns the number of rotors.
    pub fn len(&self) -> usize {
        self.rotors.len()
    }

    /// Returns true if the catalog holds no rotors.
    pub fn is_empty(&self) -> bool {
        self.rotors.is_empty()
    }

    /// Iterates over the rotors in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Rotor> {
        self.rotors.iter()
    }

    /// Returns the alphabet shared by every rotor.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }
}
