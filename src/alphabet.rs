//! Alphabet: bidirectional mapping between symbols and indices.
//!
//! Every other component works on indices modulo the alphabet size; the
//! alphabet is the only place where symbols are resolved.

use std::collections::HashMap;
use std::fmt;

use crate::error::{EnigmaError, Result};

/// Characters that delimit cycle notation and settings lines.
const RESERVED: [char; 3] = ['(', ')', '*'];

/// Ordered set of unique symbols. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    index: HashMap<char, usize>,
}

impl Default for Alphabet {
    /// The 26 upper-case Latin letters.
    fn default() -> Self {
        let symbols: Vec<char> = ('A'..='Z').collect();
        let index = symbols.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Alphabet { symbols, index }
    }
}

impl Alphabet {
    /// Creates an alphabet whose K-th character has index K.
    ///
    /// # Errors
    /// - [`EnigmaError::EmptyAlphabet`] for an empty string.
    /// - [`EnigmaError::ReservedSymbol`] for whitespace, `(`, `)` or `*`.
    /// - [`EnigmaError::DuplicateSymbol`] if any character repeats.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::Alphabet;
    ///
    /// let alpha = Alphabet::new("ABCD").unwrap();
    /// assert_eq!(alpha.to_char(0).unwrap(), 'A');
    /// assert_eq!(alpha.to_int('D').unwrap(), 3);
    /// assert!(Alphabet::new("ABCA").is_err());
    /// ```
    pub fn new(chars: &str) -> Result<Self> {
        let symbols: Vec<char> = chars.chars().collect();
        if symbols.is_empty() {
            return Err(EnigmaError::EmptyAlphabet);
        }
        let mut index = HashMap::with_capacity(symbols.len());
        for (i, &c) in symbols.iter().enumerate() {
            if c.is_whitespace() || RESERVED.contains(&c) {
                return Err(EnigmaError::ReservedSymbol(c));
            }
            if index.insert(c, i).is_some() {
                return Err(EnigmaError::DuplicateSymbol(c));
            }
        }
        Ok(Alphabet { symbols, index })
    }

    /// Returns the number of symbols.
    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if `ch` is a member of this alphabet.
    pub fn contains(&self, ch: char) -> bool {
        self.index.contains_key(&ch)
    }

    /// Returns the symbol at `index`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::IndexOutOfRange`] if `index >= size()`.
    pub fn to_char(&self, index: usize) -> Result<char> {
        self.symbols
            .get(index)
            .copied()
            .ok_or(EnigmaError::IndexOutOfRange {
                index,
                size: self.size(),
            })
    }

    /// Returns the index of `ch`. Inverse of [`to_char`](Self::to_char).
    ///
    /// # Errors
    /// Returns [`EnigmaError::UnknownSymbol`] if `ch` is not a member.
    pub fn to_int(&self, ch: char) -> Result<usize> {
        self.index
            .get(&ch)
            .copied()
            .ok_or(EnigmaError::UnknownSymbol(ch))
    }

    /// Iterates over the symbols in index order.
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.symbols.iter().copied()
    }

    /// Symbol lookup for indices already known to be in range.
    pub(crate) fn symbol(&self, index: usize) -> char {
        self.symbols[index]
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &c in &self.symbols {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
