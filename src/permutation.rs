//! Permutation: a bijection over an [`Alphabet`] written in cycle notation.
//!
//! The cycle text is parsed once into forward and inverse index tables, so
//! every lookup during enciphering is a single table read. Symbols that
//! appear in no cycle map to themselves.

use std::fmt;
use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};

/// A permutation of the indices `0..alphabet.size()`.
///
/// Built from text of the form `"(ABC) (DE)"`: `A -> B -> C -> A`,
/// `D -> E -> D`, every other symbol fixed. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    alphabet: Arc<Alphabet>,
    cycles: Vec<Vec<usize>>,
    forward: Vec<usize>,
    inverse: Vec<usize>,
}

impl Permutation {
    /// Parses `cycles` over `alphabet`.
    ///
    /// Whitespace is ignored, so `"(AB)(CD)"` and `"( A B ) ( C D )"` are
    /// equivalent.
    ///
    /// # Errors
    /// - [`EnigmaError::MalformedCycle`] for text outside a group, nested or
    ///   unmatched parentheses, an unterminated group, or an empty group.
    /// - [`EnigmaError::UnknownSymbol`] for a symbol outside the alphabet.
    /// - [`EnigmaError::DuplicateCycleSymbol`] if a symbol occurs twice.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use enigma::{Alphabet, Permutation};
    ///
    /// let alpha = Arc::new(Alphabet::new("ABCD").unwrap());
    /// let perm = Permutation::new("(ABCD)", alpha).unwrap();
    /// assert_eq!(perm.permute_symbol('D').unwrap(), 'A');
    /// assert_eq!(perm.invert_symbol('A').unwrap(), 'D');
    /// ```
    pub fn new(cycles: &str, alphabet: Arc<Alphabet>) -> Result<Self> {
        let parsed = parse_cycles(cycles, &alphabet)?;
        Ok(Self::from_cycles(parsed, alphabet))
    }

    /// The permutation that fixes every symbol.
    pub fn identity(alphabet: Arc<Alphabet>) -> Self {
        Self::from_cycles(Vec::new(), alphabet)
    }

    /// Builds the lookup tables from already validated, disjoint cycles.
    fn from_cycles(cycles: Vec<Vec<usize>>, alphabet: Arc<Alphabet>) -> Self {
        let n = alphabet.size();
        let mut forward: Vec<usize> = (0..n).collect();
        for cycle in &cycles {
            for (k, &from) in cycle.iter().enumerate() {
                forward[from] = cycle[(k + 1) % cycle.len()];
            }
        }
        let mut inverse = vec![0; n];
        for (from, &to) in forward.iter().enumerate() {
            inverse[to] = from;
        }
        Permutation {
            alphabet,
            cycles,
            forward,
            inverse,
        }
    }

    /// Returns the size of the alphabet this permutation acts on.
    pub fn size(&self) -> usize {
        self.forward.len()
    }

    /// Returns `p` modulo [`size`](Self::size), always in `[0, size)`.
    ///
    /// Accepts negative values so callers can subtract rotor offsets before
    /// wrapping.
    pub fn wrap(&self, p: isize) -> usize {
        p.rem_euclid(self.size() as isize) as usize
    }

    /// Applies the permutation to index `p` (taken modulo the size).
    pub fn permute(&self, p: usize) -> usize {
        self.forward[p % self.size()]
    }

    /// Applies the inverse permutation to index `c` (taken modulo the size).
    pub fn invert(&self, c: usize) -> usize {
        self.inverse[c % self.size()]
    }

    /// Applies the permutation to a symbol.
    ///
    /// # Errors
    /// Returns [`EnigmaError::UnknownSymbol`] if `p` is not in the alphabet.
    pub fn permute_symbol(&self, p: char) -> Result<char> {
        let index = self.alphabet.to_int(p)?;
        Ok(self.alphabet.symbol(self.permute(index)))
    }

    /// Applies the inverse permutation to a symbol.
    ///
    /// # Errors
    /// Returns [`EnigmaError::UnknownSymbol`] if `c` is not in the alphabet.
    pub fn invert_symbol(&self, c: char) -> Result<char> {
        let index = self.alphabet.to_int(c)?;
        Ok(self.alphabet.symbol(self.invert(index)))
    }

    /// Returns the alphabet this permutation was built over.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// Returns the parsed cycles as index sequences, in source order.
    pub fn cycles(&self) -> &[Vec<usize>] {
        &self.cycles
    }

    /// Returns true iff no symbol maps to itself.
    ///
    /// A symbol listed in a one-element cycle such as `(S)` is a fixed
    /// point, so it does not count as covered.
    pub fn derangement(&self) -> bool {
        self.forward.iter().enumerate().all(|(i, &to)| i != to)
    }

    /// Returns true iff the permutation is its own inverse.
    pub fn is_involution(&self) -> bool {
        self.forward
            .iter()
            .enumerate()
            .all(|(i, &to)| self.forward[to] == i)
    }
}

impl fmt::Display for Permutation {
    /// Renders canonical cycle notation, e.g. `(ABC) (DE)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, cycle) in self.cycles.iter().enumerate() {
            if k > 0 {
                write!(f, " ")?;
            }
            write!(f, "(")?;
            for &i in cycle {
                write!(f, "{}", self.alphabet.symbol(i))?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// Parses cycle notation into disjoint index cycles.
fn parse_cycles(text: &str, alphabet: &Alphabet) -> Result<Vec<Vec<usize>>> {
    let mut seen = vec![false; alphabet.size()];
    let mut cycles = Vec::new();
    let mut current: Option<Vec<usize>> = None;

    for c in text.chars() {
        if c.is_whitespace() {
            continue;
        }
        match c {
            '(' => {
                if current.is_some() {
                    return Err(EnigmaError::MalformedCycle("nested '('".to_string()));
                }
                current = Some(Vec::new());
            }
            ')' => match current.take() {
                None => {
                    return Err(EnigmaError::MalformedCycle("unmatched ')'".to_string()));
                }
                Some(cycle) if cycle.is_empty() => {
                    return Err(EnigmaError::MalformedCycle("empty cycle".to_string()));
                }
                Some(cycle) => cycles.push(cycle),
            },
            _ => {
                let cycle = current.as_mut().ok_or_else(|| {
                    EnigmaError::MalformedCycle(format!("symbol '{}' outside a cycle", c))
                })?;
                let index = alphabet.to_int(c)?;
                if seen[index] {
                    return Err(EnigmaError::DuplicateCycleSymbol(c));
                }
                seen[index] = true;
                cycle.push(index);
            }
        }
    }

    if current.is_some() {
        return Err(EnigmaError::MalformedCycle(
            "unterminated cycle".to_string(),
        ));
    }
    Ok(cycles)
}
