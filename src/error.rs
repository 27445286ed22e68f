//! Error types for the Enigma library.
//!
//! Every failure is fatal for the configuration or message stream that
//! raised it: the engine never retries and never returns partial output.

use thiserror::Error;

/// Errors produced by the Enigma engine and its configuration loader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnigmaError {
    /// Alphabet string is empty.
    #[error("Alphabet must contain at least one symbol")]
    EmptyAlphabet,
    /// A symbol occurs twice in the alphabet string.
    #[error("Duplicate symbol '{0}' in alphabet")]
    DuplicateSymbol(char),
    /// Alphabet contains whitespace or a delimiter used by cycle/settings text.
    #[error("Symbol {0:?} is reserved and cannot be part of an alphabet")]
    ReservedSymbol(char),
    /// Symbol lookup missed the alphabet.
    #[error("Symbol '{0}' is not in the alphabet")]
    UnknownSymbol(char),
    /// Index lookup outside `[0, size)`.
    #[error("Index {index} is outside the alphabet of size {size}")]
    IndexOutOfRange { index: usize, size: usize },
    /// A symbol occurs more than once across the cycles of a permutation.
    #[error("Symbol '{0}' appears more than once in cycle notation")]
    DuplicateCycleSymbol(char),
    /// Cycle text is not a sequence of `(...)` groups.
    #[error("Malformed cycle notation: {0}")]
    MalformedCycle(String),
    /// Reflector wiring is not a fixed-point-free involution.
    #[error("Reflector '{0}' must pair every symbol with another symbol")]
    InvalidReflector(String),
    /// Moving rotor declared without notches.
    #[error("Moving rotor '{0}' has no notches")]
    MissingNotch(String),
    /// Attempt to rotate a reflector away from setting 0.
    #[error("Reflector '{0}' cannot be set to a non-zero position")]
    ReflectorPositioned(String),
    /// Two catalog entries share a name.
    #[error("Rotor '{0}' is already defined")]
    DuplicateRotorName(String),
    /// Components built over different alphabets were combined.
    #[error("Component is built over a different alphabet")]
    AlphabetMismatch,
    /// Machine requires `num_rotors > 1` and `num_pawls < num_rotors`.
    #[error("Invalid machine shape: {num_rotors} rotors with {num_pawls} pawls")]
    InvalidMachineShape { num_rotors: usize, num_pawls: usize },
    /// Wrong number of rotor names for the machine's slots.
    #[error("Expected {expected} rotors, got {actual}")]
    RotorCountMismatch { expected: usize, actual: usize },
    /// Wrong number of initial positions.
    #[error("Expected {expected} rotor positions, got {actual}")]
    SettingLengthMismatch { expected: usize, actual: usize },
    /// Rotor name missing from the catalog.
    #[error("Unknown rotor '{0}'")]
    UnknownRotorName(String),
    /// The same rotor named twice in one slot assignment.
    #[error("Rotor '{0}' is used more than once")]
    RepeatedRotor(String),
    /// A reflector named for a slot other than 0.
    #[error("Reflector '{name}' placed in slot {slot}")]
    ReflectorMisplaced { name: String, slot: usize },
    /// Slot 0 is not a reflector.
    #[error("Rotor '{0}' in slot 0 is not a reflector")]
    MissingReflector(String),
    /// Positions set or symbols converted before any `insert_rotors`.
    #[error("No rotors are inserted")]
    RotorsNotInserted,
    /// Configuration text ended before a required value.
    #[error("Configuration truncated: missing {0}")]
    ConfigTruncated(&'static str),
    /// A numeric configuration field did not parse.
    #[error("Invalid number '{0}' in configuration")]
    InvalidNumber(String),
    /// A rotor descriptor has an unknown type tag or a bad name.
    #[error("Bad rotor description: {0}")]
    BadRotorDescription(String),
    /// A settings line does not begin with `*`.
    #[error("Settings line must start with '*'")]
    MissingSettingsMarker,
}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, EnigmaError>;

/// Errors raised while processing a message stream.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Engine or configuration failure.
    #[error(transparent)]
    Enigma(#[from] EnigmaError),
    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_duplicate_symbol() {
        let err = EnigmaError::DuplicateSymbol('A');
        assert_eq!(format!("{}", err), "Duplicate symbol 'A' in alphabet");
    }

    #[test]
    fn test_display_rotor_count_mismatch() {
        let err = EnigmaError::RotorCountMismatch {
            expected: 5,
            actual: 4,
        };
        assert_eq!(format!("{}", err), "Expected 5 rotors, got 4");
    }

    #[test]
    fn test_display_reflector_misplaced() {
        let err = EnigmaError::ReflectorMisplaced {
            name: "B".to_string(),
            slot: 2,
        };
        assert_eq!(format!("{}", err), "Reflector 'B' placed in slot 2");
    }

    #[test]
    fn test_display_config_truncated() {
        let err = EnigmaError::ConfigTruncated("pawl count");
        assert_eq!(
            format!("{}", err),
            "Configuration truncated: missing pawl count"
        );
    }

    #[test]
    fn test_session_error_wraps_engine_error() {
        let err: SessionError = EnigmaError::MissingSettingsMarker.into();
        assert_eq!(format!("{}", err), "Settings line must start with '*'");
        assert!(matches!(
            err,
            SessionError::Enigma(EnigmaError::MissingSettingsMarker)
        ));
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(
            EnigmaError::UnknownSymbol('x'),
            EnigmaError::UnknownSymbol('x')
        );
        assert_ne!(
            EnigmaError::UnknownSymbol('x'),
            EnigmaError::DuplicateSymbol('x')
        );
    }

    #[test]
    fn test_error_clone() {
        let err = EnigmaError::UnknownRotorName("VI".to_string());
        let cloned = err.clone();
        assert_eq!(err, cloned);
    }
}
