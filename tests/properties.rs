//! Property tests over permutations and whole machines.

mod common;

use std::sync::Arc;

use proptest::prelude::*;
use proptest::sample::{select, subsequence};

use common::{encipher, naval};
use enigma::{Alphabet, Permutation};

const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const MOVING: [&str; 8] = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII"];

fn letters() -> Vec<char> {
    LETTERS.chars().collect()
}

/// Cycle notation for a random permutation: a shuffled subset of the
/// alphabet cut into cycles of one to five symbols.
fn cycle_text() -> impl Strategy<Value = String> {
    (
        subsequence(letters(), 0..=26).prop_shuffle(),
        prop::collection::vec(1usize..=5, 26),
    )
        .prop_map(|(symbols, lengths)| {
            let mut rest = &symbols[..];
            let mut cycles = Vec::new();
            for len in lengths {
                if rest.is_empty() {
                    break;
                }
                let (head, tail) = rest.split_at(len.min(rest.len()));
                cycles.push(format!("({})", head.iter().collect::<String>()));
                rest = tail;
            }
            cycles.join(" ")
        })
}

/// Plugboard text made of disjoint letter pairs.
fn plugboard_text() -> impl Strategy<Value = String> {
    subsequence(letters(), 0..=20)
        .prop_shuffle()
        .prop_map(|symbols| {
            symbols
                .chunks_exact(2)
                .map(|pair| format!("({}{})", pair[0], pair[1]))
                .collect::<Vec<_>>()
                .join(" ")
        })
}

/// A random settings line for the five-slot naval configuration.
fn settings_line() -> impl Strategy<Value = String> {
    (
        select(vec!["B", "C"]),
        select(vec!["Beta", "Gamma"]),
        subsequence(MOVING.to_vec(), 3).prop_shuffle(),
        "[A-Z]{4}",
        plugboard_text(),
    )
        .prop_map(|(reflector, fixed, moving, positions, plugboard)| {
            format!(
                "* {} {} {} {} {}",
                reflector,
                fixed,
                moving.join(" "),
                positions,
                plugboard
            )
        })
}

proptest! {
    #[test]
    fn invert_undoes_permute(cycles in cycle_text()) {
        let perm = Permutation::new(&cycles, Arc::new(Alphabet::default())).unwrap();
        for p in 0..perm.size() {
            prop_assert_eq!(perm.invert(perm.permute(p)), p);
            prop_assert_eq!(perm.permute(perm.invert(p)), p);
        }
    }

    #[test]
    fn display_reparses_to_same_mapping(cycles in cycle_text()) {
        let alpha = Arc::new(Alphabet::default());
        let perm = Permutation::new(&cycles, alpha.clone()).unwrap();
        let again = Permutation::new(&perm.to_string(), alpha).unwrap();
        for p in 0..perm.size() {
            prop_assert_eq!(perm.permute(p), again.permute(p));
        }
    }

    #[test]
    fn machine_is_reciprocal(settings in settings_line(), msg in "[A-Z]{0,80}") {
        let config = naval();
        let cipher = encipher(&config, &settings, &msg);
        prop_assert_eq!(cipher.len(), msg.len());
        prop_assert_eq!(encipher(&config, &settings, &cipher), msg);
    }

    #[test]
    fn no_symbol_enciphers_to_itself(settings in settings_line(), msg in "[A-Z]{1,80}") {
        let config = naval();
        let cipher = encipher(&config, &settings, &msg);
        for (plain, enciphered) in msg.chars().zip(cipher.chars()) {
            prop_assert_ne!(plain, enciphered);
        }
    }
}
