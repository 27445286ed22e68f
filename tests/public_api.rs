//! Frozen end-to-end vectors for the public API.
//!
//! Every expected ciphertext here is a snapshot of historically correct
//! machine output: any change indicates a regression in stepping, wiring
//! or the signal path.

mod common;

use std::sync::Arc;

use common::{encipher, enigma_i, naval, HIAWATHA_SETTINGS};
use enigma::session::group_output;
use enigma::{Alphabet, EnigmaError, MachineConfig, Permutation, Session, Settings};

// ═══════════════════════════════════════════════════════════════════════
// Alphabet and Permutation
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn alphabet_four_symbols() {
    let alpha = Alphabet::new("ABCD").unwrap();
    assert_eq!(alpha.size(), 4);
    assert_eq!(alpha.to_int('C').unwrap(), 2);
    assert_eq!(alpha.to_char(3).unwrap(), 'D');
    assert!(!alpha.contains('E'));
    assert_eq!(alpha.to_int('E'), Err(EnigmaError::UnknownSymbol('E')));
    assert_eq!(
        alpha.to_char(4),
        Err(EnigmaError::IndexOutOfRange { index: 4, size: 4 })
    );
}

#[test]
fn permutation_single_cycle() {
    let alpha = Arc::new(Alphabet::new("ABCD").unwrap());
    let perm = Permutation::new("(ABCD)", alpha).unwrap();
    assert_eq!(perm.permute(0), 1);
    assert_eq!(perm.permute(3), 0);
    assert_eq!(perm.invert(0), 3);
    assert_eq!(perm.permute(5), 2, "indices wrap modulo the size");
    assert_eq!(perm.permute_symbol('B').unwrap(), 'C');
    assert_eq!(perm.invert_symbol('B').unwrap(), 'A');
    assert_eq!(perm.wrap(-1), 3);
    assert!(perm.derangement());
    assert!(!perm.is_involution());
}

#[test]
fn permutation_rejects_malformed_input() {
    let alpha = Arc::new(Alphabet::default());
    assert!(matches!(
        Permutation::new("(AB", alpha.clone()),
        Err(EnigmaError::MalformedCycle(_))
    ));
    assert_eq!(
        Permutation::new("(AB) (BC)", alpha.clone()).err(),
        Some(EnigmaError::DuplicateCycleSymbol('B'))
    );
    assert_eq!(
        Permutation::new("(A1)", alpha).err(),
        Some(EnigmaError::UnknownSymbol('1'))
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Enigma I (wide B reflector, rotors I II III)
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn enigma_i_thirty_a() {
    let config = enigma_i();
    assert_eq!(
        encipher(&config, "* UKW-B I II III AAA", &"A".repeat(30)),
        "BDZGOWCXLTKSBTMCDLPBMUQOFXYHCX"
    );
}

#[test]
fn enigma_i_hello_world() {
    let config = enigma_i();
    assert_eq!(
        encipher(&config, "* UKW-B I II III AAA", "HELLOWORLD"),
        "ILBDAAMTAZ"
    );
}

#[test]
fn enigma_i_across_double_step() {
    let config = enigma_i();
    assert_eq!(encipher(&config, "* UKW-B I II III ADU", "AAA"), "EQI");
}

// ═══════════════════════════════════════════════════════════════════════
// Naval M4 (thin reflector, fixed fourth rotor, plugboard)
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn m4_hiawatha() {
    let config = naval();
    assert_eq!(
        encipher(
            &config,
            HIAWATHA_SETTINGS,
            "FROMHISSHOULDERHIAWATHATOOKTHECAMERAOFROSEWOOD"
        ),
        "QVPQSOKOILPUBKJZPISFXDWBHCNSCXNUOAATZXSRCFYDGU"
    );
}

#[test]
fn m4_decrypts_its_own_output() {
    let config = naval();
    assert_eq!(
        encipher(&config, HIAWATHA_SETTINGS, "QVPQSOKOILPUBKJZPISFXDW"),
        "FROMHISSHOULDERHIAWATHA"
    );
}

/// Thin B with Beta at `A` wires up exactly like the wide B reflector.
#[test]
fn m4_emulates_three_rotor_machine() {
    let config = naval();
    assert_eq!(
        encipher(&config, "* B Beta I II III AAAA", &"A".repeat(30)),
        "BDZGOWCXLTKSBTMCDLPBMUQOFXYHCX"
    );
}

#[test]
fn m4_two_notch_rotors() {
    let config = naval();
    assert_eq!(
        encipher(&config, "* B Gamma VI VII VIII AAMZ", "HELLOWORLD"),
        "XRKTFJTEQJ"
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Sessions
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn session_matches_demo_output() {
    let config = naval();
    let mut session = Session::new(&config).unwrap();
    let mut out = Vec::new();
    session
        .process(include_str!("../demos/hiawatha.in").as_bytes(), &mut out)
        .unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        include_str!("../demos/hiawatha.out")
    );
}

#[test]
fn group_output_splits_in_fives() {
    assert_eq!(
        group_output("QVPQSOKOILPUBKJZPISFXDW"),
        "QVPQS OKOIL PUBKJ ZPISF XDW"
    );
}

#[test]
fn settings_display_round_trips() {
    let settings = Settings::parse(HIAWATHA_SETTINGS, 5).unwrap();
    assert_eq!(settings.to_string(), HIAWATHA_SETTINGS);
}

// ═══════════════════════════════════════════════════════════════════════
// Error values
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn config_errors_surface_through_parse() {
    assert_eq!(
        MachineConfig::parse("ABCD\n1 0\nB R (AB) (CD)")
            .unwrap()
            .build_machine()
            .err(),
        Some(EnigmaError::InvalidMachineShape {
            num_rotors: 1,
            num_pawls: 0
        })
    );
    assert!(matches!(
        MachineConfig::parse("ABC\n2 1\nB R (AB)"),
        Err(EnigmaError::InvalidReflector(_))
    ));
}

#[test]
fn error_messages_are_stable() {
    assert_eq!(
        EnigmaError::RotorCountMismatch {
            expected: 5,
            actual: 4
        }
        .to_string(),
        "Expected 5 rotors, got 4"
    );
    assert_eq!(
        EnigmaError::ReflectorMisplaced {
            name: "B".to_string(),
            slot: 2
        }
        .to_string(),
        "Reflector 'B' placed in slot 2"
    );
}
