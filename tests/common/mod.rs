//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use enigma::{Machine, MachineConfig, Settings};

/// Five-slot naval machine: rotors I-VIII, Beta, Gamma, thin B and C.
pub const NAVAL_CONF: &str = include_str!("../../demos/default.conf");

/// Four-slot Enigma I: rotors I-III and the wide B reflector `UKW-B`.
pub const ENIGMA_I_CONF: &str = include_str!("../../demos/enigma1.conf");

pub const HIAWATHA_SETTINGS: &str = "* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)";

pub fn naval() -> MachineConfig {
    MachineConfig::parse(NAVAL_CONF).unwrap()
}

pub fn enigma_i() -> MachineConfig {
    MachineConfig::parse(ENIGMA_I_CONF).unwrap()
}

/// Builds a machine over `config` and applies a settings line.
pub fn configured<'c>(config: &'c MachineConfig, settings: &str) -> Machine<'c> {
    let settings = Settings::parse(settings, config.num_rotors()).unwrap();
    let mut machine = config.build_machine().unwrap();
    machine.apply_settings(&settings).unwrap();
    machine
}

/// Enciphers `msg` on a freshly configured machine.
pub fn encipher(config: &MachineConfig, settings: &str, msg: &str) -> String {
    configured(config, settings).convert_message(msg).unwrap()
}
