//! Message stream processing.
//!
//! A session feeds an input stream through one machine: settings lines
//! (starting with `*`) reconfigure it, blank lines are echoed, and every
//! other line is enciphered with its whitespace removed and written back
//! in groups of five symbols.

use std::io::{BufRead, Write};

use crate::config::{MachineConfig, Settings};
use crate::error::{EnigmaError, Result, SessionError};
use crate::machine::Machine;

/// Number of symbols per output group.
pub const GROUP_SIZE: usize = 5;

/// Splits `msg` into space-separated groups of [`GROUP_SIZE`] symbols.
///
/// ```
/// assert_eq!(enigma::session::group_output("QVPQSOKOILPUB"), "QVPQS OKOIL PUB");
/// ```
pub fn group_output(msg: &str) -> String {
    let symbols: Vec<char> = msg.chars().collect();
    symbols
        .chunks(GROUP_SIZE)
        .map(|group| group.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// A machine driven line by line.
#[derive(Debug)]
pub struct Session<'c> {
    machine: Machine<'c>,
    configured: bool,
}

impl<'c> Session<'c> {
    /// Creates a session over a fresh machine built from `config`.
    ///
    /// # Errors
    /// Any error of [`MachineConfig::build_machine`].
    pub fn new(config: &'c MachineConfig) -> Result<Self> {
        Ok(Session {
            machine: config.build_machine()?,
            configured: false,
        })
    }

    /// Returns the underlying machine.
    pub fn machine(&self) -> &Machine<'c> {
        &self.machine
    }

    /// Returns the underlying machine mutably, e.g. to install a trace sink.
    pub fn machine_mut(&mut self) -> &mut Machine<'c> {
        &mut self.machine
    }

    /// Handles one input line, returning the line to write, if any.
    ///
    /// Settings lines produce no output. Blank lines produce an empty line.
    ///
    /// # Errors
    /// - [`EnigmaError::MissingSettingsMarker`] for a message before the
    ///   first settings line.
    /// - Any error of [`Settings::parse`], [`Machine::apply_settings`] or
    ///   [`Machine::convert_message`].
    pub fn process_line(&mut self, line: &str) -> Result<Option<String>> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(Some(String::new()));
        }
        if trimmed.starts_with('*') {
            let settings = Settings::parse(trimmed, self.machine.num_rotors())?;
            self.machine.apply_settings(&settings)?;
            self.configured = true;
            return Ok(None);
        }
        if !self.configured {
            return Err(EnigmaError::MissingSettingsMarker);
        }
        let msg: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
        let converted = self.machine.convert_message(&msg)?;
        Ok(Some(group_output(&converted)))
    }

    /// Processes every line of `input`, writing results to `output`.
    ///
    /// Stops at the first error; output already written stays written.
    ///
    /// # Errors
    /// [`SessionError::Io`] on read/write failure, [`SessionError::Enigma`]
    /// for any error of [`process_line`](Self::process_line).
    pub fn process<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut output: W,
    ) -> std::result::Result<(), SessionError> {
        for (number, line) in input.lines().enumerate() {
            let line = line?;
            match self.process_line(&line) {
                Ok(Some(text)) => writeln!(output, "{}", text)?,
                Ok(None) => {}
                Err(err) => {
                    tracing::error!(line = number + 1, error = %err, "processing stopped");
                    return Err(err.into());
                }
            }
        }
        output.flush()?;
        Ok(())
    }
}
