//! Observers for per-symbol machine activity.
//!
//! A [`Machine`](crate::Machine) reports every converted symbol to the
//! [`TraceSink`] installed on it, if any. Sinks only observe: they cannot
//! change the ciphertext, and a failing sink never aborts a conversion.

use std::io::Write;

/// One converted symbol, captured after the rotors stepped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertTrace {
    /// Settings of slots `1..num_rotors`, leftmost first.
    pub positions: String,
    /// Symbol entering the machine.
    pub input: char,
    /// Symbol after the first plugboard pass.
    pub plugged: char,
    /// Symbol leaving the machine.
    pub output: char,
}

/// Receiver of [`ConvertTrace`] events.
pub trait TraceSink {
    /// Records one converted symbol.
    fn record(&mut self, event: &ConvertTrace);
}

/// Forwards events to `tracing` at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl TraceSink for LogSink {
    fn record(&mut self, event: &ConvertTrace) {
        tracing::debug!(
            positions = %event.positions,
            input = %event.input,
            plugged = %event.plugged,
            output = %event.output,
            "converted symbol"
        );
    }
}

/// Writes one `[AXLE] A -> B -> C` line per symbol.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    out: W,
}

impl<W: Write> WriterSink<W> {
    /// Wraps `out`.
    pub fn new(out: W) -> Self {
        WriterSink { out }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TraceSink for WriterSink<W> {
    fn record(&mut self, event: &ConvertTrace) {
        if let Err(err) = writeln!(
            self.out,
            "[{}] {} -> {} -> {}",
            event.positions, event.input, event.plugged, event.output
        ) {
            tracing::warn!(error = %err, "trace sink write failed");
        }
    }
}
