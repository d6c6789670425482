//! Diagnostics sink, bound per bus at construction.
//!
//! No process-global logger state: two buses can trace to different sinks.

use core::fmt;

/// Severity of a diagnostic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DiagLevel {
    Debug,
    Info,
    Warn,
}

/// Receives open/close/transfer events from a bus.
pub trait DiagSink {
    /// Whether events at `level` will be materialized. The transfer hot
    /// path checks this before handing over byte traces, so disabled
    /// debug tracing costs nothing.
    fn enabled(&self, level: DiagLevel) -> bool;

    /// A formatted event.
    fn message(&mut self, level: DiagLevel, args: fmt::Arguments<'_>);

    /// Raw bytes moved by a completed transfer.
    fn bytes(&mut self, level: DiagLevel, bytes: &[u8]);
}

/// Sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDiag;

impl DiagSink for NullDiag {
    fn enabled(&self, _level: DiagLevel) -> bool {
        false
    }

    fn message(&mut self, _level: DiagLevel, _args: fmt::Arguments<'_>) {}

    fn bytes(&mut self, _level: DiagLevel, _bytes: &[u8]) {}
}

/// Sink forwarding to `defmt`.
#[cfg(feature = "defmt")]
#[derive(Debug, Default, Clone, Copy)]
pub struct DefmtDiag;

#[cfg(feature = "defmt")]
impl DiagSink for DefmtDiag {
    fn enabled(&self, _level: DiagLevel) -> bool {
        // defmt filters at link time via DEFMT_LOG.
        true
    }

    fn message(&mut self, level: DiagLevel, args: fmt::Arguments<'_>) {
        match level {
            DiagLevel::Debug => {
                defmt::debug!("{}", defmt::Display2Format(&args))
            }
            DiagLevel::Info => {
                defmt::info!("{}", defmt::Display2Format(&args))
            }
            DiagLevel::Warn => {
                defmt::warn!("{}", defmt::Display2Format(&args))
            }
        }
    }

    fn bytes(&mut self, level: DiagLevel, bytes: &[u8]) {
        match level {
            DiagLevel::Debug => defmt::debug!("{=[u8]:x}", bytes),
            DiagLevel::Info => defmt::info!("{=[u8]:x}", bytes),
            DiagLevel::Warn => defmt::warn!("{=[u8]:x}", bytes),
        }
    }
}
