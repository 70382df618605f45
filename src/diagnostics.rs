//! Injected diagnostics sink.
//!
//! Parsing and consistency checks report non-fatal findings through a
//! [`Diagnostics`] implementation handed in by the caller rather than a
//! global logger. [`TracingDiagnostics`] forwards to `tracing`;
//! [`RecordingDiagnostics`] keeps the events in memory.

use std::sync::Mutex;

/// A non-fatal finding reported while parsing or checking chains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticEvent {
    /// The first token of a chain name is not a leg; the chain has no legs.
    UnparseableChain { name: String },

    /// A leg head used a base type outside the known set; the leg was dropped.
    UnknownLegType { chain: String, token: String },

    /// A leg head carried a multiplicity or threshold out of range; the
    /// chain has no legs.
    MalformedLeg { chain: String, leg: String },

    /// An unprescaled chain is lower than a prescaled chain of the same type.
    InconsistentPair {
        unprescaled: String,
        prescaled: String,
    },
}

/// Receives diagnostic events.
///
/// Implementations must be `Send + Sync` so records can be parsed in
/// parallel with the `parallel` feature.
pub trait Diagnostics: Send + Sync {
    /// Handles one event.
    fn report(&self, event: DiagnosticEvent);
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, event: DiagnosticEvent) {
        match event {
            DiagnosticEvent::UnparseableChain { name } => {
                tracing::debug!(chain = %name, "cannot decompose chain into legs");
            }
            DiagnosticEvent::UnknownLegType { chain, token } => {
                tracing::warn!(chain = %chain, token = %token, "unknown leg type, leg dropped");
            }
            DiagnosticEvent::MalformedLeg { chain, leg } => {
                tracing::warn!(chain = %chain, leg = %leg, "leg multiplicity or threshold out of range");
            }
            DiagnosticEvent::InconsistentPair {
                unprescaled,
                prescaled,
            } => {
                tracing::error!(
                    unprescaled = %unprescaled,
                    prescaled = %prescaled,
                    "unprescaled chain is lower than a prescaled chain"
                );
            }
        }
    }
}

/// Stores every event in memory.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl RecordingDiagnostics {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the events recorded so far.
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        match self.events.lock() {
            Ok(events) => events.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn report(&self, event: DiagnosticEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_keeps_order() {
        let diag = RecordingDiagnostics::new();
        assert!(diag.is_empty());

        diag.report(DiagnosticEvent::UnparseableChain { name: "a".into() });
        diag.report(DiagnosticEvent::UnparseableChain { name: "b".into() });

        assert_eq!(
            diag.events(),
            vec![
                DiagnosticEvent::UnparseableChain { name: "a".into() },
                DiagnosticEvent::UnparseableChain { name: "b".into() },
            ]
        );
        assert_eq!(diag.len(), 2);
        assert!(!diag.is_empty());
    }

    #[test]
    fn test_tracing_sink_accepts_all_events() {
        let diag = TracingDiagnostics;
        diag.report(DiagnosticEvent::UnparseableChain { name: "x".into() });
        diag.report(DiagnosticEvent::UnknownLegType {
            chain: "x".into(),
            token: "q5".into(),
        });
        diag.report(DiagnosticEvent::MalformedLeg {
            chain: "x".into(),
            leg: "99999999999mu4".into(),
        });
        diag.report(DiagnosticEvent::InconsistentPair {
            unprescaled: "a".into(),
            prescaled: "b".into(),
        });
    }
}
