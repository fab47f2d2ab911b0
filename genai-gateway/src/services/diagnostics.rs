//! Where translation failures get reported.

use crate::error::GatewayError;
use crate::models::Modality;
use std::sync::Mutex;

pub trait DiagnosticSink: Send + Sync {
    fn generation_failed(&self, modality: Modality, error: &GatewayError);
}

/// Production sink: one structured `error` event per failure.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn generation_failed(&self, modality: Modality, error: &GatewayError) {
        tracing::error!(
            modality = %modality,
            route = modality.route(),
            error = %error,
            "Generation failed"
        );
    }
}

/// Keeps `(modality, message)` pairs so tests can assert on reported failures.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<(Modality, String)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(Modality, String)> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl DiagnosticSink for RecordingSink {
    fn generation_failed(&self, modality: Modality, error: &GatewayError) {
        if let Ok(mut events) = self.events.lock() {
            events.push((modality, error.to_string()));
        }
    }
}
