//! The one routine every generate endpoint runs through.
//!
//! A translation is two-state: the model call is in flight (`Pending`) and
//! then the outcome is returned (`Done`). Nothing is shared between requests
//! besides the read-only generator and sink handles.
//!
//! Dropping the returned future abandons the model call with it. axum drops
//! handler futures when the client disconnects, so a closed connection
//! cancels the upstream request instead of letting it run detached.

use super::diagnostics::DiagnosticSink;
use super::metrics::record_generation;
use super::providers::ContentGenerator;
use crate::dtos::GenerateResponse;
use crate::error::GatewayError;
use crate::models::{InboundRequest, Modality, ModelInferenceRequest};
use std::sync::Arc;
use std::time::Instant;

pub struct RequestTranslator {
    model: String,
    generator: Arc<dyn ContentGenerator>,
    sink: Arc<dyn DiagnosticSink>,
}

impl RequestTranslator {
    pub fn new(
        model: impl Into<String>,
        generator: Arc<dyn ContentGenerator>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            model: model.into(),
            generator,
            sink,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the model request for `modality`, call the model once and
    /// return its text.
    ///
    /// The prompt is not validated here; an empty prompt goes to the model
    /// unchanged.
    pub async fn translate(
        &self,
        modality: Modality,
        inbound: InboundRequest,
    ) -> Result<GenerateResponse, GatewayError> {
        if let Some(field) = modality.file_field() {
            if inbound.attachment.is_none() {
                return Err(self.fail(modality, GatewayError::MissingAttachment(field), None));
            }
        }

        let request = ModelInferenceRequest::new(self.model.as_str(), &inbound);

        tracing::debug!(
            modality = %modality,
            model = %self.model,
            prompt_len = inbound.prompt.len(),
            attachment_bytes = inbound.attachment.as_ref().map(|a| a.bytes.len()).unwrap_or(0),
            "Forwarding request to model"
        );

        let started = Instant::now();
        match self.generator.generate_content(&request).await {
            Ok(result) => {
                record_generation(modality, "success", Some(started.elapsed()));
                Ok(GenerateResponse { result })
            }
            Err(e) => Err(self.fail(modality, e.into(), Some(started.elapsed()))),
        }
    }

    fn fail(
        &self,
        modality: Modality,
        error: GatewayError,
        latency: Option<std::time::Duration>,
    ) -> GatewayError {
        let status = match error {
            GatewayError::Provider(_) => "provider_error",
            _ => "rejected",
        };
        record_generation(modality, status, latency);
        self.sink.generation_failed(modality, &error);
        error
    }
}
