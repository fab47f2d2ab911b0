//! Transient request shapes that flow from an HTTP call to the model.
//!
//! Nothing here is persisted. An [`InboundRequest`] lives for one HTTP
//! exchange and a [`ModelInferenceRequest`] is built once from it and handed
//! to the model capability unchanged.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;

/// A file uploaded alongside the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub bytes: Bytes,
    pub mime_type: String,
}

impl Attachment {
    pub fn new(bytes: impl Into<Bytes>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            mime_type: mime_type.into(),
        }
    }
}

/// Decoded caller payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundRequest {
    pub prompt: String,
    pub attachment: Option<Attachment>,
}

impl InboundRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            attachment: None,
        }
    }

    pub fn with_attachment(prompt: impl Into<String>, attachment: Attachment) -> Self {
        Self {
            prompt: prompt.into(),
            attachment: Some(attachment),
        }
    }
}

/// One unit of model input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    Text { value: String },
    /// Base64 payload (standard alphabet, padded) plus its MIME type.
    InlineBinary { data: String, mime_type: String },
}

impl ContentPart {
    pub fn text(value: impl Into<String>) -> Self {
        ContentPart::Text {
            value: value.into(),
        }
    }

    pub fn inline_binary(attachment: &Attachment) -> Self {
        ContentPart::InlineBinary {
            data: STANDARD.encode(&attachment.bytes),
            mime_type: attachment.mime_type.clone(),
        }
    }
}

/// Payload for a single `generateContent` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInferenceRequest {
    model: String,
    parts: Vec<ContentPart>,
}

impl ModelInferenceRequest {
    /// Build the part sequence the provider expects: the prompt first, then
    /// the attachment if there is one.
    pub fn new(model: impl Into<String>, inbound: &InboundRequest) -> Self {
        let mut parts = Vec::with_capacity(2);
        parts.push(ContentPart::text(inbound.prompt.clone()));
        if let Some(attachment) = &inbound.attachment {
            parts.push(ContentPart::inline_binary(attachment));
        }

        Self {
            model: model.into(),
            parts,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn parts(&self) -> &[ContentPart] {
        &self.parts
    }
}
