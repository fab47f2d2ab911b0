use crate::dtos::{GenerateResponse, GenerateTextRequest};
use crate::error::GatewayError;
use crate::models::{Attachment, InboundRequest, Modality};
use crate::startup::AppState;
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;

/// MIME type assumed for file parts sent without a `Content-Type`.
const DEFAULT_ATTACHMENT_MIME: &str = "application/octet-stream";

const PROMPT_FIELD: &str = "prompt";

pub async fn generate_text(
    State(state): State<AppState>,
    Json(payload): Json<GenerateTextRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let response = state
        .translator
        .translate(Modality::Text, InboundRequest::text(payload.prompt))
        .await?;

    Ok(Json(response))
}

pub async fn generate_from_image(
    state: State<AppState>,
    multipart: Multipart,
) -> Result<Json<GenerateResponse>, AppError> {
    generate_from_upload(state, Modality::Image, multipart).await
}

pub async fn generate_from_document(
    state: State<AppState>,
    multipart: Multipart,
) -> Result<Json<GenerateResponse>, AppError> {
    generate_from_upload(state, Modality::Document, multipart).await
}

pub async fn generate_from_audio(
    state: State<AppState>,
    multipart: Multipart,
) -> Result<Json<GenerateResponse>, AppError> {
    generate_from_upload(state, Modality::Audio, multipart).await
}

async fn generate_from_upload(
    State(state): State<AppState>,
    modality: Modality,
    multipart: Multipart,
) -> Result<Json<GenerateResponse>, AppError> {
    let inbound = read_upload(modality, multipart).await?;
    let response = state.translator.translate(modality, inbound).await?;

    Ok(Json(response))
}

/// Pull the prompt and the modality's file field out of a multipart body.
///
/// A missing prompt becomes the empty string. A missing file is left for the
/// translator to reject. Other fields are skipped by the parser when the next
/// field is requested.
async fn read_upload(
    modality: Modality,
    mut multipart: Multipart,
) -> Result<InboundRequest, GatewayError> {
    let file_field = modality.file_field();
    let mut prompt: Option<String> = None;
    let mut attachment: Option<Attachment> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_owned);

        match name.as_deref() {
            Some(PROMPT_FIELD) if prompt.is_none() => {
                prompt = Some(field.text().await.map_err(multipart_error)?);
            }
            Some(n) if Some(n) == file_field && attachment.is_none() => {
                let file_name = field.file_name().map(str::to_owned);
                let mime_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_ATTACHMENT_MIME)
                    .to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;

                tracing::debug!(
                    field = n,
                    file_name = ?file_name,
                    mime_type = %mime_type,
                    size = bytes.len(),
                    "Received attachment"
                );

                attachment = Some(Attachment::new(bytes, mime_type));
            }
            _ => {}
        }
    }

    Ok(InboundRequest {
        prompt: prompt.unwrap_or_default(),
        attachment,
    })
}

fn multipart_error(err: MultipartError) -> GatewayError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        GatewayError::PayloadTooLarge(err.body_text())
    } else {
        GatewayError::MalformedRequest(err.body_text())
    }
}
