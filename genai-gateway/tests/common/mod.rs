#![allow(dead_code)]

use axum::{body::Body, http::Request, Router};
use genai_gateway::config::{
    GatewayConfig, GoogleConfig, LimitsConfig, ObservabilityConfig, ProviderKind, DEFAULT_API_BASE,
    DEFAULT_MODEL,
};
use genai_gateway::services::providers::mock::MockContentGenerator;
use genai_gateway::services::RecordingSink;
use genai_gateway::startup::{build_router, AppState};
use http_body_util::BodyExt;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;

pub const BOUNDARY: &str = "genai-gateway-test-boundary";

/// 1x1 transparent PNG.
pub const ONE_PIXEL_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4,
    0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00, 0x01, 0x00, 0x00,
    0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE,
    0x42, 0x60, 0x82,
];

pub fn test_config() -> GatewayConfig {
    GatewayConfig {
        common: CoreConfig { port: 0 },
        provider: ProviderKind::Mock,
        google: GoogleConfig {
            api_key: "test-api-key".to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
        },
        limits: LimitsConfig {
            max_upload_bytes: 1024 * 1024,
        },
        observability: ObservabilityConfig {
            log_level: "error".to_string(),
            otlp_endpoint: None,
        },
    }
}

/// Router wired to a mock generator and a recording sink.
pub struct TestRouter {
    pub router: Router,
    pub generator: Arc<MockContentGenerator>,
    pub sink: Arc<RecordingSink>,
}

impl TestRouter {
    pub fn new(generator: MockContentGenerator) -> Self {
        let generator = Arc::new(generator);
        let sink = Arc::new(RecordingSink::new());
        let state = AppState::new(test_config(), generator.clone(), sink.clone());

        Self {
            router: build_router(state),
            generator,
            sink,
        }
    }
}

pub enum FormPart<'a> {
    Text {
        name: &'a str,
        value: &'a str,
    },
    File {
        name: &'a str,
        file_name: &'a str,
        mime: Option<&'a str>,
        bytes: &'a [u8],
    },
}

/// Encode `parts` as a `multipart/form-data` body using [`BOUNDARY`].
pub fn multipart_body(parts: &[FormPart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();

    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            FormPart::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            FormPart::File {
                name,
                file_name,
                mime,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        name, file_name
                    )
                    .as_bytes(),
                );
                if let Some(mime) = mime {
                    body.extend_from_slice(format!("Content-Type: {}\r\n", mime).as_bytes());
                }
                body.extend_from_slice(b"\r\n");
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_request(uri: &str, parts: &[FormPart<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

pub fn json_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}
