mod common;

use axum::http::StatusCode;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::{body_json, multipart_request, FormPart, TestRouter, ONE_PIXEL_PNG};
use genai_gateway::models::{ContentPart, Modality};
use genai_gateway::services::providers::mock::MockContentGenerator;
use serde_json::json;
use tower::util::ServiceExt;

#[tokio::test]
async fn image_upload_sends_prompt_then_inline_png() {
    let app = TestRouter::new(MockContentGenerator::replying("a pixel"));

    let response = app
        .router
        .oneshot(multipart_request(
            "/generate-from-image",
            &[
                FormPart::Text {
                    name: "prompt",
                    value: "describe",
                },
                FormPart::File {
                    name: "image",
                    file_name: "pixel.png",
                    mime: Some("image/png"),
                    bytes: ONE_PIXEL_PNG,
                },
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "result": "a pixel" }));

    let requests = app.generator.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].parts(),
        &[
            ContentPart::text("describe"),
            ContentPart::InlineBinary {
                data: STANDARD.encode(ONE_PIXEL_PNG),
                mime_type: "image/png".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn every_attachment_endpoint_preserves_part_order() {
    let cases = [
        ("/generate-from-document", "document", "application/pdf"),
        ("/generate-from-audio", "audio", "audio/mpeg"),
        ("/generate-from-image", "image", "image/jpeg"),
    ];

    for (uri, field, mime) in cases {
        let app = TestRouter::new(MockContentGenerator::replying("ok"));
        let bytes = b"\x00\x01binary\xFF";

        // File first: the order of form fields must not change the part order.
        let response = app
            .router
            .oneshot(multipart_request(
                uri,
                &[
                    FormPart::File {
                        name: field,
                        file_name: "upload.bin",
                        mime: Some(mime),
                        bytes,
                    },
                    FormPart::Text {
                        name: "prompt",
                        value: "summarize",
                    },
                ],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        assert_eq!(
            app.generator.requests()[0].parts(),
            &[
                ContentPart::text("summarize"),
                ContentPart::InlineBinary {
                    data: STANDARD.encode(bytes),
                    mime_type: mime.to_string(),
                },
            ],
            "{}",
            uri
        );
    }
}

#[tokio::test]
async fn missing_file_part_is_a_400_and_skips_the_model() {
    for modality in [Modality::Image, Modality::Document, Modality::Audio] {
        let app = TestRouter::new(MockContentGenerator::replying("unused"));

        let response = app
            .router
            .oneshot(multipart_request(
                modality.route(),
                &[FormPart::Text {
                    name: "prompt",
                    value: "describe",
                }],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        let message = body["error"].as_str().unwrap();
        assert!(message.contains("Missing attachment"), "{}", message);
        assert!(message.contains(modality.file_field().unwrap()), "{}", message);

        assert_eq!(app.generator.call_count(), 0);
        assert_eq!(app.sink.events().len(), 1);
        assert_eq!(app.sink.events()[0].0, modality);
    }
}

#[tokio::test]
async fn file_under_the_wrong_field_counts_as_missing() {
    let app = TestRouter::new(MockContentGenerator::replying("unused"));

    let response = app
        .router
        .oneshot(multipart_request(
            "/generate-from-audio",
            &[
                FormPart::Text {
                    name: "prompt",
                    value: "transcribe",
                },
                FormPart::File {
                    name: "image",
                    file_name: "pixel.png",
                    mime: Some("image/png"),
                    bytes: ONE_PIXEL_PNG,
                },
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.generator.call_count(), 0);
}

#[tokio::test]
async fn provider_failure_on_upload_becomes_500() {
    let app = TestRouter::new(MockContentGenerator::failing("unsupported mime type"));

    let response = app
        .router
        .oneshot(multipart_request(
            "/generate-from-document",
            &[
                FormPart::Text {
                    name: "prompt",
                    value: "summarize",
                },
                FormPart::File {
                    name: "document",
                    file_name: "notes.txt",
                    mime: Some("text/plain"),
                    bytes: b"hello",
                },
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "API error: unsupported mime type" })
    );
    assert_eq!(
        app.sink.events(),
        vec![(
            Modality::Document,
            "API error: unsupported mime type".to_string()
        )]
    );
}

#[tokio::test]
async fn untyped_and_empty_files_are_forwarded() {
    let app = TestRouter::new(MockContentGenerator::replying("nothing"));

    let response = app
        .router
        .oneshot(multipart_request(
            "/generate-from-image",
            &[
                FormPart::Text {
                    name: "note",
                    value: "ignored",
                },
                FormPart::Text {
                    name: "prompt",
                    value: "what is this",
                },
                FormPart::File {
                    name: "image",
                    file_name: "empty",
                    mime: None,
                    bytes: b"",
                },
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        app.generator.requests()[0].parts(),
        &[
            ContentPart::text("what is this"),
            ContentPart::InlineBinary {
                data: String::new(),
                mime_type: "application/octet-stream".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn upload_over_the_limit_is_rejected() {
    let app = TestRouter::new(MockContentGenerator::replying("unused"));
    let oversized = vec![0u8; 2 * 1024 * 1024];

    let response = app
        .router
        .oneshot(multipart_request(
            "/generate-from-audio",
            &[
                FormPart::Text {
                    name: "prompt",
                    value: "transcribe",
                },
                FormPart::File {
                    name: "audio",
                    file_name: "long.wav",
                    mime: Some("audio/wav"),
                    bytes: &oversized,
                },
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(app.generator.call_count(), 0);
}

#[tokio::test]
async fn non_multipart_body_is_rejected() {
    let app = TestRouter::new(MockContentGenerator::replying("unused"));

    let response = app
        .router
        .oneshot(common::json_request(
            "/generate-from-image",
            r#"{"prompt":"describe"}"#,
        ))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    assert_eq!(app.generator.call_count(), 0);
}
