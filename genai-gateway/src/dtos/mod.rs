use serde::{Deserialize, Serialize};

/// Body of `POST /generate-text`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateTextRequest {
    /// Forwarded as-is; an absent prompt becomes the empty string.
    #[serde(default)]
    pub prompt: String,
}

/// Success body shared by every generate endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub result: String,
}
