use std::fmt;

/// Input kind an endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modality {
    Text,
    Image,
    Document,
    Audio,
}

impl Modality {
    pub const ALL: [Modality; 4] = [
        Modality::Text,
        Modality::Image,
        Modality::Document,
        Modality::Audio,
    ];

    /// Multipart field carrying the upload, if the endpoint takes one.
    pub fn file_field(self) -> Option<&'static str> {
        match self {
            Modality::Text => None,
            Modality::Image => Some("image"),
            Modality::Document => Some("document"),
            Modality::Audio => Some("audio"),
        }
    }

    pub fn requires_attachment(self) -> bool {
        self.file_field().is_some()
    }

    pub fn route(self) -> &'static str {
        match self {
            Modality::Text => "/generate-text",
            Modality::Image => "/generate-from-image",
            Modality::Document => "/generate-from-document",
            Modality::Audio => "/generate-from-audio",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Modality::Text => "text",
            Modality::Image => "image",
            Modality::Document => "document",
            Modality::Audio => "audio",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
