pub mod inference;
pub mod modality;

pub use inference::{Attachment, ContentPart, InboundRequest, ModelInferenceRequest};
pub use modality::Modality;
