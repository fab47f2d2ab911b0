pub mod diagnostics;
pub mod metrics;
pub mod providers;
pub mod translator;

pub use diagnostics::{DiagnosticSink, RecordingSink, TracingSink};
pub use translator::RequestTranslator;
