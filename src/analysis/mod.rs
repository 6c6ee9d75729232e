/// AI-assisted metadata extraction
///
/// Uploads are downscaled and re-encoded locally (resize.rs), then sent to
/// a hosted multimodal classifier that proposes the record metadata
/// (classifier.rs). The whole pipeline is advisory: when it fails, the form
/// falls back to manual entry.

pub mod classifier;
pub mod resize;
