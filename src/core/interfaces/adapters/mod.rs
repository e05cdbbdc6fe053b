mod file_inspector;
mod ocr_backend;
mod preview_renderer;

pub use file_inspector::FileInspector;
pub use ocr_backend::{OcrBackend, ProgressSender};
pub use preview_renderer::PreviewRenderer;
