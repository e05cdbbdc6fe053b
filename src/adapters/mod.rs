mod data_url_preview_renderer;
mod http_ocr_backend;
mod local_file_inspector;

pub use data_url_preview_renderer::DataUrlPreviewRenderer;
pub use http_ocr_backend::HttpOcrBackend;
pub use local_file_inspector::LocalFileInspector;
