pub mod app_theme;
mod ocr_results_view;
mod upload_widget;

pub use ocr_results_view::{OcrResultsMessage, OcrResultsView};
pub use upload_widget::{UploadWidget, UploadWidgetAction, UploadWidgetMessage};
