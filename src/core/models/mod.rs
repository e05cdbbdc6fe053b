mod ocr_response;
mod preview;
mod selected_file;
mod upload_progress;
mod upload_target;

pub use ocr_response::OcrResponse;
pub use preview::Preview;
pub use selected_file::SelectedFile;
pub use upload_progress::UploadProgress;
pub use upload_target::UploadTarget;
