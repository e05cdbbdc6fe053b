pub mod upload_controller;
pub mod upload_widget_state;

pub use upload_controller::UploadController;
pub use upload_widget_state::{UploadEffect, UploadEvent, UploadWidgetState};
