use async_trait::async_trait;
use futures::channel::mpsc::UnboundedSender;
use serde_json::Value;

use crate::core::errors::UploadError;
use crate::core::models::SelectedFile;

pub type ProgressSender = UnboundedSender<crate::core::models::UploadProgress>;

#[async_trait]
pub trait OcrBackend: Send + Sync {
    /// Sends one request for `file` and resolves with the backend's `data`
    /// payload. Progress is pushed into `progress` while the body streams.
    async fn submit(&self, file: &SelectedFile, progress: ProgressSender)
        -> Result<Value, UploadError>;
}
