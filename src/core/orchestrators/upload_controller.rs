use std::sync::Arc;

use futures::channel::mpsc;
use futures::{FutureExt, StreamExt};
use serde_json::Value;

use crate::core::errors::UploadError;
use crate::core::interfaces::adapters::{OcrBackend, PreviewRenderer};
use crate::core::models::SelectedFile;
use crate::core::orchestrators::upload_widget_state::{
    UploadEffect, UploadEvent, UploadWidgetState,
};

pub type ResultsCallback = Box<dyn FnMut(Value) + Send>;

/// Drives [`UploadWidgetState`] without a window: each effect the reducer
/// emits is awaited in place and its completion fed back as an event.
pub struct UploadController {
    state: UploadWidgetState,
    backend: Arc<dyn OcrBackend>,
    preview_renderer: Arc<dyn PreviewRenderer>,
    on_results_received: ResultsCallback,
}

impl UploadController {
    pub fn build(
        backend: Arc<dyn OcrBackend>,
        preview_renderer: Arc<dyn PreviewRenderer>,
        on_results_received: ResultsCallback,
    ) -> Self {
        Self {
            state: UploadWidgetState::new(),
            backend,
            preview_renderer,
            on_results_received,
        }
    }

    pub fn state(&self) -> &UploadWidgetState {
        &self.state
    }

    pub async fn select_file(&mut self, file: SelectedFile) -> Result<(), UploadError> {
        let validation = file.validate();
        let effect = self.state.reduce(UploadEvent::FileChosen(file));
        self.run_effect(effect).await;
        validation
    }

    pub async fn upload(&mut self) -> Result<(), UploadError> {
        match self.state.reduce(UploadEvent::UploadRequested) {
            UploadEffect::SubmitUpload { generation, file } => {
                self.execute_upload(generation, file).await
            }
            _ => Err(UploadError::NoFileSelected),
        }
    }

    pub fn cancel(&mut self) {
        self.state.reduce(UploadEvent::CancelRequested);
    }

    async fn run_effect(&mut self, effect: UploadEffect) {
        match effect {
            UploadEffect::None => {}
            UploadEffect::DecodePreview { generation, file } => {
                let event = match self.preview_renderer.render_preview(&file).await {
                    Ok(preview) => UploadEvent::PreviewDecoded {
                        generation,
                        preview,
                    },
                    Err(e) => UploadEvent::PreviewFailed {
                        generation,
                        reason: e.to_string(),
                    },
                };
                self.state.reduce(event);
            }
            UploadEffect::SubmitUpload { generation, file } => {
                let _ = self.execute_upload(generation, file).await;
            }
            UploadEffect::ForwardResult(data) => {
                (self.on_results_received)(data);
            }
        }
    }

    async fn execute_upload(
        &mut self,
        generation: u64,
        file: SelectedFile,
    ) -> Result<(), UploadError> {
        let outcome = self.submit_with_progress(generation, file).await;
        let follow_up = self.state.reduce(UploadEvent::UploadFinished {
            generation,
            outcome: outcome.clone(),
        });
        if let UploadEffect::ForwardResult(data) = follow_up {
            (self.on_results_received)(data);
        }
        outcome.map(|_| ())
    }

    async fn submit_with_progress(
        &mut self,
        generation: u64,
        file: SelectedFile,
    ) -> Result<Value, UploadError> {
        let (progress_sender, mut progress_receiver) = mpsc::unbounded();
        let backend = Arc::clone(&self.backend);
        let submission = async move { backend.submit(&file, progress_sender).await }.fuse();
        futures::pin_mut!(submission);

        loop {
            futures::select! {
                progress = progress_receiver.next() => {
                    if let Some(progress) = progress {
                        self.state.reduce(UploadEvent::ProgressReported { generation, progress });
                    }
                }
                outcome = submission => return outcome,
            }
        }
    }
}
