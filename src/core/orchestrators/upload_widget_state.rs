use serde_json::Value;

use crate::core::errors::UploadError;
use crate::core::models::{Preview, SelectedFile, UploadProgress};
use crate::global_constants;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadPhase {
    #[default]
    Idle,
    Loading,
}

#[derive(Debug, Clone)]
pub enum UploadEvent {
    FileChosen(SelectedFile),
    FileInspectionFailed(String),
    PreviewDecoded { generation: u64, preview: Preview },
    PreviewFailed { generation: u64, reason: String },
    UploadRequested,
    ProgressReported { generation: u64, progress: UploadProgress },
    UploadFinished {
        generation: u64,
        outcome: Result<Value, UploadError>,
    },
    CancelRequested,
    Disposed,
}

/// Work the reducer asks the surrounding runtime to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadEffect {
    None,
    DecodePreview { generation: u64, file: SelectedFile },
    SubmitUpload { generation: u64, file: SelectedFile },
    ForwardResult(Value),
}

/// Local UI state of the upload widget.
///
/// `selection_generation` and `upload_generation` tag every asynchronous
/// completion so that results for a replaced file or a finished request are
/// dropped instead of applied.
#[derive(Debug, Clone, Default)]
pub struct UploadWidgetState {
    selected_file: Option<SelectedFile>,
    preview: Option<Preview>,
    phase: UploadPhase,
    progress: u8,
    error: Option<String>,
    selection_generation: u64,
    upload_generation: u64,
    disposed: bool,
}

impl UploadWidgetState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.phase == UploadPhase::Loading
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn can_upload(&self) -> bool {
        self.selected_file.is_some() && !self.is_loading()
    }

    pub fn can_cancel(&self) -> bool {
        !self.is_loading()
    }

    pub fn reduce(&mut self, event: UploadEvent) -> UploadEffect {
        if self.disposed {
            log::debug!("[UPLOAD_STATE] Ignoring event after disposal");
            return UploadEffect::None;
        }

        match event {
            UploadEvent::FileChosen(file) => self.select_file(file),
            UploadEvent::FileInspectionFailed(reason) => {
                if !self.is_loading() {
                    self.error = Some(format!(
                        "{}{}",
                        global_constants::USER_MESSAGE_FILE_UNREADABLE_PREFIX,
                        reason
                    ));
                }
                UploadEffect::None
            }
            UploadEvent::PreviewDecoded {
                generation,
                preview,
            } => {
                if generation == self.selection_generation && self.selected_file.is_some() {
                    self.preview = Some(preview);
                } else {
                    log::debug!("[UPLOAD_STATE] Dropping stale preview {}", generation);
                }
                UploadEffect::None
            }
            UploadEvent::PreviewFailed { generation, reason } => {
                log::warn!(
                    "[UPLOAD_STATE] Preview {} could not be built: {}",
                    generation,
                    reason
                );
                UploadEffect::None
            }
            UploadEvent::UploadRequested => self.start_upload(),
            UploadEvent::ProgressReported {
                generation,
                progress,
            } => {
                if self.is_loading() && generation == self.upload_generation {
                    self.progress = progress.percent();
                }
                UploadEffect::None
            }
            UploadEvent::UploadFinished {
                generation,
                outcome,
            } => self.finish_upload(generation, outcome),
            UploadEvent::CancelRequested => {
                if self.is_loading() {
                    log::debug!("[UPLOAD_STATE] Cancel is not offered while loading");
                    return UploadEffect::None;
                }
                self.selection_generation += 1;
                self.selected_file = None;
                self.preview = None;
                self.error = None;
                self.progress = 0;
                UploadEffect::None
            }
            UploadEvent::Disposed => {
                log::info!("[UPLOAD_STATE] Widget disposed");
                self.disposed = true;
                UploadEffect::None
            }
        }
    }

    fn select_file(&mut self, file: SelectedFile) -> UploadEffect {
        if self.is_loading() {
            log::debug!("[UPLOAD_STATE] File picker is disabled while loading");
            return UploadEffect::None;
        }

        if let Err(e) = file.validate() {
            log::warn!("[UPLOAD_STATE] Rejected {}: {:?}", file.name, e);
            self.error = Some(e.to_string());
            return UploadEffect::None;
        }

        log::info!(
            "[UPLOAD_STATE] Staged {} ({} bytes, {})",
            file.name,
            file.size,
            file.mime_type
        );

        self.selection_generation += 1;
        self.preview = None;
        self.error = None;

        let effect = if file.is_image() {
            UploadEffect::DecodePreview {
                generation: self.selection_generation,
                file: file.clone(),
            }
        } else {
            UploadEffect::None
        };

        self.selected_file = Some(file);
        effect
    }

    fn start_upload(&mut self) -> UploadEffect {
        if self.is_loading() {
            log::debug!("[UPLOAD_STATE] Upload already in flight");
            return UploadEffect::None;
        }

        let Some(file) = self.selected_file.clone() else {
            self.error = Some(UploadError::NoFileSelected.to_string());
            return UploadEffect::None;
        };

        self.phase = UploadPhase::Loading;
        self.progress = 0;
        self.error = None;
        self.upload_generation += 1;

        UploadEffect::SubmitUpload {
            generation: self.upload_generation,
            file,
        }
    }

    fn finish_upload(
        &mut self,
        generation: u64,
        outcome: Result<Value, UploadError>,
    ) -> UploadEffect {
        if !self.is_loading() || generation != self.upload_generation {
            log::debug!("[UPLOAD_STATE] Dropping stale upload result {}", generation);
            return UploadEffect::None;
        }

        self.phase = UploadPhase::Idle;

        match outcome {
            Ok(data) => UploadEffect::ForwardResult(data),
            Err(e) => {
                log::error!("[UPLOAD_STATE] Upload failed: {}", e);
                self.error = Some(e.to_string());
                UploadEffect::None
            }
        }
    }
}
