use std::path::PathBuf;
use std::sync::Arc;

use futures::channel::mpsc;
use futures::future::{BoxFuture, Fuse};
use futures::{FutureExt, Stream, StreamExt};
use iced::task;
use iced::widget::{button, column, container, image, progress_bar, row, text, text_input};
use iced::{Alignment, Background, Color, Element, Length, Task};
use serde_json::Value;

use crate::core::errors::UploadError;
use crate::core::interfaces::adapters::{FileInspector, OcrBackend, PreviewRenderer};
use crate::core::models::{SelectedFile, UploadProgress};
use crate::core::orchestrators::{UploadEffect, UploadEvent, UploadWidgetState};
use crate::global_constants;
use crate::presentation::app_theme;

#[derive(Debug, Clone)]
pub enum UploadWidgetMessage {
    PathInputChanged(String),
    SelectPathPressed,
    FileDropped(PathBuf),
    UploadPressed,
    CancelPressed,
    Completed(UploadEvent),
}

/// What the host has to do after the widget handled a message.
pub enum UploadWidgetAction {
    None,
    Run(Task<UploadWidgetMessage>),
    ResultsReceived(Value),
}

impl std::fmt::Debug for UploadWidgetAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadWidgetAction::None => write!(f, "None"),
            UploadWidgetAction::Run(_) => write!(f, "Run"),
            UploadWidgetAction::ResultsReceived(data) => write!(f, "ResultsReceived({})", data),
        }
    }
}

pub struct UploadWidget {
    state: UploadWidgetState,
    path_input: String,
    file_inspector: Arc<dyn FileInspector>,
    preview_renderer: Arc<dyn PreviewRenderer>,
    backend: Arc<dyn OcrBackend>,
    preview_task: Option<task::Handle>,
    upload_task: Option<task::Handle>,
}

impl UploadWidget {
    pub fn build(
        file_inspector: Arc<dyn FileInspector>,
        preview_renderer: Arc<dyn PreviewRenderer>,
        backend: Arc<dyn OcrBackend>,
    ) -> Self {
        log::info!("[UPLOAD_WIDGET] Creating upload widget");

        Self {
            state: UploadWidgetState::new(),
            path_input: String::new(),
            file_inspector,
            preview_renderer,
            backend,
            preview_task: None,
            upload_task: None,
        }
    }

    pub fn state(&self) -> &UploadWidgetState {
        &self.state
    }

    pub fn update(&mut self, message: UploadWidgetMessage) -> UploadWidgetAction {
        match message {
            UploadWidgetMessage::PathInputChanged(value) => {
                self.path_input = value;
                UploadWidgetAction::None
            }
            UploadWidgetMessage::SelectPathPressed => {
                let trimmed = self.path_input.trim();
                if trimmed.is_empty() {
                    return UploadWidgetAction::None;
                }
                let path = PathBuf::from(trimmed);
                self.inspect_path(path)
            }
            UploadWidgetMessage::FileDropped(path) => {
                if self.state.is_loading() {
                    log::debug!("[UPLOAD_WIDGET] Ignoring drop while loading");
                    return UploadWidgetAction::None;
                }
                self.path_input = path.display().to_string();
                self.inspect_path(path)
            }
            UploadWidgetMessage::UploadPressed => self.apply(UploadEvent::UploadRequested),
            UploadWidgetMessage::CancelPressed => {
                if self.state.can_cancel() {
                    Self::abort(&mut self.preview_task);
                    self.path_input.clear();
                }
                self.apply(UploadEvent::CancelRequested)
            }
            UploadWidgetMessage::Completed(event) => self.apply(event),
        }
    }

    /// Stops both in-flight tasks and freezes the state.
    pub fn teardown(&mut self) {
        if self.state.is_disposed() {
            return;
        }
        log::info!("[UPLOAD_WIDGET] Tearing down");
        Self::abort(&mut self.preview_task);
        Self::abort(&mut self.upload_task);
        self.state.reduce(UploadEvent::Disposed);
    }

    fn abort(handle: &mut Option<task::Handle>) {
        if let Some(handle) = handle.take() {
            handle.abort();
        }
    }

    fn inspect_path(&mut self, path: PathBuf) -> UploadWidgetAction {
        if self.state.is_loading() {
            return UploadWidgetAction::None;
        }

        let inspector = Arc::clone(&self.file_inspector);
        UploadWidgetAction::Run(Task::future(async move {
            let event = match inspector.inspect(&path).await {
                Ok(file) => UploadEvent::FileChosen(file),
                Err(e) => {
                    log::warn!("[UPLOAD_WIDGET] Could not inspect {:?}: {:#}", path, e);
                    UploadEvent::FileInspectionFailed(e.to_string())
                }
            };
            UploadWidgetMessage::Completed(event)
        }))
    }

    fn apply(&mut self, event: UploadEvent) -> UploadWidgetAction {
        match self.state.reduce(event) {
            UploadEffect::None => UploadWidgetAction::None,
            UploadEffect::DecodePreview { generation, file } => {
                Self::abort(&mut self.preview_task);
                let (task, handle) = self.build_preview_task(generation, file).abortable();
                self.preview_task = Some(handle);
                UploadWidgetAction::Run(task)
            }
            UploadEffect::SubmitUpload { generation, file } => {
                let (task, handle) = self.build_upload_task(generation, file).abortable();
                self.upload_task = Some(handle);
                UploadWidgetAction::Run(task)
            }
            UploadEffect::ForwardResult(data) => {
                self.upload_task = None;
                UploadWidgetAction::ResultsReceived(data)
            }
        }
    }

    fn build_preview_task(&self, generation: u64, file: SelectedFile) -> Task<UploadWidgetMessage> {
        let renderer = Arc::clone(&self.preview_renderer);

        Task::future(async move {
            let event = match renderer.render_preview(&file).await {
                Ok(preview) => UploadEvent::PreviewDecoded {
                    generation,
                    preview,
                },
                Err(e) => UploadEvent::PreviewFailed {
                    generation,
                    reason: e.to_string(),
                },
            };
            UploadWidgetMessage::Completed(event)
        })
    }

    fn build_upload_task(&self, generation: u64, file: SelectedFile) -> Task<UploadWidgetMessage> {
        Task::run(
            upload_messages(Arc::clone(&self.backend), generation, file),
            |message| message,
        )
    }

    pub fn render_ui(&self) -> Element<'_, UploadWidgetMessage> {
        let loading = self.state.is_loading();

        let picker = container(self.render_file_label())
            .width(Length::Fill)
            .height(Length::Fixed(240.0))
            .center_x(Length::Fill)
            .center_y(Length::Fixed(240.0))
            .style(|_theme| iced::widget::container::Style {
                background: Some(Background::Color(Color::from_rgba(0.5, 0.5, 0.5, 0.12))),
                border: iced::Border {
                    color: Color::from_rgba(0.5, 0.5, 0.5, 0.5),
                    width: 1.0,
                    radius: 8.0.into(),
                },
                ..Default::default()
            });

        let path_field = text_input(global_constants::LABEL_PATH_PLACEHOLDER, &self.path_input)
            .on_input_maybe((!loading).then_some(UploadWidgetMessage::PathInputChanged))
            .on_submit_maybe((!loading).then_some(UploadWidgetMessage::SelectPathPressed))
            .padding(8)
            .width(Length::Fill);

        let select_btn = button(text(global_constants::LABEL_SELECT_BUTTON))
            .padding([8, 16])
            .style(|theme, status| app_theme::cancel_button_style(theme, status))
            .on_press_maybe((!loading).then_some(UploadWidgetMessage::SelectPathPressed));

        let accept_hint = text(global_constants::PICKER_ACCEPT_FILTER)
            .size(12)
            .style(|_theme: &iced::Theme| iced::widget::text::Style {
                color: Some(app_theme::MUTED_TEXT_COLOR),
            });

        let mut content = column![
            picker,
            row![path_field, select_btn]
                .spacing(8)
                .align_y(Alignment::Center),
            accept_hint,
        ]
        .spacing(12)
        .width(Length::Fill);

        if let Some(file) = self.state.selected_file() {
            let mut details = file.size_label();
            if let Some((width, height)) = self.state.preview().and_then(|p| p.dimensions) {
                details.push_str(&format!(" {}x{}", width, height));
            }

            content = content.push(
                row![
                    text(&file.name).size(14),
                    text(details)
                        .size(13)
                        .style(|_theme: &iced::Theme| iced::widget::text::Style {
                            color: Some(app_theme::MUTED_TEXT_COLOR),
                        }),
                ]
                .spacing(8),
            );
        }

        if let Some(error) = self.state.error() {
            content = content.push(text(error).size(14).style(|_theme: &iced::Theme| {
                iced::widget::text::Style {
                    color: Some(app_theme::ERROR_TEXT_COLOR),
                }
            }));
        }

        if loading {
            let progress = self.state.progress();
            content = content.push(
                row![
                    progress_bar(0.0..=100.0, f32::from(progress)),
                    text(format!("{}%", progress)).size(13),
                ]
                .spacing(10)
                .align_y(Alignment::Center),
            );
        }

        let upload_label = if loading {
            global_constants::LABEL_PROCESSING_BUTTON
        } else {
            global_constants::LABEL_START_BUTTON
        };

        let upload_btn = button(text(upload_label).size(16))
            .padding([10, 28])
            .style(|theme, status| app_theme::primary_button_style(theme, status))
            .on_press_maybe(
                self.state
                    .can_upload()
                    .then_some(UploadWidgetMessage::UploadPressed),
            );

        let cancel_btn = button(text(global_constants::LABEL_CANCEL_BUTTON).size(16))
            .padding([10, 28])
            .style(|theme, status| app_theme::cancel_button_style(theme, status))
            .on_press_maybe(
                self.state
                    .can_cancel()
                    .then_some(UploadWidgetMessage::CancelPressed),
            );

        content
            .push(row![upload_btn, cancel_btn].spacing(12))
            .into()
    }

    fn render_file_label(&self) -> Element<'_, UploadWidgetMessage> {
        if let Some(preview) = self.state.preview() {
            return image(preview.image_handle.clone())
                .height(Length::Fixed(220.0))
                .into();
        }

        if let Some(file) = self.state.selected_file() {
            return text(file.extension_label()).size(36).into();
        }

        column![
            text("+").size(40),
            text(global_constants::LABEL_PICK_FILE).size(16),
            text(global_constants::LABEL_SUPPORTED_FILES)
                .size(12)
                .style(|_theme: &iced::Theme| iced::widget::text::Style {
                    color: Some(app_theme::MUTED_TEXT_COLOR),
                }),
        ]
        .spacing(6)
        .align_x(Alignment::Center)
        .into()
    }
}

/// In-flight submission plus the progress it has reported so far.
struct UploadRun {
    generation: u64,
    submission: Option<Fuse<BoxFuture<'static, Result<Value, UploadError>>>>,
    outcome: Option<Result<Value, UploadError>>,
    progress_receiver: mpsc::UnboundedReceiver<UploadProgress>,
}

enum UploadStep {
    Progress(Option<UploadProgress>),
    Settled(Result<Value, UploadError>),
}

/// Progress messages in the order the backend reported them, then exactly
/// one `UploadFinished`, then the end of the stream.
fn upload_messages(
    backend: Arc<dyn OcrBackend>,
    generation: u64,
    file: SelectedFile,
) -> impl Stream<Item = UploadWidgetMessage> {
    let (progress_sender, progress_receiver) = mpsc::unbounded();
    let submission = async move { backend.submit(&file, progress_sender).await }
        .boxed()
        .fuse();

    futures::stream::unfold(
        UploadRun {
            generation,
            submission: Some(submission),
            outcome: None,
            progress_receiver,
        },
        next_upload_message,
    )
}

async fn next_upload_message(mut run: UploadRun) -> Option<(UploadWidgetMessage, UploadRun)> {
    loop {
        if let Some(outcome) = run.outcome.take() {
            // Receiver is closed here, so this only drains what is buffered.
            let message = match run.progress_receiver.next().await {
                Some(progress) => {
                    run.outcome = Some(outcome);
                    UploadEvent::ProgressReported {
                        generation: run.generation,
                        progress,
                    }
                }
                None => UploadEvent::UploadFinished {
                    generation: run.generation,
                    outcome,
                },
            };
            return Some((UploadWidgetMessage::Completed(message), run));
        }

        let mut submission = run.submission.as_mut()?;
        let step = futures::select_biased! {
            progress = run.progress_receiver.next() => UploadStep::Progress(progress),
            outcome = submission => UploadStep::Settled(outcome),
        };

        match step {
            UploadStep::Progress(Some(progress)) => {
                let message = UploadEvent::ProgressReported {
                    generation: run.generation,
                    progress,
                };
                return Some((UploadWidgetMessage::Completed(message), run));
            }
            UploadStep::Progress(None) => {}
            UploadStep::Settled(outcome) => {
                run.submission = None;
                run.progress_receiver.close();
                run.outcome = Some(outcome);
            }
        }
    }
}
