use std::path::PathBuf;
use std::sync::Arc;

use iced::widget::{column, container, text};
use iced::{Alignment, Background, Color, Element, Length, Task};

use crate::adapters::{DataUrlPreviewRenderer, HttpOcrBackend, LocalFileInspector};
use crate::global_constants;
use crate::presentation::{
    app_theme, OcrResultsMessage, OcrResultsView, UploadWidget, UploadWidgetAction,
    UploadWidgetMessage,
};
use crate::user_settings::{ThemeMode, UploaderSettings};

#[derive(Debug, Clone)]
pub enum AppMessage {
    Widget(UploadWidgetMessage),
    Results(OcrResultsMessage),
    CloseRequested,
}

pub struct UploaderApp {
    widget: UploadWidget,
    results: Option<OcrResultsView>,
    theme_mode: ThemeMode,
}

impl UploaderApp {
    pub fn build(initial_path: Option<PathBuf>) -> (Self, Task<AppMessage>) {
        log::info!("[APP] Initializing application");

        let settings = UploaderSettings::load().unwrap_or_else(|e| {
            log::warn!("[APP] Failed to load settings: {}, using defaults", e);
            UploaderSettings::default()
        });

        let widget = UploadWidget::build(
            Arc::new(LocalFileInspector::new()),
            Arc::new(DataUrlPreviewRenderer::new()),
            Arc::new(HttpOcrBackend::new(
                settings.backend_base_url.clone(),
                settings.upload_chunk_size_bytes,
            )),
        );

        let task = match initial_path {
            Some(path) => {
                log::info!("[APP] Preselecting {:?}", path);
                Task::done(AppMessage::Widget(UploadWidgetMessage::FileDropped(path)))
            }
            None => Task::none(),
        };

        (
            Self {
                widget,
                results: None,
                theme_mode: settings.theme_mode,
            },
            task,
        )
    }

    pub fn handle_update(&mut self, message: AppMessage) -> Task<AppMessage> {
        match message {
            AppMessage::Widget(widget_message) => match self.widget.update(widget_message) {
                UploadWidgetAction::None => Task::none(),
                UploadWidgetAction::Run(task) => task.map(AppMessage::Widget),
                UploadWidgetAction::ResultsReceived(data) => {
                    self.on_results_received(data);
                    Task::none()
                }
            },
            AppMessage::Results(OcrResultsMessage::Close) => {
                self.results = None;
                Task::none()
            }
            AppMessage::Results(results_message) => {
                if let Some(results) = self.results.as_mut() {
                    results.update(results_message);
                }
                Task::none()
            }
            AppMessage::CloseRequested => {
                log::info!("[APP] Close requested, shutting down");
                self.widget.teardown();
                iced::exit()
            }
        }
    }

    fn on_results_received(&mut self, data: serde_json::Value) {
        log::info!("[APP] Received OCR results");
        self.results = Some(OcrResultsView::build_with_results(data));
    }

    pub fn render_view(&self) -> Element<'_, AppMessage> {
        let theme = app_theme::get_theme(&self.theme_mode);

        let header = column![
            text(global_constants::APPLICATION_TITLE).size(26),
            text(global_constants::APPLICATION_SUBTITLE)
                .size(14)
                .style(|_theme: &iced::Theme| iced::widget::text::Style {
                    color: Some(app_theme::MUTED_TEXT_COLOR),
                }),
        ]
        .spacing(6)
        .align_x(Alignment::Center);

        let mut content = column![
            header,
            self.widget.render_ui().map(AppMessage::Widget),
        ]
        .spacing(20)
        .padding(28)
        .align_x(Alignment::Center);

        if let Some(results) = &self.results {
            let divider = container(text(""))
                .width(Length::Fill)
                .height(Length::Fixed(1.0))
                .style(|_theme| iced::widget::container::Style {
                    background: Some(Background::Color(Color::from_rgba(0.5, 0.5, 0.5, 0.3))),
                    ..Default::default()
                });

            content = content
                .push(divider)
                .push(results.render_ui().map(AppMessage::Results));
        }

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_theme| {
                let palette = theme.palette();
                iced::widget::container::Style {
                    background: Some(Background::Color(palette.background)),
                    text_color: Some(palette.text),
                    ..Default::default()
                }
            })
            .into()
    }

    pub fn handle_subscription(&self) -> iced::Subscription<AppMessage> {
        use iced::window;

        iced::event::listen_with(|event, _status, _id| match event {
            iced::Event::Window(window::Event::FileDropped(path)) => Some(AppMessage::Widget(
                UploadWidgetMessage::FileDropped(path),
            )),
            iced::Event::Window(window::Event::CloseRequested) => {
                Some(AppMessage::CloseRequested)
            }
            _ => None,
        })
    }
}
