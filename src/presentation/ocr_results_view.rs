use iced::widget::{button, column, container, row, scrollable, text};
use iced::{Alignment, Element, Length};
use serde_json::Value;

use crate::global_constants;
use crate::presentation::app_theme;

/// Host-side panel that receives the backend's `data` payload.
pub struct OcrResultsView {
    extracted_text: String,
    copied: bool,
}

#[derive(Debug, Clone)]
pub enum OcrResultsMessage {
    CopyText,
    Close,
}

impl OcrResultsView {
    pub fn build_with_results(payload: Value) -> Self {
        let extracted_text = Self::extract_display_text(&payload);
        log::info!(
            "[OCR_RESULTS] Creating view with {} characters of text",
            extracted_text.len()
        );

        Self {
            extracted_text,
            copied: false,
        }
    }

    /// Shows `data.text` when the backend provides it, otherwise the whole
    /// payload as indented JSON.
    fn extract_display_text(payload: &Value) -> String {
        if let Some(text) = payload.get("text").and_then(Value::as_str) {
            return text.to_string();
        }

        serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
    }

    pub fn get_extracted_text(&self) -> &str {
        &self.extracted_text
    }

    pub fn update(&mut self, message: OcrResultsMessage) {
        match message {
            OcrResultsMessage::CopyText => {
                log::info!("[OCR_RESULTS] Copying text to clipboard");
                match arboard::Clipboard::new()
                    .and_then(|mut clipboard| clipboard.set_text(self.get_extracted_text()))
                {
                    Ok(()) => self.copied = true,
                    Err(e) => log::error!("[OCR_RESULTS] Failed to copy to clipboard: {}", e),
                }
            }
            OcrResultsMessage::Close => {
                log::info!("[OCR_RESULTS] Closing results view");
            }
        }
    }

    pub fn render_ui(&self) -> Element<'_, OcrResultsMessage> {
        let title = text(global_constants::LABEL_RESULTS_TITLE).size(22);

        let body = scrollable(
            text(self.get_extracted_text())
                .size(15)
                .width(Length::Fill),
        )
        .height(Length::Fixed(220.0));

        let copy_label = if self.copied { "✔" } else { global_constants::LABEL_COPY_BUTTON };

        let copy_btn = button(text(copy_label))
            .padding([8, 20])
            .style(|theme, status| app_theme::primary_button_style(theme, status))
            .on_press(OcrResultsMessage::CopyText);

        let close_btn = button(text(global_constants::LABEL_CLEAR_BUTTON))
            .padding([8, 20])
            .style(|theme, status| app_theme::cancel_button_style(theme, status))
            .on_press(OcrResultsMessage::Close);

        container(
            column![title, body, row![copy_btn, close_btn].spacing(10)]
                .spacing(12)
                .align_x(Alignment::Start),
        )
        .width(Length::Fill)
        .into()
    }
}
