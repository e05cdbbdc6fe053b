use iced::widget::button;
use iced::{Background, Border, Color, Shadow, Theme};

use crate::user_settings::ThemeMode;

pub const ERROR_TEXT_COLOR: Color = Color::from_rgb(0.9, 0.3, 0.3);
pub const MUTED_TEXT_COLOR: Color = Color::from_rgb(0.55, 0.55, 0.6);

pub fn get_theme(mode: &ThemeMode) -> Theme {
    match mode {
        ThemeMode::Dark => Theme::custom(
            "Dark".to_string(),
            iced::theme::Palette {
                background: Color::from_rgb(0.11, 0.12, 0.14),
                text: Color::from_rgb(0.95, 0.95, 0.95),
                primary: Color::from_rgb(0.26, 0.52, 0.96),
                success: Color::from_rgb(0.2, 0.8, 0.4),
                danger: ERROR_TEXT_COLOR,
                warning: Color::from_rgb(1.0, 0.7, 0.0),
            },
        ),
        ThemeMode::Light => Theme::custom(
            "Light".to_string(),
            iced::theme::Palette {
                background: Color::from_rgb(0.96, 0.96, 0.97),
                text: Color::from_rgb(0.13, 0.13, 0.13),
                primary: Color::from_rgb(0.16, 0.42, 0.88),
                success: Color::from_rgb(0.1, 0.65, 0.3),
                danger: Color::from_rgb(0.85, 0.2, 0.2),
                warning: Color::from_rgb(0.9, 0.6, 0.0),
            },
        ),
    }
}

fn solid_button(background: Color, text_color: Color, snap: bool) -> button::Style {
    button::Style {
        background: Some(Background::Color(background)),
        text_color,
        border: Border {
            color: background,
            width: 1.0,
            radius: 6.0.into(),
        },
        shadow: Shadow::default(),
        snap,
    }
}

fn disabled_button() -> button::Style {
    button::Style {
        border: Border {
            color: Color::from_rgb(0.4, 0.4, 0.4),
            width: 1.0,
            radius: 6.0.into(),
        },
        ..solid_button(
            Color::from_rgb(0.3, 0.3, 0.3),
            Color::from_rgb(0.5, 0.5, 0.5),
            false,
        )
    }
}

fn tinted_button(
    status: button::Status,
    active: Color,
    hovered: Color,
    pressed: Color,
) -> button::Style {
    match status {
        button::Status::Active => solid_button(active, Color::WHITE, false),
        button::Status::Hovered => solid_button(hovered, Color::WHITE, false),
        button::Status::Pressed => solid_button(pressed, Color::WHITE, true),
        button::Status::Disabled => disabled_button(),
    }
}

pub fn primary_button_style(_theme: &Theme, status: button::Status) -> button::Style {
    tinted_button(
        status,
        Color::from_rgb(0.26, 0.52, 0.96),
        Color::from_rgb(0.36, 0.6, 1.0),
        Color::from_rgb(0.2, 0.42, 0.8),
    )
}

pub fn cancel_button_style(_theme: &Theme, status: button::Status) -> button::Style {
    tinted_button(
        status,
        Color::from_rgb(0.45, 0.45, 0.5),
        Color::from_rgb(0.55, 0.55, 0.6),
        Color::from_rgb(0.38, 0.38, 0.42),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_theme_dark_mode() {
        let theme = get_theme(&ThemeMode::Dark);
        let palette = theme.palette();

        assert_eq!(palette.background, Color::from_rgb(0.11, 0.12, 0.14));
        assert_eq!(palette.danger, ERROR_TEXT_COLOR);
    }

    #[test]
    fn test_get_theme_light_mode() {
        let theme = get_theme(&ThemeMode::Light);
        let palette = theme.palette();

        assert_eq!(palette.background, Color::from_rgb(0.96, 0.96, 0.97));
        assert_eq!(palette.text, Color::from_rgb(0.13, 0.13, 0.13));
    }

    #[test]
    fn test_primary_button_style_active_is_blue_with_white_text() {
        let style = primary_button_style(&Theme::Dark, button::Status::Active);

        assert_eq!(
            style.background,
            Some(Background::Color(Color::from_rgb(0.26, 0.52, 0.96)))
        );
        assert_eq!(style.text_color, Color::WHITE);
    }

    #[test]
    fn test_disabled_buttons_share_grey_style() {
        let primary = primary_button_style(&Theme::Dark, button::Status::Disabled);
        let cancel = cancel_button_style(&Theme::Dark, button::Status::Disabled);

        assert_eq!(primary.background, cancel.background);
        assert_eq!(primary.text_color, Color::from_rgb(0.5, 0.5, 0.5));
        assert_eq!(primary.border.color, Color::from_rgb(0.4, 0.4, 0.4));
    }

    #[test]
    fn test_pressed_state_snaps() {
        assert!(primary_button_style(&Theme::Light, button::Status::Pressed).snap);
        assert!(!cancel_button_style(&Theme::Light, button::Status::Hovered).snap);
    }
}
