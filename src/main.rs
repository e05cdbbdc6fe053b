#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod adapters;
mod app;
mod core;
mod global_constants;
mod headless;
mod presentation;
mod user_settings;

use std::path::PathBuf;

const USAGE: &str = "usage: ocr-uploader [<path>] | ocr-uploader --headless <path>";

#[derive(Debug, PartialEq)]
enum LaunchMode {
    Window { initial_path: Option<PathBuf> },
    Headless { path: PathBuf },
}

fn parse_launch_mode(args: &[String]) -> anyhow::Result<LaunchMode> {
    match args {
        [] => Ok(LaunchMode::Window { initial_path: None }),
        [flag, path] if flag == "--headless" => Ok(LaunchMode::Headless {
            path: PathBuf::from(path),
        }),
        [path] if !path.starts_with("--") => Ok(LaunchMode::Window {
            initial_path: Some(PathBuf::from(path)),
        }),
        _ => anyhow::bail!("Unexpected arguments {:?}\n{}", args, USAGE),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    log::info!("[MAIN] Starting OCR uploader");

    let args: Vec<String> = std::env::args().skip(1).collect();

    let initial_path = match parse_launch_mode(&args)? {
        LaunchMode::Headless { path } => {
            let settings = user_settings::UploaderSettings::load()?;
            return headless::run(settings, &path);
        }
        LaunchMode::Window { initial_path } => initial_path,
    };

    iced::application(
        move || app::UploaderApp::build(initial_path.clone()),
        app::UploaderApp::handle_update,
        app::UploaderApp::render_view,
    )
    .title(global_constants::APPLICATION_TITLE)
    .subscription(app::UploaderApp::handle_subscription)
    .window_size((560.0, 820.0))
    .exit_on_close_request(false)
    .run()
    .map_err(|e| anyhow::anyhow!("GUI failed: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn test_no_arguments_opens_empty_window() {
        assert_eq!(
            parse_launch_mode(&[]).unwrap(),
            LaunchMode::Window { initial_path: None }
        );
    }

    #[test]
    fn test_single_path_is_preselected() {
        assert_eq!(
            parse_launch_mode(&to_args(&["/tmp/scan.pdf"])).unwrap(),
            LaunchMode::Window {
                initial_path: Some(PathBuf::from("/tmp/scan.pdf"))
            }
        );
    }

    #[test]
    fn test_headless_with_path() {
        assert_eq!(
            parse_launch_mode(&to_args(&["--headless", "photo.jpg"])).unwrap(),
            LaunchMode::Headless {
                path: PathBuf::from("photo.jpg")
            }
        );
    }

    #[test]
    fn test_bare_headless_flag_is_a_usage_error() {
        let error = parse_launch_mode(&to_args(&["--headless"])).unwrap_err();

        assert!(error.to_string().contains("usage:"));
    }

    #[test]
    fn test_extra_arguments_are_rejected() {
        assert!(parse_launch_mode(&to_args(&["--headless", "a.png", "b.png"])).is_err());
        assert!(parse_launch_mode(&to_args(&["a.png", "b.png"])).is_err());
    }
}
