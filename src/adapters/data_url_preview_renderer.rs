use std::io::Cursor;

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::Engine;

use crate::core::interfaces::adapters::PreviewRenderer;
use crate::core::models::{Preview, SelectedFile};

/// Builds `data:<mime>;base64,...` previews for image files.
pub struct DataUrlPreviewRenderer;

impl DataUrlPreviewRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn encode_data_url(mime_type: &str, bytes: &[u8]) -> String {
        let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
        format!("data:{};base64,{}", mime_type, payload)
    }

    fn read_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
        let reader = ::image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .ok()?;

        match reader.into_dimensions() {
            Ok(dimensions) => Some(dimensions),
            Err(e) => {
                log::debug!("[PREVIEW_RENDERER] Could not read image header: {}", e);
                None
            }
        }
    }
}

impl Default for DataUrlPreviewRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PreviewRenderer for DataUrlPreviewRenderer {
    async fn render_preview(&self, file: &SelectedFile) -> Result<Preview> {
        log::info!("[PREVIEW_RENDERER] Rendering preview for {}", file.name);

        let bytes = tokio::fs::read(&file.path)
            .await
            .with_context(|| format!("Failed to read {}", file.path.display()))?;

        let data_url = Self::encode_data_url(&file.mime_type, &bytes);
        let dimensions = Self::read_dimensions(&bytes);

        Ok(Preview::build(data_url, dimensions, bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_png(path: &std::path::Path, width: u32, height: u32) {
        let img = ::image::RgbaImage::from_pixel(width, height, ::image::Rgba([10, 20, 30, 255]));
        img.save(path).unwrap();
    }

    #[test]
    fn test_encode_data_url_prefixes_mime_and_base64() {
        let url = DataUrlPreviewRenderer::encode_data_url("image/gif", b"GIF89a");

        assert_eq!(url, "data:image/gif;base64,R0lGODlh");
    }

    #[tokio::test]
    async fn test_render_preview_produces_data_url_and_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.png");
        write_png(&path, 3, 2);
        let size = std::fs::metadata(&path).unwrap().len();
        let file = SelectedFile::build(path, "tiny.png".to_string(), size, "image/png".to_string());

        let preview = DataUrlPreviewRenderer::new()
            .render_preview(&file)
            .await
            .unwrap();

        assert!(preview.data_url.starts_with("data:image/png;base64,iVBOR"));
        assert_eq!(preview.dimensions, Some((3, 2)));
    }

    #[tokio::test]
    async fn test_render_preview_tolerates_undecodable_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"not really a jpeg").unwrap();
        let file = SelectedFile::build(path, "broken.jpg".to_string(), 17, "image/jpeg".to_string());

        let preview = DataUrlPreviewRenderer::new()
            .render_preview(&file)
            .await
            .unwrap();

        assert!(!preview.data_url.is_empty());
        assert_eq!(preview.dimensions, None);
    }

    #[tokio::test]
    async fn test_render_preview_fails_for_missing_file() {
        let file = SelectedFile::build(
            PathBuf::from("/definitely/not/here.png"),
            "here.png".to_string(),
            1,
            "image/png".to_string(),
        );

        assert!(DataUrlPreviewRenderer::new().render_preview(&file).await.is_err());
    }
}
