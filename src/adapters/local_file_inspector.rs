use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::io::AsyncReadExt;

use crate::core::interfaces::adapters::FileInspector;
use crate::core::models::SelectedFile;
use crate::global_constants;

/// Resolves a path on disk into a [`SelectedFile`], guessing the MIME type
/// the way a browser file picker would: extension first, content second.
pub struct LocalFileInspector;

impl LocalFileInspector {
    pub fn new() -> Self {
        Self
    }

    fn mime_type_from_extension(path: &Path) -> Option<&'static str> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();

        let mime_type = match extension.as_str() {
            "jpg" | "jpeg" | "jpe" | "jfif" => global_constants::MIME_JPEG,
            "png" => global_constants::MIME_PNG,
            "gif" => global_constants::MIME_GIF,
            "webp" => "image/webp",
            "bmp" => "image/bmp",
            "tif" | "tiff" => "image/tiff",
            "pdf" => global_constants::MIME_PDF,
            "xls" => global_constants::MIME_LEGACY_SPREADSHEET,
            "xlsx" => global_constants::MIME_MODERN_SPREADSHEET,
            "csv" => "text/csv",
            "txt" => "text/plain",
            _ => return None,
        };

        Some(mime_type)
    }

    async fn sniff_mime_type(path: &Path) -> Result<String> {
        let mut file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("Failed to open {}", path.display()))?;

        let mut header = vec![0u8; global_constants::SNIFF_HEADER_BYTES];
        let read = file.read(&mut header).await?;
        header.truncate(read);

        let mime_type = infer::get(&header)
            .map(|kind| kind.mime_type())
            .unwrap_or(global_constants::MIME_OCTET_STREAM);

        log::debug!(
            "[FILE_INSPECTOR] Sniffed {} from {} header bytes",
            mime_type,
            read
        );
        Ok(mime_type.to_string())
    }
}

impl Default for LocalFileInspector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileInspector for LocalFileInspector {
    async fn inspect(&self, path: &Path) -> Result<SelectedFile> {
        log::info!("[FILE_INSPECTOR] Inspecting {:?}", path);

        let metadata = tokio::fs::metadata(path)
            .await
            .with_context(|| format!("Failed to read metadata for {}", path.display()))?;

        if !metadata.is_file() {
            anyhow::bail!("{} is not a regular file", path.display());
        }

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow::anyhow!("Unusable file name: {}", path.display()))?
            .to_string();

        let mime_type = match Self::mime_type_from_extension(path) {
            Some(mime_type) => mime_type.to_string(),
            None => Self::sniff_mime_type(path).await?,
        };

        log::debug!(
            "[FILE_INSPECTOR] {} -> {} bytes, {}",
            name,
            metadata.len(),
            mime_type
        );

        Ok(SelectedFile::build(
            path.to_path_buf(),
            name,
            metadata.len(),
            mime_type,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_mime_type_from_extension_is_case_insensitive() {
        assert_eq!(
            LocalFileInspector::mime_type_from_extension(Path::new("SCAN.JPG")),
            Some("image/jpeg")
        );
        assert_eq!(
            LocalFileInspector::mime_type_from_extension(Path::new("book.Xlsx")),
            Some(global_constants::MIME_MODERN_SPREADSHEET)
        );
        assert_eq!(
            LocalFileInspector::mime_type_from_extension(Path::new("noext")),
            None
        );
    }

    #[tokio::test]
    async fn test_inspect_reads_name_size_and_extension_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoice.pdf");
        std::fs::write(&path, vec![b'%'; 1234]).unwrap();

        let file = LocalFileInspector::new().inspect(&path).await.unwrap();

        assert_eq!(file.name, "invoice.pdf");
        assert_eq!(file.size, 1234);
        assert_eq!(file.mime_type, global_constants::MIME_PDF);
        assert_eq!(file.path, path);
    }

    #[tokio::test]
    async fn test_inspect_sniffs_content_when_extension_unknown() {
        let mut temp = tempfile::Builder::new().suffix(".upload").tempfile().unwrap();
        temp.write_all(&PNG_SIGNATURE).unwrap();
        temp.write_all(&[0u8; 32]).unwrap();
        temp.flush().unwrap();

        let file = LocalFileInspector::new().inspect(temp.path()).await.unwrap();

        assert_eq!(file.mime_type, global_constants::MIME_PNG);
    }

    #[tokio::test]
    async fn test_inspect_unknown_content_falls_back_to_octet_stream() {
        let mut temp = tempfile::Builder::new().suffix(".blob").tempfile().unwrap();
        temp.write_all(b"just some words").unwrap();
        temp.flush().unwrap();

        let file = LocalFileInspector::new().inspect(temp.path()).await.unwrap();

        assert_eq!(file.mime_type, "application/octet-stream");
    }

    #[tokio::test]
    async fn test_inspect_rejects_missing_file_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        let inspector = LocalFileInspector::new();

        assert!(inspector.inspect(&dir.path().join("gone.png")).await.is_err());
        assert!(inspector.inspect(dir.path()).await.is_err());
    }
}
