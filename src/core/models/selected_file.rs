use std::path::PathBuf;

use crate::core::errors::UploadError;
use crate::core::models::UploadTarget;
use crate::global_constants;

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

impl SelectedFile {
    pub fn build(path: PathBuf, name: String, size: u64, mime_type: String) -> Self {
        Self {
            path,
            name,
            size,
            mime_type,
        }
    }

    /// Type is checked before size, so an oversized file with a bad type
    /// reports the type problem.
    pub fn validate(&self) -> Result<(), UploadError> {
        if !global_constants::ALLOWED_MIME_TYPES.contains(&self.mime_type.as_str()) {
            return Err(UploadError::UnsupportedType {
                mime_type: self.mime_type.clone(),
            });
        }

        if self.size > global_constants::MAX_UPLOAD_SIZE_BYTES {
            return Err(UploadError::FileTooLarge { size: self.size });
        }

        Ok(())
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    pub fn upload_target(&self) -> UploadTarget {
        UploadTarget::for_mime_type(&self.mime_type)
    }

    pub fn extension_label(&self) -> String {
        self.name
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_lowercase()
    }

    pub fn size_label(&self) -> String {
        format!("({:.2} KB)", self.size as f64 / 1024.0)
    }
}
