use crate::global_constants;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadTarget {
    Image,
    Document,
}

impl UploadTarget {
    pub fn for_mime_type(mime_type: &str) -> Self {
        if mime_type.starts_with("image/") {
            UploadTarget::Image
        } else {
            UploadTarget::Document
        }
    }

    pub fn endpoint_path(&self) -> &'static str {
        match self {
            UploadTarget::Image => global_constants::OCR_IMAGE_ENDPOINT,
            UploadTarget::Document => global_constants::OCR_DOCUMENT_ENDPOINT,
        }
    }

    pub fn endpoint_url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.endpoint_path())
    }
}
