use iced::widget::image;

#[derive(Clone)]
pub struct Preview {
    pub data_url: String,
    pub dimensions: Option<(u32, u32)>,
    pub image_handle: image::Handle,
}

impl std::fmt::Debug for Preview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preview")
            .field("data_url_len", &self.data_url.len())
            .field("dimensions", &self.dimensions)
            .finish()
    }
}

impl Preview {
    pub fn build(data_url: String, dimensions: Option<(u32, u32)>, raw_bytes: Vec<u8>) -> Self {
        log::debug!(
            "[PREVIEW] building preview: {} chars, dimensions={:?}",
            data_url.len(),
            dimensions
        );

        Self {
            data_url,
            dimensions,
            image_handle: image::Handle::from_bytes(raw_bytes),
        }
    }
}
