use anyhow::Result;
use async_trait::async_trait;

use crate::core::models::{Preview, SelectedFile};

#[async_trait]
pub trait PreviewRenderer: Send + Sync {
    async fn render_preview(&self, file: &SelectedFile) -> Result<Preview>;
}
