use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use crate::core::models::SelectedFile;

#[async_trait]
pub trait FileInspector: Send + Sync {
    async fn inspect(&self, path: &Path) -> Result<SelectedFile>;
}
