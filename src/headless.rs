use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::adapters::{DataUrlPreviewRenderer, HttpOcrBackend, LocalFileInspector};
use crate::core::interfaces::adapters::FileInspector;
use crate::core::orchestrators::UploadController;
use crate::user_settings::UploaderSettings;

/// Runs one select-and-upload cycle without a window and prints the
/// backend's `data` payload to stdout.
pub fn run(settings: UploaderSettings, path: &Path) -> anyhow::Result<()> {
    log::info!("[HEADLESS] Uploading {:?} to {}", path, settings.backend_base_url);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(async {
        let file = LocalFileInspector::new().inspect(path).await?;

        let mut controller = UploadController::build(
            Arc::new(HttpOcrBackend::new(
                settings.backend_base_url.clone(),
                settings.upload_chunk_size_bytes,
            )),
            Arc::new(DataUrlPreviewRenderer::new()),
            Box::new(|data| match serde_json::to_string_pretty(&data) {
                Ok(rendered) => println!("{}", rendered),
                Err(e) => log::error!("[HEADLESS] Could not render result: {}", e),
            }),
        );

        controller.select_file(file).await?;
        controller.upload().await?;

        log::info!("[HEADLESS] Upload finished");
        Ok(())
    })
}
