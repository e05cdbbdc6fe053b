use async_trait::async_trait;
use futures::StreamExt;
use serde_json::Value;

use crate::core::errors::UploadError;
use crate::core::interfaces::adapters::{OcrBackend, ProgressSender};
use crate::core::models::{OcrResponse, SelectedFile, UploadProgress};
use crate::global_constants;

pub struct HttpOcrBackend {
    client: reqwest::Client,
    base_url: String,
    chunk_size_bytes: usize,
}

impl HttpOcrBackend {
    pub fn new(base_url: String, chunk_size_bytes: usize) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, chunk_size_bytes)
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: String,
        chunk_size_bytes: usize,
    ) -> Self {
        Self {
            client,
            base_url,
            chunk_size_bytes: chunk_size_bytes.max(1),
        }
    }

    /// Wraps the file bytes in a stream that reports how much of the body
    /// has been handed to the transport after each chunk.
    fn build_progress_body(&self, bytes: Vec<u8>, progress: ProgressSender) -> reqwest::Body {
        let total = bytes.len() as u64;
        let chunks: Vec<Vec<u8>> = bytes
            .chunks(self.chunk_size_bytes)
            .map(<[u8]>::to_vec)
            .collect();

        let mut sent = 0u64;
        let stream = futures::stream::iter(chunks).map(move |chunk| {
            sent += chunk.len() as u64;
            let _ = progress.unbounded_send(UploadProgress::new(sent, total));
            Ok::<Vec<u8>, std::io::Error>(chunk)
        });

        reqwest::Body::wrap_stream(stream)
    }

    fn build_form(
        &self,
        file: &SelectedFile,
        bytes: Vec<u8>,
        progress: ProgressSender,
    ) -> Result<reqwest::multipart::Form, UploadError> {
        let length = bytes.len() as u64;
        let body = self.build_progress_body(bytes, progress);

        let part = reqwest::multipart::Part::stream_with_length(body, length)
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        Ok(reqwest::multipart::Form::new().part(global_constants::MULTIPART_FILE_FIELD, part))
    }

    fn classify_response(status: reqwest::StatusCode, body: &str) -> Result<Value, UploadError> {
        if !status.is_success() {
            let message = OcrResponse::error_text_from_failure_body(body).unwrap_or_else(|| {
                format!("Request failed with status code {}", status.as_u16())
            });
            return Err(UploadError::Transport(message));
        }

        OcrResponse::parse_body(body).into_outcome()
    }
}

#[async_trait]
impl OcrBackend for HttpOcrBackend {
    async fn submit(
        &self,
        file: &SelectedFile,
        progress: ProgressSender,
    ) -> Result<Value, UploadError> {
        let url = file.upload_target().endpoint_url(&self.base_url);
        log::info!("[HTTP_OCR] Uploading {} to {}", file.name, url);

        let bytes = tokio::fs::read(&file.path)
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        // The file may have grown since it was staged.
        let size = bytes.len() as u64;
        if size > global_constants::MAX_UPLOAD_SIZE_BYTES {
            log::warn!("[HTTP_OCR] {} is now {} bytes, refusing to send", file.name, size);
            return Err(UploadError::FileTooLarge { size });
        }

        let form = self.build_form(file, bytes, progress)?;

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                log::error!("[HTTP_OCR] Request to {} failed: {}", url, e);
                UploadError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        log::debug!("[HTTP_OCR] {} responded {}: {}", url, status, body);

        Self::classify_response(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::mpsc;
    use serde_json::json;
    use std::path::Path;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    struct CapturedRequest {
        head: String,
        body: Vec<u8>,
    }

    fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack
            .windows(needle.len())
            .position(|window| window == needle)
    }

    fn content_length(head: &str) -> Option<usize> {
        head.lines().find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse().ok()
            } else {
                None
            }
        })
    }

    /// Accepts one connection, reads the full request and answers with the
    /// given status line and body.
    async fn serve_once(
        status_line: &'static str,
        response_body: &'static str,
    ) -> (String, tokio::task::JoinHandle<CapturedRequest>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buffer = Vec::new();
            let mut chunk = [0u8; 8192];

            let header_end = loop {
                let read = socket.read(&mut chunk).await.unwrap();
                buffer.extend_from_slice(&chunk[..read]);
                if let Some(position) = find_subsequence(&buffer, b"\r\n\r\n") {
                    break position + 4;
                }
            };

            let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
            let expected = content_length(&head);

            loop {
                let body_len = buffer.len() - header_end;
                let complete = match expected {
                    Some(length) => body_len >= length,
                    None => buffer.ends_with(b"--\r\n"),
                };
                if complete {
                    break;
                }
                let read = socket.read(&mut chunk).await.unwrap();
                if read == 0 {
                    break;
                }
                buffer.extend_from_slice(&chunk[..read]);
            }

            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                response_body.len(),
                response_body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            CapturedRequest {
                head,
                body: buffer[header_end..].to_vec(),
            }
        });

        (base_url, handle)
    }

    fn create_backend(base_url: String, chunk_size_bytes: usize) -> HttpOcrBackend {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        HttpOcrBackend::with_client(client, base_url, chunk_size_bytes)
    }

    fn write_file(dir: &Path, name: &str, bytes: &[u8], mime_type: &str) -> SelectedFile {
        let path = dir.join(name);
        std::fs::write(&path, bytes).unwrap();
        SelectedFile::build(path, name.to_string(), bytes.len() as u64, mime_type.to_string())
    }

    #[test]
    fn test_classify_non_success_status_prefers_server_error_text() {
        let with_text = HttpOcrBackend::classify_response(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"success":false,"error":"model crashed"}"#,
        );
        let without_text =
            HttpOcrBackend::classify_response(reqwest::StatusCode::BAD_GATEWAY, "Bad Gateway");

        assert_eq!(
            with_text,
            Err(UploadError::Transport("model crashed".to_string()))
        );
        assert_eq!(
            without_text,
            Err(UploadError::Transport(
                "Request failed with status code 502".to_string()
            ))
        );
    }

    #[test]
    fn test_classify_success_status_uses_body_flag() {
        assert_eq!(
            HttpOcrBackend::classify_response(
                reqwest::StatusCode::OK,
                r#"{"success":true,"data":[1,2]}"#
            ),
            Ok(json!([1, 2]))
        );
        assert_eq!(
            HttpOcrBackend::classify_response(reqwest::StatusCode::OK, r#"{"success":false}"#),
            Err(UploadError::BackendLogical("未知错误".to_string()))
        );
    }

    #[tokio::test]
    async fn test_submit_image_posts_multipart_to_image_endpoint() {
        let (base_url, server) =
            serve_once("HTTP/1.1 200 OK", r#"{"success":true,"data":{"text":"hi"}}"#).await;
        let dir = tempfile::tempdir().unwrap();
        let content = vec![0xABu8; 10_000];
        let file = write_file(dir.path(), "photo.jpg", &content, "image/jpeg");
        let backend = create_backend(base_url, 4096);
        let (progress_sender, mut progress_receiver) = mpsc::unbounded();

        let outcome = backend.submit(&file, progress_sender).await;
        let request = server.await.unwrap();
        let mut reported = Vec::new();
        while let Ok(Some(progress)) = progress_receiver.try_next() {
            reported.push(progress);
        }

        assert_eq!(outcome, Ok(json!({"text": "hi"})));
        assert!(request.head.starts_with("POST /api/ocr/image HTTP/1.1"));
        assert!(request
            .head
            .to_ascii_lowercase()
            .contains("content-type: multipart/form-data; boundary="));
        let body = String::from_utf8_lossy(&request.body);
        assert!(body.contains(r#"name="file"; filename="photo.jpg""#));
        assert!(body.contains("Content-Type: image/jpeg"));
        assert!(find_subsequence(&request.body, &content).is_some());

        let percents: Vec<u8> = reported.iter().map(UploadProgress::percent).collect();
        assert_eq!(percents, vec![41, 82, 100]);
    }

    #[tokio::test]
    async fn test_submit_document_reports_logical_failure() {
        let (base_url, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"success":false,"error":"unreadable document"}"#,
        )
        .await;
        let dir = tempfile::tempdir().unwrap();
        let file = write_file(dir.path(), "scan.pdf", b"%PDF-1.4", "application/pdf");
        let backend = create_backend(format!("{}/", base_url), 1024);
        let (progress_sender, _progress_receiver) = mpsc::unbounded();

        let outcome = backend.submit(&file, progress_sender).await;
        let request = server.await.unwrap();

        assert!(request.head.starts_with("POST /api/ocr/document HTTP/1.1"));
        assert_eq!(
            outcome,
            Err(UploadError::BackendLogical("unreadable document".to_string()))
        );
    }

    #[tokio::test]
    async fn test_submit_surfaces_connection_failure_as_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);
        let dir = tempfile::tempdir().unwrap();
        let file = write_file(dir.path(), "a.png", b"png", "image/png");
        let backend = create_backend(base_url, 1024);
        let (progress_sender, _progress_receiver) = mpsc::unbounded();

        let outcome = backend.submit(&file, progress_sender).await;

        assert!(matches!(outcome, Err(UploadError::Transport(_))));
    }

    #[tokio::test]
    async fn test_submit_rejects_file_that_grew_past_limit_after_staging() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let dir = tempfile::tempdir().unwrap();
        let file = write_file(dir.path(), "scan.pdf", b"%PDF", "application/pdf");
        assert!(file.validate().is_ok());
        let grown = 11 * 1024 * 1024;
        std::fs::write(&file.path, vec![0u8; grown]).unwrap();
        let backend = create_backend(base_url, 64 * 1024);
        let (progress_sender, mut progress_receiver) = mpsc::unbounded();

        let outcome = backend.submit(&file, progress_sender).await;
        let connection =
            tokio::time::timeout(std::time::Duration::from_millis(100), listener.accept()).await;

        assert_eq!(
            outcome,
            Err(UploadError::FileTooLarge {
                size: grown as u64
            })
        );
        assert!(connection.is_err());
        assert!(matches!(progress_receiver.try_next(), Ok(None)));
    }
}
