//! The multipart upload sub-path for large binary payloads.
//!
//! Uploads deliberately bypass [`ApiClient`]'s JSON helpers: the multipart
//! boundary header must be computed by the HTTP client, large media needs a
//! much longer timeout than ordinary calls, and the UI wants upload-progress
//! events. Everything else (token resolution, error taxonomy) is shared.

use crate::{
    storage, ApiClient, ApiError,
};
use reqwest::{
    header,
    multipart::{Form, Part},
    Body,
};
use serde_json::Value;
use std::{
    sync::Arc,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

/// How long a single upload may take. Sized for a course video on a slow
/// connection.
pub const UPLOAD_TIMEOUT: Duration = Duration::from_secs(5 * 60);

const CHUNK_SIZE: usize = 64 * 1024;

/// A file handed to us by the host application's picker.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    /// The picker-supplied file name, if it had one.
    pub name: Option<String>,
    /// The MIME type, e.g. `video/mp4` or `application/pdf`.
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Which upload endpoint a file is destined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Document,
    Brochure,
    CourseVideo,
    CourseThumbnail,
}

impl UploadKind {
    pub(crate) fn path(self) -> &'static str {
        match self {
            UploadKind::Document => "/uploads/document",
            UploadKind::Brochure => "/uploads/brochure",
            UploadKind::CourseVideo => "/uploads/course-video",
            UploadKind::CourseThumbnail => "/uploads/course-thumbnail",
        }
    }

    /// The multipart field name each endpoint expects.
    pub(crate) fn field_name(self) -> &'static str {
        match self {
            UploadKind::Document => "document",
            _ => "file",
        }
    }

    fn label(self) -> &'static str {
        match self {
            UploadKind::Document => "document",
            UploadKind::Brochure => "brochure",
            UploadKind::CourseVideo => "course-video",
            UploadKind::CourseThumbnail => "course-thumbnail",
        }
    }
}

/// Reports upload progress as a percentage of bytes handed to the transport.
/// Advisory only; never used for flow control.
pub type ProgressFn = Arc<dyn Fn(u8) + Send + Sync>;

/// Send one file to its upload endpoint and return the parsed response.
///
/// Fails fast with a [`ApiError::Validation`] if no session token can be
/// resolved; an unauthenticated multipart request would be pointless
/// round-trip traffic.
pub async fn upload(
    client: &ApiClient,
    kind: UploadKind,
    file: UploadFile,
    progress: Option<ProgressFn>,
) -> Result<Value, ApiError> {
    let token = storage::resolve_token(client.store()).ok_or_else(|| {
        ApiError::Validation(String::from(
            "Authentication token is missing - please log in again",
        ))
    })?;

    let filename = file
        .name
        .clone()
        .unwrap_or_else(|| fallback_name(kind, &file.content_type));
    let url = format!("{}{}", client.base_url(), kind.path());
    log::info!("Uploading {} ({} bytes) to {}", filename, file.data.len(), url);

    let content_type = file.content_type.clone();
    let total = file.data.len();
    let body = Body::wrap_stream(progress_stream(file.data, progress));

    let part = Part::stream_with_length(body, total as u64)
        .file_name(filename)
        .mime_str(&content_type)
        .map_err(|_| {
            ApiError::Validation(format!(
                "invalid content type \"{}\"",
                content_type
            ))
        })?;
    let form = Form::new().part(kind.field_name(), part);

    // A dedicated client: no JSON default header, upload-sized timeout.
    let http = reqwest::Client::builder()
        .user_agent(crate::DEFAULT_USER_AGENT)
        .timeout(UPLOAD_TIMEOUT)
        .build()
        .map_err(|e| ApiError::Network(Some(e)))?;

    let response = http
        .post(&url)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .multipart(form)
        .send()
        .await
        .map_err(ApiError::from_transport)?;

    let status = response.status();
    let raw = response.text().await.map_err(ApiError::from_transport)?;

    if !status.is_success() {
        log::error!("Upload failed with {}: {}", status, raw);
        return Err(ApiError::HttpStatus {
            status: status.as_u16(),
            body: raw,
        });
    }

    log::debug!("Upload finished with {}", status);
    serde_json::from_str(&raw).map_err(|_| ApiError::ParseFailure { body: raw })
}

/// `<kind>-<unix-millis>.<ext>` for pickers that hand us anonymous blobs.
fn fallback_name(kind: UploadKind, content_type: &str) -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);

    format!("{}-{}.{}", kind.label(), timestamp, extension(content_type))
}

fn extension(content_type: &str) -> &str {
    match content_type.rsplit('/').next() {
        Some(ext) if !ext.is_empty() => ext,
        _ => "bin",
    }
}

fn progress_stream(
    data: Vec<u8>,
    progress: Option<ProgressFn>,
) -> impl futures::Stream<Item = Result<Vec<u8>, std::io::Error>> {
    let total = data.len();
    let mut sent = 0usize;
    let chunks: Vec<Vec<u8>> =
        data.chunks(CHUNK_SIZE).map(|chunk| chunk.to_vec()).collect();

    futures::stream::iter(chunks.into_iter().map(move |chunk| {
        sent += chunk.len();
        if let Some(report) = &progress {
            let percent = if total == 0 {
                100
            } else {
                (sent * 100 / total) as u8
            };
            report(percent);
        }
        Ok(chunk)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use futures::StreamExt;
    use std::sync::Mutex;

    #[test]
    fn field_names_follow_endpoint_convention() {
        assert_eq!(UploadKind::Document.field_name(), "document");
        assert_eq!(UploadKind::Brochure.field_name(), "file");
        assert_eq!(UploadKind::CourseVideo.field_name(), "file");
        assert_eq!(UploadKind::CourseThumbnail.field_name(), "file");
    }

    #[test]
    fn fallback_name_has_kind_prefix_and_mime_extension() {
        let name = fallback_name(UploadKind::CourseVideo, "video/mp4");
        assert!(name.starts_with("course-video-"));
        assert!(name.ends_with(".mp4"));
    }

    #[test]
    fn unknown_content_type_falls_back_to_bin() {
        assert_eq!(extension(""), "bin");
        assert_eq!(extension("video/"), "bin");
        assert_eq!(extension("application/pdf"), "pdf");
    }

    #[tokio::test]
    async fn missing_token_fails_before_any_network_traffic() {
        let store = Arc::new(MemoryStore::new());
        let client = ApiClient::new("http://localhost:9/api", store).unwrap();
        let file = UploadFile {
            name: None,
            content_type: String::from("video/mp4"),
            data: vec![0; 16],
        };

        let err = upload(&client, UploadKind::CourseVideo, file, None)
            .await
            .unwrap_err();

        match err {
            ApiError::Validation(msg) => {
                assert!(msg.contains("Authentication token is missing"));
            },
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn progress_reaches_one_hundred_percent() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let report: ProgressFn =
            Arc::new(move |percent| sink.lock().unwrap().push(percent));

        let data = vec![7u8; CHUNK_SIZE * 2 + 10];
        let mut stream = progress_stream(data, Some(report));
        while stream.next().await.is_some() {}

        let seen = seen.lock().unwrap();
        assert_eq!(seen.last(), Some(&100));
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    }
}
