//! HTTP client for the voice backend.
//!
//! Wraps the six endpoints the panel consumes (status, samples, upload,
//! train, synthesize, output download) using [`reqwest`].

use std::{
    path::Path,
    time::Duration,
};

use futures_util::StreamExt;
use reqwest::{
    multipart::{
        Form,
        Part,
    },
    Response,
    Url,
};
use tokio::io::AsyncWriteExt;

use super::{
    types::{
        ActionReply,
        SampleList,
        StatusSnapshot,
    },
    upload::{
        progress_body,
        ProgressCallback,
    },
};
use crate::core::{
    http::http_client,
    PanelError,
};

/// HTTP client for a single backend instance.
#[derive(Debug, Clone)]
pub struct PanelApi {
    client: reqwest::Client,
    base_url: Url,
    read_timeout: Duration,
}

impl PanelApi {
    /// Create a client for the backend at `base_url`, e.g. `http://127.0.0.1:9871`.
    ///
    /// `read_timeout` bounds the status and sample reads. Uploads and job
    /// triggers run without a total timeout because the backend may hold the
    /// connection open until a job finishes.
    pub fn new(base_url: &str, read_timeout: Duration) -> Result<Self, PanelError> {
        Ok(Self { client: http_client()?, base_url: normalize_base_url(base_url)?, read_timeout })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, PanelError> {
        Ok(self.base_url.join(path)?)
    }

    /// `GET /api/status`
    pub async fn status(&self) -> Result<StatusSnapshot, PanelError> {
        let response = self
            .client
            .get(self.endpoint("api/status")?)
            .timeout(self.read_timeout)
            .send()
            .await?;

        Ok(ensure_success(response).await?.json().await?)
    }

    /// `GET /api/samples`
    pub async fn samples(&self) -> Result<SampleList, PanelError> {
        let response = self
            .client
            .get(self.endpoint("api/samples")?)
            .timeout(self.read_timeout)
            .send()
            .await?;

        Ok(ensure_success(response).await?.json().await?)
    }

    /// `POST /api/upload_sample` with the file as multipart field `file`.
    pub async fn upload_sample(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        on_progress: Option<ProgressCallback>,
    ) -> Result<ActionReply, PanelError> {
        let (body, length) = progress_body(bytes, on_progress);
        let part = Part::stream_with_length(body, length).file_name(file_name.to_string());
        let form = Form::new().part("file", part);

        let response =
            self.client.post(self.endpoint("api/upload_sample")?).multipart(form).send().await?;

        read_action_reply(response).await
    }

    /// Reads `path` and uploads it under its own file name.
    pub async fn upload_sample_file(
        &self,
        path: &Path,
        on_progress: Option<ProgressCallback>,
    ) -> Result<ActionReply, PanelError> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| PanelError::Custom(format!("Ungültiger Dateiname: {}", path.display())))?
            .to_string();
        let bytes = tokio::fs::read(path).await?;

        tracing::debug!("Uploading {} ({} bytes)", file_name, bytes.len());
        self.upload_sample(&file_name, bytes, on_progress).await
    }

    /// `POST /api/train` without a body.
    pub async fn train(&self) -> Result<ActionReply, PanelError> {
        let response = self.client.post(self.endpoint("api/train")?).send().await?;
        read_action_reply(response).await
    }

    /// `POST /api/synthesize` with the text as form field `text`.
    pub async fn synthesize(&self, text: &str) -> Result<ActionReply, PanelError> {
        let form = Form::new().text("text", text.to_string());
        let response =
            self.client.post(self.endpoint("api/synthesize")?).multipart(form).send().await?;
        read_action_reply(response).await
    }

    /// Download URL for an output file; the name is used verbatim.
    pub fn output_url(&self, file_name: &str) -> Result<Url, PanelError> {
        self.endpoint(&format!("api/output/{}", file_name))
    }

    /// Streams `GET /api/output/{file_name}` into `destination`, returning the
    /// number of bytes written.
    pub async fn download_output(
        &self,
        file_name: &str,
        destination: &Path,
    ) -> Result<u64, PanelError> {
        let response = self.client.get(self.output_url(file_name)?).send().await?;
        let response = ensure_success(response).await?;

        let mut file = tokio::fs::File::create(destination).await?;
        let mut written: u64 = 0;
        let mut chunks = response.bytes_stream();
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        Ok(written)
    }
}

/// Parses and validates a backend base URL, making sure it ends in `/` so
/// relative endpoint paths join underneath it.
pub fn normalize_base_url(raw: &str) -> Result<Url, PanelError> {
    let trimmed = raw.trim();
    let mut url = Url::parse(trimmed)?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(PanelError::InvalidBaseUrl(trimmed.to_string()));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}

async fn ensure_success(response: Response) -> Result<Response, PanelError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(PanelError::Status { status: status.as_u16(), body })
}

/// Action endpoints answer with `{"error": ...}` even on 4xx, whatever
/// content type they declare, and with a non-JSON body (e.g. audio) on some
/// successes.
async fn read_action_reply(response: Response) -> Result<ActionReply, PanelError> {
    let status = response.status();
    let body = response.bytes().await?;

    match ActionReply::from_body(&body) {
        Some(reply) if status.is_success() || reply.error().is_some() => Ok(reply),
        _ if status.is_success() => Ok(ActionReply::default()),
        _ => Err(PanelError::Status {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&body).into_owned(),
        }),
    }
}
