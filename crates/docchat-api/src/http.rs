use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

use docchat_core::{normalize_base_url, ChatReply, ChatRequest, Outcome, UploadReply, UploadRequest};

use crate::backend::{Backend, DocumentFile};
use crate::error::ApiError;

/// Talks to the document chat server over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(base_url);
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::InvalidUrl(base_url));
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("docchat/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn upload(&self, request: UploadRequest<DocumentFile>) -> Outcome<UploadReply> {
        let url = self.endpoint("upload");
        log::debug!(
            "POST {} ({}, {} bytes)",
            url,
            request.file.name,
            request.file.bytes.len()
        );

        let part = Part::bytes(request.file.bytes).file_name(request.file.name);
        let mut form = Form::new().part("file", part);
        if let Some(model) = request.model {
            form = form.text("model", model);
        }

        decode(self.client.post(url).multipart(form).send().await).await
    }

    async fn chat(&self, request: &ChatRequest) -> Outcome<ChatReply> {
        let url = self.endpoint("chat");
        log::debug!("POST {}", url);

        decode(self.client.post(url).json(request).send().await).await
    }
}

/// Decode a JSON body whatever the status code; the server answers some
/// client errors with a regular body.
async fn decode<T: DeserializeOwned>(
    sent: Result<reqwest::Response, reqwest::Error>,
) -> Outcome<T> {
    let response = match sent {
        Ok(response) => response,
        Err(e) => return transport_failure(e),
    };

    let status = response.status();
    if !status.is_success() {
        log::debug!("Server answered {}", status);
    }

    match response.json::<T>().await {
        Ok(body) => Outcome::Success(body),
        Err(e) => transport_failure(e),
    }
}

fn transport_failure<T>(error: reqwest::Error) -> Outcome<T> {
    if error.is_timeout() {
        return Outcome::Timeout;
    }
    log::warn!("Request failed: {}", error);
    Outcome::TransportError(error.to_string())
}
