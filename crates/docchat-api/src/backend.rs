use async_trait::async_trait;
use std::path::Path;

use docchat_core::{ChatReply, ChatRequest, Outcome, UploadReply, UploadRequest};

use crate::error::ApiError;

/// A document held in memory, ready to be sent as the `file` form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl DocumentFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ApiError::ReadFile {
                path: path.to_path_buf(),
                source,
            })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        Ok(Self { name, bytes })
    }
}

/// The two calls the chat client makes. Neither ever fails with an error:
/// every way a request can end is an [`Outcome`].
#[async_trait]
pub trait Backend: Send + Sync {
    async fn upload(&self, request: UploadRequest<DocumentFile>) -> Outcome<UploadReply>;

    async fn chat(&self, request: &ChatRequest) -> Outcome<ChatReply>;
}

#[async_trait]
impl<B: Backend + ?Sized> Backend for std::sync::Arc<B> {
    async fn upload(&self, request: UploadRequest<DocumentFile>) -> Outcome<UploadReply> {
        (**self).upload(request).await
    }

    async fn chat(&self, request: &ChatRequest) -> Outcome<ChatReply> {
        (**self).chat(request).await
    }
}
