use serde::{Deserialize, Serialize};

use crate::session::ChatTurn;

/// Everything a driver needs to POST `/upload` as multipart `{file, model}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest<F> {
    pub file: F,
    pub model: Option<String>,
}

/// Body returned by `/upload`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// JSON body POSTed to `/chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_history: Option<Vec<ChatTurn>>,
}

/// Body returned by `/chat`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// How a single request ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// A decoded body. It may still carry an application-level `error` field.
    Success(T),
    ApplicationError(String),
    TransportError(String),
    Timeout,
}

impl<T> Outcome<T> {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::ApplicationError(_) => "application_error",
            Self::TransportError(_) => "transport_error",
            Self::Timeout => "timeout",
        }
    }
}

/// Treat empty strings the way the backend's clients always have: as absent
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
