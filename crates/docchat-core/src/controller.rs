use thiserror::Error;

use crate::config::ClientConfig;
use crate::message::Sender;
use crate::protocol::{non_empty, ChatReply, ChatRequest, Outcome, UploadReply, UploadRequest};
use crate::session::SessionState;
use crate::surface::Surface;
use crate::transcript::{ThinkingId, Transcript};
use crate::view::TranscriptView;

pub const PROCESSING_LABEL: &str = "Processing document...";
pub const UPLOAD_CONFIRMATION: &str =
    "✓ Document processed successfully! You can now ask questions.";
pub const TIMEOUT_MESSAGE: &str = "Request timed out. Make sure Ollama is running and try again.";
const MISSING_SESSION_ID: &str = "Upload response did not include a session id";

/// A submission refused before any request was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Please select a file.")]
    NoFile,
    #[error("Please upload a document first.")]
    ChatDisabled,
    /// Whitespace-only input; nothing is shown for this one
    #[error("message is empty")]
    EmptyMessage,
}

/// A chat question that has been shown and is waiting for its reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingChat {
    message: String,
    thinking: ThinkingId,
    request: ChatRequest,
}

impl PendingChat {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn thinking(&self) -> ThinkingId {
        self.thinking
    }

    pub fn request(&self) -> &ChatRequest {
        &self.request
    }
}

/// Owns the session and transcript and applies both form flows to them
pub struct Controller<S> {
    config: ClientConfig,
    state: SessionState,
    view: TranscriptView<S>,
}

impl<S: Surface> Controller<S> {
    pub fn new(config: ClientConfig, mut surface: S) -> Self {
        surface.set_chat_enabled(false);
        Self {
            config,
            state: SessionState::new(),
            view: TranscriptView::new(surface),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn transcript(&self) -> &Transcript {
        self.view.transcript()
    }

    pub fn surface(&self) -> &S {
        self.view.surface()
    }

    pub fn surface_mut(&mut self) -> &mut S {
        self.view.surface_mut()
    }

    pub fn is_chat_enabled(&self) -> bool {
        self.state.chat_enabled
    }

    /// Validate the upload form. On success the busy indicator is showing and
    /// the caller must eventually pass the result to [`Controller::finish_upload`].
    pub fn begin_upload<F>(
        &mut self,
        file: Option<F>,
        model: Option<String>,
    ) -> Result<UploadRequest<F>, Rejection> {
        self.set_error("");

        let Some(file) = file else {
            log::debug!("Upload rejected: no file selected");
            self.set_error(&Rejection::NoFile.to_string());
            return Err(Rejection::NoFile);
        };

        log::info!("Uploading document (model: {:?})", model);
        self.view.surface_mut().set_busy(Some(PROCESSING_LABEL));
        Ok(UploadRequest { file, model })
    }

    pub fn finish_upload(&mut self, outcome: Outcome<UploadReply>) {
        log::debug!("Upload finished: {}", outcome.kind());
        self.view.surface_mut().set_busy(None);

        match outcome {
            Outcome::Success(reply) => {
                if let Some(error) = non_empty(reply.error) {
                    self.fail_upload(&format!("Error: {}", error));
                    return;
                }
                let Some(session_id) = non_empty(reply.session_id) else {
                    self.fail_upload(&format!("Error: {}", MISSING_SESSION_ID));
                    return;
                };
                if let Some(message) = reply.message {
                    log::debug!("Server: {}", message);
                }
                self.start_session(session_id);
            }
            Outcome::ApplicationError(error) => self.fail_upload(&format!("Error: {}", error)),
            Outcome::TransportError(error) => {
                self.fail_upload(&format!("Upload failed: {}", error))
            }
            Outcome::Timeout => self.fail_upload("Upload failed: request timed out"),
        }
    }

    /// Validate and show a question. On success the caller must send the
    /// returned request and pass its result to [`Controller::finish_chat`].
    pub fn begin_chat(&mut self, input: &str) -> Result<PendingChat, Rejection> {
        self.set_error("");

        if !self.state.chat_enabled {
            log::debug!("Chat rejected: no document uploaded");
            self.set_error(&Rejection::ChatDisabled.to_string());
            return Err(Rejection::ChatDisabled);
        }

        let message = input.trim();
        if message.is_empty() {
            return Err(Rejection::EmptyMessage);
        }
        let message = message.to_string();

        self.view.append_message(Sender::User, message.clone());
        self.view.surface_mut().clear_input();
        let thinking = self.view.append_thinking();

        let request = ChatRequest {
            message: message.clone(),
            session_id: self.state.session_id.clone(),
            chat_history: self
                .config
                .track_history
                .then(|| self.state.history.clone()),
        };
        log::debug!(
            "Sending question ({} chars, {} prior turns)",
            message.len(),
            request.chat_history.as_ref().map_or(0, Vec::len)
        );

        Ok(PendingChat {
            message,
            thinking,
            request,
        })
    }

    pub fn finish_chat(&mut self, pending: PendingChat, outcome: Outcome<ChatReply>) {
        log::debug!("Chat finished: {}", outcome.kind());
        self.view.remove_thinking(pending.thinking);

        if pending.request.session_id != self.state.session_id {
            log::info!("Dropping reply for a session replaced by a newer upload");
            return;
        }

        match outcome {
            Outcome::Success(reply) => {
                if let Some(response) = non_empty(reply.response) {
                    if self.config.track_history {
                        self.state.record_turn(pending.message, response.clone());
                    }
                    self.view.append_message(Sender::Bot, response);
                } else if let Some(error) = non_empty(reply.error) {
                    self.set_error(&format!("Error: {}", error));
                } else {
                    log::warn!("Chat reply had neither a response nor an error");
                }
            }
            Outcome::ApplicationError(error) => self.set_error(&format!("Error: {}", error)),
            Outcome::TransportError(error) => self.set_error(&format!("Error: {}", error)),
            Outcome::Timeout => self.set_error(TIMEOUT_MESSAGE),
        }
    }

    fn start_session(&mut self, session_id: String) {
        log::info!("Document session started: {}", session_id);
        self.state.start(session_id);
        self.view.clear();
        self.set_error("");
        self.view.append_message(Sender::Bot, UPLOAD_CONFIRMATION);

        let surface = self.view.surface_mut();
        surface.set_chat_enabled(true);
        surface.focus_input();
    }

    fn fail_upload(&mut self, text: &str) {
        log::warn!("Upload failed: {}", text);
        self.set_error(text);
        self.state.disable_chat();
        self.view.surface_mut().set_chat_enabled(false);
    }

    fn set_error(&mut self, text: &str) {
        self.view.surface_mut().set_error(text);
    }
}
