//! Sans-IO core of the document chat client.
//!
//! The [`Controller`] owns the session state and the transcript and decides
//! what the user sees. It never performs I/O itself: every form submission is
//! split into a `begin_*` step that validates input and produces a request,
//! and a `finish_*` step that consumes the [`Outcome`] of that request. The
//! native driver in `docchat-api` and the browser front end in `docchat-wasm`
//! both sit on top of it.

pub mod config;
pub mod controller;
pub mod message;
pub mod protocol;
pub mod session;
pub mod surface;
pub mod transcript;
pub mod view;

pub use config::{normalize_base_url, ClientConfig, DEFAULT_CHAT_TIMEOUT};
pub use controller::{
    Controller, PendingChat, Rejection, PROCESSING_LABEL, TIMEOUT_MESSAGE, UPLOAD_CONFIRMATION,
};
pub use message::{Message, Sender};
pub use protocol::{ChatReply, ChatRequest, Outcome, UploadReply, UploadRequest};
pub use session::{ChatTurn, SessionState};
pub use surface::{RecordingSurface, Surface, SurfaceEvent};
pub use transcript::{Entry, ThinkingId, Transcript};
pub use view::TranscriptView;
