//! Native driver for the document chat client: an HTTP backend built on
//! reqwest and a [`ChatClient`] that runs each form flow end to end.

pub mod backend;
pub mod client;
pub mod error;
pub mod http;

pub use backend::{Backend, DocumentFile};
pub use client::ChatClient;
pub use error::ApiError;
pub use http::HttpBackend;
