use docchat_core::{
    ChatReply, ClientConfig, Controller, Outcome, Rejection, Surface, UploadReply,
};

use crate::backend::{Backend, DocumentFile};

/// A controller wired to a backend.
///
/// Each call runs one submission to completion: validate, send, and apply
/// the result to the surface. The returned outcome is a copy of what the
/// controller was given, for callers that want to react beyond the surface.
pub struct ChatClient<B, S> {
    backend: B,
    controller: Controller<S>,
}

impl<B: Backend, S: Surface> ChatClient<B, S> {
    pub fn new(backend: B, config: ClientConfig, surface: S) -> Self {
        Self {
            backend,
            controller: Controller::new(config, surface),
        }
    }

    pub fn controller(&self) -> &Controller<S> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller<S> {
        &mut self.controller
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn upload(
        &mut self,
        file: Option<DocumentFile>,
        model: Option<String>,
    ) -> Result<Outcome<UploadReply>, Rejection> {
        let request = self.controller.begin_upload(file, model)?;
        let outcome = self.backend.upload(request).await;
        self.controller.finish_upload(outcome.clone());
        Ok(outcome)
    }

    pub async fn chat(&mut self, input: &str) -> Result<Outcome<ChatReply>, Rejection> {
        let pending = self.controller.begin_chat(input)?;

        let request = pending.request();
        let outcome = match self.controller.config().chat_timeout {
            Some(limit) => tokio::time::timeout(limit, self.backend.chat(request))
                .await
                .unwrap_or_else(|_| {
                    log::warn!("Chat request aborted after {:?}", limit);
                    Outcome::Timeout
                }),
            None => self.backend.chat(request).await,
        };

        self.controller.finish_chat(pending, outcome.clone());
        Ok(outcome)
    }
}
