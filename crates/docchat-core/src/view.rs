use crate::message::{Message, Sender};
use crate::surface::Surface;
use crate::transcript::{ThinkingId, Transcript};

/// Keeps the transcript model and what the surface shows in step
pub struct TranscriptView<S> {
    transcript: Transcript,
    surface: S,
}

impl<S: Surface> TranscriptView<S> {
    pub fn new(surface: S) -> Self {
        Self {
            transcript: Transcript::new(),
            surface,
        }
    }

    pub fn append_message(&mut self, sender: Sender, text: impl Into<String>) {
        let message = Message::new(sender, text);
        self.surface.render_message(&message);
        self.transcript.push(message);
    }

    pub fn append_thinking(&mut self) -> ThinkingId {
        let id = self.transcript.push_thinking();
        self.surface.render_thinking(id);
        id
    }

    /// Returns false when the placeholder was already gone
    pub fn remove_thinking(&mut self, id: ThinkingId) -> bool {
        let removed = self.transcript.remove_thinking(id);
        if removed {
            self.surface.remove_thinking(id);
        }
        removed
    }

    pub fn clear(&mut self) {
        self.transcript.clear();
        self.surface.clear_transcript();
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
