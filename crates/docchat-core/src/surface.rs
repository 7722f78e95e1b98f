use crate::message::Message;
use crate::transcript::ThinkingId;

/// The rendering target the controller drives.
///
/// Implementations only draw; all decisions about what to draw are made by
/// the controller. An empty string passed to [`Surface::set_error`] clears
/// the error area.
pub trait Surface {
    /// Append a line and scroll to the end
    fn render_message(&mut self, message: &Message);
    fn render_thinking(&mut self, id: ThinkingId);
    fn remove_thinking(&mut self, id: ThinkingId);
    fn clear_transcript(&mut self);
    fn set_error(&mut self, text: &str);
    /// `Some(label)` shows the busy indicator, `None` hides it
    fn set_busy(&mut self, label: Option<&str>);
    fn set_chat_enabled(&mut self, enabled: bool);
    fn clear_input(&mut self);
    fn focus_input(&mut self);
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn render_message(&mut self, message: &Message) {
        (**self).render_message(message)
    }

    fn render_thinking(&mut self, id: ThinkingId) {
        (**self).render_thinking(id)
    }

    fn remove_thinking(&mut self, id: ThinkingId) {
        (**self).remove_thinking(id)
    }

    fn clear_transcript(&mut self) {
        (**self).clear_transcript()
    }

    fn set_error(&mut self, text: &str) {
        (**self).set_error(text)
    }

    fn set_busy(&mut self, label: Option<&str>) {
        (**self).set_busy(label)
    }

    fn set_chat_enabled(&mut self, enabled: bool) {
        (**self).set_chat_enabled(enabled)
    }

    fn clear_input(&mut self) {
        (**self).clear_input()
    }

    fn focus_input(&mut self) {
        (**self).focus_input()
    }
}

/// Draw call captured by [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    Message(Message),
    Thinking(ThinkingId),
    RemoveThinking(ThinkingId),
    ClearTranscript,
    Error(String),
    Busy(Option<String>),
    ChatEnabled(bool),
    ClearInput,
    FocusInput,
}

/// Headless surface that remembers every draw call
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub events: Vec<SurfaceEvent>,
    pub error: String,
    pub busy: Option<String>,
    pub chat_enabled: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop recorded events but keep the current display state
    pub fn take_events(&mut self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Surface for RecordingSurface {
    fn render_message(&mut self, message: &Message) {
        self.events.push(SurfaceEvent::Message(message.clone()));
    }

    fn render_thinking(&mut self, id: ThinkingId) {
        self.events.push(SurfaceEvent::Thinking(id));
    }

    fn remove_thinking(&mut self, id: ThinkingId) {
        self.events.push(SurfaceEvent::RemoveThinking(id));
    }

    fn clear_transcript(&mut self) {
        self.events.push(SurfaceEvent::ClearTranscript);
    }

    fn set_error(&mut self, text: &str) {
        self.error = text.to_string();
        self.events.push(SurfaceEvent::Error(text.to_string()));
    }

    fn set_busy(&mut self, label: Option<&str>) {
        self.busy = label.map(str::to_string);
        self.events.push(SurfaceEvent::Busy(self.busy.clone()));
    }

    fn set_chat_enabled(&mut self, enabled: bool) {
        self.chat_enabled = enabled;
        self.events.push(SurfaceEvent::ChatEnabled(enabled));
    }

    fn clear_input(&mut self) {
        self.events.push(SurfaceEvent::ClearInput);
    }

    fn focus_input(&mut self) {
        self.events.push(SurfaceEvent::FocusInput);
    }
}
