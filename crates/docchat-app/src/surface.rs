use colored::Colorize;
use std::io::{self, Write};

use docchat_core::{Message, Sender, Surface, ThinkingId};

/// Erase the current terminal line and return to its start
const ERASE_LINE: &str = "\r\x1b[2K";

/// Draws the transcript as lines on a terminal
pub struct TerminalSurface<W: Write> {
    out: W,
    /// Set while the thinking placeholder is the last, unterminated line
    thinking: Option<ThinkingId>,
    chat_enabled: bool,
}

impl TerminalSurface<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            thinking: None,
            chat_enabled: false,
        }
    }

    pub fn chat_enabled(&self) -> bool {
        self.chat_enabled
    }

    /// Finish a dangling placeholder line before printing anything else.
    /// It can no longer be erased after that.
    fn settle(&mut self) {
        if self.thinking.take().is_some() {
            let _ = writeln!(self.out);
        }
    }

    fn label(sender: Sender) -> colored::ColoredString {
        match sender {
            Sender::User => "you".bright_green().bold(),
            Sender::Bot => "bot".bright_cyan().bold(),
        }
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn render_message(&mut self, message: &Message) {
        self.settle();
        let _ = writeln!(
            self.out,
            "{} {}",
            Self::label(message.sender()),
            message.text()
        );
    }

    fn render_thinking(&mut self, id: ThinkingId) {
        self.settle();
        let _ = write!(
            self.out,
            "{} {}",
            Self::label(Sender::Bot),
            "thinking...".dimmed()
        );
        let _ = self.out.flush();
        self.thinking = Some(id);
    }

    fn remove_thinking(&mut self, id: ThinkingId) {
        if self.thinking == Some(id) {
            let _ = write!(self.out, "{}", ERASE_LINE);
            let _ = self.out.flush();
            self.thinking = None;
        }
    }

    fn clear_transcript(&mut self) {
        self.settle();
        let _ = writeln!(self.out, "{}", "── new document ──".bright_black());
    }

    fn set_error(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.settle();
        let _ = writeln!(self.out, "{} {}", "⚠".red(), text.red());
    }

    fn set_busy(&mut self, label: Option<&str>) {
        if let Some(label) = label {
            self.settle();
            let _ = writeln!(self.out, "{}", label.bright_black());
        }
    }

    fn set_chat_enabled(&mut self, enabled: bool) {
        self.chat_enabled = enabled;
    }

    fn clear_input(&mut self) {}

    fn focus_input(&mut self) {}
}
