use serde::{Deserialize, Serialize};

/// One completed question/answer exchange, as sent back in `chat_history`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub user: String,
    pub bot: String,
}

impl ChatTurn {
    pub fn new(user: impl Into<String>, bot: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            bot: bot.into(),
        }
    }
}

/// Client-side view of the current document session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub session_id: Option<String>,
    pub chat_enabled: bool,
    pub history: Vec<ChatTurn>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A successful upload replaces whatever session came before it
    pub fn start(&mut self, session_id: String) {
        self.session_id = Some(session_id);
        self.history.clear();
        self.chat_enabled = true;
    }

    pub fn disable_chat(&mut self) {
        self.chat_enabled = false;
    }

    pub fn record_turn(&mut self, user: impl Into<String>, bot: impl Into<String>) {
        self.history.push(ChatTurn::new(user, bot));
    }
}
