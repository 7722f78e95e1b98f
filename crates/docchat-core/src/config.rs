use std::time::Duration;

/// How long a chat request may run before it is aborted (5.5 minutes)
pub const DEFAULT_CHAT_TIMEOUT: Duration = Duration::from_secs(330);

/// Behavior switches for the controller and its drivers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Send accumulated turns as `chat_history` with every question
    pub track_history: bool,
    /// Abort chat requests after this long; `None` waits forever
    pub chat_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            track_history: true,
            chat_timeout: Some(DEFAULT_CHAT_TIMEOUT),
        }
    }
}

impl ClientConfig {
    /// No history and no timeout
    pub fn basic() -> Self {
        Self {
            track_history: false,
            chat_timeout: None,
        }
    }

    pub fn with_history(mut self, track_history: bool) -> Self {
        self.track_history = track_history;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.chat_timeout = timeout;
        self
    }

    /// Zero seconds disables the timeout
    pub fn with_timeout_secs(self, secs: u64) -> Self {
        let timeout = (secs > 0).then(|| Duration::from_secs(secs));
        self.with_timeout(timeout)
    }
}

/// Strip trailing slashes so endpoint paths can be appended directly
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
