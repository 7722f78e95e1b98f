use clap::Parser;
use std::path::PathBuf;

use docchat_core::ClientConfig;

/// CLI arguments for docchat
#[derive(Parser, Debug)]
#[command(name = "docchat")]
#[command(about = "Upload a document to a docchat server and ask questions about it")]
#[command(version)]
pub struct Cli {
    /// Base URL of the document chat server
    #[arg(
        long,
        value_name = "URL",
        default_value = "http://127.0.0.1:5000",
        env = "DOCCHAT_SERVER_URL"
    )]
    pub server_url: String,

    /// Model the server should use for uploaded documents (server default if unset)
    #[arg(long, value_name = "MODEL", env = "DOCCHAT_MODEL")]
    pub model: Option<String>,

    /// Upload this document before the prompt opens
    #[arg(long, short = 'f', value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Do not send earlier questions and answers along with each question
    #[arg(long)]
    pub no_history: bool,

    /// Abort a question after this many seconds (0 waits forever)
    #[arg(
        long,
        value_name = "SECS",
        default_value_t = 330,
        env = "DOCCHAT_TIMEOUT_SECS"
    )]
    pub timeout_secs: u64,

    /// Enable verbose debug output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::default()
            .with_history(!self.no_history)
            .with_timeout_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["docchat"]).unwrap();
        let config = cli.client_config();
        assert!(config.track_history);
        assert_eq!(config.chat_timeout, Some(Duration::from_secs(330)));
        assert!(cli.file.is_none());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "docchat",
            "--server-url",
            "http://docs.local:8000/",
            "--model",
            "mistral",
            "-f",
            "report.pdf",
            "--no-history",
            "--timeout-secs",
            "0",
        ])
        .unwrap();

        assert_eq!(cli.server_url, "http://docs.local:8000/");
        assert_eq!(cli.model.as_deref(), Some("mistral"));
        assert_eq!(cli.file, Some(PathBuf::from("report.pdf")));
        assert_eq!(cli.client_config(), ClientConfig::basic());
    }
}
