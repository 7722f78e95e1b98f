use anyhow::{Context, Result};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io;
use std::path::{Path, PathBuf};

use docchat_api::{Backend, ChatClient, DocumentFile, HttpBackend};
use docchat_core::Surface;

use crate::cli::Cli;
use crate::surface::TerminalSurface;

type Client = ChatClient<HttpBackend, TerminalSurface<io::Stdout>>;

/// One line typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Ask(String),
    Upload {
        path: Option<PathBuf>,
        model: Option<String>,
    },
    Model(Option<String>),
    Status,
    History,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_line(line: &str) -> ReplCommand {
    let trimmed = line.trim();
    if matches!(trimmed, "exit" | "quit") {
        return ReplCommand::Quit;
    }
    let Some(rest) = trimmed.strip_prefix('/') else {
        // Blank input goes to the controller too, which ignores it
        return ReplCommand::Ask(line.to_string());
    };

    let mut words = rest.split_whitespace();
    let command = words.next().unwrap_or_default();
    match command {
        "upload" => ReplCommand::Upload {
            path: words.next().map(PathBuf::from),
            model: words.next().map(str::to_string),
        },
        "model" => ReplCommand::Model(words.next().map(str::to_string)),
        "status" => ReplCommand::Status,
        "history" => ReplCommand::History,
        "help" => ReplCommand::Help,
        "quit" | "exit" => ReplCommand::Quit,
        other => ReplCommand::Unknown(other.to_string()),
    }
}

/// Run interactive REPL mode
pub async fn run_repl_mode(cli: Cli) -> Result<()> {
    let backend = HttpBackend::new(&cli.server_url)
        .with_context(|| format!("Cannot use server URL {}", cli.server_url))?;
    let mut client = ChatClient::new(backend, cli.client_config(), TerminalSurface::stdout());
    let mut model = cli.model.clone();

    println!("{}", "📄 docchat - ask questions about a document".bright_cyan().bold());
    println!(
        "{}",
        format!("Server: {}", client.backend().base_url()).bright_black()
    );
    println!("{}", "Type /help for commands, 'exit' or 'quit' to leave\n".bright_black());

    if let Some(path) = cli.file.as_deref() {
        upload_path(&mut client, Some(path), model.clone()).await;
    }

    let mut rl = DefaultEditor::new().context("Failed to start line editor")?;
    loop {
        let prompt = if client.controller().surface().chat_enabled() {
            "ask> "
        } else {
            "docchat> "
        };

        let line = match rl.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".bright_black());
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{} {}", "Error:".bright_red().bold(), err);
                break;
            }
        };
        if !line.trim().is_empty() {
            let _ = rl.add_history_entry(line.as_str());
        }

        match parse_line(&line) {
            ReplCommand::Ask(text) => {
                if let Err(rejection) = client.chat(&text).await {
                    log::debug!("Question not sent: {}", rejection);
                }
            }
            ReplCommand::Upload { path, model: choice } => {
                let choice = choice.or_else(|| model.clone());
                upload_path(&mut client, path.as_deref(), choice).await;
            }
            ReplCommand::Model(Some(name)) => {
                println!("{}", format!("Model for next upload: {}", name).bright_black());
                model = Some(name);
            }
            ReplCommand::Model(None) => {
                println!("Model: {}", model.as_deref().unwrap_or("(server default)"));
            }
            ReplCommand::Status => print_status(&client, model.as_deref()),
            ReplCommand::History => print_history(&client),
            ReplCommand::Help => print_help(),
            ReplCommand::Quit => break,
            ReplCommand::Unknown(name) => {
                println!("{}", format!("Unknown command: /{} (try /help)", name).yellow());
            }
        }
    }

    println!("{}", "Goodbye!".bright_black());
    Ok(())
}

/// Unreadable paths fall through to the controller as "no file selected"
async fn upload_path<B: Backend, S: Surface>(
    client: &mut ChatClient<B, S>,
    path: Option<&Path>,
    model: Option<String>,
) {
    let file = match path {
        Some(path) => match DocumentFile::from_path(path).await {
            Ok(file) => Some(file),
            Err(e) => {
                log::error!("{}", e);
                eprintln!("{}", e.to_string().red());
                None
            }
        },
        None => None,
    };

    if let Err(rejection) = client.upload(file, model).await {
        log::debug!("Upload not sent: {}", rejection);
    }
}

fn print_status(client: &Client, model: Option<&str>) {
    let controller = client.controller();
    let state = controller.state();
    println!("Server:  {}", client.backend().base_url());
    println!("Session: {}", state.session_id.as_deref().unwrap_or("(none)"));
    println!(
        "Chat:    {}",
        if state.chat_enabled { "ready" } else { "upload a document first" }
    );
    println!("Model:   {}", model.unwrap_or("(server default)"));
    if controller.config().track_history {
        println!("History: {} turns", state.history.len());
    } else {
        println!("History: not tracked");
    }
}

fn print_history(client: &Client) {
    let history = &client.controller().state().history;
    if history.is_empty() {
        println!("{}", "No questions answered yet.".bright_black());
        return;
    }
    for (i, turn) in history.iter().enumerate() {
        println!("{} {}", format!("{}. you", i + 1).bright_green(), turn.user);
        println!("{} {}", "   bot".bright_cyan(), turn.bot);
    }
}

fn print_help() {
    println!("{}", "Commands:".bold());
    println!("  /upload <path> [model]  upload a document and start a new session");
    println!("  /model [name]           show or set the model used for uploads");
    println!("  /status                 show session details");
    println!("  /history                show questions answered in this session");
    println!("  /help                   show this help");
    println!("  exit, quit              leave");
    println!("Anything else is sent as a question about the current document.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use docchat_core::{
        ChatReply, ChatRequest, ClientConfig, Outcome, RecordingSurface, UploadReply,
        UploadRequest,
    };
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CountingBackend {
        uploads: Mutex<Vec<UploadRequest<DocumentFile>>>,
    }

    #[async_trait]
    impl Backend for CountingBackend {
        async fn upload(&self, request: UploadRequest<DocumentFile>) -> Outcome<UploadReply> {
            self.uploads.lock().unwrap().push(request);
            Outcome::Success(UploadReply {
                session_id: Some("session-1".to_string()),
                ..Default::default()
            })
        }

        async fn chat(&self, _request: &ChatRequest) -> Outcome<ChatReply> {
            Outcome::TransportError("not used".to_string())
        }
    }

    fn client() -> ChatClient<CountingBackend, RecordingSurface> {
        ChatClient::new(
            CountingBackend::default(),
            ClientConfig::default(),
            RecordingSurface::new(),
        )
    }

    #[tokio::test]
    async fn test_missing_upload_path_is_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.pdf");
        let mut client = client();

        upload_path(&mut client, Some(&missing), Some("llama".to_string())).await;

        assert_eq!(client.controller().surface().error, "Please select a file.");
        assert!(!client.controller().is_chat_enabled());
        assert!(client.backend().uploads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_readable_upload_path_is_sent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        std::fs::write(&path, "quarterly numbers").unwrap();
        let mut client = client();

        upload_path(&mut client, Some(&path), None).await;

        let uploads = client.backend().uploads.lock().unwrap();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].file.name, "report.txt");
        assert_eq!(uploads[0].file.bytes, b"quarterly numbers".to_vec());
        assert_eq!(uploads[0].model, None);
        drop(uploads);
        assert!(client.controller().is_chat_enabled());
    }

    #[test]
    fn test_plain_text_is_a_question() {
        assert_eq!(
            parse_line("What is the capital?"),
            ReplCommand::Ask("What is the capital?".to_string())
        );
        assert_eq!(parse_line("   "), ReplCommand::Ask("   ".to_string()));
    }

    #[test]
    fn test_upload_arguments() {
        assert_eq!(
            parse_line("/upload docs/report.pdf llama"),
            ReplCommand::Upload {
                path: Some(PathBuf::from("docs/report.pdf")),
                model: Some("llama".to_string()),
            }
        );
        assert_eq!(
            parse_line("/upload"),
            ReplCommand::Upload {
                path: None,
                model: None
            }
        );
    }

    #[test]
    fn test_quit_forms() {
        assert_eq!(parse_line("exit"), ReplCommand::Quit);
        assert_eq!(parse_line(" quit "), ReplCommand::Quit);
        assert_eq!(parse_line("/quit"), ReplCommand::Quit);
    }

    #[test]
    fn test_other_commands() {
        assert_eq!(parse_line("/model"), ReplCommand::Model(None));
        assert_eq!(
            parse_line("/model mistral"),
            ReplCommand::Model(Some("mistral".to_string()))
        );
        assert_eq!(parse_line("/status"), ReplCommand::Status);
        assert_eq!(parse_line("/history"), ReplCommand::History);
        assert_eq!(parse_line("/help"), ReplCommand::Help);
        assert_eq!(parse_line("/frobnicate"), ReplCommand::Unknown("frobnicate".to_string()));
    }
}
