//! `askdb`: terminal client for the natural-language SQL assistant.
//!
//! SYSTEM CONTEXT
//! ==============
//! Talks to the same `/api` endpoints as the browser client and drives a
//! turn through the shared `chat` controller, so the timeline and transcript
//! behave exactly as in the UI. `ask` polls the store while the turn runs and
//! prints what changed.
//!
//! ERROR HANDLING
//! ==============
//! Request failures exit non-zero with the server's message. Errors reported
//! inside a turn are part of the answer, not a process failure. Ctrl-C during
//! `ask` cancels the turn quietly.

mod config;
mod http;
mod render;

use std::cell::RefCell;
use std::io::Write as _;
use std::rc::Rc;
use std::time::Duration;

use chat::{ApiError, ChatBackend, ChatStore, DEFAULT_SESSION_TITLE, SystemClock, TurnOutcome, controller};
use clap::{Args, Parser, Subcommand};

use crate::config::{CliConfig, DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS};
use crate::http::ReqwestBackend;
use crate::render::TurnPrinter;

/// How often `ask` checks the store for progress.
const POLL_MS: u64 = 100;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http client setup failed: {0}")]
    HttpClient(reqwest::Error),
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("nothing to ask: the question is empty")]
    EmptyQuestion,
    #[error("session {0} is not loaded")]
    SessionNotLoaded(String),
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "askdb", about = "Ask questions about your database in plain language")]
struct Cli {
    #[arg(long, env = "ASKDB_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(long, env = "ASKDB_CONNECT_TIMEOUT_SECS", default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS)]
    connect_timeout_secs: u64,

    /// Log requests and stream handling to stderr.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Sessions(SessionsCommand),
    /// Ask a question and stream the answer.
    Ask(AskArgs),
    /// List the tables the assistant can query.
    Tables,
}

#[derive(Args, Debug)]
struct SessionsCommand {
    #[command(subcommand)]
    command: SessionsSubcommand,
}

#[derive(Subcommand, Debug)]
enum SessionsSubcommand {
    List,
    New {
        #[arg(long, default_value = DEFAULT_SESSION_TITLE)]
        title: String,
    },
    Show {
        session_id: String,
    },
    Delete {
        session_id: String,
    },
}

#[derive(Args, Debug)]
struct AskArgs {
    /// Continue this session instead of starting a new one.
    #[arg(long)]
    session: Option<String>,

    #[arg(required = true, num_args = 1..)]
    question: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::WARN })
        .init();

    let config = CliConfig::new(&cli.base_url, cli.connect_timeout_secs)?;
    tracing::debug!(base_url = %config.base_url, "using backend");
    let backend = ReqwestBackend::new(config)?;

    match cli.command {
        Command::Sessions(sessions) => run_sessions(&backend, sessions.command).await,
        Command::Ask(args) => run_ask(&backend, args).await,
        Command::Tables => {
            let info = backend.list_tables().await?;
            print!("{}", render::table_list(&info));
            Ok(())
        }
    }
}

async fn run_sessions(backend: &ReqwestBackend, command: SessionsSubcommand) -> Result<(), CliError> {
    match command {
        SessionsSubcommand::List => {
            let sessions = backend.list_sessions().await?;
            print!("{}", render::session_list(&sessions));
        }
        SessionsSubcommand::New { title } => {
            let session = backend.create_session(&title).await?;
            println!("{}", session.id);
        }
        SessionsSubcommand::Show { session_id } => {
            let detail = backend.session_detail(&session_id).await?;
            print!("{}", render::transcript(&detail));
        }
        SessionsSubcommand::Delete { session_id } => {
            backend.delete_session(&session_id).await?;
            eprintln!("deleted {session_id}");
        }
    }
    Ok(())
}

async fn run_ask(backend: &ReqwestBackend, args: AskArgs) -> Result<(), CliError> {
    let question = args.question.join(" ");
    if question.trim().is_empty() {
        return Err(CliError::EmptyQuestion);
    }

    let store = Rc::new(RefCell::new(ChatStore::new(SystemClock)));
    match args.session {
        Some(id) => {
            controller::select_session(&store, backend, &id).await?;
            if store.borrow().current_session_id.as_deref() != Some(id.as_str()) {
                return Err(CliError::SessionNotLoaded(id));
            }
        }
        None => {
            let session = controller::create_session(&store, backend).await?;
            eprintln!("session {}", session.id);
        }
    }

    let turn = controller::send_message(&store, backend, &question);
    let mut turn = std::pin::pin!(turn);
    let mut ctrl_c = std::pin::pin!(tokio::signal::ctrl_c());
    let mut poll = tokio::time::interval(Duration::from_millis(POLL_MS));
    let mut printer = TurnPrinter::new();
    let mut interrupted = false;

    let outcome = loop {
        tokio::select! {
            outcome = &mut turn => break outcome,
            _ = poll.tick() => print_progress(&store, &mut printer)?,
            signal = &mut ctrl_c, if !interrupted => {
                interrupted = true;
                if let Err(err) = signal {
                    tracing::warn!("ctrl-c handler failed: {err}");
                    continue;
                }
                controller::cancel(&store);
            }
        }
    };
    print_progress(&store, &mut printer)?;

    match outcome {
        TurnOutcome::Completed => println!(),
        TurnOutcome::Cancelled => eprintln!("\ncancelled"),
        TurnOutcome::Rejected => return Err(CliError::EmptyQuestion),
    }
    Ok(())
}

fn print_progress(store: &RefCell<ChatStore>, printer: &mut TurnPrinter) -> Result<(), CliError> {
    let Ok(store) = store.try_borrow() else {
        return Ok(());
    };
    let Some(message) = store.messages.last().filter(|m| m.is_assistant()) else {
        return Ok(());
    };
    let progress = printer.update(message, store.now_ms());
    drop(store);

    let mut stderr = std::io::stderr().lock();
    for line in progress.steps {
        writeln!(stderr, "{line}")?;
    }
    if !progress.answer.is_empty() {
        let mut stdout = std::io::stdout().lock();
        write!(stdout, "{}", progress.answer)?;
        stdout.flush()?;
    }
    Ok(())
}
