// Ghostline - inline text completion overlay
// Main entry point

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use ghostline::cli::run_compose;
use ghostline::compose::{
    AcceptOutcome, CompletionSession, HostEditor, LatestOverlay, SessionOptions, TextBuffer,
};
use ghostline::config::{load_config, Config};
use ghostline::logging::{init_logging, LogTarget};
use ghostline::service::HttpCompletionClient;

#[derive(Parser, Debug)]
#[command(
    name = "ghostline",
    about = "Inline ghost-text completion backed by a suggestion service",
    version
)]
struct Args {
    /// Config file (defaults to ~/.ghostline/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the interactive editor (default)
    Compose,
    /// Fetch one suggestion for TEXT and print the ghost text
    Suggest {
        text: String,
        /// Print the overlay as HTML markup
        #[arg(long)]
        markup: bool,
        /// Accept the suggestion and print the resulting text
        #[arg(long)]
        accept: bool,
    },
    /// Check that the suggestion service is reachable
    Health,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    let command = args.command.unwrap_or(Command::Compose);

    let target = match command {
        Command::Compose => LogTarget::File,
        _ => LogTarget::Stderr,
    };
    init_logging(&config.logging, target, args.debug)?;

    let client = Arc::new(HttpCompletionClient::new(&config.service)?);
    tracing::debug!(url = client.suggestion_url(), "Using suggestion service");

    match command {
        Command::Compose => run_compose(&config, client.clone(), client).await,
        Command::Suggest {
            text,
            markup,
            accept,
        } => suggest_once(&config, client, text, markup, accept).await,
        Command::Health => {
            let status = client.health().await?;
            println!("{}", status.message);
            Ok(())
        }
    }
}

async fn suggest_once(
    config: &Config,
    client: Arc<HttpCompletionClient>,
    text: String,
    markup: bool,
    accept: bool,
) -> Result<()> {
    let options = SessionOptions::from_config(config);
    let mut session =
        CompletionSession::new(client.clone(), client, LatestOverlay::default(), options);
    let mut buffer = TextBuffer::new(text);

    session.on_text_changed(&buffer.snapshot());
    session.settle(&buffer.snapshot()).await;

    let overlay = session.renderer().overlay().clone();
    if overlay.ghost_text().is_none() {
        eprintln!("No suggestion");
        return Ok(());
    }

    if accept {
        if let AcceptOutcome::Accepted { .. } = session.on_accept_key(&mut buffer) {
            println!("{}", buffer.text());
        }
        session.flush_feedback().await;
    } else if markup {
        println!("{}", overlay.to_markup());
    } else if let Some(ghost) = overlay.ghost_text() {
        println!("{}", ghost);
    }

    Ok(())
}
