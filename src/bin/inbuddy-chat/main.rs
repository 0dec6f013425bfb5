//! InBuddy terminal chat client
//!
//! Talks to the relay configured by `INBUDDY_RELAY_URL`.

mod app;
mod tui;
mod ui;

use app::App;
use inbuddy::config::{load_dotenv, ChatClientConfig};
use inbuddy::session::{spawn_session, HttpRelayClient, SessionHandle};
use std::error::Error;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tui::{EventHandler, Tui};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    load_dotenv();
    let config = ChatClientConfig::from_env();
    init_logging(config.log_file.as_deref())?;

    let relay = HttpRelayClient::new(&config.relay_url, config.request_timeout)?;
    tracing::info!(relay_url = %config.relay_url, "Starting chat client");
    let session = spawn_session(relay);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, session, config.relay_url).await;
    tui::restore()?;

    result
}

async fn run(
    terminal: &mut Tui,
    session: SessionHandle,
    relay_url: String,
) -> Result<(), Box<dyn Error>> {
    let mut events = EventHandler::new(session.subscribe());
    let mut app = App::new(session, relay_url);

    while !app.should_quit {
        terminal.draw(|frame| ui::render(&mut app, frame))?;
        match events.next().await {
            Some(event) => app.handle_event(event),
            None => break,
        }
    }

    Ok(())
}

/// The terminal is owned by the UI, so logs only go to a file when asked
fn init_logging(path: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inbuddy=debug,inbuddy_chat=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();

    Ok(())
}
