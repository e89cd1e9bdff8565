use crate::console::ConsoleOverlay;
use clap::{Parser, Subcommand};
use snafu::prelude::*;
use spotify_overlay_client::{
    client::{self, Client},
    cover::CoverClient,
};
use spotify_overlay_controls::{
    controller::Controller,
    hotkeys::{HotkeyDispatcher, HotkeyEvent},
    overlay,
    refresh::RefreshCoordinator,
};
use std::{sync::Arc, time::Duration};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc::UnboundedSender,
};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Spotify application client id.
    #[clap(long, env = "SPOTIFY_CLIENT_ID", hide_env_values = true)]
    client_id: String,

    /// Spotify application client secret.
    #[clap(long, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
    client_secret: String,

    /// Refresh token from a one-time authorization grant.
    #[clap(long, env = "SPOTIFY_REFRESH_TOKEN", hide_env_values = true)]
    refresh_token: Option<String>,

    /// Wait after the last media key before fetching state, in milliseconds.
    #[clap(long, default_value_t = 500)]
    debounce_ms: u64,

    /// How long the overlay stays up after an update, in milliseconds.
    #[clap(long, default_value_t = 3000)]
    hide_after_ms: u64,

    #[clap(short, long)]
    /// Log level
    verbosity: Option<tracing::Level>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the overlay.
    Run,
    /// Print the url that mints a refresh token, then exit.
    AuthorizeUrl {
        /// Redirect uri registered with the Spotify application.
        redirect_uri: String,
    },
}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("{error}"))]
    Client { error: String },
    #[snafu(display("{error}"))]
    Controls { error: String },
    #[snafu(display(
        "no refresh token. Pass --refresh-token or set SPOTIFY_REFRESH_TOKEN; mint one with the authorize-url command"
    ))]
    MissingRefreshToken,
}

impl From<spotify_overlay_client::Error> for Error {
    fn from(error: spotify_overlay_client::Error) -> Self {
        Error::Client {
            error: error.to_string(),
        }
    }
}

impl From<spotify_overlay_controls::Error> for Error {
    fn from(error: spotify_overlay_controls::Error) -> Self {
        Error::Controls {
            error: error.to_string(),
        }
    }
}

pub async fn run() -> Result<(), Error> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity)
        .with_target(false)
        .compact()
        .init();

    match cli.command {
        Commands::AuthorizeUrl { redirect_uri } => {
            println!("{}", client::authorize_url(&cli.client_id, &redirect_uri));
            Ok(())
        }
        Commands::Run => {
            let refresh_token = cli.refresh_token.ok_or(Error::MissingRefreshToken)?;

            let client = Arc::new(Client::new(
                cli.client_id,
                cli.client_secret,
                refresh_token,
            )?);
            let covers = Arc::new(CoverClient::new()?);

            let overlay = overlay::spawn(
                ConsoleOverlay::new(),
                covers,
                Duration::from_millis(cli.hide_after_ms),
            );
            let controller = Arc::new(Controller::new(client, overlay));
            let coordinator = Arc::new(RefreshCoordinator::new(controller.clone()));
            let dispatcher = HotkeyDispatcher::new(
                controller,
                coordinator,
                Duration::from_millis(cli.debounce_ms),
            );

            let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
            tokio::spawn(read_keys(tx));

            dispatcher.run(rx).await;
            Ok(())
        }
    }
}

/// Stands in for a global keyboard hook: one key name per line on stdin.
/// "up"/"down" step the volume; anything else is treated as an observed
/// key name, so typing e.g. "next track" arms a coalesced refresh.
async fn read_keys(tx: UnboundedSender<HotkeyEvent>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let event = match line {
            "volume-up" | "up" | "+" => HotkeyEvent::VolumeUp,
            "volume-down" | "down" | "-" => HotkeyEvent::VolumeDown,
            other => HotkeyEvent::Key(other.to_string()),
        };

        if tx.send(event).is_err() {
            break;
        }
    }
}
