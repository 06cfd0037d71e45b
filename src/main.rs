use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use peerchess::core::{init_logging, read_settings, settings_or_default, settings_path, Settings};
use peerchess::game::SessionConfig;
use peerchess::networking::{LinkEvent, MessageSink, NullSink, PeerLink, SyncChannel};
use peerchess::terminal::{apply_input, render_board, InputAction};

#[derive(Parser, Debug)]
#[command(name = "peerchess", version, about = "Two-player chess over a direct peer link")]
struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `peerchess=trace`
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Wait for a peer and play white
    Host {
        #[arg(long)]
        listen: Option<String>,
    },
    /// Connect to a host and play black
    Join {
        #[arg(long)]
        peer: Option<String>,
    },
    /// Both colors at one terminal
    Local,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let path = cli.config.clone().unwrap_or_else(settings_path);
    let read = read_settings(&path);
    let file_filter = match &read {
        Ok(Some(settings)) => settings.log_filter.clone(),
        _ => Settings::default().log_filter,
    };
    init_logging(cli.log.as_deref().unwrap_or(&file_filter))?;
    let settings = settings_or_default(&path, read);

    match cli.command {
        Command::Local => {
            let channel = SyncChannel::new(SessionConfig::local(), NullSink);
            play(channel, None).await
        }
        Command::Host { listen } => {
            let addr = listen.unwrap_or(settings.listen_addr);
            println!("Waiting for a peer on {addr} ...");
            let link = PeerLink::listen(&addr)
                .await
                .with_context(|| format!("Failed to accept a peer on {addr}"))?;
            let channel = SyncChannel::new(SessionConfig::host(), link.sink());
            play(channel, Some(link)).await
        }
        Command::Join { peer } => {
            let addr = peer.unwrap_or(settings.peer_addr);
            let link = PeerLink::connect(&addr)
                .await
                .with_context(|| format!("Failed to connect to {addr}"))?;
            let channel = SyncChannel::new(SessionConfig::guest(), link.sink());
            play(channel, Some(link)).await
        }
    }
}

/// Drive one game: local input and, for remote games, inbound frames
async fn play<S: MessageSink>(
    mut channel: SyncChannel<S>,
    mut link: Option<PeerLink>,
) -> anyhow::Result<()> {
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    println!("{}\n", render_board(channel.session()));

    loop {
        tokio::select! {
            line = input.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                match apply_input(&mut channel, &line) {
                    InputAction::Quit => break,
                    InputAction::Moved => println!("{}\n", render_board(channel.session())),
                    InputAction::Rejected(reason) => println!("{reason}"),
                    InputAction::Ignored => {}
                }
            }
            event = next_link_event(&mut link) => match event {
                Some(LinkEvent::Frame(frame)) => {
                    let before = *channel.session().board();
                    channel.handle_frame(&frame);
                    if *channel.session().board() != before {
                        println!("{}\n", render_board(channel.session()));
                    }
                }
                Some(LinkEvent::Closed { clean: true, .. }) | None => {
                    info!("[NETWORK] Peer disconnected");
                    println!("Peer disconnected");
                    break;
                }
                Some(LinkEvent::Closed { clean: false, reason }) => {
                    warn!("[NETWORK] Link failed: {}", reason.unwrap_or_default());
                    println!("Connection lost");
                    break;
                }
            },
        }

        if channel.session().is_finished() {
            break;
        }
    }

    channel.session_mut().end_session();

    // The link's writer only stops once every sink is gone
    drop(channel);
    if let Some(link) = link {
        link.close().await.context("Failed to flush the peer link")?;
    }
    Ok(())
}

/// Next event of the link, or never for local games
async fn next_link_event(link: &mut Option<PeerLink>) -> Option<LinkEvent> {
    match link {
        Some(link) => link.next_event().await,
        None => std::future::pending().await,
    }
}
