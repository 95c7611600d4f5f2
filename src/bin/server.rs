//! Vouch Registry Server
//!
//! A WebSocket host for the verification registry. Each connection sends
//! registry calls as JSON text frames and receives one outcome frame per
//! call. The server is the caller-attributing environment: it forwards
//! the caller field of each call to the registry, which performs the
//! authorization check itself. All mutations run under a single write
//! lock, so calls apply strictly one at a time.
//!
//! Usage:
//!   vouch-server --admin <principal> [--port 8970] [--host 0.0.0.0]

use clap::Parser;
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::RwLock;
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing::{error, info, warn};
use vouch::protocol::{dispatch, Call, Outcome};
use vouch::{Principal, Registry};

/// Vouch Registry Server
#[derive(Parser)]
#[command(name = "vouch-server")]
#[command(about = "WebSocket host for the vouch verification registry")]
struct Args {
    /// Principal to install as the initial admin
    #[arg(short, long)]
    admin: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8970")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
}

/// Handle a single WebSocket connection
async fn handle_connection(stream: TcpStream, addr: SocketAddr, registry: Arc<RwLock<Registry>>) {
    info!("New connection from: {}", addr);

    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            error!("WebSocket handshake failed for {}: {}", addr, e);
            return;
        }
    };

    let (mut write, mut read) = ws_stream.split();

    while let Some(msg) = read.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                let call = match serde_json::from_str::<Call>(&text) {
                    Ok(call) => call,
                    Err(e) => {
                        warn!("Invalid call from {}: {}", addr, e);
                        continue;
                    }
                };

                // Whole check-then-mutate runs under the write guard
                let outcome = {
                    let mut registry = registry.write().await;
                    dispatch(&mut registry, call)
                };

                if let Outcome::Err { code } = &outcome {
                    info!("Call from {} failed with code {}", addr, code);
                }

                if let Ok(json) = serde_json::to_string(&outcome) {
                    let _ = write.send(Message::Text(json)).await;
                }
            }

            Ok(Message::Close(_)) => {
                info!("Client {} disconnected", addr);
                break;
            }

            Ok(Message::Ping(data)) => {
                let _ = write.send(Message::Pong(data)).await;
            }

            Err(e) => {
                error!("WebSocket error from {}: {}", addr, e);
                break;
            }

            _ => {}
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("vouch_server=info".parse().unwrap()),
        )
        .init();

    let args = Args::parse();
    let addr = format!("{}:{}", args.host, args.port);

    let listener = TcpListener::bind(&addr).await.expect("Failed to bind");
    info!("Vouch Registry Server listening on ws://{}", addr);
    info!("Initial admin: {}", args.admin);

    let registry = Arc::new(RwLock::new(Registry::new(Principal::new(args.admin))));

    while let Ok((stream, addr)) = listener.accept().await {
        let registry = registry.clone();
        tokio::spawn(handle_connection(stream, addr, registry));
    }
}
