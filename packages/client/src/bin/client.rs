//! SmileSync CLI client with reconnection support.
//!
//! Connects to the hub, sends the handshake and prints every broadcast.
//! Input lines starting with `/` are commands, anything else is a chat message.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin smilesync-client -- --nickname alice
//! cargo run --bin smilesync-client -- -n bob -u ws://127.0.0.1:8081/ws
//! ```

use clap::Parser;

use smilesync_client::{Identity, run_client};
use smilesync_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "smilesync-client")]
#[command(about = "CLI client for a SmileSync meeting session", long_about = None)]
struct Args {
    /// Nickname shown to other participants
    #[arg(short = 'n', long)]
    nickname: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8081/ws")]
    url: String,

    /// Client ID attached to submissions (random UUID v4 when omitted)
    #[arg(short = 'c', long)]
    client_id: Option<String>,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let client_id = args
        .client_id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let identity = Identity::new(client_id, args.nickname);

    if let Err(e) = run_client(args.url, identity).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
