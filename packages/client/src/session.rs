//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use smilesync_server::infrastructure::dto::websocket::WireMessage;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::{
    domain::{ClientInput, Identity, parse_input},
    error::ClientError,
};

use super::{formatter::MessageFormatter, ui::redisplay_prompt};

/// Run one connection to the hub
///
/// ユーザーが終了した場合は `Ok(())`、接続が切れた場合はエラーを返します。
pub async fn run_client_session(
    url: &str,
    identity: &Identity,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    let (mut write, mut read) = ws_stream.split();

    let handshake = identity.handshake().to_json()?;
    write
        .send(Message::Text(handshake.into()))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to SmileSync hub!");
    println!(
        "\nYou are '{}'. Type messages and press Enter to send.\n\
         Commands: /start /stop /smile <n> /idea /animal <type> /quit\n",
        identity.nickname
    );

    // Spawn a task to handle incoming messages
    let nickname = identity.nickname.clone();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match WireMessage::from_json(&text) {
                        Ok(message) => MessageFormatter::format(&message, &nickname),
                        Err(_) => Some(MessageFormatter::format_raw_message(&text)),
                    };
                    if let Some(formatted) = formatted {
                        print!("{}", formatted);
                        redisplay_prompt(&nickname);
                    }
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    loop {
        tokio::select! {
            _ = &mut read_task => return Err(ClientError::ConnectionLost),
            line = input_rx.recv() => {
                let Some(line) = line else {
                    // 入力が閉じられた（Ctrl+C / Ctrl+D）
                    break;
                };
                let message = match parse_input(&line, identity) {
                    Ok(ClientInput::Send(message)) => message,
                    Ok(ClientInput::Quit) => break,
                    Err(e) => {
                        println!("{}", e);
                        redisplay_prompt(&identity.nickname);
                        continue;
                    }
                };

                let json = message.to_json()?;
                if let Err(e) = write.send(Message::Text(json.into())).await {
                    tracing::warn!("Failed to send message: {}", e);
                    read_task.abort();
                    return Err(ClientError::ConnectionLost);
                }
            }
        }
    }

    read_task.abort();
    write.send(Message::Close(None)).await.ok();
    Ok(())
}
