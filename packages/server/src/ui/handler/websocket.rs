//! WebSocket connection handlers.
//!
//! 接続ごとのライフサイクル:
//! ハンドシェイク（ニックネーム登録）→ 参加 → 受信ループ → 切断処理

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, InboundCommand, Submitter},
    infrastructure::dto::conversion::{decode_command, decode_handshake},
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// The task ends when the channel is closed or a write fails.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Err(e) = sender.send(Message::Text(msg.into())).await {
                tracing::warn!("Failed to write to WebSocket: {}", e);
                break;
            }
        }
    })
}

/// 最初のデータフレームをハンドシェイクとして読む
///
/// テキストとして解釈できなければ `None`（接続は登録されずに終了する）。
/// バイナリフレームも解釈できないフレームとして扱い、
/// Ping / Pong の制御フレームのみ読み飛ばす。
async fn wait_for_handshake(receiver: &mut SplitStream<WebSocket>) -> Option<Submitter> {
    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                return match decode_handshake(&text) {
                    Ok(submitter) => Some(submitter),
                    Err(e) => {
                        tracing::warn!("Invalid handshake frame: {}", e);
                        None
                    }
                };
            }
            Ok(Message::Binary(_)) => {
                tracing::warn!("Binary frame received as handshake");
                return None;
            }
            Ok(Message::Close(_)) => return None,
            Ok(Message::Ping(_) | Message::Pong(_)) => continue,
            Err(e) => {
                tracing::warn!("WebSocket error during handshake: {}", e);
                return None;
            }
        }
    }
    None
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = state.connection_ids.generate();
    let (sender, mut receiver) = socket.split();

    // 1. ハンドシェイク
    let Some(submitter) = wait_for_handshake(&mut receiver).await else {
        tracing::info!("Connection {} closed before handshake", connection_id);
        return;
    };
    tracing::info!(
        "Connection {} handshake as '{}'",
        connection_id,
        submitter.nickname
    );

    // 2. 参加（送信タスクを先に起動してスナップショットを流す）
    let (tx, rx) = mpsc::unbounded_channel();
    let mut send_task = pusher_loop(rx, sender);
    state
        .connect_participant_usecase
        .execute(connection_id, submitter.nickname.clone(), tx)
        .await;

    // 3. 受信ループ
    let state_clone = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on connection {}: {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received from {}: {}", connection_id, text);
                    route_frame(&state_clone, connection_id, &submitter, &text).await;
                }
                Message::Close(_) => {
                    tracing::info!("Connection {} requested close", connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // 4. 切断処理
    if state
        .disconnect_participant_usecase
        .execute(connection_id)
        .await
    {
        tracing::info!("Connection {} disconnected", connection_id);
    }
}

/// 受信フレームを解釈し、対応するユースケースに振り分ける
///
/// 解釈できないフレームや受け付けられない操作はログに残して読み飛ばす
async fn route_frame(
    state: &AppState,
    connection_id: ConnectionId,
    connection: &Submitter,
    text: &str,
) {
    let command = match decode_command(text, connection) {
        Ok(command) => command,
        Err(e) => {
            tracing::warn!("Skipping frame from {}: {}", connection_id, e);
            return;
        }
    };

    let result = match command {
        InboundCommand::Chat { submitter, text } => state
            .send_message_usecase
            .execute(submitter, text)
            .await
            .map(|_| ()),
        InboundCommand::SmilePoint { submitter, point } => state
            .apply_smile_point_usecase
            .execute(submitter, point)
            .await
            .map(|_| ()),
        InboundCommand::Idea { submitter } => state
            .increment_idea_usecase
            .execute(submitter)
            .await
            .map(|_| ()),
        InboundCommand::MeetingStatus { active } => {
            state.change_meeting_status_usecase.execute(active).await;
            Ok(())
        }
        InboundCommand::AnimalType { animal_type } => {
            state.change_animal_type_usecase.execute(animal_type).await
        }
    };

    if let Err(e) = result {
        tracing::debug!("Ignored frame from {}: {}", connection_id, e);
    }
}
