//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - イベントをワイヤーフォーマットにエンコードして送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! 実際のソケットへの書き込みは接続ごとの送信タスクが行うため、
//! ここでの送信はブロックしません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, Event, MessagePushError, MessagePusher, PusherChannel},
    infrastructure::dto::websocket::WireMessage,
};

/// WebSocket を使った MessagePusher 実装
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの WebSocket sender
    clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self {
            clients: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn encode(event: &Event) -> Result<String, MessagePushError> {
        WireMessage::from(event)
            .to_json()
            .map_err(|e| MessagePushError::Encode(e.to_string()))
    }

    /// 登録中の接続数
    pub async fn client_count(&self) -> usize {
        self.clients.lock().await.len()
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(connection_id, sender);
        tracing::debug!("Connection {} registered to MessagePusher", connection_id);
    }

    async fn unregister_client(&self, connection_id: ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(&connection_id);
        tracing::debug!("Connection {} unregistered from MessagePusher", connection_id);
    }

    async fn push_to(
        &self,
        connection_id: ConnectionId,
        event: &Event,
    ) -> Result<(), MessagePushError> {
        let content = Self::encode(event)?;
        let clients = self.clients.lock().await;

        let sender = clients
            .get(&connection_id)
            .ok_or(MessagePushError::ClientNotFound(connection_id))?;
        sender
            .send(content)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed '{}' to connection {}", event.name(), connection_id);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: &[ConnectionId],
        event: &Event,
    ) -> Result<(), MessagePushError> {
        // 1 回だけエンコードして全員に送る
        let content = Self::encode(event)?;
        let clients = self.clients.lock().await;

        for target in targets {
            if let Some(sender) = clients.get(target) {
                // ブロードキャストでは一部の送信失敗を許容
                if let Err(e) = sender.send(content.clone()) {
                    tracing::warn!("Failed to push message to connection {}: {}", target, e);
                } else {
                    tracing::debug!("Broadcasted '{}' to connection {}", event.name(), target);
                }
            } else {
                tracing::debug!(
                    "Connection {} not found during broadcast, skipping",
                    target
                );
            }
        }

        Ok(())
    }
}
