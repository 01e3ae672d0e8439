//! MessagePusher trait 定義
//!
//! 接続中のクライアントへイベントを届けるためのインターフェースです。
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層で行われ、UI 層が作った送信チャンネルを
//! `register_client` で登録します。ワイヤーフォーマットへの変換は実装側の責務で、
//! ドメイン層は [`Event`] だけを扱います。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{MessagePushError, event::Event, value_object::ConnectionId};

/// クライアントへの送信チャンネル（エンコード済みのテキストフレーム）
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 送信チャンネルを登録する
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 送信チャンネルを登録解除する
    async fn unregister_client(&self, connection_id: ConnectionId);

    /// 特定の接続にイベントを送信する
    async fn push_to(
        &self,
        connection_id: ConnectionId,
        event: &Event,
    ) -> Result<(), MessagePushError>;

    /// 複数の接続にイベントを送信する
    ///
    /// 一部の接続への送信に失敗しても残りへの送信は続けます。
    async fn broadcast(
        &self,
        targets: &[ConnectionId],
        event: &Event,
    ) -> Result<(), MessagePushError>;
}
