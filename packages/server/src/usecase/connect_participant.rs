//! UseCase: 参加者接続処理
//!
//! ハンドシェイクに成功した接続を登録し、全員に参加者リストを配信した後、
//! 新しい接続にのみ現在のセッションのスナップショットを送ります。
//!
//! 配信先への追加（`Join`）はスナップショットと同じロックの内側でキューに入れます。
//! 参加前に受理されたイベントはスナップショットに含まれ、
//! 参加後に受理されたイベントは通常の配信で届きます。

use std::sync::Arc;

use crate::domain::{ConnectionId, Dispatch, Event, MessagePusher, Nickname, PusherChannel};

use super::{EventQueue, SharedSession};

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    session: SharedSession,
    queue: EventQueue,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectParticipantUseCase {
    pub fn new(
        session: SharedSession,
        queue: EventQueue,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            session,
            queue,
            message_pusher,
        }
    }

    /// 参加者接続を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 接続 ID
    /// * `nickname` - ハンドシェイクで受け取ったニックネーム
    /// * `sender` - クライアントへのメッセージ送信用チャンネル
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        nickname: Nickname,
        sender: PusherChannel,
    ) {
        // 1. 送信チャンネルを先に登録（スナップショットの配信に間に合わせる）
        self.message_pusher
            .register_client(connection_id, sender)
            .await;

        // 2. 参加者リストに登録し、配信先への追加と配信イベントを投入
        let mut session = self.session.lock().await;
        session.register_connection(connection_id, nickname);
        tracing::info!(
            "Connection {} joined ({} connected)",
            connection_id,
            session.roster().len()
        );

        self.queue.join(connection_id);
        self.queue.publish(Dispatch::to_all(Event::RosterChanged {
            nicknames: session.roster().nicknames(),
        }));
        self.queue.publish_all(session.join_snapshot(connection_id));
    }
}
