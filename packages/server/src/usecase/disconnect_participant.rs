//! UseCase: 参加者切断処理
//!
//! 登録済みの接続であれば参加者リストと配信先から削除し、残りの参加者に
//! 新しい参加者リストを配信します。未登録の接続に対しては何もしません。

use std::sync::Arc;

use crate::domain::{ConnectionId, Dispatch, Event, MessagePusher};

use super::{EventQueue, SharedSession};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    session: SharedSession,
    queue: EventQueue,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
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

    /// 参加者切断を実行
    ///
    /// # Returns
    ///
    /// 参加者リストから削除された場合は `true`
    pub async fn execute(&self, connection_id: ConnectionId) -> bool {
        let removed = {
            let mut session = self.session.lock().await;
            let removed = session.unregister_connection(connection_id);
            if removed {
                tracing::info!(
                    "Connection {} left ({} connected)",
                    connection_id,
                    session.roster().len()
                );
                self.queue.leave(connection_id);
                self.queue.publish(Dispatch::to_all(Event::RosterChanged {
                    nicknames: session.roster().nicknames(),
                }));
            }
            removed
        };

        self.message_pusher.unregister_client(connection_id).await;

        removed
    }
}
