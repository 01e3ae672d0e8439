//! EventDispatcher: イベントキューの唯一の消費者
//!
//! 受理した順に要素を取り出し、全体宛てのイベントはその時点の配信先へ、
//! 本人宛てのイベントはその接続のみへ送信します。
//! 配信先はキューに流れる `Join` / `Leave` で更新するため、
//! 参加者は参加より後に受理されたイベントだけを受け取ります。

use std::{collections::BTreeSet, sync::Arc};

use crate::domain::{Audience, ConnectionId, Dispatch, MessagePusher};

use super::{EventReceiver, QueueItem};

pub struct EventDispatcher {
    message_pusher: Arc<dyn MessagePusher>,
    /// 配信先（登録順 = ConnectionId の昇順）
    members: BTreeSet<ConnectionId>,
}

impl EventDispatcher {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            message_pusher,
            members: BTreeSet::new(),
        }
    }

    /// キューが閉じられるまでイベントを配信し続ける
    pub async fn run(mut self, mut receiver: EventReceiver) {
        while let Some(item) = receiver.recv().await {
            self.handle(item).await;
        }
        tracing::info!("Event queue closed, dispatcher stopped");
    }

    pub async fn handle(&mut self, item: QueueItem) {
        match item {
            QueueItem::Join(connection_id) => {
                self.members.insert(connection_id);
            }
            QueueItem::Leave(connection_id) => {
                self.members.remove(&connection_id);
            }
            QueueItem::Dispatch(dispatch) => self.dispatch(dispatch).await,
        }
    }

    async fn dispatch(&self, dispatch: Dispatch) {
        let result = match dispatch.audience {
            Audience::All => {
                if self.members.is_empty() {
                    return;
                }
                let targets: Vec<ConnectionId> = self.members.iter().copied().collect();
                self.message_pusher
                    .broadcast(&targets, &dispatch.event)
                    .await
            }
            Audience::Only(connection_id) if self.members.contains(&connection_id) => {
                self.message_pusher
                    .push_to(connection_id, &dispatch.event)
                    .await
            }
            Audience::Only(connection_id) => {
                tracing::debug!(
                    "Connection {} is no longer registered, dropping '{}' event",
                    connection_id,
                    dispatch.event.name()
                );
                return;
            }
        };

        if let Err(e) = result {
            tracing::warn!("Failed to deliver '{}' event: {}", dispatch.event.name(), e);
        }
    }
}
