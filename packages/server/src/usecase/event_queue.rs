//! 内部イベントキュー
//!
//! 全てのプロデューサーが共有する 1 本のキューです。
//! 投入はロックを保持したまま同期的に行えるため、
//! 状態変更の順序とイベントの配信順序が一致します。
//!
//! 配信先の追加・削除もイベントと同じキューに流します。
//! 参加より前に受理されたイベントは参加者に届かず、
//! 参加より後に受理されたイベントだけが届きます。

use tokio::sync::mpsc;

use crate::domain::{ConnectionId, Dispatch};

/// キューに流れる要素
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueItem {
    /// 以降の全体宛てイベントの配信先に加える
    Join(ConnectionId),
    /// 配信先から外す
    Leave(ConnectionId),
    Dispatch(Dispatch),
}

pub type EventReceiver = mpsc::UnboundedReceiver<QueueItem>;

#[derive(Debug, Clone)]
pub struct EventQueue {
    sender: mpsc::UnboundedSender<QueueItem>,
}

impl EventQueue {
    /// キューと、その唯一の受信側を作成
    pub fn new() -> (Self, EventReceiver) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    pub fn publish(&self, dispatch: Dispatch) {
        let name = dispatch.event.name();
        if self.sender.send(QueueItem::Dispatch(dispatch)).is_err() {
            tracing::warn!("Event queue is closed, dropping '{}' event", name);
        }
    }

    pub fn publish_all(&self, dispatches: impl IntoIterator<Item = Dispatch>) {
        for dispatch in dispatches {
            self.publish(dispatch);
        }
    }

    pub fn join(&self, connection_id: ConnectionId) {
        if self.sender.send(QueueItem::Join(connection_id)).is_err() {
            tracing::warn!("Event queue is closed, dropping join of {}", connection_id);
        }
    }

    pub fn leave(&self, connection_id: ConnectionId) {
        if self.sender.send(QueueItem::Leave(connection_id)).is_err() {
            tracing::warn!("Event queue is closed, dropping leave of {}", connection_id);
        }
    }
}
