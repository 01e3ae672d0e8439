//! UseCase: チャットメッセージ送信処理
//!
//! 会議中のみ受け付け、サーバー時刻を付けて履歴に追加し、全員に配信します。

use std::sync::Arc;

use crate::domain::{
    ChatMessage, CommandKind, Dispatch, Event, MessageText, Record, RecordStore, Submitter,
    Timestamp,
};

use super::{CommandError, EventQueue, SharedSession, save_record};

pub struct SendMessageUseCase {
    session: SharedSession,
    queue: EventQueue,
    record_store: Arc<dyn RecordStore>,
}

impl SendMessageUseCase {
    pub fn new(
        session: SharedSession,
        queue: EventQueue,
        record_store: Arc<dyn RecordStore>,
    ) -> Self {
        Self {
            session,
            queue,
            record_store,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - 履歴に追加されたメッセージ
    /// * `Err(CommandError)` - 会議中でないため受け付けなかった
    pub async fn execute(
        &self,
        submitter: Submitter,
        text: MessageText,
    ) -> Result<ChatMessage, CommandError> {
        let message = {
            let mut session = self.session.lock().await;
            if !session.accepts(CommandKind::Chat) {
                return Err(CommandError::NotAccepted {
                    kind: CommandKind::Chat,
                    meeting_active: session.is_meeting_active(),
                });
            }

            let message = ChatMessage::new(submitter, text, Timestamp::now());
            session.append_message(message.clone());
            self.queue
                .publish(Dispatch::to_all(Event::ChatMessage(message.clone())));
            message
        };

        save_record(self.record_store.as_ref(), Record::chat(&message)).await;

        Ok(message)
    }
}
