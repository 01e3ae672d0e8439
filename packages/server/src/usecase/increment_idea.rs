//! UseCase: アイデア数の加算

use std::sync::Arc;

use crate::domain::{CommandKind, Dispatch, Event, Record, RecordStore, Submitter, Timestamp};

use super::{CommandError, EventQueue, SharedSession, save_record};

pub struct IncrementIdeaUseCase {
    session: SharedSession,
    queue: EventQueue,
    record_store: Arc<dyn RecordStore>,
}

impl IncrementIdeaUseCase {
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

    /// アイデア数を 1 増やし、新しい合計を返す
    pub async fn execute(&self, submitter: Submitter) -> Result<u64, CommandError> {
        let now = Timestamp::now();
        let (total_ideas, since_meeting_start) = {
            let mut session = self.session.lock().await;
            if !session.accepts(CommandKind::Idea) {
                return Err(CommandError::NotAccepted {
                    kind: CommandKind::Idea,
                    meeting_active: session.is_meeting_active(),
                });
            }

            let total_ideas = session.increment_ideas();
            self.queue
                .publish(Dispatch::to_all(Event::IdeaIncrement { total_ideas }));
            (total_ideas, session.seconds_since_meeting_start(now))
        };

        save_record(
            self.record_store.as_ref(),
            Record::idea(&submitter, now, since_meeting_start, total_ideas),
        )
        .await;

        Ok(total_ideas)
    }
}
