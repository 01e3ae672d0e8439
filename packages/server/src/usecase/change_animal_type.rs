//! UseCase: ご褒美画像の動物の種類を変更

use crate::domain::{AnimalType, CommandKind, Dispatch, Event};

use super::{CommandError, EventQueue, SharedSession};

pub struct ChangeAnimalTypeUseCase {
    session: SharedSession,
    queue: EventQueue,
}

impl ChangeAnimalTypeUseCase {
    pub fn new(session: SharedSession, queue: EventQueue) -> Self {
        Self { session, queue }
    }

    /// 会議中でなければ動物の種類を変更し、全員に配信する
    pub async fn execute(&self, animal_type: AnimalType) -> Result<(), CommandError> {
        let mut session = self.session.lock().await;
        if !session.accepts(CommandKind::AnimalType) || !session.set_animal_type(animal_type) {
            return Err(CommandError::NotAccepted {
                kind: CommandKind::AnimalType,
                meeting_active: session.is_meeting_active(),
            });
        }

        tracing::info!("Reward animal changed to '{}'", session.image_animal_type());
        self.queue.publish(Dispatch::to_all(Event::AnimalTypeChanged {
            animal_type: session.image_animal_type().clone(),
        }));
        Ok(())
    }
}
