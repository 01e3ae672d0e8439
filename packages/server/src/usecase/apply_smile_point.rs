//! UseCase: スマイルポイントの加算
//!
//! 合計を加算してレベルを再計算し、レベルが変わった場合は
//! ロックを解放した後にご褒美画像の生成タスクを起動します。

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::domain::{
    CommandKind, Dispatch, Event, Record, RecordStore, ScoreApplied, SmilePoint, Submitter,
    Timestamp,
};

use super::{
    CommandError, EventQueue, GenerateRewardImageUseCase, SharedSession, save_record,
};

/// スマイルポイント加算の結果
#[derive(Debug)]
pub struct SmilePointApplied {
    pub score: ScoreApplied,
    /// レベルが変わった場合に起動した画像生成タスク
    pub reward_image: Option<JoinHandle<()>>,
}

pub struct ApplySmilePointUseCase {
    session: SharedSession,
    queue: EventQueue,
    record_store: Arc<dyn RecordStore>,
    reward_image: Arc<GenerateRewardImageUseCase>,
}

impl ApplySmilePointUseCase {
    pub fn new(
        session: SharedSession,
        queue: EventQueue,
        record_store: Arc<dyn RecordStore>,
        reward_image: Arc<GenerateRewardImageUseCase>,
    ) -> Self {
        Self {
            session,
            queue,
            record_store,
            reward_image,
        }
    }

    pub async fn execute(
        &self,
        submitter: Submitter,
        point: SmilePoint,
    ) -> Result<SmilePointApplied, CommandError> {
        let now = Timestamp::now();
        let (score, since_meeting_start, animal_type) = {
            let mut session = self.session.lock().await;
            if !session.accepts(CommandKind::SmilePoint) {
                return Err(CommandError::NotAccepted {
                    kind: CommandKind::SmilePoint,
                    meeting_active: session.is_meeting_active(),
                });
            }

            let score = session.apply_score_delta(point);
            self.queue.publish(Dispatch::to_all(Event::ScoreDelta {
                total_smile_point: score.total_smile_point,
            }));
            if let Some(level) = score.level_change() {
                tracing::info!(
                    "Level up: {} -> {} (total {})",
                    score.previous_level,
                    level,
                    score.total_smile_point
                );
                self.queue
                    .publish(Dispatch::to_all(Event::LevelChanged { level }));
            }

            (
                score,
                session.seconds_since_meeting_start(now),
                session.image_animal_type().clone(),
            )
        };

        save_record(
            self.record_store.as_ref(),
            Record::smile_point(
                &submitter,
                now,
                since_meeting_start,
                point.value(),
                score.total_smile_point,
            ),
        )
        .await;

        let reward_image = match score.level_change() {
            Some(level) => {
                save_record(
                    self.record_store.as_ref(),
                    Record::level(now, since_meeting_start, level),
                )
                .await;
                Some(self.reward_image.spawn(level, animal_type))
            }
            None => None,
        };

        Ok(SmilePointApplied {
            score,
            reward_image,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        domain::{
            GeneratedImage, Level, MockImageGenerator, MockRecordStore, SessionState,
        },
        usecase::{
            EventReceiver, new_shared_session,
            test_support::{drain, submitter},
        },
    };

    fn create_usecase(
        image_generator: MockImageGenerator,
    ) -> (ApplySmilePointUseCase, SharedSession, EventReceiver) {
        let session = new_shared_session(SessionState::default());
        let (queue, receiver) = EventQueue::new();
        let mut record_store = MockRecordStore::new();
        record_store.expect_save().returning(|_| Ok(()));
        let record_store: Arc<dyn RecordStore> = Arc::new(record_store);
        let reward_image = Arc::new(GenerateRewardImageUseCase::new(
            session.clone(),
            queue.clone(),
            Arc::new(image_generator),
            record_store.clone(),
            Duration::from_secs(60),
        ));
        let usecase =
            ApplySmilePointUseCase::new(session.clone(), queue, record_store, reward_image);
        (usecase, session, receiver)
    }

    #[tokio::test]
    async fn test_score_before_thresholds_keeps_level_one() {
        // テスト項目: 閾値が設定される前は加算のみ行われ、レベルは変わらない
        // given (前提条件):
        let mut image_generator = MockImageGenerator::new();
        image_generator.expect_generate().times(0);
        let (usecase, session, mut receiver) = create_usecase(image_generator);
        session.lock().await.start_meeting(Timestamp::new(0));

        // when (操作):
        let applied = usecase
            .execute(submitter("alice"), SmilePoint::new(10))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(applied.score.total_smile_point, 10);
        assert_eq!(applied.score.level, Level::MIN);
        assert!(applied.reward_image.is_none());
        assert_eq!(
            drain(&mut receiver),
            vec![Dispatch::to_all(Event::ScoreDelta {
                total_smile_point: 10
            })]
        );
    }

    #[tokio::test]
    async fn test_level_up_triggers_single_reward_image() {
        // テスト項目: レベルが上がるとレベル変更が配信され、画像が 1 枚だけ生成される
        // given (前提条件):
        let mut image_generator = MockImageGenerator::new();
        image_generator
            .expect_generate()
            .withf(|level, _| level.value() == 4)
            .times(1)
            .returning(|_, _| {
                Ok(GeneratedImage {
                    prompt: "prompt".to_string(),
                    url: "https://example.com/4.png".to_string(),
                })
            });
        let (usecase, session, mut receiver) = create_usecase(image_generator);
        {
            let mut s = session.lock().await;
            let epoch = s.start_meeting(Timestamp::new(0)).epoch;
            s.apply_score_delta(SmilePoint::new(10));
            s.fix_thresholds_if_due(epoch, Duration::from_secs(120), Duration::from_secs(120));
        }

        // when (操作):
        let applied = usecase
            .execute(submitter("alice"), SmilePoint::new(35))
            .await
            .unwrap();
        applied.reward_image.unwrap().await.unwrap();

        // then (期待する結果):
        assert_eq!(applied.score.total_smile_point, 45);
        assert_eq!(applied.score.level.value(), 4);
        let events: Vec<Event> = drain(&mut receiver).into_iter().map(|d| d.event).collect();
        assert_eq!(
            events,
            vec![
                Event::ScoreDelta {
                    total_smile_point: 45
                },
                Event::LevelChanged {
                    level: Level::new(4).unwrap()
                },
                Event::ImageGenerated {
                    image_urls: vec!["https://example.com/4.png".to_string()]
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_smile_point_outside_meeting_is_rejected() {
        // テスト項目: 会議中でなければスマイルポイントは受け付けられない
        // given (前提条件):
        let (usecase, session, mut receiver) = create_usecase(MockImageGenerator::new());

        // when (操作):
        let result = usecase
            .execute(submitter("alice"), SmilePoint::new(5))
            .await;

        // then (期待する結果):
        assert!(result.is_err());
        assert_eq!(session.lock().await.total_smile_point(), 0);
        assert!(drain(&mut receiver).is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_submissions_are_all_counted() {
        // テスト項目: 同時に送信されたスマイルポイントが全て合計に反映される
        // given (前提条件):
        let (usecase, session, mut receiver) = create_usecase(MockImageGenerator::new());
        session.lock().await.start_meeting(Timestamp::new(0));
        let usecase = Arc::new(usecase);

        // when (操作):
        let tasks: Vec<_> = (0..20)
            .map(|i| {
                let usecase = usecase.clone();
                tokio::spawn(async move {
                    usecase
                        .execute(submitter(&format!("user{i}")), SmilePoint::new(3))
                        .await
                        .unwrap();
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        // then (期待する結果): 合計は減少せずに配信される
        assert_eq!(session.lock().await.total_smile_point(), 60);
        let totals: Vec<u64> = drain(&mut receiver)
            .into_iter()
            .filter_map(|d| match d.event {
                Event::ScoreDelta { total_smile_point } => Some(total_smile_point),
                _ => None,
            })
            .collect();
        assert_eq!(totals.len(), 20);
        assert!(totals.windows(2).all(|w| w[0] < w[1]));
    }
}
