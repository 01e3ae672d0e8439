//! UseCase: 会議の開始と終了
//!
//! 開始時は閾値とレベルをリセットして TimerTicker を起動し、
//! 終了時は TimerTicker を停止します。会議状態の変更は常に配信されます。

use tokio::sync::Mutex;

use crate::domain::{Dispatch, Event, Timestamp};

use super::{EventQueue, SharedSession, TickerSettings, TimerHandle, TimerTicker};

pub struct ChangeMeetingStatusUseCase {
    session: SharedSession,
    queue: EventQueue,
    ticker_settings: TickerSettings,
    /// 進行中の会議の TimerTicker
    ticker: Mutex<Option<TimerHandle>>,
}

impl ChangeMeetingStatusUseCase {
    pub fn new(session: SharedSession, queue: EventQueue, ticker_settings: TickerSettings) -> Self {
        Self {
            session,
            queue,
            ticker_settings,
            ticker: Mutex::new(None),
        }
    }

    pub async fn execute(&self, active: bool) {
        let mut ticker = self.ticker.lock().await;
        if let Some(handle) = ticker.take() {
            handle.stop();
        }

        let mut session = self.session.lock().await;
        if active {
            let started = session.start_meeting(Timestamp::now());
            tracing::info!("Meeting #{} started", started.epoch);

            self.queue.publish(Dispatch::to_all(Event::MeetingStatusChanged {
                is_meeting_active: true,
            }));
            if let Some(level) = started.level_reset {
                self.queue
                    .publish(Dispatch::to_all(Event::LevelChanged { level }));
            }

            *ticker = Some(TimerTicker::spawn(
                self.session.clone(),
                self.queue.clone(),
                self.ticker_settings,
                started.epoch,
            ));
        } else {
            if session.end_meeting() {
                tracing::info!(
                    "Meeting ended (total smile point {}, ideas {})",
                    session.total_smile_point(),
                    session.total_ideas()
                );
            }
            self.queue.publish(Dispatch::to_all(Event::MeetingStatusChanged {
                is_meeting_active: false,
            }));
        }
    }

    /// TimerTicker が起動中かどうか
    pub async fn is_ticking(&self) -> bool {
        self.ticker
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}
