//! TimerTicker: 会議中の経過時間を刻むタスク
//!
//! 会議 1 回につき 1 タスク。停止シグナルを受け取るか、
//! 自分の会議がもう進行中でないことに気付いた時点で終了します。
//! tick ごとに経過時間を配信し、閾値の遅延時間に達した最初の tick で閾値を固定します。

use std::time::Duration;

use tokio::{
    sync::oneshot,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};

use crate::domain::{Dispatch, Event};

use super::{EventQueue, SharedSession};

/// 閾値を固定するまでのデフォルトの遅延（秒）
pub const DEFAULT_THRESHOLD_DELAY_SECS: u64 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickerSettings {
    pub tick_interval: Duration,
    pub threshold_delay: Duration,
}

impl TickerSettings {
    pub fn new(threshold_delay: Duration) -> Self {
        Self {
            threshold_delay,
            ..Self::default()
        }
    }
}

impl Default for TickerSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            threshold_delay: Duration::from_secs(DEFAULT_THRESHOLD_DELAY_SECS),
        }
    }
}

/// 起動中の TimerTicker へのハンドル
///
/// ハンドルを drop した場合もタスクは停止します。
#[derive(Debug)]
pub struct TimerHandle {
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl TimerHandle {
    /// 停止シグナルを送る
    pub fn stop(mut self) -> JoinHandle<()> {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        self.task
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

pub struct TimerTicker;

impl TimerTicker {
    /// `epoch` の会議のためのタスクを起動する
    pub fn spawn(
        session: SharedSession,
        queue: EventQueue,
        settings: TickerSettings,
        epoch: u64,
    ) -> TimerHandle {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let started_at = Instant::now();
            let mut interval =
                tokio::time::interval_at(started_at + settings.tick_interval, settings.tick_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = &mut stop_rx => {
                        tracing::debug!("Timer for meeting #{} stopped", epoch);
                        break;
                    }
                    _ = interval.tick() => {}
                }

                let elapsed = started_at.elapsed();
                let mut session = session.lock().await;
                if !session.is_current_meeting(epoch) {
                    tracing::debug!("Meeting #{} is over, timer exits", epoch);
                    break;
                }

                if let Some(thresholds) =
                    session.fix_thresholds_if_due(epoch, elapsed, settings.threshold_delay)
                {
                    tracing::info!(
                        "Level thresholds fixed at total {}: {:?}",
                        session.total_smile_point(),
                        thresholds.values()
                    );
                }

                queue.publish(Dispatch::to_all(Event::TimerTick {
                    elapsed_secs: elapsed.as_secs(),
                }));
            }
        });

        TimerHandle {
            stop: Some(stop_tx),
            task,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{LevelThresholds, SessionState, SmilePoint, Timestamp},
        usecase::{EventReceiver, new_shared_session, test_support::drain},
    };

    fn drain_ticks(receiver: &mut EventReceiver) -> Vec<u64> {
        drain(receiver)
            .into_iter()
            .filter_map(|dispatch| match dispatch.event {
                Event::TimerTick { elapsed_secs } => Some(elapsed_secs),
                _ => None,
            })
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_every_second() {
        // テスト項目: 1 秒ごとに経過時間が配信される
        // given (前提条件):
        let session = new_shared_session(SessionState::default());
        let epoch = session.lock().await.start_meeting(Timestamp::new(0)).epoch;
        let (queue, mut receiver) = EventQueue::new();

        // when (操作):
        let handle = TimerTicker::spawn(session, queue, TickerSettings::default(), epoch);
        tokio::time::sleep(Duration::from_millis(3_500)).await;

        // then (期待する結果):
        assert_eq!(drain_ticks(&mut receiver), vec![1, 2, 3]);
        handle.stop().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_thresholds_fixed_after_delay() {
        // テスト項目: 遅延時間に達した時点の合計値で閾値が固定される
        // given (前提条件):
        let session = new_shared_session(SessionState::default());
        let epoch = {
            let mut s = session.lock().await;
            let epoch = s.start_meeting(Timestamp::new(0)).epoch;
            s.apply_score_delta(SmilePoint::new(10));
            epoch
        };
        let (queue, _receiver) = EventQueue::new();
        let settings = TickerSettings::new(Duration::from_secs(5));

        // when (操作):
        let handle = TimerTicker::spawn(session.clone(), queue, settings, epoch);
        tokio::time::sleep(Duration::from_millis(4_500)).await;
        let before = session.lock().await.thresholds_set();
        tokio::time::sleep(Duration::from_secs(1)).await;

        // then (期待する結果):
        assert!(!before);
        assert_eq!(
            session.lock().await.thresholds(),
            Some(&LevelThresholds::from_baseline(10))
        );
        handle.stop().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_signal_ends_task() {
        // テスト項目: 停止シグナルでタスクが終了し、以降 tick は配信されない
        // given (前提条件):
        let session = new_shared_session(SessionState::default());
        let epoch = session.lock().await.start_meeting(Timestamp::new(0)).epoch;
        let (queue, mut receiver) = EventQueue::new();
        let handle = TimerTicker::spawn(session, queue, TickerSettings::default(), epoch);
        tokio::time::sleep(Duration::from_millis(1_500)).await;

        // when (操作):
        handle.stop().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;

        // then (期待する結果):
        assert_eq!(drain_ticks(&mut receiver), vec![1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exits_when_meeting_is_over() {
        // テスト項目: 会議が終了していれば次の tick でタスクが自ら終了する
        // given (前提条件):
        let session = new_shared_session(SessionState::default());
        let epoch = session.lock().await.start_meeting(Timestamp::new(0)).epoch;
        let (queue, mut receiver) = EventQueue::new();
        let handle = TimerTicker::spawn(session.clone(), queue, TickerSettings::default(), epoch);

        // when (操作):
        session.lock().await.end_meeting();
        tokio::time::sleep(Duration::from_millis(1_500)).await;

        // then (期待する結果):
        assert!(handle.is_finished());
        assert!(drain_ticks(&mut receiver).is_empty());
    }
}
