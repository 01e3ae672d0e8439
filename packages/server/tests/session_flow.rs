//! End-to-end meeting flow through the use cases, dispatcher and pusher.
//!
//! Connections are represented by the outbound channels the WebSocket
//! handler would normally own, so every assertion is made on the exact
//! JSON frames a client would receive.

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use serde_json::Value;
use smilesync_server::{
    app::{AppSettings, Application},
    domain::{
        AnimalType, ClientId, ConnectionId, GeneratedImage, ImageGenerationError, ImageGenerator,
        Level, Nickname, Record, RecordStore, RecordStoreError, SmilePoint, Submitter,
    },
};
use tokio::sync::mpsc;

struct StubImageGenerator {
    calls: AtomicUsize,
}

#[async_trait]
impl ImageGenerator for StubImageGenerator {
    async fn generate(
        &self,
        level: Level,
        animal_type: AnimalType,
    ) -> Result<GeneratedImage, ImageGenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(GeneratedImage {
            prompt: format!("{} at level {}", animal_type, level),
            url: format!("https://images.example.com/{}.png", level),
        })
    }
}

struct NullRecordStore;

#[async_trait]
impl RecordStore for NullRecordStore {
    async fn save(&self, _record: Record) -> Result<(), RecordStoreError> {
        Ok(())
    }
}

fn submitter(name: &str) -> Submitter {
    Submitter::new(
        ClientId::new(format!("{name}-id")).unwrap(),
        Nickname::new(name.to_string()).unwrap(),
    )
}

fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<Value> {
    let mut frames = Vec::new();
    while let Ok(text) = rx.try_recv() {
        frames.push(serde_json::from_str(&text).unwrap());
    }
    frames
}

fn of_type<'a>(frames: &'a [Value], r#type: &str) -> Vec<&'a Value> {
    frames.iter().filter(|f| f["type"] == r#type).collect()
}

/// Let the dispatcher deliver everything queued so far
async fn settle() {
    tokio::time::sleep(Duration::from_millis(10)).await;
}

#[tokio::test(start_paused = true)]
async fn test_meeting_scenario_levels_up_with_one_reward_image() {
    // テスト項目: 2 人が参加して会議を開始し、閾値固定後の加算でレベル 4 になり画像が 1 枚だけ生成される
    // given (前提条件):
    let image_generator = Arc::new(StubImageGenerator {
        calls: AtomicUsize::new(0),
    });
    let app = Application::build(
        AppSettings::default(),
        Arc::new(NullRecordStore),
        image_generator.clone(),
    );
    let state = app.state();

    let alice = ConnectionId::new(1);
    let bob = ConnectionId::new(2);
    let (alice_tx, mut alice_rx) = mpsc::unbounded_channel();
    let (bob_tx, mut bob_rx) = mpsc::unbounded_channel();

    // when (操作): A と B が参加
    state
        .connect_participant_usecase
        .execute(alice, Nickname::new("A".to_string()).unwrap(), alice_tx)
        .await;
    state
        .connect_participant_usecase
        .execute(bob, Nickname::new("B".to_string()).unwrap(), bob_tx)
        .await;
    settle().await;

    // then (期待する結果): 参加者リストは {A, B}
    let alice_frames = drain(&mut alice_rx);
    let rosters = of_type(&alice_frames, "clientsList");
    assert_eq!(
        rosters.last().unwrap()["clientsList"],
        serde_json::json!(["A", "B"])
    );
    let bob_frames = drain(&mut bob_rx);
    assert_eq!(bob_frames[0]["clientsList"], serde_json::json!(["A", "B"]));
    assert_eq!(bob_frames.last().unwrap()["type"], "imageAnimalType");

    // when (操作): 会議を開始し、120 秒の時点で合計 10
    state.change_meeting_status_usecase.execute(true).await;
    state
        .apply_smile_point_usecase
        .execute(submitter("A"), SmilePoint::new(10))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_secs(121)).await;

    // when (操作): 閾値 [2] を超える加算
    let applied = state
        .apply_smile_point_usecase
        .execute(submitter("B"), SmilePoint::new(35))
        .await
        .unwrap();
    applied.reward_image.unwrap().await.unwrap();
    settle().await;

    // then (期待する結果): レベル 4 とご褒美画像 1 枚が全員に届く
    assert_eq!(applied.score.total_smile_point, 45);
    assert_eq!(applied.score.level.value(), 4);
    assert_eq!(image_generator.calls.load(Ordering::SeqCst), 1);

    for frames in [drain(&mut alice_rx), drain(&mut bob_rx)] {
        assert_eq!(
            of_type(&frames, "meetingStatus")[0]["isMeetingActive"],
            Value::Bool(true)
        );
        let totals: Vec<&Value> = of_type(&frames, "smilePoint")
            .into_iter()
            .map(|f| &f["totalSmilePoint"])
            .collect();
        assert_eq!(totals, vec![&serde_json::json!(10), &serde_json::json!(45)]);
        let levels = of_type(&frames, "level");
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0]["level"], 4);
        let images = of_type(&frames, "imageUrls");
        assert_eq!(images.len(), 1);
        assert_eq!(
            images[0]["imageUrls"],
            serde_json::json!(["https://images.example.com/4.png"])
        );
        let timers = of_type(&frames, "timer");
        assert_eq!(timers.len(), 121);
        assert_eq!(timers[119]["timer"], "00:02:00");
    }

    let session = app.session();
    let session = session.lock().await;
    assert!(session.thresholds_set());
    assert_eq!(session.image_urls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_late_joiner_receives_history_snapshot() {
    // テスト項目: 途中参加者にはチャット履歴と画像履歴を含むスナップショットが本人にのみ届く
    // given (前提条件):
    let app = Application::build(
        AppSettings::default(),
        Arc::new(NullRecordStore),
        Arc::new(StubImageGenerator {
            calls: AtomicUsize::new(0),
        }),
    );
    let state = app.state();
    let (alice_tx, mut alice_rx) = mpsc::unbounded_channel();
    state
        .connect_participant_usecase
        .execute(
            ConnectionId::new(1),
            Nickname::new("A".to_string()).unwrap(),
            alice_tx,
        )
        .await;
    state.change_meeting_status_usecase.execute(true).await;
    state
        .send_message_usecase
        .execute(
            submitter("A"),
            smilesync_server::domain::MessageText::new("hello".to_string()).unwrap(),
        )
        .await
        .unwrap();
    app.session()
        .lock()
        .await
        .append_image_url("https://images.example.com/old.png".to_string());
    settle().await;
    drain(&mut alice_rx);

    // when (操作):
    let (carol_tx, mut carol_rx) = mpsc::unbounded_channel();
    state
        .connect_participant_usecase
        .execute(
            ConnectionId::new(3),
            Nickname::new("C".to_string()).unwrap(),
            carol_tx,
        )
        .await;
    settle().await;

    // then (期待する結果):
    let types: Vec<String> = drain(&mut carol_rx)
        .into_iter()
        .map(|f| f["type"].as_str().unwrap().to_string())
        .filter(|t| t != "timer")
        .collect();
    assert_eq!(
        types,
        vec![
            "clientsList",
            "message",
            "meetingStatus",
            "smilePoint",
            "idea",
            "imageUrls",
            "level",
            "imageAnimalType"
        ]
    );
    let alice_types: Vec<String> = drain(&mut alice_rx)
        .into_iter()
        .map(|f| f["type"].as_str().unwrap().to_string())
        .filter(|t| t != "timer")
        .collect();
    assert_eq!(alice_types, vec!["clientsList"]);
}

#[tokio::test(start_paused = true)]
async fn test_joiner_receives_pending_chat_only_once() {
    // テスト項目: 配信前のチャットがある状態で参加しても、同じメッセージは 1 回だけ届く
    // given (前提条件): A が参加して会議を開始し、配信前に "hello" を送信
    let app = Application::build(
        AppSettings::default(),
        Arc::new(NullRecordStore),
        Arc::new(StubImageGenerator {
            calls: AtomicUsize::new(0),
        }),
    );
    let state = app.state();
    let (alice_tx, mut alice_rx) = mpsc::unbounded_channel();
    state
        .connect_participant_usecase
        .execute(
            ConnectionId::new(1),
            Nickname::new("A".to_string()).unwrap(),
            alice_tx,
        )
        .await;
    state.change_meeting_status_usecase.execute(true).await;
    state
        .send_message_usecase
        .execute(
            submitter("A"),
            smilesync_server::domain::MessageText::new("hello".to_string()).unwrap(),
        )
        .await
        .unwrap();

    // when (操作): EventDispatcher が動く前に C が参加し、その後 A がもう 1 通送信
    let (carol_tx, mut carol_rx) = mpsc::unbounded_channel();
    state
        .connect_participant_usecase
        .execute(
            ConnectionId::new(3),
            Nickname::new("C".to_string()).unwrap(),
            carol_tx,
        )
        .await;
    state
        .send_message_usecase
        .execute(
            submitter("A"),
            smilesync_server::domain::MessageText::new("again".to_string()).unwrap(),
        )
        .await
        .unwrap();
    settle().await;

    // then (期待する結果): 参加前のメッセージはスナップショットで、参加後のメッセージは通常の配信で 1 回ずつ届く
    let texts = |frames: Vec<Value>| -> Vec<String> {
        of_type(&frames, "message")
            .into_iter()
            .map(|f| f["text"].as_str().unwrap().to_string())
            .collect()
    };
    assert_eq!(texts(drain(&mut carol_rx)), vec!["hello", "again"]);
    assert_eq!(texts(drain(&mut alice_rx)), vec!["hello", "again"]);
}
