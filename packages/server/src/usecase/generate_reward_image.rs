//! UseCase: レベルアップ時のご褒美画像生成
//!
//! セッションのロックを解放した後に別タスクで実行されます。
//! 生成に成功した場合のみ URL を履歴に追加して配信し、
//! 失敗（タイムアウトを含む）はログに残すだけでセッション状態には触れません。

use std::{sync::Arc, time::Duration};

use tokio::task::JoinHandle;

use crate::domain::{
    AnimalType, Dispatch, Event, GeneratedImage, ImageGenerationError, ImageGenerator, Level,
    Record, RecordStore, Timestamp,
};

use super::{EventQueue, SharedSession, save_record};

/// 画像生成のデフォルトのタイムアウト（秒）
pub const DEFAULT_IMAGE_TIMEOUT_SECS: u64 = 60;

pub struct GenerateRewardImageUseCase {
    session: SharedSession,
    queue: EventQueue,
    image_generator: Arc<dyn ImageGenerator>,
    record_store: Arc<dyn RecordStore>,
    timeout: Duration,
}

impl GenerateRewardImageUseCase {
    pub fn new(
        session: SharedSession,
        queue: EventQueue,
        image_generator: Arc<dyn ImageGenerator>,
        record_store: Arc<dyn RecordStore>,
        timeout: Duration,
    ) -> Self {
        Self {
            session,
            queue,
            image_generator,
            record_store,
            timeout,
        }
    }

    /// 画像生成タスクを起動する
    pub fn spawn(self: &Arc<Self>, level: Level, animal_type: AnimalType) -> JoinHandle<()> {
        let usecase = Arc::clone(self);
        tokio::spawn(async move {
            // 失敗は execute 内でログ出力済み
            let _ = usecase.execute(level, animal_type).await;
        })
    }

    pub async fn execute(
        &self,
        level: Level,
        animal_type: AnimalType,
    ) -> Result<GeneratedImage, ImageGenerationError> {
        tracing::info!(
            "Generating reward image for level {} ({})",
            level,
            animal_type
        );

        let generated = tokio::time::timeout(
            self.timeout,
            self.image_generator.generate(level, animal_type),
        )
        .await
        .unwrap_or(Err(ImageGenerationError::Timeout(self.timeout.as_secs())));

        let image = match generated {
            Ok(image) => image,
            Err(ImageGenerationError::NotConfigured) => {
                tracing::debug!("Image generation is not configured, skipping reward image");
                return Err(ImageGenerationError::NotConfigured);
            }
            Err(e) => {
                tracing::error!("Failed to generate reward image for level {}: {}", level, e);
                return Err(e);
            }
        };

        {
            let mut session = self.session.lock().await;
            let image_urls = session.append_image_url(image.url.clone()).to_vec();
            tracing::info!("Reward image #{} generated: {}", image_urls.len(), image.url);
            self.queue
                .publish(Dispatch::to_all(Event::ImageGenerated { image_urls }));
        }

        save_record(
            self.record_store.as_ref(),
            Record::image(
                Timestamp::now(),
                level,
                image.prompt.clone(),
                image.url.clone(),
            ),
        )
        .await;

        Ok(image)
    }
}
