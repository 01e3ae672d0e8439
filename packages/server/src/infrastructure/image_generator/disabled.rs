//! 画像生成が設定されていない場合の ImageGenerator

use async_trait::async_trait;

use crate::domain::{AnimalType, GeneratedImage, ImageGenerationError, ImageGenerator, Level};

/// 常に [`ImageGenerationError::NotConfigured`] を返す
#[derive(Debug, Default)]
pub struct DisabledImageGenerator;

#[async_trait]
impl ImageGenerator for DisabledImageGenerator {
    async fn generate(
        &self,
        _level: Level,
        _animal_type: AnimalType,
    ) -> Result<GeneratedImage, ImageGenerationError> {
        Err(ImageGenerationError::NotConfigured)
    }
}
