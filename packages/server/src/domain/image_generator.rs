//! ImageGenerator trait 定義
//!
//! レベルアップ時のご褒美画像を生成する外部サービスのインターフェースです。

use async_trait::async_trait;

use super::{
    ImageGenerationError,
    value_object::{AnimalType, Level},
};

/// 生成された画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// 生成に使ったプロンプト
    pub prompt: String,
    pub url: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// `level` と `animal_type` に応じた画像を生成する
    async fn generate(
        &self,
        level: Level,
        animal_type: AnimalType,
    ) -> Result<GeneratedImage, ImageGenerationError>;
}
