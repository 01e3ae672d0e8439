//! Server configuration.
//!
//! コマンドライン引数と環境変数から読み込みます（引数が優先）。

use std::{path::PathBuf, time::Duration};

use axum::http::HeaderValue;
use clap::Parser;
use thiserror::Error;

use crate::{
    domain::{AnimalType, DEFAULT_ANIMAL_TYPE, ValueObjectError},
    usecase::{
        LoginUseCase, TickerSettings, generate_reward_image::DEFAULT_IMAGE_TIMEOUT_SECS,
        timer_ticker::DEFAULT_THRESHOLD_DELAY_SECS,
    },
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("--dalle-api-endpoint and --dalle-api-key must be given together")]
    IncompleteImageGeneration,

    #[error("--admin-nickname and --admin-password must be given together")]
    IncompleteAdmin,

    #[error("--{0} must be positive")]
    NotPositive(&'static str),

    #[error("invalid --client-address '{0}'")]
    InvalidClientAddress(String),

    #[error("invalid --animal-type: {0}")]
    InvalidAnimalType(#[from] ValueObjectError),
}

/// DALL·E 互換 API の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageGenerationConfig {
    pub endpoint: String,
    pub api_key: String,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "smilesync-server")]
#[command(about = "Realtime hub for SmileSync meetings", long_about = None)]
pub struct ServerConfig {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = 8081)]
    pub port: u16,

    /// Origin allowed by CORS (any origin when unset)
    #[arg(long, env = "CLIENT_ADDRESS")]
    pub client_address: Option<String>,

    /// Nickname that logs in with the admin password
    #[arg(long, env = "ADMIN_NICKNAME")]
    pub admin_nickname: Option<String>,

    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: Option<String>,

    /// Password shared by all non-admin participants
    #[arg(long, env = "LOGIN_PASSWORD", hide_env_values = true)]
    pub login_password: Option<String>,

    /// DALL·E compatible image generation endpoint
    #[arg(long, env = "DALLE_API_ENDPOINT")]
    pub dalle_api_endpoint: Option<String>,

    #[arg(long, env = "DALLE_API_KEY", hide_env_values = true)]
    pub dalle_api_key: Option<String>,

    /// Timeout for a single image generation request, in seconds
    #[arg(long, env = "IMAGE_TIMEOUT_SECS", default_value_t = DEFAULT_IMAGE_TIMEOUT_SECS)]
    pub image_timeout_secs: u64,

    /// Seconds after meeting start at which level thresholds are fixed
    #[arg(long, env = "THRESHOLD_DELAY_SECS", default_value_t = DEFAULT_THRESHOLD_DELAY_SECS)]
    pub threshold_delay_secs: u64,

    /// Initial reward animal
    #[arg(long, env = "DEFAULT_ANIMAL_TYPE", default_value = DEFAULT_ANIMAL_TYPE)]
    pub animal_type: String,

    /// Append records to this JSON Lines file instead of keeping them in memory
    #[arg(long, env = "RECORD_LOG")]
    pub record_log: Option<PathBuf>,
}

impl ServerConfig {
    /// 設定の組み合わせと値を検証する
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dalle_api_endpoint.is_some() != self.dalle_api_key.is_some() {
            return Err(ConfigError::IncompleteImageGeneration);
        }
        if self.admin_nickname.is_some() != self.admin_password.is_some() {
            return Err(ConfigError::IncompleteAdmin);
        }
        if self.threshold_delay_secs == 0 {
            return Err(ConfigError::NotPositive("threshold-delay-secs"));
        }
        if self.image_timeout_secs == 0 {
            return Err(ConfigError::NotPositive("image-timeout-secs"));
        }
        self.allowed_origin()?;
        self.default_animal_type()?;
        Ok(())
    }

    pub fn image_generation(&self) -> Option<ImageGenerationConfig> {
        match (&self.dalle_api_endpoint, &self.dalle_api_key) {
            (Some(endpoint), Some(api_key)) => Some(ImageGenerationConfig {
                endpoint: endpoint.clone(),
                api_key: api_key.clone(),
            }),
            _ => None,
        }
    }

    pub fn allowed_origin(&self) -> Result<Option<HeaderValue>, ConfigError> {
        self.client_address
            .as_deref()
            .map(|address| {
                HeaderValue::from_str(address)
                    .map_err(|_| ConfigError::InvalidClientAddress(address.to_string()))
            })
            .transpose()
    }

    pub fn default_animal_type(&self) -> Result<AnimalType, ConfigError> {
        Ok(AnimalType::new(self.animal_type.clone())?)
    }

    pub fn ticker_settings(&self) -> TickerSettings {
        TickerSettings::new(Duration::from_secs(self.threshold_delay_secs))
    }

    pub fn image_timeout(&self) -> Duration {
        Duration::from_secs(self.image_timeout_secs)
    }

    pub fn login_usecase(&self) -> LoginUseCase {
        LoginUseCase::new(
            self.admin_nickname.clone(),
            self.admin_password.clone(),
            self.login_password.clone(),
        )
    }
}
