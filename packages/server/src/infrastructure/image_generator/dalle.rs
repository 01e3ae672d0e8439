//! DALL·E 互換 API を使った ImageGenerator

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{AnimalType, GeneratedImage, ImageGenerationError, ImageGenerator, Level};

use super::prompt::build_prompt;

const MODEL: &str = "dall-e-3";
const IMAGE_SIZE: &str = "1024x1024";

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    prompt: &'a str,
    model: &'a str,
    n: u8,
    size: &'a str,
    quality: &'a str,
    response_format: &'a str,
    style: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
}

pub struct DalleImageGenerator {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl DalleImageGenerator {
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            api_key,
        }
    }
}

#[async_trait]
impl ImageGenerator for DalleImageGenerator {
    async fn generate(
        &self,
        level: Level,
        animal_type: AnimalType,
    ) -> Result<GeneratedImage, ImageGenerationError> {
        let prompt = build_prompt(level, &animal_type);
        let body = ImageRequest {
            prompt: &prompt,
            model: MODEL,
            n: 1,
            size: IMAGE_SIZE,
            quality: "standard",
            response_format: "url",
            style: "natural",
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ImageGenerationError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImageGenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let result: ImageResponse = response
            .json()
            .await
            .map_err(|e| ImageGenerationError::Decode(e.to_string()))?;

        let url = result
            .data
            .into_iter()
            .next()
            .and_then(|data| data.url)
            .filter(|url| !url.is_empty())
            .ok_or(ImageGenerationError::EmptyResponse)?;

        Ok(GeneratedImage { prompt, url })
    }
}
