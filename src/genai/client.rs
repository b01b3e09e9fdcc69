//! 生成式后端客户端
//!
//! OpenAI 兼容接口的 HTTP 实现。每个操作独立可重试；
//! 调用失败一律折算成 `AppError::Generation`，由上层决定降级。

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::Deserialize;
use serde_json::json;

use crate::config::config::GenAiConfig;
use crate::error::{AppError, Result};

/// 生成式后端 trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// 文本补全
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// 图像合成，返回图片字节
    async fn synthesize_image(&self, prompt: &str) -> Result<Vec<u8>>;

    /// 语音合成，返回音频字节
    async fn synthesize_speech(&self, text: &str, voice: &str) -> Result<Vec<u8>>;
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

#[derive(Deserialize)]
struct ImageGenerationResponse {
    data: Vec<ImagePayload>,
}

#[derive(Deserialize)]
struct ImagePayload {
    b64_json: String,
}

/// OpenAI 兼容后端的 HTTP 客户端
pub struct HttpGenerativeClient {
    client: reqwest::Client,
    config: GenAiConfig,
}

impl HttpGenerativeClient {
    pub fn new(mut config: GenAiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout))
            .build()?;

        // 路径拼接以 `/` 开头，基地址的尾随斜杠会产生双斜杠 URL
        config.base_url = config.base_url.trim_end_matches('/').to_string();

        Ok(Self { client, config })
    }

    fn request(&self, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .post(format!("{}{}", self.config.base_url, path));
        if !self.config.api_key.is_empty() {
            builder = builder.bearer_auth(&self.config.api_key);
        }
        builder
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Generation(format!(
                "Backend returned {}: {}",
                status, body
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl GenerativeClient for HttpGenerativeClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let response = self
            .request("/v1/chat/completions")
            .json(&json!({
                "model": self.config.completion_model,
                "messages": [{"role": "user", "content": prompt}],
            }))
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let completion: ChatCompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AppError::Generation("Completion response had no choices".to_string()))
    }

    async fn synthesize_image(&self, prompt: &str) -> Result<Vec<u8>> {
        let response = self
            .request("/v1/images/generations")
            .json(&json!({
                "model": self.config.image_model,
                "prompt": prompt,
                "n": 1,
                "response_format": "b64_json",
            }))
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let generation: ImageGenerationResponse = response.json().await?;
        let payload = generation
            .data
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Generation("Image response had no payload".to_string()))?;

        BASE64
            .decode(payload.b64_json.as_bytes())
            .map_err(|e| AppError::Generation(format!("Invalid image payload: {}", e)))
    }

    async fn synthesize_speech(&self, text: &str, voice: &str) -> Result<Vec<u8>> {
        let response = self
            .request("/v1/audio/speech")
            .json(&json!({
                "model": self.config.speech_model,
                "input": text,
                "voice": voice,
            }))
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}
