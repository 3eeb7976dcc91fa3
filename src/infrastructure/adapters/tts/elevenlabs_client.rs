//! ElevenLabs Client - 调用托管语音合成服务
//!
//! 实现 TtsEnginePort trait, 通过 HTTP 调用 ElevenLabs API
//!
//! 外部 API:
//! POST {base}/v1/text-to-speech/{voice_id}
//! Request: {"text": "...", "model_id": "...", "voice_settings": {...}}  (JSON)
//! POST {base}/v1/sound-generation
//! Request: {"text": "...", "duration_seconds": 10.0, "prompt_influence": 0.3}  (JSON)
//! Response: 音频二进制, 请求 ID 在 headers

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{
    SoundEffectRequest, SpeechClip, SpeechRequest, TtsEnginePort, TtsError, VoiceSettings,
};

/// 语音合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct SpeechHttpRequest {
    /// 要合成的文本
    text: String,
    /// 合成模型 ID
    model_id: String,
    /// 合成参数
    voice_settings: VoiceSettings,
}

/// 音效生成请求体 (JSON)
#[derive(Debug, Serialize)]
struct SoundEffectHttpRequest {
    /// 音效描述文本
    text: String,
    /// 音效时长（秒）
    duration_seconds: f32,
    /// 提示词影响程度
    prompt_influence: f32,
}

/// ElevenLabs 客户端配置
#[derive(Debug, Clone)]
pub struct ElevenLabsConfig {
    /// 服务基础 URL
    pub base_url: String,
    /// API Key
    pub api_key: String,
    /// 合成模型 ID
    pub model_id: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.elevenlabs.io".to_string(),
            api_key: String::new(),
            model_id: "eleven_multilingual_v2".to_string(),
            timeout_secs: 120,
        }
    }
}

impl ElevenLabsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// ElevenLabs 客户端
///
/// 每个片段一次独立调用, 不在此层做重试或退避
pub struct ElevenLabsClient {
    client: Client,
    config: ElevenLabsConfig,
}

impl ElevenLabsClient {
    /// 创建新的客户端
    pub fn new(config: ElevenLabsConfig) -> Result<Self, TtsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取语音合成 URL
    fn speech_url(&self, voice_id: &str) -> String {
        format!("{}/v1/text-to-speech/{}", self.config.base_url, voice_id)
    }

    /// 获取音效生成 URL
    fn sound_effect_url(&self) -> String {
        format!("{}/v1/sound-generation", self.config.base_url)
    }

    /// 获取健康检查 URL
    fn health_url(&self) -> String {
        format!("{}/v1/user", self.config.base_url)
    }

    /// 发送请求并读取音频字节
    async fn post_for_audio(
        &self,
        url: &str,
        body: &impl Serialize,
    ) -> Result<SpeechClip, TtsError> {
        let response = self
            .client
            .post(url)
            .header("xi-api-key", &self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TtsError::Timeout
                } else if e.is_connect() {
                    TtsError::NetworkError(format!("Cannot connect to TTS service: {}", e))
                } else {
                    TtsError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TtsError::AuthFailed(format!("HTTP {}: {}", status, error_text)));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TtsError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        // 从 headers 提取请求 ID
        let request_id = response
            .headers()
            .get("request-id")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());

        // 直接获取音频字节
        let audio_data = response
            .bytes()
            .await
            .map_err(|e| TtsError::InvalidResponse(format!("Failed to read audio: {}", e)))?
            .to_vec();

        if audio_data.is_empty() {
            return Err(TtsError::InvalidResponse("Empty audio response".to_string()));
        }

        Ok(SpeechClip {
            audio_data,
            request_id,
        })
    }
}

#[async_trait]
impl TtsEnginePort for ElevenLabsClient {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechClip, TtsError> {
        let http_request = SpeechHttpRequest {
            text: request.text,
            model_id: self.config.model_id.clone(),
            voice_settings: request.settings,
        };

        tracing::debug!(
            voice_id = %request.voice_id,
            text_len = http_request.text.len(),
            "Sending speech synthesis request"
        );

        let clip = self
            .post_for_audio(&self.speech_url(&request.voice_id), &http_request)
            .await?;

        tracing::info!(
            voice_id = %request.voice_id,
            request_id = ?clip.request_id,
            audio_size = clip.audio_data.len(),
            "Speech synthesis completed"
        );

        Ok(clip)
    }

    async fn sound_effect(&self, request: SoundEffectRequest) -> Result<SpeechClip, TtsError> {
        let http_request = SoundEffectHttpRequest {
            text: request.text,
            duration_seconds: request.duration_secs,
            prompt_influence: request.prompt_influence,
        };

        tracing::debug!(
            text_len = http_request.text.len(),
            duration_seconds = http_request.duration_seconds,
            "Sending sound effect request"
        );

        let clip = self
            .post_for_audio(&self.sound_effect_url(), &http_request)
            .await?;

        tracing::info!(
            request_id = ?clip.request_id,
            audio_size = clip.audio_data.len(),
            "Sound effect generation completed"
        );

        Ok(clip)
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(&self.health_url())
            .header("xi-api-key", &self.config.api_key)
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
