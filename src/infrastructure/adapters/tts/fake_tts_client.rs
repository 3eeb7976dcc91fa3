//! Fake TTS Client - 用于测试的 TTS 客户端
//!
//! 始终返回固定的音频字节, 不实际调用合成服务

use async_trait::async_trait;

use crate::application::ports::{
    SoundEffectRequest, SpeechClip, SpeechRequest, TtsEnginePort, TtsError,
};

/// Fake TTS Client 配置
#[derive(Debug, Clone)]
pub struct FakeTtsClientConfig {
    /// 固定返回的音频数据
    pub audio_data: Vec<u8>,
    /// 模拟的合成延迟（毫秒）
    pub latency_ms: u64,
}

impl Default for FakeTtsClientConfig {
    fn default() -> Self {
        Self {
            audio_data: b"fake-audio".to_vec(),
            latency_ms: 0,
        }
    }
}

/// Fake TTS Client
///
/// 用于测试与离线试运行, 始终返回配置的固定音频字节
pub struct FakeTtsClient {
    config: FakeTtsClientConfig,
}

impl FakeTtsClient {
    pub fn new(config: FakeTtsClientConfig) -> Self {
        tracing::info!(
            audio_size = config.audio_data.len(),
            latency_ms = config.latency_ms,
            "FakeTtsClient initialized"
        );
        Self { config }
    }

    /// 使用默认配置创建
    pub fn with_defaults() -> Self {
        Self::new(FakeTtsClientConfig::default())
    }

    async fn simulate_latency(&self) {
        if self.config.latency_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.config.latency_ms)).await;
        }
    }
}

#[async_trait]
impl TtsEnginePort for FakeTtsClient {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechClip, TtsError> {
        tracing::debug!(
            text_len = request.text.len(),
            voice_id = %request.voice_id,
            "FakeTtsClient: returning fixed audio"
        );

        self.simulate_latency().await;

        Ok(SpeechClip {
            audio_data: self.config.audio_data.clone(),
            request_id: None,
        })
    }

    async fn sound_effect(&self, request: SoundEffectRequest) -> Result<SpeechClip, TtsError> {
        tracing::debug!(
            text_len = request.text.len(),
            "FakeTtsClient: returning fixed audio for sound effect"
        );

        self.simulate_latency().await;

        Ok(SpeechClip {
            audio_data: self.config.audio_data.clone(),
            request_id: None,
        })
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::VoiceSettings;

    #[tokio::test]
    async fn test_returns_fixed_audio() {
        let client = FakeTtsClient::with_defaults();
        let clip = client
            .synthesize(SpeechRequest {
                text: "Hallo".to_string(),
                voice_id: "any".to_string(),
                settings: VoiceSettings {
                    stability: 0.5,
                    similarity_boost: 0.75,
                },
            })
            .await
            .unwrap();
        assert_eq!(clip.audio_data, b"fake-audio".to_vec());
    }
}
