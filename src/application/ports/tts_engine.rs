//! TTS Engine Port - 语音合成服务抽象
//!
//! 定义托管语音合成服务的抽象接口（逐句语音合成与背景音效生成）,
//! 具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// TTS 错误
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 语音合成参数
///
/// 与情绪标签对应的数值由调用方配置提供, 此处只定义形状
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    /// 声音稳定度 0.0-1.0
    pub stability: f32,
    /// 音色相似度 0.0-1.0
    pub similarity_boost: f32,
}

/// 语音合成请求
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    /// 要合成的文本内容
    pub text: String,
    /// 音色 ID
    pub voice_id: String,
    /// 合成参数（由情绪映射解析得出）
    pub settings: VoiceSettings,
}

/// 背景音效生成请求
#[derive(Debug, Clone)]
pub struct SoundEffectRequest {
    /// 音效描述文本
    pub text: String,
    /// 音效时长（秒）
    pub duration_secs: f32,
    /// 提示词影响程度 0.0-1.0
    pub prompt_influence: f32,
}

/// 合成结果音频片段
#[derive(Debug, Clone)]
pub struct SpeechClip {
    /// 原始音频数据（服务返回的字节, 不做转码）
    pub audio_data: Vec<u8>,
    /// 服务端请求 ID（用于日志和追踪）
    pub request_id: Option<String>,
}

/// TTS Engine Port
///
/// 外部语音合成服务的抽象接口
#[async_trait]
pub trait TtsEnginePort: Send + Sync {
    /// 合成一段语音
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechClip, TtsError>;

    /// 生成一条背景音效
    async fn sound_effect(&self, request: SoundEffectRequest) -> Result<SpeechClip, TtsError>;

    /// 检查合成服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
