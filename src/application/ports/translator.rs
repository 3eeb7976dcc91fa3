//! Translator Port - 文本翻译抽象
//!
//! 音效合成后端可能只接受单一源语言, 背景提示在发送前按需翻译;
//! 每次调用翻译一条独立的提示文本

use async_trait::async_trait;
use thiserror::Error;

/// 翻译错误
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Translator Port
///
/// 单条文本翻译的抽象接口, 语言对由实现配置
#[async_trait]
pub trait TranslatorPort: Send + Sync {
    /// 翻译一条文本
    async fn translate(&self, text: &str) -> Result<String, TranslateError>;
}
