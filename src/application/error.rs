//! 应用层错误定义
//!
//! 旁白流程的统一错误类型; 单个片段的失败在驱动层被捕获上报,
//! 不会中止整批合成

use thiserror::Error;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 说话者没有对应的音色映射
    #[error("Missing voice mapping for speaker: {0}")]
    MissingVoiceMapping(String),

    /// 外部服务错误
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}

impl From<crate::application::ports::TtsError> for ApplicationError {
    fn from(err: crate::application::ports::TtsError) -> Self {
        Self::ExternalServiceError(err.to_string())
    }
}

impl From<crate::application::ports::TranslateError> for ApplicationError {
    fn from(err: crate::application::ports::TranslateError) -> Self {
        Self::ExternalServiceError(err.to_string())
    }
}

impl From<crate::application::ports::ScriptSourceError> for ApplicationError {
    fn from(err: crate::application::ports::ScriptSourceError) -> Self {
        Self::StorageError(err.to_string())
    }
}

impl From<crate::application::ports::AudioWriteError> for ApplicationError {
    fn from(err: crate::application::ports::AudioWriteError) -> Self {
        Self::StorageError(err.to_string())
    }
}
