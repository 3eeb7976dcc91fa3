//! Audio Writer Port - 音频输出抽象
//!
//! 将各片段的音频按原始分段顺序拼接写入单个输出文件。
//! 不做任何编解码: 服务返回什么字节就写什么字节

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// 音频写入错误
#[derive(Debug, Error)]
pub enum AudioWriteError {
    #[error("No clips to write")]
    Empty,

    #[error("IO error: {0}")]
    IoError(String),
}

/// Audio Writer Port
///
/// 有序合并是调用方的不变量: clips 必须已按片段原始顺序排列
#[async_trait]
pub trait AudioWriterPort: Send + Sync {
    /// 按顺序拼接写入, 返回写入的字节数
    async fn write_clips(&self, clips: &[Vec<u8>], path: &Path) -> Result<u64, AudioWriteError>;
}
