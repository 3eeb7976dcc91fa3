//! File Audio Writer - 文件系统音频输出实现
//!
//! 实现 AudioWriterPort trait
//!
//! 按片段原始顺序把各段音频字节追加写入单个输出文件,
//! 不做任何转码（服务统一返回 MP3 字节, 直接串联）

use async_trait::async_trait;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::application::ports::{AudioWriteError, AudioWriterPort};

/// 文件音频输出
pub struct FileAudioWriter;

impl FileAudioWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileAudioWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioWriterPort for FileAudioWriter {
    async fn write_clips(&self, clips: &[Vec<u8>], path: &Path) -> Result<u64, AudioWriteError> {
        if clips.is_empty() {
            return Err(AudioWriteError::Empty);
        }

        // 确保输出目录存在
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AudioWriteError::IoError(e.to_string()))?;
        }

        let mut file = fs::File::create(path)
            .await
            .map_err(|e| AudioWriteError::IoError(e.to_string()))?;

        let mut total: u64 = 0;
        for clip in clips {
            file.write_all(clip)
                .await
                .map_err(|e| AudioWriteError::IoError(e.to_string()))?;
            total += clip.len() as u64;
        }

        file.flush()
            .await
            .map_err(|e| AudioWriteError::IoError(e.to_string()))?;

        tracing::debug!(
            path = %path.display(),
            clips = clips.len(),
            bytes = total,
            "Audio clips written"
        );

        Ok(total)
    }
}
