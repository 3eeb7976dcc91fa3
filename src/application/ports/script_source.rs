//! Script Source Port - 剧本文本来源抽象
//!
//! 外部文档读取器的抽象: 按文档顺序产出每个表格单元的文本。
//! 表格式文档的解析本身不在本仓库范围内, 这里只消费其产物

use async_trait::async_trait;
use thiserror::Error;

/// 剧本来源错误
#[derive(Debug, Error)]
pub enum ScriptSourceError {
    #[error("Script not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Script Source Port
///
/// 按文档顺序产出单元文本; 每个单元由解析器以全新状态处理
#[async_trait]
pub trait ScriptSourcePort: Send + Sync {
    /// 读取全部单元文本
    async fn read_cells(&self) -> Result<Vec<String>, ScriptSourceError>;
}
