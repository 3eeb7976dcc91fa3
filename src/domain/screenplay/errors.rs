//! Screenplay Context - Parse Warnings
//!
//! 解析对任意输入都是全函数, 不会失败;
//! 被静默降级的行以告警形式随结果返回, 由调用方决定是否上报

use thiserror::Error;

/// 解析告警
///
/// 单个坏行绝不中止整个剧本的解析
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseWarning {
    /// 没有所属块的续行被丢弃（保留原始实现的行为）
    #[error("第 {line} 行: 续行没有所属块, 已丢弃: {text}")]
    OrphanContinuation { line: usize, text: String },

    /// 标记语法损坏, 按续行处理
    #[error("第 {line} 行: 标记语法损坏, 按续行处理: {text}")]
    MalformedMarker { line: usize, text: String },
}

impl ParseWarning {
    /// 告警所在的输入行号（从 1 开始）
    pub fn line(&self) -> usize {
        match self {
            ParseWarning::OrphanContinuation { line, .. } => *line,
            ParseWarning::MalformedMarker { line, .. } => *line,
        }
    }
}
