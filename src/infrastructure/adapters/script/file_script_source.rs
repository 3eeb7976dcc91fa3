//! File Script Source - 纯文本剧本文件来源
//!
//! 实现 ScriptSourcePort trait
//!
//! 消费已由外部抽取器从表格式文档导出的纯文本;
//! 默认整个文件是一个单元, 可配置分隔行将其切为多个单元

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{ScriptSourceError, ScriptSourcePort};

/// 文件剧本来源
pub struct FileScriptSource {
    /// 剧本文件路径
    path: PathBuf,
    /// 单元分隔行（整行精确匹配）, None 表示整个文件一个单元
    cell_delimiter: Option<String>,
}

impl FileScriptSource {
    pub fn new(path: impl AsRef<Path>, cell_delimiter: Option<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cell_delimiter,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 按分隔行切分单元, 丢弃空单元
    fn split_cells(&self, text: &str) -> Vec<String> {
        let delimiter = match &self.cell_delimiter {
            Some(d) => d,
            None => return vec![text.to_string()],
        };

        let mut cells = Vec::new();
        let mut current = String::new();
        for line in text.lines() {
            if line.trim() == delimiter {
                if !current.trim().is_empty() {
                    cells.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
            } else {
                current.push_str(line);
                current.push('\n');
            }
        }
        if !current.trim().is_empty() {
            cells.push(current);
        }
        cells
    }
}

#[async_trait]
impl ScriptSourcePort for FileScriptSource {
    async fn read_cells(&self) -> Result<Vec<String>, ScriptSourceError> {
        let text = fs::read_to_string(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ScriptSourceError::NotFound(self.path.display().to_string())
            } else {
                ScriptSourceError::IoError(e.to_string())
            }
        })?;

        let cells = self.split_cells(&text);

        tracing::debug!(
            path = %self.path.display(),
            cells = cells.len(),
            "Script cells loaded"
        );

        Ok(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_whole_file_is_one_cell() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[Emma]:\nHallo.\n").unwrap();

        let source = FileScriptSource::new(file.path(), None);
        let cells = source.read_cells().await.unwrap();

        assert_eq!(cells.len(), 1);
        assert!(cells[0].contains("[Emma]:"));
    }

    #[tokio::test]
    async fn test_delimiter_splits_cells() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[Emma]:\nHallo.\n---\n*Wald*\n---\n[Leo]:\nGeduld.\n").unwrap();

        let source = FileScriptSource::new(file.path(), Some("---".to_string()));
        let cells = source.read_cells().await.unwrap();

        assert_eq!(cells.len(), 3);
        assert!(cells[0].contains("[Emma]:"));
        assert!(cells[1].contains("*Wald*"));
        assert!(cells[2].contains("[Leo]:"));
    }

    #[tokio::test]
    async fn test_empty_cells_dropped() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "---\n---\n[Emma]:\nHallo.\n---\n").unwrap();

        let source = FileScriptSource::new(file.path(), Some("---".to_string()));
        let cells = source.read_cells().await.unwrap();

        assert_eq!(cells.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let source = FileScriptSource::new("/nonexistent/skript.txt", None);
        let err = source.read_cells().await.unwrap_err();
        assert!(matches!(err, ScriptSourceError::NotFound(_)));
    }
}
