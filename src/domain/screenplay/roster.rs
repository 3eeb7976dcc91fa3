//! Screenplay Context - Roster
//!
//! 可识别的角色名册, 由调用方配置传入而非编译期常量

/// 角色名册
///
/// 不变量:
/// - 名称按首次出现的拼写保存（规范拼写）
/// - 解析不区分大小写, 重复条目去重
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    /// 从名称列表创建名册
    ///
    /// 空白名称被忽略, 大小写不同的重复名称只保留第一个拼写
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut canonical: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            let trimmed = name.trim();
            if trimmed.is_empty() {
                continue;
            }
            let lowered = trimmed.to_lowercase();
            if !canonical.iter().any(|n| n.to_lowercase() == lowered) {
                canonical.push(trimmed.to_string());
            }
        }
        Self { names: canonical }
    }

    /// 将任意拼写解析为规范拼写
    ///
    /// 未登记的名称返回 None, 调用方绝不能据此产出对白片段
    pub fn resolve(&self, raw: &str) -> Option<&str> {
        let lowered = raw.trim().to_lowercase();
        if lowered.is_empty() {
            return None;
        }
        self.names
            .iter()
            .find(|n| n.to_lowercase() == lowered)
            .map(|n| n.as_str())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
