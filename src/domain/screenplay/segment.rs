//! Screenplay Context - Segments
//!
//! 解析输出的最小单位: 对白行或描述块

use serde::{Deserialize, Serialize};

/// 片段类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// 对白（归属于某个说话者）
    Dialogue,
    /// 环境描述（主文本）
    Environment,
    /// 背景音效提示（离散条目列表）
    Background,
    /// 自由描述
    Description,
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SegmentKind::Dialogue => write!(f, "dialogue"),
            SegmentKind::Environment => write!(f, "environment"),
            SegmentKind::Background => write!(f, "background"),
            SegmentKind::Description => write!(f, "description"),
        }
    }
}

/// 片段正文
///
/// Background 片段的正文是离散的音效提示列表（每条独立合成），
/// 其余类型是按空格拼接后的规范化文本
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SegmentBody {
    Text(String),
    Cues(Vec<String>),
}

/// 剧本片段
///
/// 不变量:
/// - speaker/emotion 仅在 kind = Dialogue 时出现, speaker 来自名册
/// - tag 仅在非对白片段显式携带方括号标签时出现
/// - 正文非空（空块在累积阶段即被丢弃, 不产出片段）
/// - 片段创建后不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// 片段类型
    #[serde(rename = "type")]
    kind: SegmentKind,
    /// 说话者（规范拼写）
    #[serde(skip_serializing_if = "Option::is_none")]
    speaker: Option<String>,
    /// 情绪标签, 不在此层默认化
    #[serde(skip_serializing_if = "Option::is_none")]
    emotion: Option<String>,
    /// 显式方括号标签
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
    /// 正文
    content: SegmentBody,
}

impl Segment {
    /// 创建对白片段
    pub fn dialogue(
        speaker: impl Into<String>,
        emotion: Option<String>,
        content: impl Into<String>,
    ) -> Result<Self, &'static str> {
        let content = content.into();
        if content.is_empty() {
            return Err("对白内容不能为空");
        }
        Ok(Self {
            kind: SegmentKind::Dialogue,
            speaker: Some(speaker.into()),
            emotion,
            tag: None,
            content: SegmentBody::Text(content),
        })
    }

    /// 创建环境描述片段
    pub fn environment(tag: Option<String>, content: impl Into<String>) -> Result<Self, &'static str> {
        let content = content.into();
        if content.is_empty() {
            return Err("环境描述内容不能为空");
        }
        Ok(Self {
            kind: SegmentKind::Environment,
            speaker: None,
            emotion: None,
            tag,
            content: SegmentBody::Text(content),
        })
    }

    /// 创建背景音效片段
    pub fn background(tag: Option<String>, cues: Vec<String>) -> Result<Self, &'static str> {
        if cues.is_empty() {
            return Err("背景音效提示列表不能为空");
        }
        Ok(Self {
            kind: SegmentKind::Background,
            speaker: None,
            emotion: None,
            tag,
            content: SegmentBody::Cues(cues),
        })
    }

    /// 创建自由描述片段
    pub fn description(tag: Option<String>, content: impl Into<String>) -> Result<Self, &'static str> {
        let content = content.into();
        if content.is_empty() {
            return Err("描述内容不能为空");
        }
        Ok(Self {
            kind: SegmentKind::Description,
            speaker: None,
            emotion: None,
            tag,
            content: SegmentBody::Text(content),
        })
    }

    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    pub fn speaker(&self) -> Option<&str> {
        self.speaker.as_deref()
    }

    pub fn emotion(&self) -> Option<&str> {
        self.emotion.as_deref()
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn body(&self) -> &SegmentBody {
        &self.content
    }

    /// 文本正文（Background 片段返回 None）
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            SegmentBody::Text(text) => Some(text),
            SegmentBody::Cues(_) => None,
        }
    }

    /// 音效提示列表（仅 Background 片段）
    pub fn cues(&self) -> Option<&[String]> {
        match &self.content {
            SegmentBody::Cues(cues) => Some(cues),
            SegmentBody::Text(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialogue_requires_content() {
        assert!(Segment::dialogue("Emma", None, "").is_err());
        let seg = Segment::dialogue("Emma", Some("besorgt".to_string()), "Hallo").unwrap();
        assert_eq!(seg.kind(), SegmentKind::Dialogue);
        assert_eq!(seg.speaker(), Some("Emma"));
        assert_eq!(seg.emotion(), Some("besorgt"));
        assert_eq!(seg.text(), Some("Hallo"));
        assert!(seg.cues().is_none());
    }

    #[test]
    fn test_background_requires_cues() {
        assert!(Segment::background(None, vec![]).is_err());
        let seg = Segment::background(None, vec!["Owls hooting".to_string()]).unwrap();
        assert_eq!(seg.cues(), Some(&["Owls hooting".to_string()][..]));
        assert!(seg.text().is_none());
    }

    #[test]
    fn test_serialize_shape() {
        // 对白: type/speaker/emotion/content, 无 tag 字段
        let seg = Segment::dialogue("Leo", None, "Geduld, Emma.").unwrap();
        let json = serde_json::to_value(&seg).unwrap();
        assert_eq!(json["type"], "dialogue");
        assert_eq!(json["speaker"], "Leo");
        assert_eq!(json["content"], "Geduld, Emma.");
        assert!(json.get("emotion").is_none());
        assert!(json.get("tag").is_none());

        // 背景: content 为数组
        let seg = Segment::background(None, vec!["Wind".to_string(), "Regen".to_string()]).unwrap();
        let json = serde_json::to_value(&seg).unwrap();
        assert_eq!(json["type"], "background");
        assert_eq!(json["content"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_description_keeps_tag() {
        let seg = Segment::description(Some("Szene".to_string()), "Ein Wald.").unwrap();
        assert_eq!(seg.tag(), Some("Szene"));
        let json = serde_json::to_value(&seg).unwrap();
        assert_eq!(json["tag"], "Szene");
    }
}
