//! Screenplay Context - Line Classifier
//!
//! 将单个非空行分类为带标签的变体, 按文档化的固定优先级逐个尝试:
//! 1. TagStart      - `[<TagName>]:`, 名称不在名册中
//! 2. SpeakerStart  - `[<Name>]:` 或整行裸名, 名称在名册中, 可带 `(<情绪>)`
//! 3. BulletLine    - 以项目符号 `•` 或制表符开头
//! 4. DashLine      - 以 `-` 开头
//! 5. AsteriskLine  - 以 `*` 包裹的环境描述
//! 6. Continuation  - 其余所有行
//!
//! 标记语法损坏（括号不配对、空标签名）降级为 Continuation, 不报错

use lazy_static::lazy_static;
use regex::Regex;

use super::Roster;

lazy_static! {
    /// 方括号标记: `[Name]:` 后接可选内容
    static ref BRACKET_MARKER: Regex = Regex::new(r"^\[([^\[\]]+)\]:\s*(.*)$").unwrap();
    /// 仅为情绪括号的剩余部分: `(emotion)`
    static ref EMOTION_ONLY: Regex = Regex::new(r"^\(([^()]*)\)$").unwrap();
    /// 裸名加情绪括号: `Name (emotion)` — 名称部分需通过名册解析才生效
    static ref BARE_WITH_EMOTION: Regex = Regex::new(r"^(.+?)\s*\(([^()]*)\)$").unwrap();
}

/// 行分类结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// 非对白块开始标记
    TagStart {
        tag: String,
        /// 标签后的情绪括号会被解析但在累积阶段丢弃（情绪只属于对白）
        emotion: Option<String>,
        /// 冒号后的尾随文本, 作为块缓冲的首行
        rest: Option<String>,
    },
    /// 对白块开始标记
    SpeakerStart {
        /// 规范拼写的说话者
        speaker: String,
        emotion: Option<String>,
        /// 冒号后的尾随文本, 作为对白缓冲的首行
        rest: Option<String>,
    },
    /// 背景音效条目行（仅在环境类块内有意义）
    BulletLine { text: String },
    /// 独立描述行
    DashLine { text: String },
    /// 星号包裹的环境描述行
    AsteriskLine { text: String },
    /// 续行文本, 追加到当前打开的块
    Continuation,
}

/// 分类单个行
///
/// `raw` 已去除行尾空白; 行内判定统一基于两端修剪后的文本,
/// 制表符项目行除外（其前导制表符在修剪前判定）
pub fn classify_line(raw: &str, roster: &Roster) -> LineClass {
    let line = raw.trim();

    // 1/2. 方括号标记: 名册命中为说话者, 否则为标签
    if let Some(caps) = BRACKET_MARKER.captures(line) {
        let name = caps[1].trim().to_string();
        let rest = caps[2].trim();
        if let Some(canonical) = roster.resolve(&name) {
            let (emotion, rest) = split_emotion(rest);
            return LineClass::SpeakerStart {
                speaker: canonical.to_string(),
                emotion,
                rest,
            };
        }
        let (emotion, rest) = split_emotion(rest);
        return LineClass::TagStart {
            tag: name,
            emotion,
            rest,
        };
    }

    // 2. 裸名标记: 整行只包含名称与可选情绪括号, 部分匹配不算标记
    if let Some(canonical) = roster.resolve(line) {
        return LineClass::SpeakerStart {
            speaker: canonical.to_string(),
            emotion: None,
            rest: None,
        };
    }
    if let Some(caps) = BARE_WITH_EMOTION.captures(line) {
        if let Some(canonical) = roster.resolve(&caps[1]) {
            return LineClass::SpeakerStart {
                speaker: canonical.to_string(),
                emotion: non_empty(caps[2].trim()),
                rest: None,
            };
        }
    }

    // 3. 项目符号行
    if line.starts_with('•') || raw.starts_with('\t') {
        let text = line.trim_start_matches(['•', '\t']).trim().to_string();
        return LineClass::BulletLine { text };
    }

    // 4. 独立描述行
    if let Some(stripped) = line.strip_prefix('-') {
        return LineClass::DashLine {
            text: stripped.trim().to_string(),
        };
    }

    // 5. 星号包裹的环境描述
    if line.starts_with('*') {
        return LineClass::AsteriskLine {
            text: line.trim_matches('*').trim().to_string(),
        };
    }

    // 6. 其余一律按续行处理
    LineClass::Continuation
}

/// 标记语法可疑: 以 `[` 开头却没有被任何标记模式接受
///
/// 仅用于生成 MalformedMarker 告警, 不改变续行降级行为
pub(crate) fn is_suspect_marker(line: &str) -> bool {
    line.starts_with('[')
}

/// 将标记后的剩余部分拆为情绪括号或缓冲首行
fn split_emotion(rest: &str) -> (Option<String>, Option<String>) {
    if let Some(caps) = EMOTION_ONLY.captures(rest) {
        return (non_empty(caps[1].trim()), None);
    }
    (None, non_empty(rest))
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        Roster::new(["Emma", "Leo"])
    }

    #[test]
    fn test_bracketed_speaker() {
        assert_eq!(
            classify_line("[Emma]:", &roster()),
            LineClass::SpeakerStart {
                speaker: "Emma".to_string(),
                emotion: None,
                rest: None,
            }
        );
    }

    #[test]
    fn test_bracketed_speaker_case_insensitive() {
        assert_eq!(
            classify_line("[leo]:", &roster()),
            LineClass::SpeakerStart {
                speaker: "Leo".to_string(),
                emotion: None,
                rest: None,
            }
        );
    }

    #[test]
    fn test_bracketed_speaker_with_emotion() {
        assert_eq!(
            classify_line("[Emma]: (besorgt)", &roster()),
            LineClass::SpeakerStart {
                speaker: "Emma".to_string(),
                emotion: Some("besorgt".to_string()),
                rest: None,
            }
        );
    }

    #[test]
    fn test_bracketed_speaker_with_trailing_text() {
        // 冒号后的自由文本作为对白首行, 不按情绪解析
        assert_eq!(
            classify_line("[Emma]: Hallo Leo (lacht)", &roster()),
            LineClass::SpeakerStart {
                speaker: "Emma".to_string(),
                emotion: None,
                rest: Some("Hallo Leo (lacht)".to_string()),
            }
        );
    }

    #[test]
    fn test_bare_speaker_with_emotion() {
        assert_eq!(
            classify_line("Emma (besorgt)", &roster()),
            LineClass::SpeakerStart {
                speaker: "Emma".to_string(),
                emotion: Some("besorgt".to_string()),
                rest: None,
            }
        );
    }

    #[test]
    fn test_bare_speaker_empty_emotion_dropped() {
        assert_eq!(
            classify_line("Emma ()", &roster()),
            LineClass::SpeakerStart {
                speaker: "Emma".to_string(),
                emotion: None,
                rest: None,
            }
        );
    }

    #[test]
    fn test_non_roster_bracket_is_tag() {
        assert_eq!(
            classify_line("[Environment Description]:", &roster()),
            LineClass::TagStart {
                tag: "Environment Description".to_string(),
                emotion: None,
                rest: None,
            }
        );
    }

    #[test]
    fn test_roster_gating_bare_name() {
        // 名册外的裸名绝不成为说话者标记
        assert_eq!(classify_line("Anna", &roster()), LineClass::Continuation);
        assert_eq!(
            classify_line("Anna (besorgt)", &roster()),
            LineClass::Continuation
        );
    }

    #[test]
    fn test_name_inside_sentence_is_continuation() {
        // 行中出现名册名不构成标记, 必须整行匹配
        assert_eq!(
            classify_line("Geduld, Emma.", &roster()),
            LineClass::Continuation
        );
    }

    #[test]
    fn test_bullet_and_tab_lines() {
        assert_eq!(
            classify_line("•Owls hooting", &roster()),
            LineClass::BulletLine {
                text: "Owls hooting".to_string()
            }
        );
        assert_eq!(
            classify_line("\tWind rustling", &roster()),
            LineClass::BulletLine {
                text: "Wind rustling".to_string()
            }
        );
    }

    #[test]
    fn test_dash_line() {
        assert_eq!(
            classify_line("- Ein Knacken im Unterholz.", &roster()),
            LineClass::DashLine {
                text: "Ein Knacken im Unterholz.".to_string()
            }
        );
    }

    #[test]
    fn test_asterisk_line() {
        assert_eq!(
            classify_line("*A dark forest.*", &roster()),
            LineClass::AsteriskLine {
                text: "A dark forest.".to_string()
            }
        );
        // 只有开头的星号也开启环境描述（多行星号块的首行）
        assert_eq!(
            classify_line("*Ein dunkler Wald", &roster()),
            LineClass::AsteriskLine {
                text: "Ein dunkler Wald".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_markers_degrade_to_continuation() {
        assert_eq!(classify_line("[Emma]", &roster()), LineClass::Continuation);
        assert_eq!(classify_line("[]:", &roster()), LineClass::Continuation);
        assert_eq!(classify_line("[Emma:", &roster()), LineClass::Continuation);
        assert!(is_suspect_marker("[Emma]"));
        assert!(is_suspect_marker("[]:"));
        assert!(!is_suspect_marker("Hallo"));
    }

    #[test]
    fn test_priority_bullet_before_dash() {
        // 以 • 开头且含 - 的行按项目符号处理
        assert_eq!(
            classify_line("•- gemischt", &roster()),
            LineClass::BulletLine {
                text: "- gemischt".to_string()
            }
        );
    }
}
