//! Screenplay Context - Block Accumulator
//!
//! 单遍扫描的纯函数解析器: 行分类结果驱动一个小状态机
//! (NoBlock / OpenDialogue / OpenDescription / OpenEnvironment),
//! 每个开块标记先冲洗当前块再开启新块, 输入结束时冲洗残留块。
//!
//! 对任意输入都是全函数: 坏行降级为续行或被丢弃并记录告警,
//! 绝不因单行错误丢弃整个剧本

use super::classifier::{classify_line, is_suspect_marker, LineClass};
use super::{ParseWarning, Roster, Segment, SegmentKind};

/// 解析结果
///
/// segments 按标记在原文中首次出现的顺序排列;
/// warnings 记录被静默降级/丢弃的行, 供严格调用方上报
#[derive(Debug, Clone)]
pub struct ParseReport {
    pub segments: Vec<Segment>,
    pub warnings: Vec<ParseWarning>,
}

/// 解析单个文档单元的文本
///
/// 每次调用使用全新状态, 同一输入必然产出相同结果
pub fn parse_script(text: &str, roster: &Roster) -> ParseReport {
    let mut acc = BlockAccumulator::new();

    for (index, raw) in text.lines().enumerate() {
        let raw = raw.trim_end();
        if raw.trim().is_empty() {
            continue;
        }
        let class = classify_line(raw, roster);
        acc.feed(index + 1, raw.trim(), class);
    }

    acc.finish()
}

/// 当前打开的块
enum Block {
    None,
    Dialogue {
        speaker: String,
        emotion: Option<String>,
        buffer: Vec<String>,
    },
    /// 标签开启的描述块; kind 为 Background 时 buffer 的每行是一条独立提示
    Description {
        kind: SegmentKind,
        tag: Option<String>,
        buffer: Vec<String>,
    },
    Environment {
        tag: Option<String>,
        main: Vec<String>,
        cues: Vec<String>,
    },
}

struct BlockAccumulator {
    block: Block,
    segments: Vec<Segment>,
    warnings: Vec<ParseWarning>,
}

impl BlockAccumulator {
    fn new() -> Self {
        Self {
            block: Block::None,
            segments: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// 处理一个分类后的行
    ///
    /// `line` 为两端修剪后的原始行, 续行与告警使用它
    fn feed(&mut self, line_no: usize, line: &str, class: LineClass) {
        match class {
            LineClass::TagStart { tag, emotion: _, rest } => {
                // 标签上的情绪括号被丢弃: 情绪只属于对白
                self.flush();
                self.block = match kind_for_tag(&tag) {
                    SegmentKind::Environment => Block::Environment {
                        tag: Some(tag),
                        main: rest.into_iter().collect(),
                        cues: Vec::new(),
                    },
                    kind => Block::Description {
                        kind,
                        tag: Some(tag),
                        buffer: rest.into_iter().collect(),
                    },
                };
            }

            LineClass::SpeakerStart {
                speaker,
                emotion,
                rest,
            } => {
                self.flush();
                self.block = Block::Dialogue {
                    speaker,
                    emotion,
                    buffer: rest.into_iter().collect(),
                };
            }

            LineClass::BulletLine { text } => match &mut self.block {
                Block::Environment { cues, .. } => {
                    let cue = text.trim_matches('*').trim();
                    if !cue.is_empty() {
                        cues.push(cue.to_string());
                    }
                }
                Block::Description {
                    kind: SegmentKind::Background,
                    buffer,
                    ..
                } => {
                    if !text.is_empty() {
                        buffer.push(text);
                    }
                }
                // 非环境类块内的项目行按普通续行处理, 保留符号
                Block::Dialogue { buffer, .. } | Block::Description { buffer, .. } => {
                    buffer.push(line.to_string());
                }
                Block::None => {
                    self.warnings.push(ParseWarning::OrphanContinuation {
                        line: line_no,
                        text: line.to_string(),
                    });
                }
            },

            LineClass::DashLine { text } => {
                // 独立描述: 终结当前块, 立即产出, 不留打开的缓冲
                self.flush();
                if !text.is_empty() {
                    if let Ok(segment) = Segment::description(None, text) {
                        self.segments.push(segment);
                    }
                }
            }

            LineClass::AsteriskLine { text } => {
                if !matches!(self.block, Block::Environment { .. }) {
                    self.flush();
                    self.block = Block::Environment {
                        tag: None,
                        main: Vec::new(),
                        cues: Vec::new(),
                    };
                }
                if let Block::Environment { main, cues, .. } = &mut self.block {
                    push_environment_line(main, cues, &text);
                }
            }

            LineClass::Continuation => {
                if is_suspect_marker(line) {
                    self.warnings.push(ParseWarning::MalformedMarker {
                        line: line_no,
                        text: line.to_string(),
                    });
                }
                match &mut self.block {
                    Block::None => {
                        self.warnings.push(ParseWarning::OrphanContinuation {
                            line: line_no,
                            text: line.to_string(),
                        });
                    }
                    Block::Environment { main, cues, .. } => {
                        push_environment_line(main, cues, line);
                    }
                    Block::Description {
                        kind: SegmentKind::Background,
                        buffer,
                        ..
                    } => {
                        // 背景块内每行是一条独立提示, 不与主文本拼接
                        buffer.push(line.to_string());
                    }
                    Block::Dialogue { buffer, .. } | Block::Description { buffer, .. } => {
                        buffer.push(line.to_string());
                    }
                }
            }
        }
    }

    /// 冲洗当前块: 非空缓冲定格为片段, 状态回到 NoBlock
    fn flush(&mut self) {
        match std::mem::replace(&mut self.block, Block::None) {
            Block::None => {}

            Block::Dialogue {
                speaker,
                emotion,
                buffer,
            } => {
                if !buffer.is_empty() {
                    if let Ok(segment) = Segment::dialogue(speaker, emotion, buffer.join(" ")) {
                        self.segments.push(segment);
                    }
                }
            }

            Block::Description { kind, tag, buffer } => {
                if buffer.is_empty() {
                    return;
                }
                let segment = match kind {
                    SegmentKind::Background => Segment::background(tag, buffer),
                    _ => Segment::description(tag, buffer.join(" ")),
                };
                if let Ok(segment) = segment {
                    self.segments.push(segment);
                }
            }

            Block::Environment { tag, main, cues } => {
                if !main.is_empty() {
                    if let Ok(segment) = Segment::environment(tag, main.join(" ")) {
                        self.segments.push(segment);
                    }
                }
                if !cues.is_empty() {
                    if let Ok(segment) = Segment::background(None, cues) {
                        self.segments.push(segment);
                    }
                }
            }
        }
    }

    fn finish(mut self) -> ParseReport {
        self.flush();
        ParseReport {
            segments: self.segments,
            warnings: self.warnings,
        }
    }
}

/// 环境块内的行: 去掉残留星号后, 项目行归入音效列表, 其余归入主文本
fn push_environment_line(main: &mut Vec<String>, cues: &mut Vec<String>, text: &str) {
    let cleaned = text.trim_matches('*').trim();
    if cleaned.is_empty() {
        return;
    }
    if cleaned.starts_with('•') || cleaned.starts_with('\t') {
        let cue = cleaned.trim_start_matches(['•', '\t']).trim();
        if !cue.is_empty() {
            cues.push(cue.to_string());
        }
    } else {
        main.push(cleaned.to_string());
    }
}

/// 标签文本到片段类型的映射, 未识别的标签回落为通用描述
fn kind_for_tag(tag: &str) -> SegmentKind {
    let lowered = tag.to_lowercase();
    if lowered.contains("environment") {
        SegmentKind::Environment
    } else if lowered.contains("background") {
        SegmentKind::Background
    } else {
        SegmentKind::Description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        Roster::new(["Emma", "Leo"])
    }

    #[test]
    fn test_bracketed_dialogue() {
        let text = "[Emma]:\nAlso, Leo, was hast du mir hier überhaupt zeigen wollen?\n\n[Leo]:\nGeduld, Emma.";
        let report = parse_script(text, &roster());

        assert_eq!(report.segments.len(), 2);
        assert!(report.warnings.is_empty());

        let first = &report.segments[0];
        assert_eq!(first.kind(), SegmentKind::Dialogue);
        assert_eq!(first.speaker(), Some("Emma"));
        assert_eq!(first.emotion(), None);
        assert_eq!(
            first.text(),
            Some("Also, Leo, was hast du mir hier überhaupt zeigen wollen?")
        );

        let second = &report.segments[1];
        assert_eq!(second.speaker(), Some("Leo"));
        assert_eq!(second.text(), Some("Geduld, Emma."));
    }

    #[test]
    fn test_bare_name_with_emotion() {
        let text = "Emma (besorgt)\nLeo, ich hab ein really bad feeling about this!";
        let report = parse_script(text, &roster());

        assert_eq!(report.segments.len(), 1);
        let seg = &report.segments[0];
        assert_eq!(seg.kind(), SegmentKind::Dialogue);
        assert_eq!(seg.speaker(), Some("Emma"));
        assert_eq!(seg.emotion(), Some("besorgt"));
        assert_eq!(
            seg.text(),
            Some("Leo, ich hab ein really bad feeling about this!")
        );
    }

    #[test]
    fn test_environment_cell_with_cues() {
        let text = "*A dark forest.*\n•Owls hooting\n•Wind rustling";
        let report = parse_script(text, &roster());

        assert_eq!(report.segments.len(), 2);

        let env = &report.segments[0];
        assert_eq!(env.kind(), SegmentKind::Environment);
        assert_eq!(env.text(), Some("A dark forest."));
        // 项目行绝不混入环境主文本
        assert!(!env.text().unwrap().contains("Owls"));

        let bg = &report.segments[1];
        assert_eq!(bg.kind(), SegmentKind::Background);
        assert_eq!(
            bg.cues(),
            Some(&["Owls hooting".to_string(), "Wind rustling".to_string()][..])
        );
    }

    #[test]
    fn test_multiline_asterisk_run() {
        let text = "*Ein dunkler Wald\n•Eulen rufen\nDer Wind heult*";
        let report = parse_script(text, &roster());

        assert_eq!(report.segments.len(), 2);
        assert_eq!(
            report.segments[0].text(),
            Some("Ein dunkler Wald Der Wind heult")
        );
        assert_eq!(
            report.segments[1].cues(),
            Some(&["Eulen rufen".to_string()][..])
        );
    }

    #[test]
    fn test_whitespace_only_input_is_empty() {
        let report = parse_script("  \n\n\t \n   ", &roster());
        assert!(report.segments.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_orphan_line_before_first_marker_dropped() {
        let text = "verwaiste Zeile ohne Block\n[Emma]:\nHallo Leo.";
        let report = parse_script(text, &roster());

        assert_eq!(report.segments.len(), 1);
        assert_eq!(report.segments[0].text(), Some("Hallo Leo."));
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].line(), 1);
        assert!(matches!(
            report.warnings[0],
            ParseWarning::OrphanContinuation { .. }
        ));
    }

    #[test]
    fn test_idempotent() {
        let text = "[Emma]: (froh)\nNa endlich!\n*Lichtung*\n•Vogelzwitschern\n- Ein Knacken.";
        let first = parse_script(text, &roster());
        let second = parse_script(text, &roster());
        assert_eq!(first.segments, second.segments);
        assert_eq!(first.warnings, second.warnings);
    }

    #[test]
    fn test_order_preservation() {
        let text = "*Wald*\n•Eulen\n[Emma]:\nHallo.\n- Es knackt.\n[Leo]:\nWer ist da?";
        let report = parse_script(text, &roster());

        let kinds: Vec<SegmentKind> = report.segments.iter().map(|s| s.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                SegmentKind::Environment,
                SegmentKind::Background,
                SegmentKind::Dialogue,
                SegmentKind::Description,
                SegmentKind::Dialogue,
            ]
        );
    }

    #[test]
    fn test_multiline_dialogue_joined_with_single_space() {
        let text = "[Leo]:\nEs ist ein bisschen…\nwie soll ich sagen…\nnext-level cool.";
        let report = parse_script(text, &roster());

        assert_eq!(report.segments.len(), 1);
        assert_eq!(
            report.segments[0].text(),
            Some("Es ist ein bisschen… wie soll ich sagen… next-level cool.")
        );
    }

    #[test]
    fn test_dash_terminates_dialogue_and_orphans_following_text() {
        let text = "[Emma]:\nHallo.\n- Die Tür knarrt.\ndiese Zeile ist verwaist";
        let report = parse_script(text, &roster());

        assert_eq!(report.segments.len(), 2);
        assert_eq!(report.segments[0].kind(), SegmentKind::Dialogue);
        assert_eq!(report.segments[1].kind(), SegmentKind::Description);
        assert_eq!(report.segments[1].text(), Some("Die Tür knarrt."));
        // 横线行产出后状态回到 NoBlock, 后续续行被丢弃
        assert_eq!(report.warnings.len(), 1);
        assert!(matches!(
            report.warnings[0],
            ParseWarning::OrphanContinuation { .. }
        ));
    }

    #[test]
    fn test_background_tag_block_collects_discrete_cues() {
        let text = "[Background Description]:\nWind in den Bäumen\nRegen auf dem Dach";
        let report = parse_script(text, &roster());

        assert_eq!(report.segments.len(), 1);
        let seg = &report.segments[0];
        assert_eq!(seg.kind(), SegmentKind::Background);
        assert_eq!(seg.tag(), Some("Background Description"));
        assert_eq!(
            seg.cues(),
            Some(
                &[
                    "Wind in den Bäumen".to_string(),
                    "Regen auf dem Dach".to_string()
                ][..]
            )
        );
    }

    #[test]
    fn test_environment_tag_block_routes_bullets() {
        let text = "[Environment Description]:\nEin alter Baum.\n•Blätterrascheln";
        let report = parse_script(text, &roster());

        assert_eq!(report.segments.len(), 2);
        assert_eq!(report.segments[0].kind(), SegmentKind::Environment);
        assert_eq!(report.segments[0].tag(), Some("Environment Description"));
        assert_eq!(report.segments[0].text(), Some("Ein alter Baum."));
        assert_eq!(report.segments[1].kind(), SegmentKind::Background);
    }

    #[test]
    fn test_unknown_tag_is_generic_description() {
        let text = "[Szene]:\nDie Kamera schwenkt über den See.";
        let report = parse_script(text, &roster());

        assert_eq!(report.segments.len(), 1);
        assert_eq!(report.segments[0].kind(), SegmentKind::Description);
        assert_eq!(report.segments[0].tag(), Some("Szene"));
    }

    #[test]
    fn test_roster_gating_bracketed_name() {
        // 名册外的方括号名按标签处理, 绝不产出对白
        let text = "[Anna]:\nHallo zusammen.";
        let report = parse_script(text, &roster());

        assert_eq!(report.segments.len(), 1);
        assert_ne!(report.segments[0].kind(), SegmentKind::Dialogue);
        assert!(report.segments[0].speaker().is_none());
        assert_eq!(report.segments[0].tag(), Some("Anna"));
    }

    #[test]
    fn test_roster_gating_bare_name() {
        let text = "Anna\nHallo zusammen.";
        let report = parse_script(text, &roster());

        assert!(report.segments.is_empty());
        assert_eq!(report.warnings.len(), 2);
    }

    #[test]
    fn test_malformed_marker_degrades_to_continuation() {
        let text = "[Emma]:\nHallo\n[Leo\nwie geht es dir?";
        let report = parse_script(text, &roster());

        // 损坏的标记行并入打开的对白缓冲
        assert_eq!(report.segments.len(), 1);
        assert_eq!(
            report.segments[0].text(),
            Some("Hallo [Leo wie geht es dir?")
        );
        assert_eq!(report.warnings.len(), 1);
        assert!(matches!(
            report.warnings[0],
            ParseWarning::MalformedMarker { .. }
        ));
    }

    #[test]
    fn test_speaker_marker_with_trailing_text_seeds_buffer() {
        let text = "[Emma]: Also gut.\nDann zeig mal her.";
        let report = parse_script(text, &roster());

        assert_eq!(report.segments.len(), 1);
        assert_eq!(
            report.segments[0].text(),
            Some("Also gut. Dann zeig mal her.")
        );
    }

    #[test]
    fn test_empty_marker_blocks_produce_no_segments() {
        // 连续标记之间没有内容时不产出空片段
        let text = "[Emma]:\n[Leo]:\nGeduld.";
        let report = parse_script(text, &roster());

        assert_eq!(report.segments.len(), 1);
        assert_eq!(report.segments[0].speaker(), Some("Leo"));
    }

    #[test]
    fn test_partition_no_line_in_two_segments() {
        let text = "[Emma]:\nErste Zeile.\nZweite Zeile.\n[Leo]:\nDritte Zeile.";
        let report = parse_script(text, &roster());

        let all: Vec<&str> = report
            .segments
            .iter()
            .filter_map(|s| s.text())
            .collect();
        assert_eq!(all, vec!["Erste Zeile. Zweite Zeile.", "Dritte Zeile."]);
        // 每个非空行恰好出现在一个片段中
        let joined = all.join(" ");
        assert_eq!(joined.matches("Erste Zeile.").count(), 1);
        assert_eq!(joined.matches("Zweite Zeile.").count(), 1);
        assert_eq!(joined.matches("Dritte Zeile.").count(), 1);
    }

    #[test]
    fn test_bullet_outside_environment_is_plain_continuation() {
        let text = "[Emma]:\nSchau mal:\n•kein Soundeffekt";
        let report = parse_script(text, &roster());

        assert_eq!(report.segments.len(), 1);
        assert_eq!(
            report.segments[0].text(),
            Some("Schau mal: •kein Soundeffekt")
        );
    }
}
