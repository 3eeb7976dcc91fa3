//! Domain Layer - 领域层
//!
//! 包含一个限界上下文:
//! - Screenplay Context: 剧本行分类与分段

pub mod screenplay;

pub use screenplay::{
    classify_line, parse_script, LineClass, ParseReport, ParseWarning, Roster, Segment,
    SegmentBody, SegmentKind,
};
