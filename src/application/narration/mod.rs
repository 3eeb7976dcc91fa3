//! Narration - 旁白用例
//!
//! 包含:
//! - casting: 角色音色分配与情绪参数映射
//! - driver: 有界并发的旁白驱动

mod casting;
mod driver;

pub use casting::{EmotionMap, VoiceCast};
pub use driver::{NarrationDriver, NarrationOptions, SegmentOutcome};
