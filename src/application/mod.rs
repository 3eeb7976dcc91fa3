//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TtsEngine、Translator、ScriptSource、AudioWriter）
//! - narration: 旁白驱动（片段 → 合成请求, 有序扇出/合并）
//! - error: 应用层错误定义

pub mod error;
pub mod narration;
pub mod ports;

// Re-exports
pub use error::ApplicationError;

pub use narration::{EmotionMap, NarrationDriver, NarrationOptions, SegmentOutcome, VoiceCast};

pub use ports::{
    // Audio writer
    AudioWriteError,
    AudioWriterPort,
    // Script source
    ScriptSourceError,
    ScriptSourcePort,
    // Translator
    TranslateError,
    TranslatorPort,
    // TTS engine
    SoundEffectRequest,
    SpeechClip,
    SpeechRequest,
    TtsEnginePort,
    TtsError,
    VoiceSettings,
};
