//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_writer;
mod script_source;
mod translator;
mod tts_engine;

pub use audio_writer::{AudioWriteError, AudioWriterPort};
pub use script_source::{ScriptSourceError, ScriptSourcePort};
pub use translator::{TranslateError, TranslatorPort};
pub use tts_engine::{
    SoundEffectRequest, SpeechClip, SpeechRequest, TtsEnginePort, TtsError, VoiceSettings,
};
