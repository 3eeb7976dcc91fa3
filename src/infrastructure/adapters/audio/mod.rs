//! Audio Adapter - 音频输出实现

mod file_audio_writer;

pub use file_audio_writer::FileAudioWriter;
