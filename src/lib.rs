//! Hoerspiel - 剧本旁白合成管线
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Screenplay Context: 行分类器 + 块累积状态机（剧本 → 类型化片段）
//!
//! 应用层 (application/):
//! - Ports: 端口定义（TtsEngine, Translator, ScriptSource, AudioWriter）
//! - Narration: 旁白驱动（音色/情绪解析, 有序并发扇出）
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: ElevenLabs 客户端, HTTP 翻译, 文件剧本来源, 文件音频输出

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
