//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::application::ports::VoiceSettings;

/// 应用主配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// 剧本来源配置
    #[serde(default)]
    pub script: ScriptConfig,

    /// 语音合成服务配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 背景音效配置
    #[serde(default)]
    pub effects: EffectsConfig,

    /// 翻译服务配置
    #[serde(default)]
    pub translator: TranslatorConfig,

    /// 旁白配置（名册、音色分配、情绪参数表）
    #[serde(default)]
    pub narration: NarrationConfig,

    /// 输出配置
    #[serde(default)]
    pub output: OutputConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            script: ScriptConfig::default(),
            tts: TtsConfig::default(),
            effects: EffectsConfig::default(),
            translator: TranslatorConfig::default(),
            narration: NarrationConfig::default(),
            output: OutputConfig::default(),
            log: LogConfig::default(),
        }
    }
}

/// 剧本来源配置
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptConfig {
    /// 剧本文本文件路径（已由外部抽取器从表格式文档导出）
    #[serde(default = "default_script_path")]
    pub path: PathBuf,

    /// 单元分隔行; 未设置则整个文件作为一个单元
    #[serde(default)]
    pub cell_delimiter: Option<String>,
}

fn default_script_path() -> PathBuf {
    PathBuf::from("data/skript.txt")
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            path: default_script_path(),
            cell_delimiter: None,
        }
    }
}

/// 语音合成服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    /// 服务基础 URL
    #[serde(default = "default_tts_url")]
    pub base_url: String,

    /// API Key（建议通过环境变量 HOERSPIEL_TTS__API_KEY 注入）
    #[serde(default)]
    pub api_key: String,

    /// 合成模型 ID
    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_tts_timeout")]
    pub timeout_secs: u64,
}

fn default_tts_url() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_model_id() -> String {
    "eleven_multilingual_v2".to_string()
}

fn default_tts_timeout() -> u64 {
    120
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            base_url: default_tts_url(),
            api_key: String::new(),
            model_id: default_model_id(),
            timeout_secs: default_tts_timeout(),
        }
    }
}

/// 背景音效配置
#[derive(Debug, Clone, Deserialize)]
pub struct EffectsConfig {
    /// 音效时长（秒）
    #[serde(default = "default_effect_duration")]
    pub duration_secs: f32,

    /// 提示词影响程度 0.0-1.0
    #[serde(default = "default_prompt_influence")]
    pub prompt_influence: f32,

    /// 背景提示是否先翻译（音效后端只接受英文时开启）
    #[serde(default = "default_effects_translate")]
    pub translate: bool,
}

fn default_effect_duration() -> f32 {
    10.0
}

fn default_prompt_influence() -> f32 {
    0.3
}

fn default_effects_translate() -> bool {
    true
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            duration_secs: default_effect_duration(),
            prompt_influence: default_prompt_influence(),
            translate: default_effects_translate(),
        }
    }
}

/// 翻译服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct TranslatorConfig {
    /// 翻译服务基础 URL
    #[serde(default = "default_translator_url")]
    pub base_url: String,

    /// 源语言代码
    #[serde(default = "default_source_lang")]
    pub source_lang: String,

    /// 目标语言代码
    #[serde(default = "default_target_lang")]
    pub target_lang: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_translator_timeout")]
    pub timeout_secs: u64,
}

fn default_translator_url() -> String {
    "https://translate.googleapis.com".to_string()
}

fn default_source_lang() -> String {
    "de".to_string()
}

fn default_target_lang() -> String {
    "en".to_string()
}

fn default_translator_timeout() -> u64 {
    30
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            base_url: default_translator_url(),
            source_lang: default_source_lang(),
            target_lang: default_target_lang(),
            timeout_secs: default_translator_timeout(),
        }
    }
}

/// 旁白配置
#[derive(Debug, Clone, Deserialize)]
pub struct NarrationConfig {
    /// 可识别的角色名册（大小写不敏感）
    #[serde(default = "default_roster")]
    pub roster: Vec<String>,

    /// 说话者 → 音色 ID
    #[serde(default = "default_voices")]
    pub voices: HashMap<String, String>,

    /// 旁白音色 ID（环境/描述片段）
    #[serde(default = "default_narrator_voice")]
    pub narrator_voice: String,

    /// 情绪 → 合成参数
    /// 各剧本变体的参数值不一致, 数值只在配置中维护
    #[serde(default = "default_emotions")]
    pub emotions: HashMap<String, VoiceSettings>,

    /// 显式默认合成参数（缺省或未登记的情绪）
    #[serde(default = "default_emotion_settings")]
    pub default_emotion: VoiceSettings,

    /// 最大并发合成数
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,

    /// 是否把分段结果按 JSON 行打印到标准输出
    #[serde(default)]
    pub dump_segments: bool,
}

fn default_roster() -> Vec<String> {
    vec!["Emma".to_string(), "Leo".to_string()]
}

fn default_voices() -> HashMap<String, String> {
    HashMap::from([
        ("Emma".to_string(), "21m00Tcm4TlvDq8ikWAM".to_string()),
        ("Leo".to_string(), "TxGEqnHWrfWFTfGW9XjX".to_string()),
    ])
}

fn default_narrator_voice() -> String {
    "pNInz6obpgDQGcFmaJgB".to_string()
}

fn default_emotions() -> HashMap<String, VoiceSettings> {
    HashMap::from([
        (
            "besorgt".to_string(),
            VoiceSettings {
                stability: 0.35,
                similarity_boost: 0.8,
            },
        ),
        (
            "aufgeregt".to_string(),
            VoiceSettings {
                stability: 0.3,
                similarity_boost: 0.85,
            },
        ),
        (
            "ängstlich".to_string(),
            VoiceSettings {
                stability: 0.4,
                similarity_boost: 0.8,
            },
        ),
    ])
}

fn default_emotion_settings() -> VoiceSettings {
    VoiceSettings {
        stability: 0.5,
        similarity_boost: 0.75,
    }
}

fn default_max_concurrent() -> usize {
    2
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            roster: default_roster(),
            voices: default_voices(),
            narrator_voice: default_narrator_voice(),
            emotions: default_emotions(),
            default_emotion: default_emotion_settings(),
            max_concurrent: default_max_concurrent(),
            dump_segments: false,
        }
    }
}

/// 输出配置
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// 拼接后的音频输出文件路径
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("data/output/hoerspiel.mp3")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
