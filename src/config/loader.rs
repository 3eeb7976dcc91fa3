//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `HOERSPIEL_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `HOERSPIEL_SCRIPT__PATH=data/skript.txt`
/// - `HOERSPIEL_TTS__API_KEY=xi-...`
/// - `HOERSPIEL_NARRATION__MAX_CONCURRENT=4`
/// - `HOERSPIEL_OUTPUT__PATH=out/hoerspiel.mp3`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    // 映射类配置（voices/emotions）的默认值由类型层的 serde default 提供
    builder = builder
        .set_default("script.path", "data/skript.txt")?
        .set_default("tts.base_url", "https://api.elevenlabs.io")?
        .set_default("tts.api_key", "")?
        .set_default("tts.model_id", "eleven_multilingual_v2")?
        .set_default("tts.timeout_secs", 120)?
        .set_default("effects.duration_secs", 10.0)?
        .set_default("effects.prompt_influence", 0.3)?
        .set_default("effects.translate", true)?
        .set_default("translator.base_url", "https://translate.googleapis.com")?
        .set_default("translator.source_lang", "de")?
        .set_default("translator.target_lang", "en")?
        .set_default("translator.timeout_secs", 30)?
        .set_default("narration.max_concurrent", 2)?
        .set_default("narration.dump_segments", false)?
        .set_default("output.path", "data/output/hoerspiel.mp3")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        // 搜索默认配置文件
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 前缀: HOERSPIEL_
    // 层级分隔符: __ (双下划线)
    // 例如: HOERSPIEL_TTS__API_KEY=xi-...
    builder = builder.add_source(
        Environment::with_prefix("HOERSPIEL")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 构建配置
    let config = builder.build()?;

    // 5. 反序列化为 AppConfig
    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    // 6. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    // 验证剧本路径
    if config.script.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Script path cannot be empty".to_string(),
        ));
    }

    // 验证 TTS URL
    if config.tts.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS base URL cannot be empty".to_string(),
        ));
    }

    // 验证名册
    if config.narration.roster.iter().all(|n| n.trim().is_empty()) {
        return Err(ConfigError::ValidationError(
            "Roster cannot be empty".to_string(),
        ));
    }

    // 验证旁白音色
    if config.narration.narrator_voice.is_empty() {
        return Err(ConfigError::ValidationError(
            "Narrator voice cannot be empty".to_string(),
        ));
    }

    // 验证并发数
    if config.narration.max_concurrent == 0 {
        return Err(ConfigError::ValidationError(
            "Max concurrent cannot be 0".to_string(),
        ));
    }

    // 验证音效参数
    if !(0.0..=1.0).contains(&config.effects.prompt_influence) {
        return Err(ConfigError::ValidationError(
            "Prompt influence must be between 0.0 and 1.0".to_string(),
        ));
    }
    if config.effects.duration_secs <= 0.0 {
        return Err(ConfigError::ValidationError(
            "Effect duration must be positive".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Script: {:?}", config.script.path);
    if let Some(delimiter) = &config.script.cell_delimiter {
        tracing::info!("Cell Delimiter: {:?}", delimiter);
    }
    tracing::info!("TTS URL: {}", config.tts.base_url);
    tracing::info!("TTS Model: {}", config.tts.model_id);
    tracing::info!("TTS Timeout: {}s", config.tts.timeout_secs);
    if config.tts.api_key.is_empty() {
        tracing::warn!("TTS API key is empty");
    }
    tracing::info!("Roster: {:?}", config.narration.roster);
    tracing::info!("Voices: {} mapped", config.narration.voices.len());
    tracing::info!("Emotions: {} mapped", config.narration.emotions.len());
    tracing::info!("Max Concurrent: {}", config.narration.max_concurrent);
    tracing::info!("Effects Translate: {}", config.effects.translate);
    if config.effects.translate {
        tracing::info!(
            "Translation: {} -> {}",
            config.translator.source_lang,
            config.translator.target_lang
        );
    }
    tracing::info!("Output: {:?}", config.output.path);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.tts.base_url, "https://api.elevenlabs.io");
        assert_eq!(config.narration.max_concurrent, 2);
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_empty_tts_url() {
        let mut config = AppConfig::default();
        config.tts.base_url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_concurrency() {
        let mut config = AppConfig::default();
        config.narration.max_concurrent = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_roster() {
        let mut config = AppConfig::default();
        config.narration.roster = vec!["  ".to_string()];
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_bad_prompt_influence() {
        let mut config = AppConfig::default();
        config.effects.prompt_influence = 1.5;
        assert!(validate_config(&config).is_err());
    }
}
