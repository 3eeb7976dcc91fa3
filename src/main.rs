//! Hoerspiel - 剧本旁白合成管线
//!
//! 流程:
//! - 读取已抽取的剧本单元文本
//! - 逐单元解析为类型化片段（对白/环境/背景/描述）
//! - 片段 → 合成请求, 有界并发执行, 按原始顺序合并
//! - 拼接写入单个输出文件

use std::sync::Arc;

use hoerspiel::application::ports::{ScriptSourcePort, TranslatorPort, TtsEnginePort};
use hoerspiel::application::{
    AudioWriterPort, EmotionMap, NarrationDriver, NarrationOptions, VoiceCast,
};
use hoerspiel::config::{load_config, print_config};
use hoerspiel::domain::{parse_script, ParseWarning, Roster, Segment};
use hoerspiel::infrastructure::{
    ElevenLabsClient, ElevenLabsConfig, FileAudioWriter, FileScriptSource, HttpTranslator,
    HttpTranslatorConfig, NoopTranslator,
};
// use hoerspiel::infrastructure::{FakeTtsClient, FakeTtsClientConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},hoerspiel={}",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Hoerspiel - 剧本旁白合成管线");
    print_config(&config);

    // 创建 TTS 引擎
    let tts_config = ElevenLabsConfig {
        base_url: config.tts.base_url.clone(),
        api_key: config.tts.api_key.clone(),
        model_id: config.tts.model_id.clone(),
        timeout_secs: config.tts.timeout_secs,
    };
    let tts_engine: Arc<dyn TtsEnginePort> = Arc::new(ElevenLabsClient::new(tts_config)?);

    // // 创建 Fake TTS 引擎（离线试运行用，始终返回固定音频）
    // let tts_engine: Arc<dyn TtsEnginePort> =
    //     Arc::new(FakeTtsClient::new(FakeTtsClientConfig::default()));

    // 创建翻译器（关闭时使用 Noop 直通）
    let translator: Arc<dyn TranslatorPort> = if config.effects.translate {
        let translator_config = HttpTranslatorConfig {
            base_url: config.translator.base_url.clone(),
            source_lang: config.translator.source_lang.clone(),
            target_lang: config.translator.target_lang.clone(),
            timeout_secs: config.translator.timeout_secs,
        };
        Arc::new(HttpTranslator::new(translator_config)?)
    } else {
        Arc::new(NoopTranslator)
    };

    // 读取剧本单元
    let script_source =
        FileScriptSource::new(&config.script.path, config.script.cell_delimiter.clone());
    let cells = script_source.read_cells().await?;

    // 逐单元解析（每个单元全新状态），按文档顺序累积片段
    let roster = Roster::new(config.narration.roster.clone());
    let mut segments: Vec<Segment> = Vec::new();
    let mut warnings: Vec<ParseWarning> = Vec::new();
    for cell in &cells {
        let report = parse_script(cell, &roster);
        segments.extend(report.segments);
        warnings.extend(report.warnings);
    }

    tracing::info!(
        cells = cells.len(),
        segments = segments.len(),
        warnings = warnings.len(),
        "Script parsed"
    );
    for warning in &warnings {
        tracing::debug!(warning = %warning, "Parse warning");
    }

    // 分段结果检查输出
    if config.narration.dump_segments {
        for segment in &segments {
            println!("{}", serde_json::to_string(segment)?);
        }
    }

    if segments.is_empty() {
        tracing::warn!("No segments parsed, nothing to narrate");
        return Ok(());
    }

    // 检查合成服务可用性（失败不中止, 逐片段错误会被上报）
    if !tts_engine.health_check().await {
        tracing::warn!("TTS service health check failed");
    }

    // 创建旁白驱动
    let cast = VoiceCast::new(
        config.narration.voices.clone(),
        config.narration.narrator_voice.clone(),
    );
    let emotions = EmotionMap::new(
        config.narration.emotions.clone(),
        config.narration.default_emotion,
    );
    let options = NarrationOptions {
        max_concurrent: config.narration.max_concurrent,
        effect_duration_secs: config.effects.duration_secs,
        effect_prompt_influence: config.effects.prompt_influence,
        translate_effects: config.effects.translate,
    };
    let driver = NarrationDriver::new(tts_engine, translator, cast, emotions, options);

    // 执行旁白（结果与片段同序）
    let outcomes = driver.narrate(&segments).await;

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    let clips: Vec<Vec<u8>> = outcomes
        .into_iter()
        .flat_map(|outcome| outcome.clips)
        .collect();

    if clips.is_empty() {
        anyhow::bail!("All segments failed, no audio to write");
    }

    // 按顺序拼接写入输出文件
    let writer = FileAudioWriter::new();
    let bytes = writer.write_clips(&clips, &config.output.path).await?;

    tracing::info!(
        segments = segments.len(),
        failed = failed,
        bytes = bytes,
        path = %config.output.path.display(),
        "Narration complete"
    );

    Ok(())
}
