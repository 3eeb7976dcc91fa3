//! Narration Driver - 旁白驱动
//!
//! 将分段序列规划为合成请求并执行:
//! - 对白片段: 名册说话者 → 音色, 情绪 → 合成参数, 逐段语音合成
//! - 背景片段: 每条提示独立生成一次音效, 按需先翻译
//! - 环境/描述片段: 走旁白音色的同一合成路径
//!
//! 片段之间不存在合成依赖, 使用有界并发扇出;
//! buffered 按输入顺序产出结果, 保证输出顺序等于片段原始顺序。
//! 单个片段的失败被捕获上报, 不中止整批

use futures_util::{stream, StreamExt};
use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    SoundEffectRequest, SpeechRequest, TranslatorPort, TtsEnginePort,
};
use crate::domain::{Segment, SegmentKind};

use super::{EmotionMap, VoiceCast};

/// 旁白选项
#[derive(Debug, Clone)]
pub struct NarrationOptions {
    /// 最大并发合成数（受外部服务并发限制约束, 由调用方配置）
    pub max_concurrent: usize,
    /// 背景音效时长（秒）
    pub effect_duration_secs: f32,
    /// 音效提示词影响程度 0.0-1.0
    pub effect_prompt_influence: f32,
    /// 背景提示是否先经过翻译
    pub translate_effects: bool,
}

impl Default for NarrationOptions {
    fn default() -> Self {
        Self {
            max_concurrent: 2,
            effect_duration_secs: 10.0,
            effect_prompt_influence: 0.3,
            translate_effects: true,
        }
    }
}

/// 单个片段的旁白结果
///
/// 背景片段可能产出多条音频（每条提示一条）; 失败片段 clips 为空
#[derive(Debug)]
pub struct SegmentOutcome {
    /// 片段在输入序列中的索引
    pub segment_index: usize,
    /// 按请求顺序排列的音频数据
    pub clips: Vec<Vec<u8>>,
    /// 片段级失败, 不影响其他片段
    pub error: Option<ApplicationError>,
}

impl SegmentOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// 旁白驱动
pub struct NarrationDriver {
    tts: Arc<dyn TtsEnginePort>,
    translator: Arc<dyn TranslatorPort>,
    cast: VoiceCast,
    emotions: EmotionMap,
    options: NarrationOptions,
}

impl NarrationDriver {
    pub fn new(
        tts: Arc<dyn TtsEnginePort>,
        translator: Arc<dyn TranslatorPort>,
        cast: VoiceCast,
        emotions: EmotionMap,
        options: NarrationOptions,
    ) -> Self {
        Self {
            tts,
            translator,
            cast,
            emotions,
            options,
        }
    }

    /// 旁白整个分段序列
    ///
    /// 返回结果与输入同序, 与并发调度无关
    pub async fn narrate(&self, segments: &[Segment]) -> Vec<SegmentOutcome> {
        let concurrency = self.options.max_concurrent.max(1);

        tracing::info!(
            segments = segments.len(),
            max_concurrent = concurrency,
            "Narration started"
        );

        let outcomes: Vec<SegmentOutcome> = stream::iter(segments.iter().enumerate())
            .map(|(index, segment)| self.narrate_segment(index, segment))
            .buffered(concurrency)
            .collect()
            .await;

        let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
        tracing::info!(
            segments = outcomes.len(),
            failed = failed,
            "Narration finished"
        );

        outcomes
    }

    /// 旁白单个片段, 失败被捕获为结果的一部分
    async fn narrate_segment(&self, index: usize, segment: &Segment) -> SegmentOutcome {
        let result = match segment.kind() {
            SegmentKind::Dialogue => self.dialogue_clip(segment).await.map(|clip| vec![clip]),
            SegmentKind::Background => self.background_clips(segment).await,
            SegmentKind::Environment | SegmentKind::Description => {
                self.narrator_clip(segment).await.map(|clip| vec![clip])
            }
        };

        match result {
            Ok(clips) => {
                tracing::debug!(
                    segment_index = index,
                    kind = %segment.kind(),
                    clips = clips.len(),
                    "Segment narrated"
                );
                SegmentOutcome {
                    segment_index: index,
                    clips,
                    error: None,
                }
            }
            Err(e) => {
                tracing::error!(
                    segment_index = index,
                    kind = %segment.kind(),
                    error = %e,
                    "Segment narration failed"
                );
                SegmentOutcome {
                    segment_index: index,
                    clips: Vec::new(),
                    error: Some(e),
                }
            }
        }
    }

    /// 对白片段: 解析音色与情绪参数后合成
    async fn dialogue_clip(&self, segment: &Segment) -> Result<Vec<u8>, ApplicationError> {
        let speaker = segment
            .speaker()
            .ok_or_else(|| ApplicationError::validation("Dialogue segment without speaker"))?;
        let text = segment
            .text()
            .ok_or_else(|| ApplicationError::validation("Dialogue segment without text"))?;

        let voice_id = self
            .cast
            .resolve(speaker)
            .ok_or_else(|| ApplicationError::MissingVoiceMapping(speaker.to_string()))?;
        let settings = self.emotions.resolve(segment.emotion());

        let clip = self
            .tts
            .synthesize(SpeechRequest {
                text: text.to_string(),
                voice_id: voice_id.to_string(),
                settings,
            })
            .await?;

        Ok(clip.audio_data)
    }

    /// 背景片段: 每条提示一次独立的音效生成请求
    async fn background_clips(&self, segment: &Segment) -> Result<Vec<Vec<u8>>, ApplicationError> {
        let cues = segment
            .cues()
            .ok_or_else(|| ApplicationError::validation("Background segment without cues"))?;

        let mut clips = Vec::with_capacity(cues.len());
        for cue in cues {
            let text = if self.options.translate_effects {
                self.translator.translate(cue).await?
            } else {
                cue.clone()
            };

            let clip = self
                .tts
                .sound_effect(SoundEffectRequest {
                    text,
                    duration_secs: self.options.effect_duration_secs,
                    prompt_influence: self.options.effect_prompt_influence,
                })
                .await?;
            clips.push(clip.audio_data);
        }

        Ok(clips)
    }

    /// 环境/描述片段: 旁白音色 + 默认合成参数
    async fn narrator_clip(&self, segment: &Segment) -> Result<Vec<u8>, ApplicationError> {
        let text = segment
            .text()
            .ok_or_else(|| ApplicationError::validation("Narration segment without text"))?;

        let clip = self
            .tts
            .synthesize(SpeechRequest {
                text: text.to_string(),
                voice_id: self.cast.narrator().to_string(),
                settings: self.emotions.resolve(None),
            })
            .await?;

        Ok(clip.audio_data)
    }
}
