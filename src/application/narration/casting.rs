//! Voice Cast 与情绪映射
//!
//! 将说话者解析为音色 ID, 将情绪标签解析为合成参数。
//! 情绪参数表由调用方配置统一提供并携带显式默认项,
//! 未映射的情绪与缺省情绪都回落到默认项

use std::collections::HashMap;

use crate::application::ports::VoiceSettings;

/// 角色音色分配表
///
/// 说话者查找不区分大小写; 旁白音色用于环境与描述片段
#[derive(Debug, Clone)]
pub struct VoiceCast {
    voices: HashMap<String, String>,
    narrator_voice: String,
}

impl VoiceCast {
    pub fn new<I, S, V>(voices: I, narrator_voice: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: Into<String>,
    {
        let voices = voices
            .into_iter()
            .map(|(speaker, voice)| (speaker.into().trim().to_lowercase(), voice.into()))
            .collect();
        Self {
            voices,
            narrator_voice: narrator_voice.into(),
        }
    }

    /// 解析说话者对应的音色 ID
    pub fn resolve(&self, speaker: &str) -> Option<&str> {
        self.voices
            .get(&speaker.trim().to_lowercase())
            .map(|v| v.as_str())
    }

    /// 旁白音色 ID
    pub fn narrator(&self) -> &str {
        &self.narrator_voice
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }
}

/// 情绪到合成参数的映射表
#[derive(Debug, Clone)]
pub struct EmotionMap {
    entries: HashMap<String, VoiceSettings>,
    default: VoiceSettings,
}

impl EmotionMap {
    pub fn new<I, S>(entries: I, default: VoiceSettings) -> Self
    where
        I: IntoIterator<Item = (S, VoiceSettings)>,
        S: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(emotion, settings)| (emotion.into().trim().to_lowercase(), settings))
            .collect();
        Self { entries, default }
    }

    /// 解析情绪标签对应的合成参数
    ///
    /// 缺省情绪与未登记的情绪一律返回显式默认项
    pub fn resolve(&self, emotion: Option<&str>) -> VoiceSettings {
        match emotion {
            Some(emotion) => self
                .entries
                .get(&emotion.trim().to_lowercase())
                .copied()
                .unwrap_or(self.default),
            None => self.default,
        }
    }

    pub fn default_settings(&self) -> VoiceSettings {
        self.default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(stability: f32) -> VoiceSettings {
        VoiceSettings {
            stability,
            similarity_boost: 0.75,
        }
    }

    #[test]
    fn test_voice_cast_case_insensitive() {
        let cast = VoiceCast::new([("Emma", "voice-a"), ("Leo", "voice-b")], "voice-n");
        assert_eq!(cast.resolve("emma"), Some("voice-a"));
        assert_eq!(cast.resolve("LEO"), Some("voice-b"));
        assert_eq!(cast.resolve("Anna"), None);
        assert_eq!(cast.narrator(), "voice-n");
    }

    #[test]
    fn test_emotion_map_falls_back_to_default() {
        let map = EmotionMap::new([("besorgt", settings(0.3))], settings(0.5));
        assert_eq!(map.resolve(Some("besorgt")).stability, 0.3);
        assert_eq!(map.resolve(Some("BESORGT")).stability, 0.3);
        // 未登记的情绪与缺省情绪回落到默认项
        assert_eq!(map.resolve(Some("wütend")).stability, 0.5);
        assert_eq!(map.resolve(None).stability, 0.5);
    }
}
