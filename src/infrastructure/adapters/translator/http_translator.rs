//! HTTP Translator - 调用 Web 翻译接口
//!
//! 实现 TranslatorPort trait, 通过免费的 gtx 接口做单次翻译
//!
//! 外部 API:
//! GET {base}/translate_a/single?client=gtx&sl={src}&tl={dst}&dt=t&q={text}
//! Response: JSON 数组, 首元素为逐句翻译列表

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::application::ports::{TranslateError, TranslatorPort};

/// HTTP 翻译客户端配置
#[derive(Debug, Clone)]
pub struct HttpTranslatorConfig {
    /// 翻译服务基础 URL
    pub base_url: String,
    /// 源语言代码
    pub source_lang: String,
    /// 目标语言代码
    pub target_lang: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpTranslatorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://translate.googleapis.com".to_string(),
            source_lang: "de".to_string(),
            target_lang: "en".to_string(),
            timeout_secs: 30,
        }
    }
}

/// HTTP 翻译客户端
pub struct HttpTranslator {
    client: Client,
    config: HttpTranslatorConfig,
}

impl HttpTranslator {
    /// 创建新的翻译客户端
    pub fn new(config: HttpTranslatorConfig) -> Result<Self, TranslateError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TranslateError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn translate_url(&self) -> String {
        format!("{}/translate_a/single", self.config.base_url)
    }
}

#[async_trait]
impl TranslatorPort for HttpTranslator {
    async fn translate(&self, text: &str) -> Result<String, TranslateError> {
        tracing::debug!(
            source = %self.config.source_lang,
            target = %self.config.target_lang,
            text_len = text.len(),
            "Sending translation request"
        );

        let response = self
            .client
            .get(&self.translate_url())
            .query(&[
                ("client", "gtx"),
                ("sl", self.config.source_lang.as_str()),
                ("tl", self.config.target_lang.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranslateError::Timeout
                } else {
                    TranslateError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::InvalidResponse(format!("HTTP {}", status)));
        }

        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TranslateError::InvalidResponse(e.to_string()))?;

        // 首元素是 [translated, original, ...] 的列表, 逐句拼接
        let sentences = value
            .get(0)
            .and_then(|v| v.as_array())
            .ok_or_else(|| TranslateError::InvalidResponse("Unexpected shape".to_string()))?;

        let mut translated = String::new();
        for sentence in sentences {
            if let Some(part) = sentence.get(0).and_then(|v| v.as_str()) {
                translated.push_str(part);
            }
        }

        if translated.is_empty() {
            return Err(TranslateError::InvalidResponse(
                "Empty translation".to_string(),
            ));
        }

        tracing::debug!(translated_len = translated.len(), "Translation completed");

        Ok(translated)
    }
}

/// Noop Translator - 翻译关闭时的占位实现
///
/// 原样返回输入文本
pub struct NoopTranslator;

#[async_trait]
impl TranslatorPort for NoopTranslator {
    async fn translate(&self, text: &str) -> Result<String, TranslateError> {
        Ok(text.to_string())
    }
}
