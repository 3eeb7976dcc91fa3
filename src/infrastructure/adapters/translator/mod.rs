//! Translator Adapter - 翻译客户端实现

mod http_translator;

pub use http_translator::{HttpTranslator, HttpTranslatorConfig, NoopTranslator};
