//! Sample Configurations
//!
//! 每种支持语言一份示例配置，供宿主展示可选项

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::speech::{
    OutputFormat, DEFAULT_MODEL_ID, DEFAULT_SIMILARITY_BOOST, DEFAULT_SPEAKER_BOOST,
    DEFAULT_STABILITY, DEFAULT_STYLE, DEFAULT_USE_STREAMING, DEFAULT_VOICE_ID,
    SUPPORTED_LANGUAGES,
};

/// 示例配置优先级
pub const SAMPLE_PRIORITY: u32 = 70;

/// 单条示例配置
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleConfig {
    pub lang: String,
    pub display_name: String,
    pub offline: bool,
    pub priority: u32,
    pub model_id: String,
    pub voice_id: String,
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
    pub speaker_boost: bool,
    pub use_streaming: bool,
    pub output_format: OutputFormat,
}

impl SampleConfig {
    pub fn for_lang(lang: &str) -> Self {
        Self {
            lang: lang.to_string(),
            display_name: format!("ElevenLabs TTS ({})", lang),
            offline: false,
            priority: SAMPLE_PRIORITY,
            model_id: DEFAULT_MODEL_ID.to_string(),
            voice_id: DEFAULT_VOICE_ID.to_string(),
            stability: DEFAULT_STABILITY,
            similarity_boost: DEFAULT_SIMILARITY_BOOST,
            style: DEFAULT_STYLE,
            speaker_boost: DEFAULT_SPEAKER_BOOST,
            use_streaming: DEFAULT_USE_STREAMING,
            output_format: OutputFormat::default(),
        }
    }
}

/// 生成全部语言的示例配置表
pub fn sample_configs() -> BTreeMap<String, Vec<SampleConfig>> {
    SUPPORTED_LANGUAGES
        .iter()
        .map(|lang| (lang.to_string(), vec![SampleConfig::for_lang(lang)]))
        .collect()
}
