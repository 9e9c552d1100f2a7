//! Configuration Resolver - 有效参数解析
//!
//! 优先级：显式配置 > 环境变量（仅 API Key）> 内置默认值。
//! 纯函数，每次调用都基于传入的配置快照重新计算。

use crate::config::PluginConfig;
use crate::domain::speech::{
    OutputFormat, VoiceSettings, DEFAULT_LANG, DEFAULT_MODEL_ID, DEFAULT_SIMILARITY_BOOST,
    DEFAULT_SPEAKER_BOOST, DEFAULT_STABILITY, DEFAULT_STYLE, DEFAULT_USE_STREAMING,
    DEFAULT_VOICE_ID,
};

use super::error::PluginError;

/// API Key 环境变量
pub const API_KEY_ENV: &str = "ELEVENLABS_API_KEY";

/// 环境变量查询函数
pub type EnvLookup = fn(&str) -> Option<String>;

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// 配置解析器
#[derive(Clone, Copy)]
pub struct ConfigResolver {
    env: EnvLookup,
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConfigResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigResolver").finish_non_exhaustive()
    }
}

impl ConfigResolver {
    /// 使用进程环境变量
    pub fn new() -> Self {
        Self { env: process_env }
    }

    /// 使用自定义环境查询（测试用）
    pub fn with_env(env: EnvLookup) -> Self {
        Self { env }
    }

    pub fn api_key(&self, config: &PluginConfig) -> Result<String, PluginError> {
        non_empty(config.api_key.as_deref())
            .map(str::to_string)
            .or_else(|| (self.env)(API_KEY_ENV).filter(|v| !v.is_empty()))
            .ok_or_else(|| {
                tracing::error!(env = API_KEY_ENV, "ElevenLabs API key not configured");
                PluginError::configuration(
                    "ElevenLabs API key not found in config or environment",
                )
            })
    }

    pub fn voice_id(&self, config: &PluginConfig) -> String {
        match non_empty(config.voice_id.as_deref()) {
            Some(voice_id) => {
                tracing::debug!(voice_id = %voice_id, "Using configured voice_id");
                voice_id.to_string()
            }
            None => {
                tracing::debug!(voice_id = DEFAULT_VOICE_ID, "No voice_id configured, using default");
                DEFAULT_VOICE_ID.to_string()
            }
        }
    }

    pub fn model_id(&self, config: &PluginConfig) -> String {
        non_empty(config.model_id.as_deref())
            .unwrap_or(DEFAULT_MODEL_ID)
            .to_string()
    }

    pub fn use_streaming(&self, config: &PluginConfig) -> bool {
        config.use_streaming.unwrap_or(DEFAULT_USE_STREAMING)
    }

    pub fn output_format(&self, config: &PluginConfig) -> OutputFormat {
        config.output_format.unwrap_or_default()
    }

    pub fn voice_settings(&self, config: &PluginConfig) -> VoiceSettings {
        VoiceSettings {
            stability: config.stability.unwrap_or(DEFAULT_STABILITY),
            similarity_boost: config.similarity_boost.unwrap_or(DEFAULT_SIMILARITY_BOOST),
            style: config.style.unwrap_or(DEFAULT_STYLE),
            use_speaker_boost: config.speaker_boost.unwrap_or(DEFAULT_SPEAKER_BOOST),
        }
    }

    pub fn lang(&self, config: &PluginConfig) -> String {
        non_empty(config.lang.as_deref())
            .unwrap_or(DEFAULT_LANG)
            .to_string()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
