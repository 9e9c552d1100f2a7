//! Configuration Types
//!
//! 定义所有配置结构体

use serde::{Deserialize, Serialize};

use crate::domain::speech::OutputFormat;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 插件选项
    #[serde(default)]
    pub plugin: PluginConfig,

    /// HTTP 客户端配置
    #[serde(default)]
    pub http: HttpConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 插件选项
///
/// 所有字段可选，未设置时由 resolver 填充默认值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginConfig {
    /// API Key，未设置时回退到环境变量 `ELEVENLABS_API_KEY`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stability: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_boost: Option<f32>,

    /// 0.0 - 1.0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker_boost: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_streaming: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<OutputFormat>,

    /// locale，如 "en-US"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl PluginConfig {
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_voice_id(mut self, voice_id: impl Into<String>) -> Self {
        self.voice_id = Some(voice_id.into());
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    pub fn with_streaming(mut self, enabled: bool) -> Self {
        self.use_streaming = Some(enabled);
        self
    }
}

/// HTTP 客户端配置
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// ElevenLabs API 基础 URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_timeout() -> u64 {
    120
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.plugin, PluginConfig::default());
        assert_eq!(config.http.base_url, "https://api.elevenlabs.io");
        assert_eq!(config.http.timeout_secs, 120);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_plugin_config_from_toml() {
        let config: PluginConfig = toml::from_str(
            r#"
            voice_id = "abc"
            stability = 0.3
            use_streaming = true
            output_format = "mp3_22050_32"
            "#,
        )
        .unwrap();
        assert_eq!(config.voice_id.as_deref(), Some("abc"));
        assert_eq!(config.stability, Some(0.3));
        assert_eq!(config.use_streaming, Some(true));
        assert_eq!(config.output_format, Some(OutputFormat::Mp3_22050_32));
        assert!(config.api_key.is_none());
        assert!(config.style.is_none());
    }

    #[test]
    fn test_unknown_output_format_rejected() {
        let result: Result<PluginConfig, _> = toml::from_str(r#"output_format = "wav""#);
        assert!(result.is_err());
    }
}
