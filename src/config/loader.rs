//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（elevenlabs.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, PluginConfig};

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
const CONFIG_FILE_NAMES: &[&str] = &["elevenlabs", "elevenlabs.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `ELEVENLABS_TTS_`，层级分隔符 `__`）
/// 2. 配置文件（elevenlabs.toml 或 elevenlabs.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `ELEVENLABS_TTS_PLUGIN__VOICE_ID=JBFqnCBsd6RMkjVDRZzb`
/// - `ELEVENLABS_TTS_PLUGIN__USE_STREAMING=true`
/// - `ELEVENLABS_TTS_HTTP__TIMEOUT_SECS=30`
///
/// API Key 额外支持 `ELEVENLABS_API_KEY`，在合成时解析，见 `application::resolver`。
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（插件选项由 resolver 提供默认值，这里不设置）
    builder = builder
        .set_default("http.base_url", "https://api.elevenlabs.io")?
        .set_default("http.timeout_secs", 120)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: ELEVENLABS_TTS_PLUGIN__MODEL_ID=eleven_turbo_v2_5
    builder = builder.add_source(
        Environment::with_prefix("ELEVENLABS_TTS")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
pub(crate) fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.http.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "HTTP base URL cannot be empty".to_string(),
        ));
    }

    if config.http.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "HTTP timeout cannot be 0".to_string(),
        ));
    }

    validate_plugin_config(&config.plugin)
}

/// 验证插件选项（仅检查已显式设置的字段）
pub fn validate_plugin_config(plugin: &PluginConfig) -> Result<(), ConfigError> {
    let ranged = [
        ("stability", plugin.stability),
        ("similarity_boost", plugin.similarity_boost),
        ("style", plugin.style),
    ];
    for (name, value) in ranged {
        if let Some(v) = value {
            if !(0.0..=1.0).contains(&v) {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be between 0.0 and 1.0, got {}",
                    name, v
                )));
            }
        }
    }
    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    let plugin = &config.plugin;
    tracing::info!("=== ElevenLabs TTS Configuration ===");
    tracing::info!("API Base URL: {}", config.http.base_url);
    tracing::info!("HTTP Timeout: {}s", config.http.timeout_secs);
    tracing::info!(
        "API Key: {}",
        plugin
            .api_key
            .as_deref()
            .map(mask_secret)
            .unwrap_or_else(|| "<from environment>".to_string())
    );
    tracing::info!("Voice: {:?}", plugin.voice_id);
    tracing::info!("Model: {:?}", plugin.model_id);
    tracing::info!("Output Format: {:?}", plugin.output_format);
    tracing::info!("Streaming: {:?}", plugin.use_streaming);
    tracing::info!("Lang: {:?}", plugin.lang);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("====================================");
}

/// 只保留末尾 4 个字符
fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_validation_passes_for_default_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_timeout() {
        let mut config = AppConfig::default();
        config.http.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_base_url() {
        let mut config = AppConfig::default();
        config.http.base_url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_out_of_range_style() {
        let mut config = AppConfig::default();
        config.plugin.style = Some(1.2);
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("style"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[plugin]
api_key = "sk-file"
voice_id = "voice-from-file"
similarity_boost = 0.9
output_format = "mp3_44100_64"

[http]
timeout_secs = 30
"#
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.plugin.api_key.as_deref(), Some("sk-file"));
        assert_eq!(config.plugin.voice_id.as_deref(), Some("voice-from-file"));
        assert_eq!(config.plugin.similarity_boost, Some(0.9));
        assert_eq!(
            config.plugin.output_format,
            Some(crate::domain::speech::OutputFormat::Mp3_44100_64)
        );
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.http.base_url, "https://api.elevenlabs.io");
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let result = load_config_from_path(Some(Path::new("/nonexistent/elevenlabs.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("sk-1234567890"), "****7890");
        assert_eq!(mask_secret("abc"), "****");
    }
}
