//! 应用层错误定义
//!
//! 插件对宿主暴露的统一错误类型

use thiserror::Error;

use super::ports::SpeechApiError;

/// 插件错误
///
/// 所有错误在检测点记录日志后原样返回给宿主，内部不做重试
#[derive(Debug, Error)]
pub enum PluginError {
    /// 配置错误（缺少凭据、非法参数）
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// 依赖不可用
    #[error("Dependency error: {0}")]
    DependencyError(String),

    /// 无法连接远端服务
    #[error("Connection error: {0}")]
    ConnectionError(#[source] SpeechApiError),

    /// 远端未返回任何音色
    #[error("No voices available from API - check API key permissions")]
    NoVoicesAvailable,

    /// 配置的音色不在账号可用列表中
    #[error("Voice ID '{voice_id}' not found in available voices: {available:?}")]
    VoiceNotFound {
        voice_id: String,
        available: Vec<String>,
    },

    /// 语言不受支持
    #[error("Language {lang} not supported")]
    UnsupportedLanguage { lang: String },

    /// 远端合成失败
    #[error("Synthesis error: {0}")]
    SynthesisError(#[source] SpeechApiError),

    /// 本地写文件失败
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PluginError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError(message.into())
    }
}

impl From<crate::config::ConfigError> for PluginError {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::ConfigurationError(err.to_string())
    }
}
