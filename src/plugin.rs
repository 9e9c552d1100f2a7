//! Plugin Entry - 宿主入口
//!
//! 组装 HTTP 客户端与插件实例，并在返回前完成激活校验

use std::sync::Arc;

use crate::application::{ConfigResolver, ElevenLabsTts, PluginError};
use crate::config::{AppConfig, HttpConfig, PluginConfig};
use crate::infrastructure::adapters::{ElevenLabsHttpClient, ElevenLabsHttpClientConfig};

/// 按应用配置创建并校验插件
pub async fn connect(config: &AppConfig) -> Result<ElevenLabsTts, PluginError> {
    connect_with(config.plugin.clone(), &config.http).await
}

/// 创建插件实例并执行全部校验，返回可直接使用的实例
pub async fn connect_with(
    plugin: PluginConfig,
    http: &HttpConfig,
) -> Result<ElevenLabsTts, PluginError> {
    let tts = build(plugin, http)?;
    tts.validate().await?;
    Ok(tts)
}

/// 创建插件实例但不访问远端
pub fn build(plugin: PluginConfig, http: &HttpConfig) -> Result<ElevenLabsTts, PluginError> {
    let resolver = ConfigResolver::new();
    let api_key = resolver.api_key(&plugin)?;

    let client =
        ElevenLabsHttpClient::new(ElevenLabsHttpClientConfig::from_http_config(api_key, http))
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to build ElevenLabs client");
                PluginError::DependencyError(e.to_string())
            })?;
    tracing::debug!("Client initialized");

    ElevenLabsTts::with_resolver(plugin, Arc::new(client), resolver)
}
