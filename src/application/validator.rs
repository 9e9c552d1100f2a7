//! Validator - 激活前校验
//!
//! 由宿主在插件投入使用前调用。每项检查相互独立、无状态，
//! 调用顺序由宿主决定；`validate` 按固定顺序执行全部检查。

use crate::domain::speech::{is_supported, SUPPORTED_LANGUAGES};

use super::error::PluginError;
use super::synthesizer::ElevenLabsTts;

pub struct TtsValidator<'a> {
    tts: &'a ElevenLabsTts,
}

impl<'a> TtsValidator<'a> {
    pub fn new(tts: &'a ElevenLabsTts) -> Self {
        Self { tts }
    }

    /// 依次执行 dependencies -> connection -> voice -> lang，遇到第一个失败即返回
    pub async fn validate(&self) -> Result<(), PluginError> {
        self.validate_dependencies()?;
        self.validate_connection().await?;
        self.validate_voice().await?;
        self.validate_lang().await?;
        tracing::info!("ElevenLabs TTS validation passed");
        Ok(())
    }

    pub fn validate_dependencies(&self) -> Result<(), PluginError> {
        self.tts.api().check_backend().map_err(|e| {
            tracing::error!(error = %e, "ElevenLabs client backend unavailable");
            PluginError::DependencyError(e.to_string())
        })
    }

    /// 通过获取模型列表测试连通性
    pub async fn validate_connection(&self) -> Result<(), PluginError> {
        let models = self.tts.api().list_models().await.map_err(|e| {
            tracing::error!(error = %e, "Error connecting to ElevenLabs API");
            PluginError::ConnectionError(e)
        })?;
        tracing::debug!(models = models.len(), "ElevenLabs API reachable");
        Ok(())
    }

    /// 校验配置的音色存在于账号的音色列表中
    pub async fn validate_voice(&self) -> Result<(), PluginError> {
        let config = self.tts.config().await;
        let voice_id = self.tts.resolver().voice_id(&config);

        tracing::debug!("Fetching voices from ElevenLabs API...");
        let voices = self.tts.api().list_voices().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch voices");
            PluginError::ConnectionError(e)
        })?;

        let available: Vec<String> = voices.into_iter().map(|v| v.voice_id).collect();
        tracing::debug!(available = ?available, configured = %voice_id, "Checking voice_id");

        if available.is_empty() {
            tracing::error!("No voices returned by ElevenLabs API");
            return Err(PluginError::NoVoicesAvailable);
        }

        if !available.contains(&voice_id) {
            tracing::error!(voice_id = %voice_id, "Configured voice not found");
            return Err(PluginError::VoiceNotFound {
                voice_id,
                available,
            });
        }

        Ok(())
    }

    /// 校验 locale 的主语言子标签在支持列表中
    pub async fn validate_lang(&self) -> Result<(), PluginError> {
        let config = self.tts.config().await;
        let lang = self.tts.resolver().lang(&config);

        if !is_supported(&lang) {
            tracing::error!(
                lang = %lang,
                supported = ?SUPPORTED_LANGUAGES,
                "Language not supported"
            );
            return Err(PluginError::UnsupportedLanguage { lang });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::resolver::ConfigResolver;
    use crate::application::ports::VoiceInfo;
    use crate::config::PluginConfig;
    use crate::domain::speech::DEFAULT_VOICE_ID;
    use crate::infrastructure::adapters::{FakeSpeechApi, FakeSpeechApiConfig};
    use std::sync::Arc;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn plugin(config: PluginConfig, fake: FakeSpeechApiConfig) -> ElevenLabsTts {
        let config = PluginConfig {
            api_key: Some("sk-test".to_string()),
            ..config
        };
        ElevenLabsTts::with_resolver(
            config,
            Arc::new(FakeSpeechApi::new(fake)),
            ConfigResolver::with_env(no_env),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_validate_all_passes_with_defaults() {
        let tts = plugin(PluginConfig::default(), FakeSpeechApiConfig::default());
        assert!(tts.validate().await.is_ok());
    }

    #[tokio::test]
    async fn test_lang_primary_subtag_accepted() {
        let tts = plugin(
            PluginConfig::default().with_lang("en-US"),
            FakeSpeechApiConfig::default(),
        );
        assert!(tts.validator().validate_lang().await.is_ok());
    }

    #[tokio::test]
    async fn test_lang_unknown_rejected() {
        let tts = plugin(
            PluginConfig::default().with_lang("xx-YY"),
            FakeSpeechApiConfig::default(),
        );
        let err = tts.validator().validate_lang().await.unwrap_err();
        assert!(matches!(err, PluginError::UnsupportedLanguage { ref lang } if lang == "xx-YY"));
    }

    #[tokio::test]
    async fn test_empty_voice_list_fails() {
        let tts = plugin(
            PluginConfig::default(),
            FakeSpeechApiConfig {
                voices: vec![],
                ..Default::default()
            },
        );
        let err = tts.validator().validate_voice().await.unwrap_err();
        assert!(matches!(err, PluginError::NoVoicesAvailable));
    }

    #[tokio::test]
    async fn test_unknown_voice_fails() {
        let tts = plugin(
            PluginConfig::default().with_voice_id("not-on-account"),
            FakeSpeechApiConfig {
                voices: vec![VoiceInfo::new(DEFAULT_VOICE_ID, "George")],
                ..Default::default()
            },
        );
        let err = tts.validator().validate_voice().await.unwrap_err();
        match err {
            PluginError::VoiceNotFound {
                voice_id,
                available,
            } => {
                assert_eq!(voice_id, "not-on-account");
                assert_eq!(available, vec![DEFAULT_VOICE_ID.to_string()]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connection_failure_propagates() {
        let tts = plugin(
            PluginConfig::default(),
            FakeSpeechApiConfig {
                fail_connection: true,
                ..Default::default()
            },
        );
        let err = tts.validator().validate_connection().await.unwrap_err();
        assert!(matches!(err, PluginError::ConnectionError(_)));

        // validate 在第一个失败处停止
        let err = tts.validate().await.unwrap_err();
        assert!(matches!(err, PluginError::ConnectionError(_)));
    }

    #[tokio::test]
    async fn test_dependency_failure() {
        let tts = plugin(
            PluginConfig::default(),
            FakeSpeechApiConfig {
                backend_unavailable: true,
                ..Default::default()
            },
        );
        let err = tts.validate().await.unwrap_err();
        assert!(matches!(err, PluginError::DependencyError(_)));
    }
}
