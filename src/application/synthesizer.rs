//! Synthesis Client - 文本转语音并写入文件
//!
//! `ElevenLabsTts` 是宿主直接持有的插件实例：
//! - 配置保存在 `RwLock` 中，每次调用取快照，运行时修改在下次调用生效
//! - 流式与非流式两条路径共用同一个写盘例程

use futures_util::StreamExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use crate::config::{validate_plugin_config, PluginConfig};
use crate::domain::speech::{resolve_output_path, SUPPORTED_LANGUAGES};

use super::error::PluginError;
use super::ports::{AudioStream, SpeechApiPort, SynthesisRequest};
use super::resolver::ConfigResolver;
use super::validator::TtsValidator;

/// ElevenLabs TTS 插件
pub struct ElevenLabsTts {
    config: RwLock<PluginConfig>,
    api: Arc<dyn SpeechApiPort>,
    resolver: ConfigResolver,
    /// 构造时解析的 API Key，与远端客户端绑定
    api_key: String,
}

impl ElevenLabsTts {
    /// 创建插件实例
    ///
    /// 缺少 API Key 时立即失败；不执行远端校验，需要时调用 [`validate`](Self::validate)
    pub fn new(config: PluginConfig, api: Arc<dyn SpeechApiPort>) -> Result<Self, PluginError> {
        Self::with_resolver(config, api, ConfigResolver::new())
    }

    pub fn with_resolver(
        config: PluginConfig,
        api: Arc<dyn SpeechApiPort>,
        resolver: ConfigResolver,
    ) -> Result<Self, PluginError> {
        tracing::debug!("Initializing ElevenLabsTts");
        let api_key = resolver.api_key(&config)?;
        validate_plugin_config(&config)?;

        Ok(Self {
            config: RwLock::new(config),
            api,
            resolver,
            api_key,
        })
    }

    /// 插件声明支持的语言
    pub fn available_languages() -> &'static [&'static str] {
        &SUPPORTED_LANGUAGES
    }

    /// 当前配置快照
    pub async fn config(&self) -> PluginConfig {
        self.config.read().await.clone()
    }

    /// 修改配置，校验失败时保持原配置
    ///
    /// API Key 在构造时绑定到远端客户端：修改后的配置必须仍能解析出同一个 Key。
    pub async fn update_config<F>(&self, edit: F) -> Result<(), PluginError>
    where
        F: FnOnce(&mut PluginConfig),
    {
        let mut guard = self.config.write().await;
        let mut next = guard.clone();
        edit(&mut next);
        validate_plugin_config(&next)?;
        if self.resolver.api_key(&next)? != self.api_key {
            tracing::error!("API key change rejected: key is bound to the client");
            return Err(PluginError::configuration(
                "api_key cannot be changed at runtime; recreate the plugin instead",
            ));
        }
        *guard = next;
        tracing::debug!("Plugin configuration updated");
        Ok(())
    }

    pub fn resolver(&self) -> &ConfigResolver {
        &self.resolver
    }

    pub fn api(&self) -> &Arc<dyn SpeechApiPort> {
        &self.api
    }

    pub fn validator(&self) -> TtsValidator<'_> {
        TtsValidator::new(self)
    }

    /// 运行全部激活前校验
    pub async fn validate(&self) -> Result<(), PluginError> {
        self.validator().validate().await
    }

    /// 根据配置快照构造合成请求
    pub fn build_request(&self, text: &str, config: &PluginConfig) -> SynthesisRequest {
        SynthesisRequest {
            text: text.to_string(),
            voice_id: self.resolver.voice_id(config),
            model_id: self.resolver.model_id(config),
            output_format: self.resolver.output_format(config),
            voice_settings: self.resolver.voice_settings(config),
        }
    }

    /// 合成语音并写入文件
    ///
    /// 返回实际输出路径（扩展名强制为 mp3）。失败时不重试，也不清理已写入的部分文件。
    pub async fn get_tts(
        &self,
        text: &str,
        suggested_path: impl AsRef<Path>,
        lang: Option<&str>,
    ) -> Result<PathBuf, PluginError> {
        let config = self.config().await;
        let request = self.build_request(text, &config);
        let out_path = resolve_output_path(suggested_path.as_ref(), request.output_format);
        let use_streaming = self.resolver.use_streaming(&config);

        tracing::debug!(
            preview = %text.chars().take(20).collect::<String>(),
            out_path = %out_path.display(),
            use_streaming,
            voice_id = %request.voice_id,
            model_id = %request.model_id,
            lang = ?lang,
            "Converting text to speech"
        );

        let response = if use_streaming {
            self.api.synthesize_stream(&request).await
        } else {
            self.api.synthesize(&request).await
        };
        let stream = response.map_err(|e| {
            tracing::error!(error = %e, "ElevenLabs TTS error");
            PluginError::SynthesisError(e)
        })?;

        let bytes_written = write_audio_chunks(stream, &out_path).await.map_err(|e| {
            tracing::error!(error = %e, out_path = %out_path.display(), "ElevenLabs TTS error");
            e
        })?;

        tracing::debug!(
            bytes_written,
            out_path = %out_path.display(),
            "Successfully wrote audio"
        );

        Ok(out_path)
    }
}

/// 将音频块依次写入文件，跳过空块，返回写入的总字节数
///
/// 文件句柄在所有退出路径上都会被释放；中途失败时文件可能被截断。
pub async fn write_audio_chunks(mut stream: AudioStream, path: &Path) -> Result<u64, PluginError> {
    let mut file = File::create(path).await?;
    let copied = copy_chunks(&mut stream, &mut file).await;
    // 失败时也要等已提交的写入完成
    let flushed = file.flush().await;
    let bytes_written = copied?;
    flushed?;
    Ok(bytes_written)
}

async fn copy_chunks(stream: &mut AudioStream, file: &mut File) -> Result<u64, PluginError> {
    let mut bytes_written: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(PluginError::SynthesisError)?;
        if chunk.is_empty() {
            continue;
        }
        file.write_all(&chunk).await?;
        bytes_written += chunk.len() as u64;
    }
    Ok(bytes_written)
}
