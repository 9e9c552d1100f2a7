//! Speech API Port - 远端语音合成服务抽象
//!
//! 定义模型列表、音色列表、语音合成三个远端操作，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::BoxStream;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::speech::{OutputFormat, VoiceSettings};

/// 远端服务错误
#[derive(Debug, Error)]
pub enum SpeechApiError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: HTTP {status}: {body}")]
    ServiceError { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),
}

/// 合成请求（每次调用构造，不持久化）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice_id: String,
    pub model_id: String,
    pub output_format: OutputFormat,
    pub voice_settings: VoiceSettings,
}

/// 模型信息
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelInfo {
    pub model_id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// 音色信息
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VoiceInfo {
    pub voice_id: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl VoiceInfo {
    pub fn new(voice_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            voice_id: voice_id.into(),
            name: Some(name.into()),
        }
    }
}

/// 音频块流
pub type AudioStream = BoxStream<'static, Result<Bytes, SpeechApiError>>;

/// Speech API Port
///
/// 流式与非流式合成都返回块流，由调用方统一写盘
#[async_trait]
pub trait SpeechApiPort: Send + Sync {
    /// 检查后端是否可用（客户端依赖、基础配置）
    fn check_backend(&self) -> Result<(), SpeechApiError> {
        Ok(())
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, SpeechApiError>;

    async fn list_voices(&self) -> Result<Vec<VoiceInfo>, SpeechApiError>;

    /// 单次合成
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<AudioStream, SpeechApiError>;

    /// 流式合成
    async fn synthesize_stream(
        &self,
        request: &SynthesisRequest,
    ) -> Result<AudioStream, SpeechApiError>;
}
