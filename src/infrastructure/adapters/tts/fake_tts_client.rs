//! Fake Speech API - 用于测试的远端服务替身
//!
//! 返回预设的音频块、模型与音色列表，并记录每次调用，不发起网络请求

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::{stream, StreamExt};
use std::sync::Mutex;

use crate::application::ports::{
    AudioStream, ModelInfo, SpeechApiError, SpeechApiPort, SynthesisRequest, VoiceInfo,
};
use crate::domain::speech::{DEFAULT_MODEL_ID, DEFAULT_VOICE_ID};

/// Fake Speech API 配置
#[derive(Debug, Clone)]
pub struct FakeSpeechApiConfig {
    /// 每次合成按顺序返回的音频块
    pub chunks: Vec<Bytes>,
    pub models: Vec<ModelInfo>,
    pub voices: Vec<VoiceInfo>,
    /// check_backend 失败
    pub backend_unavailable: bool,
    /// list_models / list_voices 失败
    pub fail_connection: bool,
    /// 合成请求直接失败
    pub fail_synthesis: bool,
    /// 输出 N 个块后流中断
    pub fail_after_chunks: Option<usize>,
}

impl Default for FakeSpeechApiConfig {
    fn default() -> Self {
        Self {
            chunks: vec![
                Bytes::from_static(b"ID3\x04\x00"),
                Bytes::from_static(b"\xff\xfb\x90\x64"),
            ],
            models: vec![ModelInfo {
                model_id: DEFAULT_MODEL_ID.to_string(),
                name: Some("Eleven Multilingual v2".to_string()),
            }],
            voices: vec![VoiceInfo::new(DEFAULT_VOICE_ID, "George")],
            backend_unavailable: false,
            fail_connection: false,
            fail_synthesis: false,
            fail_after_chunks: None,
        }
    }
}

/// 被记录的调用
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    ListModels,
    ListVoices,
    Synthesize(SynthesisRequest),
    SynthesizeStream(SynthesisRequest),
}

/// Fake Speech API
pub struct FakeSpeechApi {
    config: FakeSpeechApiConfig,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeSpeechApi {
    pub fn new(config: FakeSpeechApiConfig) -> Self {
        tracing::info!(
            chunks = config.chunks.len(),
            voices = config.voices.len(),
            "FakeSpeechApi initialized"
        );
        Self {
            config,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(FakeSpeechApiConfig::default())
    }

    /// 已记录的调用（按调用顺序）
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn synthesize_count(&self) -> usize {
        self.count(|c| matches!(c, RecordedCall::Synthesize(_)))
    }

    pub fn stream_count(&self) -> usize {
        self.count(|c| matches!(c, RecordedCall::SynthesizeStream(_)))
    }

    /// 成功合成时应写入文件的完整内容
    pub fn expected_audio(&self) -> Vec<u8> {
        self.config.chunks.iter().flat_map(|c| c.iter().copied()).collect()
    }

    fn count(&self, pred: impl Fn(&RecordedCall) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: RecordedCall) {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(call);
    }

    fn connection_result(&self) -> Result<(), SpeechApiError> {
        if self.config.fail_connection {
            return Err(SpeechApiError::NetworkError(
                "FakeSpeechApi: connection refused".to_string(),
            ));
        }
        Ok(())
    }

    fn audio_stream(&self) -> Result<AudioStream, SpeechApiError> {
        if self.config.fail_synthesis {
            return Err(SpeechApiError::ServiceError {
                status: 500,
                body: "FakeSpeechApi: synthesis failed".to_string(),
            });
        }

        let mut items: Vec<Result<Bytes, SpeechApiError>> = match self.config.fail_after_chunks {
            Some(n) => self.config.chunks.iter().take(n).cloned().map(Ok).collect(),
            None => self.config.chunks.iter().cloned().map(Ok).collect(),
        };
        if self.config.fail_after_chunks.is_some() {
            items.push(Err(SpeechApiError::NetworkError(
                "FakeSpeechApi: stream interrupted".to_string(),
            )));
        }
        Ok(stream::iter(items).boxed())
    }
}

#[async_trait]
impl SpeechApiPort for FakeSpeechApi {
    fn check_backend(&self) -> Result<(), SpeechApiError> {
        if self.config.backend_unavailable {
            return Err(SpeechApiError::BackendUnavailable(
                "FakeSpeechApi: backend disabled".to_string(),
            ));
        }
        Ok(())
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, SpeechApiError> {
        self.record(RecordedCall::ListModels);
        self.connection_result()?;
        Ok(self.config.models.clone())
    }

    async fn list_voices(&self) -> Result<Vec<VoiceInfo>, SpeechApiError> {
        self.record(RecordedCall::ListVoices);
        self.connection_result()?;
        Ok(self.config.voices.clone())
    }

    async fn synthesize(&self, request: &SynthesisRequest) -> Result<AudioStream, SpeechApiError> {
        tracing::debug!(
            text_len = request.text.len(),
            voice_id = %request.voice_id,
            "FakeSpeechApi: returning fixed audio"
        );
        self.record(RecordedCall::Synthesize(request.clone()));
        self.audio_stream()
    }

    async fn synthesize_stream(
        &self,
        request: &SynthesisRequest,
    ) -> Result<AudioStream, SpeechApiError> {
        tracing::debug!(
            text_len = request.text.len(),
            voice_id = %request.voice_id,
            "FakeSpeechApi: streaming fixed audio"
        );
        self.record(RecordedCall::SynthesizeStream(request.clone()));
        self.audio_stream()
    }
}
