//! ElevenLabs HTTP Client - 调用 ElevenLabs REST API
//!
//! 实现 SpeechApiPort trait
//!
//! 使用的 API:
//! GET  /v1/models
//! GET  /v1/voices
//! POST /v1/text-to-speech/{voice_id}?output_format=...         (audio/mpeg)
//! POST /v1/text-to-speech/{voice_id}/stream?output_format=...  (chunked audio/mpeg)
//!
//! 鉴权: `xi-api-key` header

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{
    AudioStream, ModelInfo, SpeechApiError, SpeechApiPort, SynthesisRequest, VoiceInfo,
};
use crate::config::HttpConfig;
use crate::domain::speech::VoiceSettings;

const API_KEY_HEADER: &str = "xi-api-key";

/// 合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct TextToSpeechBody<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: &'a VoiceSettings,
}

/// GET /v1/voices 响应
#[derive(Debug, Deserialize)]
struct VoicesResponse {
    voices: Vec<VoiceInfo>,
}

/// ElevenLabs 客户端配置
#[derive(Debug, Clone)]
pub struct ElevenLabsHttpClientConfig {
    pub api_key: String,
    /// API 基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl ElevenLabsHttpClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        let http = HttpConfig::default();
        Self {
            api_key: api_key.into(),
            base_url: http.base_url,
            timeout_secs: http.timeout_secs,
        }
    }

    pub fn from_http_config(api_key: impl Into<String>, http: &HttpConfig) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: http.base_url.clone(),
            timeout_secs: http.timeout_secs,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// ElevenLabs HTTP 客户端
pub struct ElevenLabsHttpClient {
    client: Client,
    config: ElevenLabsHttpClientConfig,
}

impl ElevenLabsHttpClient {
    pub fn new(config: ElevenLabsHttpClientConfig) -> Result<Self, SpeechApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SpeechApiError::BackendUnavailable(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 在基础 URL 后逐段追加路径，每段都做百分号编码
    fn endpoint(&self, segments: &[&str]) -> Result<Url, SpeechApiError> {
        let mut url = Url::parse(&self.config.base_url).map_err(|e| {
            SpeechApiError::BackendUnavailable(format!(
                "Invalid base URL '{}': {}",
                self.config.base_url, e
            ))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                SpeechApiError::BackendUnavailable(format!(
                    "Base URL cannot carry a path: {}",
                    self.config.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn models_url(&self) -> Result<Url, SpeechApiError> {
        self.endpoint(&["v1", "models"])
    }

    fn voices_url(&self) -> Result<Url, SpeechApiError> {
        self.endpoint(&["v1", "voices"])
    }

    fn tts_url(&self, voice_id: &str, streaming: bool) -> Result<Url, SpeechApiError> {
        if streaming {
            self.endpoint(&["v1", "text-to-speech", voice_id, "stream"])
        } else {
            self.endpoint(&["v1", "text-to-speech", voice_id])
        }
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header(API_KEY_HEADER, &self.config.api_key)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, SpeechApiError> {
        let response = self
            .authorized(builder)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechApiError::ServiceError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn text_to_speech(
        &self,
        request: &SynthesisRequest,
        streaming: bool,
    ) -> Result<AudioStream, SpeechApiError> {
        let url = self.tts_url(&request.voice_id, streaming)?;
        let body = TextToSpeechBody {
            text: &request.text,
            model_id: &request.model_id,
            voice_settings: &request.voice_settings,
        };

        tracing::debug!(
            url = %url,
            text_len = request.text.len(),
            output_format = %request.output_format,
            streaming,
            "Sending text-to-speech request"
        );

        let response = self
            .send(
                self.client
                    .post(url)
                    .query(&[("output_format", request.output_format.as_str())])
                    .header("Accept", "audio/mpeg")
                    .json(&body),
            )
            .await?;

        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(map_transport_error))
            .boxed();
        Ok(stream)
    }
}

fn map_transport_error(e: reqwest::Error) -> SpeechApiError {
    if e.is_timeout() {
        SpeechApiError::Timeout
    } else if e.is_connect() {
        SpeechApiError::NetworkError(format!("Cannot connect to ElevenLabs API: {}", e))
    } else if e.is_decode() {
        SpeechApiError::InvalidResponse(e.to_string())
    } else {
        SpeechApiError::NetworkError(e.to_string())
    }
}

#[async_trait]
impl SpeechApiPort for ElevenLabsHttpClient {
    fn check_backend(&self) -> Result<(), SpeechApiError> {
        let url = Url::parse(&self.config.base_url).map_err(|e| {
            SpeechApiError::BackendUnavailable(format!(
                "Invalid base URL '{}': {}",
                self.config.base_url, e
            ))
        })?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(SpeechApiError::BackendUnavailable(format!(
                "Unsupported URL scheme: {}",
                other
            ))),
        }
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, SpeechApiError> {
        let response = self.send(self.client.get(self.models_url()?)).await?;
        response
            .json::<Vec<ModelInfo>>()
            .await
            .map_err(|e| SpeechApiError::InvalidResponse(format!("Failed to parse models: {}", e)))
    }

    async fn list_voices(&self) -> Result<Vec<VoiceInfo>, SpeechApiError> {
        let response = self.send(self.client.get(self.voices_url()?)).await?;
        let voices = response
            .json::<VoicesResponse>()
            .await
            .map_err(|e| SpeechApiError::InvalidResponse(format!("Failed to parse voices: {}", e)))?;
        Ok(voices.voices)
    }

    async fn synthesize(&self, request: &SynthesisRequest) -> Result<AudioStream, SpeechApiError> {
        self.text_to_speech(request, false).await
    }

    async fn synthesize_stream(
        &self,
        request: &SynthesisRequest,
    ) -> Result<AudioStream, SpeechApiError> {
        self.text_to_speech(request, true).await
    }
}
