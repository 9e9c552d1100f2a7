//! TTS Adapter - ElevenLabs 远端服务实现

mod fake_tts_client;
mod http_tts_client;

pub use fake_tts_client::{FakeSpeechApi, FakeSpeechApiConfig, RecordedCall};
pub use http_tts_client::{ElevenLabsHttpClient, ElevenLabsHttpClientConfig};
