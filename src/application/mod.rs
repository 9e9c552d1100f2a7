//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（SpeechApiPort）
//! - resolver: 配置解析（显式配置 > 环境变量 > 默认值）
//! - synthesizer: 插件主体，文本合成并写入文件
//! - validator: 激活前校验
//! - error: 应用层错误定义

pub mod error;
pub mod ports;
pub mod resolver;
pub mod synthesizer;
pub mod validator;

pub use error::PluginError;

pub use ports::{
    AudioStream, ModelInfo, SpeechApiError, SpeechApiPort, SynthesisRequest, VoiceInfo,
};
pub use resolver::{ConfigResolver, EnvLookup, API_KEY_ENV};
pub use synthesizer::{write_audio_chunks, ElevenLabsTts};
pub use validator::TtsValidator;
