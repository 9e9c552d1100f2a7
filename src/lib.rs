//! ElevenLabs TTS - 语音助手 TTS 插件
//!
//! 把 ElevenLabs 云端语音合成 API 包装成宿主框架要求的插件接口：
//! 输入文本与配置，输出磁盘上的 MP3 文件。
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Speech Context: 输出格式、音色参数、支持语言、输出路径规则
//!
//! 应用层 (application/):
//! - Ports: SpeechApiPort（模型列表、音色列表、合成）
//! - Resolver: 配置解析
//! - Synthesizer: 插件主体 `ElevenLabsTts`
//! - Validator: 激活前校验
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: ElevenLabs HTTP 客户端、Fake 客户端

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod plugin;

pub use application::{ElevenLabsTts, PluginError};
pub use config::{load_config, sample_configs, AppConfig, PluginConfig};
pub use plugin::connect;
