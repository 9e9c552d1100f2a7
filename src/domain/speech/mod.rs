//! Speech Context - 语音合成限界上下文
//!
//! 职责:
//! - 输出格式与音色参数
//! - 支持语言集合
//! - 输出路径规则

mod language;
mod output_path;
mod value_objects;

pub use language::{is_supported, primary_subtag, DEFAULT_LANG, SUPPORTED_LANGUAGES};
pub use output_path::resolve_output_path;
pub use value_objects::{
    OutputFormat, VoiceSettings, DEFAULT_MODEL_ID, DEFAULT_SIMILARITY_BOOST,
    DEFAULT_SPEAKER_BOOST, DEFAULT_STABILITY, DEFAULT_STYLE, DEFAULT_USE_STREAMING,
    DEFAULT_VOICE_ID,
};
