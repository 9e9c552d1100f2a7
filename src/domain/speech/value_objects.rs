//! Speech Context - Value Objects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 默认模型
pub const DEFAULT_MODEL_ID: &str = "eleven_multilingual_v2";

/// 默认音色 ("George")
pub const DEFAULT_VOICE_ID: &str = "JBFqnCBsd6RMkjVDRZzb";

pub const DEFAULT_STABILITY: f32 = 0.5;
pub const DEFAULT_SIMILARITY_BOOST: f32 = 0.75;
/// 0 为中性风格
pub const DEFAULT_STYLE: f32 = 0.0;
pub const DEFAULT_SPEAKER_BOOST: bool = true;
pub const DEFAULT_USE_STREAMING: bool = false;

/// 输出音频格式
///
/// 名称与 ElevenLabs API 的 `output_format` 参数一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    #[serde(rename = "mp3_44100_128")]
    Mp3_44100_128,
    #[serde(rename = "mp3_44100_64")]
    Mp3_44100_64,
    #[serde(rename = "mp3_22050_32")]
    Mp3_22050_32,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [
        Self::Mp3_44100_128,
        Self::Mp3_44100_64,
        Self::Mp3_22050_32,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3_44100_128 => "mp3_44100_128",
            Self::Mp3_44100_64 => "mp3_44100_64",
            Self::Mp3_22050_32 => "mp3_22050_32",
        }
    }

    /// 文件扩展名（所有支持的格式均为 MP3 容器）
    pub fn extension(&self) -> &'static str {
        "mp3"
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unsupported output format: {}", s))
    }
}

/// 音色调节参数
///
/// 原样透传给远端服务
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
    /// 风格强度 (0.0 - 1.0)
    pub style: f32,
    pub use_speaker_boost: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: DEFAULT_STABILITY,
            similarity_boost: DEFAULT_SIMILARITY_BOOST,
            style: DEFAULT_STYLE,
            use_speaker_boost: DEFAULT_SPEAKER_BOOST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_wire_names() {
        assert_eq!(OutputFormat::default().as_str(), "mp3_44100_128");
        assert_eq!(
            serde_json::to_string(&OutputFormat::Mp3_22050_32).unwrap(),
            "\"mp3_22050_32\""
        );
        let parsed: OutputFormat = serde_json::from_str("\"mp3_44100_64\"").unwrap();
        assert_eq!(parsed, OutputFormat::Mp3_44100_64);
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(
            "MP3_22050_32".parse::<OutputFormat>().unwrap(),
            OutputFormat::Mp3_22050_32
        );
        assert!("pcm_16000".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_voice_settings_defaults() {
        let settings = VoiceSettings::default();
        assert_eq!(settings.stability, 0.5);
        assert_eq!(settings.similarity_boost, 0.75);
        assert_eq!(settings.style, 0.0);
        assert!(settings.use_speaker_boost);
    }
}
