//! Speech Context - 输出路径

use std::path::{Path, PathBuf};

use super::OutputFormat;

/// 根据宿主建议的路径计算实际输出路径
///
/// 只替换最后一级扩展名：`out.wav` -> `out.mp3`，`out` -> `out.mp3`，
/// `clip.ogg` -> `clip.mp3`。目录部分保持不变。
///
/// 文件名恰好是 `.wav` 时按扩展名处理：`/tmp/.wav` -> `/tmp/.mp3`。
pub fn resolve_output_path(suggested: &Path, format: OutputFormat) -> PathBuf {
    let bare_wav = suggested
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.eq_ignore_ascii_case(".wav"));
    if bare_wav {
        return suggested.with_file_name(format!(".{}", format.extension()));
    }
    suggested.with_extension(format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(p: &str) -> PathBuf {
        resolve_output_path(Path::new(p), OutputFormat::default())
    }

    #[test]
    fn test_wav_becomes_mp3() {
        assert_eq!(resolve("out.wav"), PathBuf::from("out.mp3"));
        assert_eq!(resolve("/tmp/tts/abc123.wav"), PathBuf::from("/tmp/tts/abc123.mp3"));
    }

    #[test]
    fn test_directories_are_untouched() {
        assert_eq!(
            resolve("/var/cache.wav/sentence.wav"),
            PathBuf::from("/var/cache.wav/sentence.mp3")
        );
    }

    #[test]
    fn test_other_extensions_are_forced() {
        assert_eq!(resolve("out"), PathBuf::from("out.mp3"));
        assert_eq!(resolve("clip.ogg"), PathBuf::from("clip.mp3"));
        assert_eq!(resolve("already.mp3"), PathBuf::from("already.mp3"));
    }

    #[test]
    fn test_bare_wav_file_name() {
        assert_eq!(resolve("/tmp/.wav"), PathBuf::from("/tmp/.mp3"));
        assert_eq!(resolve(".wav"), PathBuf::from(".mp3"));
        assert_eq!(resolve("/tmp/.WAV"), PathBuf::from("/tmp/.mp3"));
        // 其他隐藏文件仍按无扩展名处理
        assert_eq!(resolve("/tmp/.cache"), PathBuf::from("/tmp/.cache.mp3"));
    }
}
