//! Speech Context - 语言支持

/// 远端多语言模型支持的语言（ISO 639-1）
pub const SUPPORTED_LANGUAGES: [&str; 32] = [
    "en", "es", "fr", "de", "it", "pt", "pl", "hi", "ar", "bn", "cs", "da", "nl", "fi", "el",
    "hu", "id", "ja", "ko", "ms", "no", "ro", "ru", "sk", "sv", "ta", "tr", "uk", "ur", "vi",
    "zh", "bg",
];

/// 默认语言
pub const DEFAULT_LANG: &str = "en-US";

/// 提取主语言子标签
///
/// "en-US" -> "en", "PT" -> "pt"
pub fn primary_subtag(locale: &str) -> String {
    locale
        .trim()
        .split('-')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// 判断 locale 的主语言是否受支持
pub fn is_supported(locale: &str) -> bool {
    let primary = primary_subtag(locale);
    SUPPORTED_LANGUAGES.contains(&primary.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_subtag() {
        assert_eq!(primary_subtag("en-US"), "en");
        assert_eq!(primary_subtag("zh-Hans-CN"), "zh");
        assert_eq!(primary_subtag("DE"), "de");
        assert_eq!(primary_subtag(""), "");
    }

    #[test]
    fn test_supported_locales() {
        assert!(is_supported("en-US"));
        assert!(is_supported("pt-BR"));
        assert!(is_supported("uk"));
        assert!(!is_supported("xx-YY"));
        assert!(!is_supported("en_US"));
        assert!(!is_supported(""));
    }

    #[test]
    fn test_language_set_is_unique() {
        let mut langs = SUPPORTED_LANGUAGES.to_vec();
        langs.sort_unstable();
        langs.dedup();
        assert_eq!(langs.len(), SUPPORTED_LANGUAGES.len());
    }
}
