use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reserved language key holding the language-independent code
pub const CODE_KEY: &str = "__code__";

/// Separator between the row and the column part of a table cell wording
pub const TABLE_SEPARATOR: &str = " -> ";

/// Multi-language text (language code → text)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Translations(BTreeMap<String, String>);

impl Translations {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Translations carrying only a `__code__`
    pub fn code_only(code: impl Into<String>) -> Self {
        Self::new().with(CODE_KEY, code)
    }

    pub fn with(mut self, lang: impl Into<String>, text: impl Into<String>) -> Self {
        self.set(lang, text);
        self
    }

    pub fn set(&mut self, lang: impl Into<String>, text: impl Into<String>) {
        self.0.insert(lang.into(), text.into());
    }

    pub fn get(&self, lang: &str) -> Option<&str> {
        self.0.get(lang).map(String::as_str)
    }

    /// The `__code__` entry, empty if absent
    pub fn code(&self) -> &str {
        self.get(CODE_KEY).unwrap_or("")
    }

    /// Lookup with fallback: `lang`, then `fallback`, then `__code__`,
    /// then the first entry
    pub fn translate(&self, lang: &str, fallback: &str) -> String {
        self.get(lang)
            .or_else(|| self.get(fallback))
            .or_else(|| self.get(CODE_KEY))
            .or_else(|| self.0.values().next().map(String::as_str))
            .unwrap_or("")
            .to_string()
    }

    /// Languages with a non-blank text, `__code__` excluded
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(lang, text)| lang.as_str() != CODE_KEY && !text.trim().is_empty())
            .map(|(lang, _)| lang.as_str())
    }

    pub fn has_all<S: AsRef<str>>(&self, langs: &[S]) -> bool {
        langs.iter().all(|lang| {
            self.get(lang.as_ref())
                .map(|text| !text.trim().is_empty())
                .unwrap_or(false)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Apply `f` to every entry except `__code__`
    pub fn map_texts(&self, mut f: impl FnMut(&str, &str) -> String) -> Self {
        Self(
            self.0
                .iter()
                .map(|(lang, text)| {
                    if lang == CODE_KEY {
                        (lang.clone(), text.clone())
                    } else {
                        (lang.clone(), f(lang, text))
                    }
                })
                .collect(),
        )
    }

    /// Copy of these translations with the code replaced
    pub fn with_code(&self, code: impl Into<String>) -> Self {
        self.clone().with(CODE_KEY, code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(lang, text)| (lang.as_str(), text.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Translations {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Column part of a table cell wording (`"row -> column"`)
pub fn table_column(wording: &str) -> &str {
    match wording.split_once(TABLE_SEPARATOR) {
        Some((_, column)) => column,
        None => wording,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_fallbacks() {
        let t = Translations::code_only("AGE").with("en", "Age");
        assert_eq!(t.translate("en", "en"), "Age");
        assert_eq!(t.translate("fr", "en"), "Age");
        assert_eq!(Translations::code_only("AGE").translate("fr", "en"), "AGE");
        assert_eq!(Translations::new().translate("fr", "en"), "");
    }

    #[test]
    fn test_has_all_ignores_blank() {
        let t = Translations::new().with("en", "Name").with("fr", "  ");
        assert!(t.has_all(&["en"]));
        assert!(!t.has_all(&["en", "fr"]));
        assert_eq!(t.languages().collect::<Vec<_>>(), vec!["en"]);
    }

    #[test]
    fn test_map_texts_keeps_code() {
        let t = Translations::code_only("X").with("en", "a");
        let mapped = t.map_texts(|_, text| text.to_uppercase());
        assert_eq!(mapped.code(), "X");
        assert_eq!(mapped.get("en"), Some("A"));
    }

    #[test]
    fn test_table_column() {
        assert_eq!(table_column("Headache -> Severity"), "Severity");
        assert_eq!(table_column("Plain"), "Plain");
    }
}
