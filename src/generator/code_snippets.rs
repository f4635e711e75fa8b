use log::warn;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::{KeyrowError, Result};
use crate::generator::bundled_text;

/// Separator line between snippets in a bundled snippet file.
const SNIPPET_SEPARATOR: &str = "%%";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeLanguage {
    Python,
    Rust,
    C,
    Cpp,
}

impl CodeLanguage {
    pub const ALL: &'static [CodeLanguage] = &[
        CodeLanguage::Python,
        CodeLanguage::Rust,
        CodeLanguage::C,
        CodeLanguage::Cpp,
    ];

    pub fn to_key(self) -> &'static str {
        match self {
            CodeLanguage::Python => "python",
            CodeLanguage::Rust => "rust",
            CodeLanguage::C => "c",
            CodeLanguage::Cpp => "cpp",
        }
    }

    /// Case-insensitive lookup by key.
    pub fn from_key(key: &str) -> Result<Self> {
        let lowered = key.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|l| l.to_key() == lowered)
            .ok_or_else(|| KeyrowError::UnsupportedLanguage(key.to_string()))
    }

    pub fn snippets(self) -> Vec<String> {
        let path = format!("snippets/{}.txt", self.to_key());
        bundled_text(&path)
            .map(|text| split_snippets(&text))
            .unwrap_or_default()
    }
}

fn split_snippets(text: &str) -> Vec<String> {
    let mut snippets = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim_end() == SNIPPET_SEPARATOR {
            snippets.push(current.join("\n"));
            current.clear();
        } else {
            current.push(line);
        }
    }
    snippets.push(current.join("\n"));

    snippets
        .into_iter()
        .map(|s| s.trim_matches('\n').to_string())
        .filter(|s| !s.trim().is_empty())
        .collect()
}

/// Parse a comma separated language list such as `"python, rust"`.
/// Unknown names are dropped with a warning; an empty result means every
/// language.
pub fn parse_languages(list: &str) -> Vec<CodeLanguage> {
    let mut languages = Vec::new();
    for name in list.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        match CodeLanguage::from_key(name) {
            Ok(lang) if !languages.contains(&lang) => languages.push(lang),
            Ok(_) => {}
            Err(e) => warn!("{e}, ignoring"),
        }
    }
    if languages.is_empty() {
        CodeLanguage::ALL.to_vec()
    } else {
        languages
    }
}

/// A random snippet in `language`.
pub fn code_snippet<R: Rng + ?Sized>(language: CodeLanguage, rng: &mut R) -> Option<String> {
    language.snippets().choose(rng).cloned()
}

/// A random snippet in one of `languages`, picking the language first.
pub fn random_snippet<R: Rng + ?Sized>(
    languages: &[CodeLanguage],
    rng: &mut R,
) -> Option<(CodeLanguage, String)> {
    let language = *languages.choose(rng)?;
    code_snippet(language, rng).map(|s| (language, s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_every_language_has_snippets() {
        for &lang in CodeLanguage::ALL {
            let snippets = lang.snippets();
            assert!(snippets.len() >= 5, "{lang:?}");
            assert!(snippets.iter().all(|s| !s.contains(SNIPPET_SEPARATOR)));
        }
    }

    #[test]
    fn test_snippets_keep_inner_blank_lines() {
        let snippets = split_snippets("a\n\nb\n%%\nc\n");
        assert_eq!(snippets, vec!["a\n\nb".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_from_key() {
        assert_eq!(CodeLanguage::from_key("Rust").unwrap(), CodeLanguage::Rust);
        assert_eq!(CodeLanguage::from_key("cpp").unwrap(), CodeLanguage::Cpp);
        let err = CodeLanguage::from_key("cobol").unwrap_err();
        assert!(matches!(err, KeyrowError::UnsupportedLanguage(ref l) if l == "cobol"));
    }

    #[test]
    fn test_parse_languages() {
        assert_eq!(
            parse_languages("rust, c,rust"),
            vec![CodeLanguage::Rust, CodeLanguage::C]
        );
        assert_eq!(parse_languages("cobol"), CodeLanguage::ALL.to_vec());
        assert_eq!(parse_languages(""), CodeLanguage::ALL.to_vec());
        assert_eq!(parse_languages("perl, python"), vec![CodeLanguage::Python]);
    }

    #[test]
    fn test_random_snippet_respects_language_list() {
        let mut rng = SmallRng::seed_from_u64(6);
        for _ in 0..10 {
            let (lang, snippet) = random_snippet(&[CodeLanguage::C], &mut rng).unwrap();
            assert_eq!(lang, CodeLanguage::C);
            assert!(!snippet.is_empty());
        }
        assert!(random_snippet(&[], &mut rng).is_none());
    }
}
