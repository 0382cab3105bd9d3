use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Thresholds used while parsing a manuscript
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Extracted text shorter than this (after trimming) is rejected.
    pub min_manuscript_chars: usize,
    /// A chapter body must be strictly longer than this to be kept.
    pub min_chapter_chars: usize,
    /// Maximum length of the slug part of an anchor id.
    pub max_slug_chars: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            min_manuscript_chars: 100,
            min_chapter_chars: 50,
            max_slug_chars: 30,
        }
    }
}

/// File-level configuration, usually `manuscript2chapters.toml`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parser: ParseOptions,
    /// JSON chapter store used by `import` and `list`
    pub store: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            parser: ParseOptions::default(),
            store: PathBuf::from("chapters.json"),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("Invalid config: {}", path.display()))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn partial_parser_section_keeps_other_defaults() {
        let config =
            Config::from_toml("store = \"books.json\"\n[parser]\nmin_chapter_chars = 10\n")
                .unwrap();
        assert_eq!(config.store, PathBuf::from("books.json"));
        assert_eq!(config.parser.min_chapter_chars, 10);
        assert_eq!(config.parser.min_manuscript_chars, 100);
        assert_eq!(config.parser.max_slug_chars, 30);
    }

    #[test]
    fn unknown_types_are_rejected() {
        assert!(Config::from_toml("[parser]\nmin_chapter_chars = \"many\"\n").is_err());
    }
}
