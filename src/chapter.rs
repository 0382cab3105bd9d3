use serde::{Deserialize, Serialize};

/// A parsed, not yet persisted chapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterDraft {
    pub title: String,
    /// Trimmed body text
    pub content: String,
    /// 1-based position within the parsed batch
    pub chapter_number: u32,
    pub anchor_id: String,
    pub word_count: usize,
    /// Only the first chapter of a batch is a free preview
    pub is_preview: bool,
}

impl ChapterDraft {
    pub fn new(title: String, content: String, chapter_number: u32, max_slug_chars: usize) -> Self {
        Self {
            anchor_id: anchor_id(&title, chapter_number, max_slug_chars),
            word_count: word_count(&content),
            is_preview: chapter_number == 1,
            title,
            content,
            chapter_number,
        }
    }
}

/// Build a `ch-<n>-<slug>` anchor id. Unique within a batch since `n` is.
pub fn anchor_id(title: &str, chapter_number: u32, max_slug_chars: usize) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }

    let slug: String = slug.trim_matches('-').chars().take(max_slug_chars).collect();
    let slug = if slug.is_empty() { "untitled" } else { slug.as_str() };

    format!("ch-{}-{}", chapter_number, slug)
}

pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_collapses_punctuation_runs() {
        assert_eq!(anchor_id("Chapter 2: The Return", 2, 30), "ch-2-chapter-2-the-return");
        assert_eq!(anchor_id("  --Hello,   World!--  ", 5, 30), "ch-5-hello-world");
    }

    #[test]
    fn anchor_truncates_slug() {
        let id = anchor_id("A very long chapter title that keeps on going", 3, 30);
        assert_eq!(id, "ch-3-a-very-long-chapter-title-that");
        assert_eq!(id.len(), "ch-3-".len() + 30);
    }

    #[test]
    fn anchor_without_ascii_letters_is_untitled() {
        assert_eq!(anchor_id("***", 1, 30), "ch-1-untitled");
        assert_eq!(anchor_id("Ωμέγα", 4, 30), "ch-4-untitled");
    }

    #[test]
    fn counts_whitespace_tokens() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("one  two\nthree\tfour"), 4);
    }

    #[test]
    fn only_first_draft_is_preview() {
        let first = ChapterDraft::new("Prologue".into(), "words here".into(), 1, 30);
        let second = ChapterDraft::new("Chapter 1".into(), "more words".into(), 2, 30);
        assert!(first.is_preview);
        assert!(!second.is_preview);
        assert_eq!(first.word_count, 2);
    }
}
