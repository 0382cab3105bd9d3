//! Splits plain text into chapter drafts.
//!
//! The text is folded line by line. The fold state holds the chapters closed
//! so far and the chapter still open. A chapter is closed when the next
//! heading appears or the input ends; both cases share the same close step.

use crate::chapter::ChapterDraft;
use crate::config::ParseOptions;
use crate::heading::HeadingMatcher;
use log::debug;

const IMPLICIT_TITLE: &str = "Introduction";
const FALLBACK_TITLE: &str = "Chapter 1";

struct OpenChapter<'a> {
    title: String,
    body: Vec<&'a str>,
}

struct Fold<'a> {
    closed: Vec<ChapterDraft>,
    open: Option<OpenChapter<'a>>,
}

impl<'a> Fold<'a> {
    fn step(mut self, line: &'a str, matcher: &HeadingMatcher, options: &ParseOptions) -> Self {
        let trimmed = line.trim();

        if let Some(heading) = matcher.classify(trimmed) {
            debug!("Heading detected: {:?}", heading);
            self = self.close(options);
            self.open = Some(OpenChapter {
                title: heading.title(),
                body: Vec::new(),
            });
        } else if let Some(open) = self.open.as_mut() {
            open.body.push(line);
        } else if !trimmed.is_empty() {
            // Front matter before the first heading
            self.open = Some(OpenChapter {
                title: IMPLICIT_TITLE.to_string(),
                body: vec![line],
            });
        }

        self
    }

    fn close(mut self, options: &ParseOptions) -> Self {
        if let Some(open) = self.open.take() {
            let content = open.body.join("\n").trim().to_string();
            if content.chars().count() > options.min_chapter_chars {
                let number = self.closed.len() as u32 + 1;
                self.closed.push(ChapterDraft::new(
                    open.title,
                    content,
                    number,
                    options.max_slug_chars,
                ));
            } else {
                debug!(
                    "Dropping \"{}\": body has {} characters",
                    open.title,
                    content.chars().count()
                );
            }
        }
        self
    }
}

/// Segment `text` into chapters. Never empty for non-blank input.
pub fn segment(text: &str, options: &ParseOptions) -> Vec<ChapterDraft> {
    let matcher = HeadingMatcher::shared();
    let start = Fold {
        closed: Vec::new(),
        open: None,
    };

    let mut chapters = text
        .lines()
        .fold(start, |fold, line| fold.step(line, matcher, options))
        .close(options)
        .closed;

    if chapters.is_empty() {
        let content = text.trim();
        if !content.is_empty() {
            chapters.push(ChapterDraft::new(
                FALLBACK_TITLE.to_string(),
                content.to_string(),
                1,
                options.max_slug_chars,
            ));
        }
    }

    chapters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> Vec<ChapterDraft> {
        segment(text, &ParseOptions::default())
    }

    #[test]
    fn front_matter_becomes_introduction() {
        let text = format!("{}\n\nChapter 1\n\n{}", "F".repeat(60), "G".repeat(60));
        let chapters = run(&text);
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].title, "Introduction");
        assert_eq!(chapters[0].anchor_id, "ch-1-introduction");
        assert_eq!(chapters[1].title, "Chapter 1");
        assert_eq!(chapters[1].chapter_number, 2);
    }

    #[test]
    fn leading_blank_lines_do_not_open_a_chapter() {
        let text = format!("\n\n   \nPrologue\n{}", "P".repeat(80));
        let chapters = run(&text);
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].title, "Prologue");
    }

    #[test]
    fn body_keeps_inner_lines_but_is_trimmed() {
        let body = "First line of the body that is long enough.\n  Indented second line here.";
        let chapters = run(&format!("# One\n\n{}\n\n", body));
        assert_eq!(chapters[0].content, body);
        assert_eq!(chapters[0].word_count, 13);
    }

    #[test]
    fn body_of_exactly_min_length_is_dropped() {
        let text = format!("Chapter 1\n{}\nChapter 2\n{}", "a".repeat(50), "b".repeat(51));
        let chapters = run(&text);
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].title, "Chapter 2");
        assert_eq!(chapters[0].chapter_number, 1);
        assert!(chapters[0].is_preview);
    }

    #[test]
    fn all_noise_falls_back_to_single_chapter() {
        let text = "Chapter 1\nshort\nChapter 2\nalso short\n";
        let chapters = run(text);
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].title, "Chapter 1");
        assert_eq!(chapters[0].content, text.trim());
        assert_eq!(chapters[0].anchor_id, "ch-1-chapter-1");
    }

    #[test]
    fn blank_input_gives_nothing() {
        assert!(run("   \n\n").is_empty());
    }

    #[test]
    fn crlf_line_endings_are_handled() {
        let text = format!(
            "Chapter 1\r\n{}\r\nChapter 2\r\n{}",
            "c".repeat(60),
            "d".repeat(60)
        );
        let chapters = run(&text);
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].content, "c".repeat(60));
    }
}
