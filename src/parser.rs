use crate::chapter::ChapterDraft;
use crate::config::ParseOptions;
use crate::error::ParseError;
use crate::reader::{extractor_for, FileKind};
use crate::segmenter;
use log::debug;

/// Extract text from a manuscript buffer and split it into chapter drafts.
///
/// Either returns a non-empty, sequentially numbered list or fails; there is
/// no partial result. Blank text is rejected even when `min_manuscript_chars`
/// is configured as 0.
pub fn parse_manuscript(
    bytes: &[u8],
    kind: FileKind,
    options: &ParseOptions,
) -> Result<Vec<ChapterDraft>, ParseError> {
    let extractor = extractor_for(kind)?;
    let text = extractor.extract(bytes)?;

    let required = options.min_manuscript_chars.max(1);
    let found = text.trim().chars().count();
    if found < required {
        return Err(ParseError::EmptyManuscript { found, required });
    }

    let chapters = segmenter::segment(&text, options);
    if chapters.is_empty() {
        return Err(ParseError::EmptyManuscript { found, required });
    }

    debug!(
        "Parsed {} manuscript ({} characters) into {} chapters",
        kind,
        found,
        chapters.len()
    );

    Ok(chapters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_empty_manuscript() {
        let err = parse_manuscript(
            b"   just a few words   ",
            FileKind::Text,
            &ParseOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ParseError::EmptyManuscript {
                found: 16,
                required: 100
            }
        ));
    }

    #[test]
    fn threshold_comes_from_options() {
        let options = ParseOptions {
            min_manuscript_chars: 10,
            ..ParseOptions::default()
        };
        let chapters = parse_manuscript(b"twelve chars", FileKind::Markdown, &options).unwrap();
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].title, "Chapter 1");
    }

    #[test]
    fn blank_text_fails_with_zero_threshold() {
        let options = ParseOptions {
            min_manuscript_chars: 0,
            ..ParseOptions::default()
        };
        for text in ["", "   \n  ", "\n\n\t"] {
            let err = parse_manuscript(text.as_bytes(), FileKind::Text, &options).unwrap_err();
            assert!(matches!(
                err,
                ParseError::EmptyManuscript {
                    found: 0,
                    required: 1
                }
            ));
        }
    }
}
