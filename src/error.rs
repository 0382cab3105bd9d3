use std::io;

use thiserror::Error;

use crate::reader::FileKind;

/// Failures while turning a manuscript into chapter drafts.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unsupported manuscript format `{kind}`: please upload a docx, txt or md file")]
    UnsupportedFormat { kind: String },

    #[error("Failed to extract text from {kind} manuscript: {cause}")]
    ExtractionFailed { kind: FileKind, cause: String },

    #[error(
        "Manuscript has no usable content: {found} characters after trimming, \
         at least {required} required"
    )]
    EmptyManuscript { found: usize, required: usize },
}

/// Failures reading or writing persisted chapters.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Chapter number overflow in book {book_id}: {existing} + {added}")]
    ChapterNumberOverflow {
        book_id: String,
        existing: u32,
        added: u32,
    },
}

/// Failures of a full parse-and-write import.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Failed to write chapters: {0}")]
    Store(#[from] StoreError),
}
