//! Manuscript-to-chapters parsing.
//!
//! A TXT, Markdown or DOCX manuscript is reduced to plain text, split into
//! chapters at recognized headings and written to a [`ChapterStore`] in `add`
//! or `replace` mode.

pub mod batch;
pub mod chapter;
pub mod config;
pub mod docx_reader;
pub mod error;
pub mod heading;
pub mod parser;
pub mod reader;
pub mod segmenter;
pub mod store;
pub mod text_reader;

pub use batch::{import_manuscript, write_batch, ImportMode, ImportReport};
pub use chapter::{anchor_id, word_count, ChapterDraft};
pub use config::{Config, ParseOptions};
pub use error::{ImportError, ParseError, StoreError};
pub use heading::{Heading, HeadingMatcher};
pub use parser::parse_manuscript;
pub use reader::{extractor_for, FileKind, ManuscriptFile, TextExtractor};
pub use store::{ChapterBatch, ChapterStore, JsonFileStore, MemoryStore, StoredChapter};
