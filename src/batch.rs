//! Writes parsed chapter drafts into a [`ChapterStore`].
//!
//! `replace` deletes the book's chapters and renumbers from 1; `add` appends
//! after the highest existing chapter number. Either way the store receives a
//! single [`ChapterBatch`], so the delete and the inserts land together or not
//! at all.

use crate::chapter::ChapterDraft;
use crate::config::ParseOptions;
use crate::error::{ImportError, StoreError};
use crate::parser::parse_manuscript;
use crate::reader::ManuscriptFile;
use crate::store::{ChapterBatch, ChapterStore, StoredChapter};
use log::{info, warn};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ImportMode {
    Add,
    Replace,
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportMode::Add => f.write_str("add"),
            ImportMode::Replace => f.write_str("replace"),
        }
    }
}

/// Outcome of a successful import
#[derive(Debug)]
pub struct ImportReport {
    pub mode: ImportMode,
    pub removed: usize,
    pub chapters: Vec<StoredChapter>,
}

/// Persist drafts for `book_id` according to `mode` and return what was written.
pub fn write_batch<S: ChapterStore + ?Sized>(
    store: &mut S,
    book_id: &str,
    drafts: Vec<ChapterDraft>,
    mode: ImportMode,
) -> Result<ImportReport, StoreError> {
    let existing = store.chapters(book_id)?;

    let (offset, removed) = match mode {
        ImportMode::Replace => (0, existing.len()),
        ImportMode::Add => {
            let max = existing.iter().map(|c| c.chapter_number).max().unwrap_or(0);
            if existing.iter().any(|c| c.is_preview) && drafts.iter().any(|d| d.is_preview) {
                warn!(
                    "Book {} already has a preview chapter; \
                     the first added chapter is marked as preview too",
                    book_id
                );
            }
            (max, 0)
        }
    };

    let mut chapters = Vec::with_capacity(drafts.len());
    for draft in drafts {
        let chapter_number = offset.checked_add(draft.chapter_number).ok_or_else(|| {
            StoreError::ChapterNumberOverflow {
                book_id: book_id.to_string(),
                existing: offset,
                added: draft.chapter_number,
            }
        })?;

        chapters.push(StoredChapter {
            id: Uuid::new_v4(),
            book_id: book_id.to_string(),
            chapter_number,
            title: draft.title,
            content: draft.content,
            anchor_id: draft.anchor_id,
            word_count: draft.word_count,
            is_preview: draft.is_preview,
        });
    }

    store.commit(
        book_id,
        ChapterBatch {
            delete_existing: mode == ImportMode::Replace,
            insert: chapters.clone(),
        },
    )?;

    info!(
        "Wrote {} chapters to book {} ({} mode, {} removed)",
        chapters.len(),
        book_id,
        mode,
        removed
    );

    Ok(ImportReport {
        mode,
        removed,
        chapters,
    })
}

/// Parse a manuscript and write its chapters. A parse failure never touches
/// the store.
pub fn import_manuscript<S: ChapterStore + ?Sized>(
    store: &mut S,
    book_id: &str,
    file: &ManuscriptFile,
    mode: ImportMode,
    options: &ParseOptions,
) -> Result<ImportReport, ImportError> {
    let drafts = parse_manuscript(&file.bytes, file.kind, options)?;
    Ok(write_batch(store, book_id, drafts, mode)?)
}
