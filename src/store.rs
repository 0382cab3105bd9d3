use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A chapter after it has been written to a store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredChapter {
    pub id: Uuid,
    pub book_id: String,
    pub title: String,
    pub content: String,
    pub chapter_number: u32,
    pub anchor_id: String,
    pub word_count: usize,
    pub is_preview: bool,
}

/// One unit of work against a book's chapters, applied all-or-nothing
#[derive(Debug, Clone, Default)]
pub struct ChapterBatch {
    /// Remove every existing chapter of the book before inserting
    pub delete_existing: bool,
    pub insert: Vec<StoredChapter>,
}

pub trait ChapterStore {
    /// All chapters of a book, ordered by chapter number
    fn chapters(&self, book_id: &str) -> Result<Vec<StoredChapter>, StoreError>;

    /// Apply a batch. Implementations must leave the book unchanged on error.
    fn commit(&mut self, book_id: &str, batch: ChapterBatch) -> Result<(), StoreError>;
}

/// In-process store keyed by book id
#[derive(Debug, Default)]
pub struct MemoryStore {
    books: HashMap<String, Vec<StoredChapter>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChapterStore for MemoryStore {
    fn chapters(&self, book_id: &str) -> Result<Vec<StoredChapter>, StoreError> {
        let mut chapters = self.books.get(book_id).cloned().unwrap_or_default();
        chapters.sort_by_key(|c| c.chapter_number);
        Ok(chapters)
    }

    fn commit(&mut self, book_id: &str, batch: ChapterBatch) -> Result<(), StoreError> {
        let chapters = self.books.entry(book_id.to_string()).or_default();
        if batch.delete_existing {
            chapters.clear();
        }
        chapters.extend(batch.insert);
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    chapters: Vec<StoredChapter>,
}

/// All books' chapters in one JSON file.
///
/// Commits write the whole document to a sibling temp file and rename it over
/// the original, so a crash mid-commit leaves the previous state intact.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<StoreDocument, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(StoreDocument::default()),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, doc: &StoreDocument) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut tmp_name = self.path.clone().into_os_string();
        tmp_name.push(".tmp");
        let tmp = PathBuf::from(tmp_name);

        fs::write(&tmp, serde_json::to_vec_pretty(doc)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl ChapterStore for JsonFileStore {
    fn chapters(&self, book_id: &str) -> Result<Vec<StoredChapter>, StoreError> {
        let mut chapters: Vec<StoredChapter> = self
            .load()?
            .chapters
            .into_iter()
            .filter(|c| c.book_id == book_id)
            .collect();
        chapters.sort_by_key(|c| c.chapter_number);
        Ok(chapters)
    }

    fn commit(&mut self, book_id: &str, batch: ChapterBatch) -> Result<(), StoreError> {
        let mut doc = self.load()?;
        if batch.delete_existing {
            doc.chapters.retain(|c| c.book_id != book_id);
        }
        doc.chapters.extend(batch.insert);
        self.save(&doc)
    }
}
