use crate::docx_reader::DocxExtractor;
use crate::error::ParseError;
use crate::text_reader::PlainTextExtractor;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Declared kind of an uploaded manuscript
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Text,
    Markdown,
    Docx,
    Epub,
    Pdf,
}

impl FileKind {
    /// Infer the kind from a file extension (`txt`, `md`, `docx`, ...)
    pub fn from_path(path: &Path) -> Result<Self, ParseError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_default();
        ext.parse()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Text => "text",
            FileKind::Markdown => "markdown",
            FileKind::Docx => "docx",
            FileKind::Epub => "epub",
            FileKind::Pdf => "pdf",
        }
    }
}

impl FromStr for FileKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(FileKind::Text),
            "markdown" | "md" => Ok(FileKind::Markdown),
            "docx" => Ok(FileKind::Docx),
            "epub" => Ok(FileKind::Epub),
            "pdf" => Ok(FileKind::Pdf),
            _ => Err(ParseError::UnsupportedFormat {
                kind: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw manuscript bytes plus their declared kind. Lives for one parse call.
pub struct ManuscriptFile {
    pub bytes: Vec<u8>,
    pub kind: FileKind,
}

impl ManuscriptFile {
    pub fn new(bytes: Vec<u8>, kind: FileKind) -> Self {
        Self { bytes, kind }
    }

    /// Read a manuscript from disk, inferring its kind from the extension
    /// when none is declared.
    pub fn open(path: &Path, kind: Option<FileKind>) -> anyhow::Result<Self> {
        use anyhow::Context;

        let kind = match kind {
            Some(kind) => kind,
            None => FileKind::from_path(path)?,
        };
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read manuscript: {}", path.display()))?;
        Ok(Self { bytes, kind })
    }
}

/// Trait for turning a manuscript buffer into plain text (one impl per format)
pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ParseError>;
}

/// Pick the extractor for a declared kind. EPUB and PDF are rejected before
/// any byte is looked at.
pub fn extractor_for(kind: FileKind) -> Result<Box<dyn TextExtractor>, ParseError> {
    match kind {
        FileKind::Text | FileKind::Markdown => Ok(Box::new(PlainTextExtractor)),
        FileKind::Docx => Ok(Box::new(DocxExtractor)),
        FileKind::Epub | FileKind::Pdf => Err(ParseError::UnsupportedFormat {
            kind: kind.to_string(),
        }),
    }
}
