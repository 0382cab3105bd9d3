//! Heading detection for manuscript lines.
//!
//! Three patterns are tried in a fixed order and the first match wins, so a
//! line is never classified as more than one kind of heading.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// A recognized heading line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Heading {
    /// `Chapter 3`, `CHAPTER IV: The Storm`
    NumberedChapter {
        number: String,
        fragment: Option<String>,
    },
    /// `Prologue`, `Epilogue. After`, ...
    NamedSection {
        name: String,
        fragment: Option<String>,
    },
    /// `# Title` or `## Title`
    MarkdownHeading { text: String },
}

impl Heading {
    pub fn title(&self) -> String {
        match self {
            Heading::NumberedChapter { number, fragment } => match fragment {
                Some(fragment) => format!("Chapter {}: {}", number, fragment),
                None => format!("Chapter {}", number),
            },
            Heading::NamedSection { name, fragment } => {
                let name = title_case(name);
                match fragment {
                    Some(fragment) => format!("{}: {}", name, fragment),
                    None => name,
                }
            }
            Heading::MarkdownHeading { text } => text.clone(),
        }
    }
}

type Builder = fn(&Captures) -> Heading;

const NUMBERED_CHAPTER: &str = r"(?i)^(?:Chapter|CHAPTER)\s+(\d+|[IVXLC]+)(?:[:.\s]+(.*))?$";
const NAMED_SECTION: &str =
    r"(?i)^(Prologue|Epilogue|Interlude|Introduction|Preface)(?:[:.\s]+(.*))?$";
const MARKDOWN_HEADING: &str = r"^#{1,2}\s+(.+)$";

static SHARED: LazyLock<HeadingMatcher> = LazyLock::new(|| {
    HeadingMatcher::new().expect("built-in heading patterns are valid regexes")
});

/// Ordered list of (pattern, builder) pairs
pub struct HeadingMatcher {
    rules: Vec<(Regex, Builder)>,
}

impl HeadingMatcher {
    fn new() -> Result<Self, regex::Error> {
        let rules: Vec<(Regex, Builder)> = vec![
            (Regex::new(NUMBERED_CHAPTER)?, numbered_chapter as Builder),
            (Regex::new(NAMED_SECTION)?, named_section as Builder),
            (Regex::new(MARKDOWN_HEADING)?, markdown_heading as Builder),
        ];
        Ok(Self { rules })
    }

    /// The matcher for the built-in patterns, compiled on first use.
    pub fn shared() -> &'static Self {
        &SHARED
    }

    /// Classify an already-trimmed line. `None` means plain body text.
    pub fn classify(&self, line: &str) -> Option<Heading> {
        self.rules
            .iter()
            .find_map(|(re, build)| re.captures(line).map(|caps| build(&caps)))
    }
}

fn numbered_chapter(caps: &Captures) -> Heading {
    Heading::NumberedChapter {
        number: caps[1].to_string(),
        fragment: fragment(caps),
    }
}

fn named_section(caps: &Captures) -> Heading {
    Heading::NamedSection {
        name: caps[1].to_string(),
        fragment: fragment(caps),
    }
}

fn markdown_heading(caps: &Captures) -> Heading {
    Heading::MarkdownHeading {
        text: caps[1].trim().to_string(),
    }
}

fn fragment(caps: &Captures) -> Option<String> {
    caps.get(2)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
