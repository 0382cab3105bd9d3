use clap::{Parser, Subcommand, ValueEnum};
use manuscript2chapters::{FileKind, ImportMode};
use std::path::PathBuf;

/// Split manuscripts into chapters and import them into a chapter store
#[derive(Parser, Debug)]
#[command(name = "manuscript2chapters", version, about)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a manuscript and write the chapter drafts
    Parse {
        /// Path to the manuscript (.txt, .md or .docx)
        input: PathBuf,

        /// Declared file kind; inferred from the extension when omitted
        #[arg(short, long, value_parser = parse_kind)]
        kind: Option<FileKind>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Output path. JSON goes to stdout when omitted; Markdown defaults to
        /// a directory or file named after the manuscript.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// With markdown output, write one combined file instead of a directory
        #[arg(short, long, default_value_t = false)]
        single: bool,
    },

    /// Parse a manuscript and store its chapters for a book
    Import {
        /// Path to the manuscript (.txt, .md or .docx)
        input: PathBuf,

        /// Book the chapters belong to
        #[arg(short, long)]
        book: String,

        /// `add` appends after existing chapters, `replace` discards them first
        #[arg(short, long, value_enum, default_value_t = ImportMode::Add)]
        mode: ImportMode,

        /// Declared file kind; inferred from the extension when omitted
        #[arg(short, long, value_parser = parse_kind)]
        kind: Option<FileKind>,

        /// Chapter store (JSON file); overrides the config
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// Show the stored chapters of a book
    List {
        #[arg(short, long)]
        book: String,

        /// Chapter store (JSON file); overrides the config
        #[arg(long)]
        store: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
}

fn parse_kind(s: &str) -> Result<FileKind, String> {
    s.parse().map_err(|e: manuscript2chapters::ParseError| e.to_string())
}
