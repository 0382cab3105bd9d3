use crate::cli::{Cli, Commands, OutputFormat};
use anyhow::{Context, Result};
use log::info;
use manuscript2chapters::{
    import_manuscript, parse_manuscript, ChapterDraft, ChapterStore, Config, FileKind,
    JsonFileStore, ManuscriptFile,
};
use std::fs;
use std::path::{Path, PathBuf};

pub fn run(cli: &Cli) -> Result<()> {
    let config = match cli.config {
        Some(ref path) => Config::load(path)?,
        None => Config::default(),
    };

    match &cli.command {
        Commands::Parse {
            input,
            kind,
            format,
            output,
            single,
        } => parse(&config, input, *kind, *format, output.as_deref(), *single),

        Commands::Import {
            input,
            book,
            mode,
            kind,
            store,
        } => {
            let file = ManuscriptFile::open(input, *kind)?;
            let path = store.clone().unwrap_or_else(|| config.store.clone());
            let mut store = JsonFileStore::new(path);
            let report = import_manuscript(&mut store, book, &file, *mode, &config.parser)
                .with_context(|| format!("Failed to import {}", input.display()))?;

            let first = report.chapters.first().map(|c| c.chapter_number).unwrap_or(0);
            let last = report.chapters.last().map(|c| c.chapter_number).unwrap_or(0);
            println!(
                "Imported {} chapters into {} as chapters {}-{} ({} mode, {} removed) in {}",
                report.chapters.len(),
                book,
                first,
                last,
                report.mode,
                report.removed,
                store.path().display()
            );
            Ok(())
        }

        Commands::List { book, store } => {
            let store = JsonFileStore::new(store.clone().unwrap_or_else(|| config.store.clone()));
            let chapters = store
                .chapters(book)
                .with_context(|| format!("Failed to read store: {}", store.path().display()))?;

            for chapter in &chapters {
                println!(
                    "{:>3}. {} [{}] {} words{}",
                    chapter.chapter_number,
                    chapter.title,
                    chapter.anchor_id,
                    chapter.word_count,
                    if chapter.is_preview { " (preview)" } else { "" }
                );
            }
            info!("{} chapters stored for {}", chapters.len(), book);
            Ok(())
        }
    }
}

fn parse(
    config: &Config,
    input: &Path,
    kind: Option<FileKind>,
    format: OutputFormat,
    output: Option<&Path>,
    single: bool,
) -> Result<()> {
    let file = ManuscriptFile::open(input, kind)?;
    let chapters = parse_manuscript(&file.bytes, file.kind, &config.parser)
        .with_context(|| format!("Failed to parse {}", input.display()))?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&chapters)?;
            match output {
                Some(path) => {
                    create_parent(path)?;
                    fs::write(path, json + "\n").with_context(|| {
                        format!("Failed to write output file: {}", path.display())
                    })?;
                }
                None => println!("{}", json),
            }
        }
        OutputFormat::Markdown => {
            let output_path = resolve_output_path(input, output, single)?;
            if single {
                write_single_file(&output_path, &chapters)?;
            } else {
                write_folder(&output_path, &chapters)?;
            }
            info!("Wrote {} chapters to {}", chapters.len(), output_path.display());
        }
    }

    Ok(())
}

fn resolve_output_path(input: &Path, output: Option<&Path>, single: bool) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.to_path_buf());
    }

    let stem = input
        .file_stem()
        .context("Input file has no name")?
        .to_string_lossy();

    if single {
        Ok(PathBuf::from(format!("{}.md", stem)))
    } else {
        Ok(PathBuf::from(stem.as_ref()))
    }
}

fn chapter_filename(chapter: &ChapterDraft) -> String {
    format!("chapter-{:02}.md", chapter.chapter_number)
}

fn chapter_markdown(chapter: &ChapterDraft) -> String {
    format!("# {}\n\n{}\n", chapter.title, chapter.content)
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn write_single_file(output_path: &Path, chapters: &[ChapterDraft]) -> Result<()> {
    let mut content = String::new();

    for (i, chapter) in chapters.iter().enumerate() {
        if i > 0 {
            content.push_str("\n---\n\n");
        }
        content.push_str(&chapter_markdown(chapter));
    }

    create_parent(output_path)?;
    fs::write(output_path, &content)
        .with_context(|| format!("Failed to write output file: {}", output_path.display()))?;

    Ok(())
}

fn write_folder(output_dir: &Path, chapters: &[ChapterDraft]) -> Result<()> {
    fs::create_dir_all(output_dir)?;

    for chapter in chapters {
        let path = output_dir.join(chapter_filename(chapter));
        fs::write(&path, chapter_markdown(chapter))
            .with_context(|| format!("Failed to write chapter: {}", path.display()))?;
    }

    // README.md with the table of contents
    let mut readme = String::from("## Table of Contents\n\n");
    for chapter in chapters {
        readme.push_str(&format!(
            "{}. [{}]({}) ({} words)\n",
            chapter.chapter_number,
            chapter.title,
            chapter_filename(chapter),
            chapter.word_count
        ));
    }
    readme.push('\n');

    fs::write(output_dir.join("README.md"), &readme)
        .with_context(|| "Failed to write README.md")?;

    Ok(())
}
