//! Turns a tree of HTML pages into corpus records for the index builder.

use anyhow::{anyhow, Context, Result};
use engine::corpus::write_record;
use scraper::{Html, Selector};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use url::Url;
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanDoc {
    pub title: String,
    pub content: String,
    pub url: String,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanSummary {
    pub written: usize,
    pub skipped: usize,
}

/// All `.html` files under `root`, sorted so output order is reproducible.
pub fn enum_html_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(anyhow!("input directory {} does not exist", root.display()));
    }
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("html"))
        .collect();
    files.sort();
    Ok(files)
}

/// Contents of the first `<title>`, or `None` if the page has none.
pub fn parse_title(doc: &Html) -> Option<String> {
    let sel = Selector::parse("title").ok()?;
    doc.select(&sel).next().map(|n| n.text().collect::<String>())
}

/// Every text node of the page with markup removed. Neighbouring nodes are
/// separated by a space and whitespace runs, line breaks included, collapse
/// to one space.
pub fn parse_content(doc: &Html) -> String {
    doc.root_element()
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// `base` joined with the file's path relative to `root`.
pub fn parse_url(base: &Url, root: &Path, file: &Path) -> Result<String> {
    let rel = file
        .strip_prefix(root)
        .with_context(|| format!("{} is not under {}", file.display(), root.display()))?;
    let rel = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    Ok(base.join(&rel)?.to_string())
}

pub fn clean_html(html: &str, base: &Url, root: &Path, file: &Path) -> Result<Option<CleanDoc>> {
    let doc = Html::parse_document(html);
    let Some(title) = parse_title(&doc) else {
        return Ok(None);
    };
    let content = parse_content(&doc);
    let url = parse_url(base, root, file)?;
    Ok(Some(CleanDoc { title, content, url }))
}

/// Clean every page under `root` and write one corpus record per page.
pub fn clean_dir<W: Write>(root: &Path, base: &Url, out: &mut W) -> Result<CleanSummary> {
    let mut summary = CleanSummary::default();
    for file in enum_html_files(root)? {
        let html = match fs::read(&file) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                tracing::warn!(file = %file.display(), error = %e, "skipping unreadable file");
                summary.skipped += 1;
                continue;
            }
        };
        match clean_html(&html, base, root, &file)? {
            Some(doc) => {
                write_record(out, &doc.title, &doc.content, &doc.url)
                    .context("writing corpus record")?;
                summary.written += 1;
                if summary.written % 100 == 0 {
                    tracing::info!(written = summary.written, "progress");
                }
            }
            None => {
                tracing::debug!(file = %file.display(), "no <title>, skipping");
                summary.skipped += 1;
            }
        }
    }
    Ok(summary)
}
