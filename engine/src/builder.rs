use crate::corpus::parse_record;
use crate::index::{DocId, Document, DocumentStore, Index, PostingEntry, TermIndex, Weight};
use crate::tokenizer::Tokenize;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Weight of one occurrence in the title.
pub const TITLE_WEIGHT: Weight = 10;
/// Weight of one occurrence in the content.
pub const CONTENT_WEIGHT: Weight = 1;

const PROGRESS_EVERY: usize = 50;

#[derive(Default, Clone, Copy)]
struct TermCounts {
    title: Weight,
    content: Weight,
}

impl TermCounts {
    fn weight(self) -> Weight {
        TITLE_WEIGHT * self.title + CONTENT_WEIGHT * self.content
    }
}

/// Write phase of the index. Consumed by [`IndexBuilder::seal`]; nothing can
/// be added after that.
pub struct IndexBuilder<'t> {
    tokenizer: &'t dyn Tokenize,
    documents: DocumentStore,
    terms: TermIndex,
    skipped: usize,
}

impl<'t> IndexBuilder<'t> {
    pub fn new(tokenizer: &'t dyn Tokenize) -> Self {
        Self { tokenizer, documents: Vec::new(), terms: HashMap::new(), skipped: 0 }
    }

    /// Parse one corpus line and index it. Malformed lines are counted and
    /// dropped.
    pub fn add_record(&mut self, line: &str) -> Option<DocId> {
        match parse_record(line) {
            Some(rec) => Some(self.add_document(rec.title, rec.content, rec.url)),
            None => {
                self.skipped += 1;
                tracing::debug!(
                    fields = line.split(crate::corpus::SEPARATOR).count(),
                    skipped = self.skipped,
                    "dropping malformed record"
                );
                None
            }
        }
    }

    pub fn add_document(&mut self, title: &str, content: &str, url: &str) -> DocId {
        let doc_id = self.documents.len() as DocId;

        let mut counts: HashMap<String, TermCounts> = HashMap::new();
        for token in self.tokenizer.tokenize(title) {
            counts.entry(token.to_lowercase()).or_default().title += 1;
        }
        for token in self.tokenizer.tokenize(content) {
            counts.entry(token.to_lowercase()).or_default().content += 1;
        }

        for (term, c) in counts {
            let entry = PostingEntry { doc_id, term: term.clone(), weight: c.weight() };
            self.terms.entry(term).or_default().push(entry);
        }

        self.documents.push(Document {
            id: doc_id,
            title: title.to_string(),
            content: content.to_string(),
            url: url.to_string(),
        });

        let n = self.documents.len();
        if n % PROGRESS_EVERY == 0 {
            tracing::debug!(indexed = n, "indexing progress");
        }
        doc_id
    }

    /// Index every line of `reader`. Lines are read as bytes so a bad
    /// encoding only degrades that record; I/O errors abort the build.
    pub fn ingest<R: BufRead>(&mut self, mut reader: R) -> Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let n = reader.read_until(b'\n', &mut buf).context("reading corpus")?;
            if n == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            self.add_record(&line);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn seal(self) -> Index {
        tracing::info!(
            num_docs = self.documents.len(),
            num_terms = self.terms.len(),
            skipped = self.skipped,
            "index sealed"
        );
        Index::sealed(self.documents, self.terms, self.skipped)
    }
}

/// Build a sealed index from a corpus stream.
pub fn build<R: BufRead>(reader: R, tokenizer: &dyn Tokenize) -> Result<Index> {
    let mut builder = IndexBuilder::new(tokenizer);
    builder.ingest(reader)?;
    Ok(builder.seal())
}

pub fn build_from_path<P: AsRef<Path>>(path: P, tokenizer: &dyn Tokenize) -> Result<Index> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("opening corpus {}", path.display()))?;
    build(BufReader::new(f), tokenizer).with_context(|| format!("building index from {}", path.display()))
}
