use serde::Serialize;
use std::collections::HashMap;

pub type DocId = u64;
pub type Weight = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub id: DocId,
    pub title: String,
    pub content: String,
    pub url: String,
}

/// One (document, term) association recorded at build time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostingEntry {
    pub doc_id: DocId,
    pub term: String,
    pub weight: Weight,
}

/// Forward index. `documents[i].id == i` for every position.
pub type DocumentStore = Vec<Document>;

/// Inverted index. Each list is in document ingestion order with at most one
/// entry per document.
pub type TermIndex = HashMap<String, Vec<PostingEntry>>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub num_docs: usize,
    pub num_terms: usize,
    pub num_postings: usize,
    pub skipped_records: usize,
}

/// Sealed forward + inverted index.
///
/// Only produced by [`crate::IndexBuilder::seal`]. There is no way to mutate
/// it afterwards, which is what lets any number of query threads share it
/// without locking. A `DocId` read from a posting is therefore always a valid
/// position in the document store.
#[derive(Debug)]
pub struct Index {
    documents: Box<[Document]>,
    terms: TermIndex,
    skipped_records: usize,
}

impl Index {
    pub(crate) fn sealed(documents: DocumentStore, terms: TermIndex, skipped_records: usize) -> Self {
        debug_assert!(documents.iter().enumerate().all(|(i, d)| d.id == i as DocId));
        Self { documents: documents.into_boxed_slice(), terms, skipped_records }
    }

    pub fn document(&self, id: DocId) -> Option<&Document> {
        usize::try_from(id).ok().and_then(|i| self.documents.get(i))
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Postings for an already-normalized term.
    pub fn postings(&self, term: &str) -> Option<&[PostingEntry]> {
        self.terms.get(term).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            num_docs: self.documents.len(),
            num_terms: self.terms.len(),
            num_postings: self.terms.values().map(Vec::len).sum(),
            skipped_records: self.skipped_records,
        }
    }
}
