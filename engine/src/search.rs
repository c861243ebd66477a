use crate::index::{DocId, Index, Weight};
use crate::snippet::{self, Snippet};
use crate::tokenizer::Tokenize;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Collapse repeated query tokens before lookup. Off by default, in which
    /// case a token given twice contributes its weight twice.
    pub dedup_terms: bool,
    /// Keep only the top `limit` hits. Applied before snippets are cut.
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub title: String,
    pub url: String,
    pub weight: Weight,
    pub matched_terms: Vec<String>,
    pub snippet: Snippet,
}

/// Per-document accumulator, private to one `search` call.
#[derive(Debug)]
struct AggregatedResult {
    doc_id: DocId,
    weight_sum: Weight,
    matched_terms: Vec<String>,
}

/// Rank every document sharing at least one term with `query`.
///
/// Hits are ordered by summed posting weight, highest first, ties broken by
/// ascending `doc_id`. Unknown terms contribute nothing; a query with no known
/// terms returns an empty list.
pub fn search(index: &Index, tokenizer: &dyn Tokenize, query: &str, options: &SearchOptions) -> Vec<SearchHit> {
    let mut tokens: Vec<String> = tokenizer.tokenize(query).into_iter().map(|t| t.to_lowercase()).collect();
    if options.dedup_terms {
        let mut seen = HashSet::new();
        tokens.retain(|t| seen.insert(t.clone()));
    }

    let mut aggregated: HashMap<DocId, AggregatedResult> = HashMap::new();
    for token in &tokens {
        let Some(postings) = index.postings(token) else { continue };
        for entry in postings {
            let item = aggregated.entry(entry.doc_id).or_insert_with(|| AggregatedResult {
                doc_id: entry.doc_id,
                weight_sum: 0,
                matched_terms: Vec::new(),
            });
            item.weight_sum += entry.weight;
            item.matched_terms.push(entry.term.clone());
        }
    }

    let mut ranked: Vec<AggregatedResult> = aggregated.into_values().collect();
    ranked.sort_by(|a, b| b.weight_sum.cmp(&a.weight_sum).then(a.doc_id.cmp(&b.doc_id)));
    if let Some(limit) = options.limit {
        ranked.truncate(limit);
    }
    tracing::debug!(query, tokens = tokens.len(), hits = ranked.len(), "search complete");

    ranked
        .into_iter()
        .map(|r| {
            let doc = index.document(r.doc_id).unwrap_or_else(|| {
                panic!("posting references doc_id {} outside the sealed document store", r.doc_id)
            });
            let snippet = match r.matched_terms.first() {
                Some(term) => snippet::extract(&doc.content, term),
                None => Snippet::TermNotFound,
            };
            SearchHit {
                doc_id: r.doc_id,
                title: doc.title.clone(),
                url: doc.url.clone(),
                weight: r.weight_sum,
                matched_terms: r.matched_terms,
                snippet,
            }
        })
        .collect()
}
