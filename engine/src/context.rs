use crate::builder::build_from_path;
use crate::index::{Document, DocId, Index, IndexStats};
use crate::search::{search, SearchHit, SearchOptions};
use crate::tokenizer::{TextTokenizer, Tokenize, TokenizerConfig};
use anyhow::Result;
use parking_lot::Mutex;
use std::path::Path;
use std::sync::{Arc, OnceLock};

/// Read-only handle used to answer queries after the build.
///
/// Keeps the index together with the tokenizer that built it, so query text
/// always goes through the same pipeline as the documents did.
pub struct IndexContext {
    index: Index,
    tokenizer: Arc<dyn Tokenize>,
}

impl IndexContext {
    pub fn new(index: Index, tokenizer: Arc<dyn Tokenize>) -> Self {
        Self { index, tokenizer }
    }

    /// Build the default tokenizer from `config` and index the corpus at `path`.
    pub fn open<P: AsRef<Path>>(path: P, config: &TokenizerConfig) -> Result<Self> {
        let tokenizer: Arc<dyn Tokenize> = Arc::new(TextTokenizer::new(config)?);
        let index = build_from_path(path, tokenizer.as_ref())?;
        Ok(Self::new(index, tokenizer))
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn tokenizer(&self) -> &dyn Tokenize {
        self.tokenizer.as_ref()
    }

    pub fn document(&self, id: DocId) -> Option<&Document> {
        self.index.document(id)
    }

    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }

    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        self.search_with(query, &SearchOptions::default())
    }

    pub fn search_with(&self, query: &str, options: &SearchOptions) -> Vec<SearchHit> {
        search(&self.index, self.tokenizer.as_ref(), query, options)
    }
}

/// Holds at most one [`IndexContext`], created on first access.
///
/// Reads after initialization are lock-free. Construction is serialized by a
/// mutex and the slot is re-checked under it, so racing first callers still
/// produce exactly one build.
#[derive(Default)]
pub struct IndexCell {
    slot: OnceLock<Arc<IndexContext>>,
    init: Mutex<()>,
}

impl IndexCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<Arc<IndexContext>> {
        self.slot.get().cloned()
    }

    /// Return the shared context, running `build` if no context exists yet.
    /// A failed build leaves the cell empty.
    pub fn get_or_try_init<F>(&self, build: F) -> Result<Arc<IndexContext>>
    where
        F: FnOnce() -> Result<IndexContext>,
    {
        if let Some(ctx) = self.slot.get() {
            return Ok(ctx.clone());
        }
        let _guard = self.init.lock();
        if let Some(ctx) = self.slot.get() {
            return Ok(ctx.clone());
        }
        let ctx = Arc::new(build()?);
        // Only writer while holding `init`, so the slot is still empty here.
        let _ = self.slot.set(ctx.clone());
        Ok(ctx)
    }
}
