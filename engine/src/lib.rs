pub mod builder;
pub mod context;
pub mod corpus;
pub mod index;
pub mod search;
pub mod snippet;
pub mod tokenizer;

pub use builder::{build, build_from_path, IndexBuilder, CONTENT_WEIGHT, TITLE_WEIGHT};
pub use context::{IndexCell, IndexContext};
pub use index::{DocId, Document, Index, IndexStats, PostingEntry, Weight};
pub use search::{search, SearchHit, SearchOptions};
pub use snippet::Snippet;
pub use tokenizer::{TextTokenizer, Tokenize, TokenizerConfig};
