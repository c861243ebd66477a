use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use unicode_normalization::UnicodeNormalization;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

lazy_static! {
    static ref RE: Regex = Regex::new(r"(?u)\p{L}[\p{L}\p{N}_']*").expect("valid regex");
    static ref STOPWORDS: HashSet<String> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","can't","cannot","could","couldn't",
            "did","didn't","do","does","doesn't","doing","don't","down","during",
            "each","few","for","from","further",
            "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
            "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
            "let's","me","more","most","mustn't","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
            "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
            "under","until","up","very",
            "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
            "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves"
        ];
        words.iter().map(|w| w.to_string()).collect()
    };
}

/// Turns text into an ordered sequence of normalized tokens.
///
/// Index build and query time must go through the same implementation,
/// otherwise query tokens will not line up with indexed terms.
pub trait Tokenize: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

#[derive(Debug, Clone, Default)]
pub struct TokenizerConfig {
    /// Apply the English Snowball stemmer to every token.
    pub stem: bool,
    /// One stop word per line; replaces the built-in list when set.
    pub stopwords_path: Option<PathBuf>,
}

#[derive(Default)]
pub struct TextTokenizer {
    stemmer: Option<Stemmer>,
    /// `None` means the built-in list.
    stopwords: Option<HashSet<String>>,
}

impl TextTokenizer {
    pub fn new(config: &TokenizerConfig) -> Result<Self> {
        let stemmer = config.stem.then(|| Stemmer::create(Algorithm::English));
        let stopwords = match &config.stopwords_path {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading stop words from {}", path.display()))?;
                let words: HashSet<String> = text
                    .lines()
                    .map(|l| l.trim().to_lowercase())
                    .filter(|l| !l.is_empty())
                    .collect();
                tracing::debug!(count = words.len(), path = %path.display(), "loaded stop words");
                Some(words)
            }
            None => None,
        };
        Ok(Self { stemmer, stopwords })
    }

    fn is_stopword(&self, token: &str) -> bool {
        match &self.stopwords {
            Some(words) => words.contains(token),
            None => STOPWORDS.contains(token),
        }
    }
}

impl Tokenize for TextTokenizer {
    /// NFKC normalization, lowercase, stop word removal and optional stemming.
    fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized = text.nfkc().collect::<String>().to_lowercase();
        let mut tokens = Vec::new();
        for mat in RE.find_iter(&normalized) {
            let token = mat.as_str();
            if self.is_stopword(token) { continue; }
            match &self.stemmer {
                Some(stemmer) => tokens.push(stemmer.stem(token).into_owned()),
                None => tokens.push(token.to_string()),
            }
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_token_order_and_repeats() {
        let t = TextTokenizer::default().tokenize("Boost threads, boost ASIO");
        assert_eq!(t, vec!["boost", "threads", "boost", "asio"]);
    }

    #[test]
    fn stems_when_enabled() {
        let config = TokenizerConfig { stem: true, ..Default::default() };
        let t = TextTokenizer::new(&config).unwrap().tokenize("Running, runner's run!");
        assert!(t.iter().any(|w| w == "run"));
    }
}
