//! Text column vectorization
//!
//! Builds a bounded, frequency-ranked vocabulary per text column and turns each
//! retained term into a count feature named `<column>_<term>`.

use std::collections::{HashMap, HashSet};

use tracing::info;

use super::values::is_numeric;

/// Default maximum number of terms kept per column
pub const DEFAULT_VOCABULARY_LIMIT: usize = 30;

/// Tokens of this length or shorter are discarded
const MIN_TOKEN_LEN: usize = 2;

/// English and French function words, SMS abbreviations and a few domain terms
const DEFAULT_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "can't", "cannot", "could", "couldn't", "did", "didn't", "do", "does",
    "doesn't", "doing", "don't", "down", "during", "each", "few", "for", "from", "further", "had",
    "hadn't", "has", "hasn't", "have", "haven't", "having", "he", "he'd", "he'll", "he's", "her",
    "here", "here's", "hers", "herself", "him", "himself", "his", "how", "how's", "i", "i'd",
    "i'll", "i'm", "i've", "if", "in", "into", "is", "isn't", "it", "it's", "its", "itself",
    "let's", "me", "more", "most", "mustn't", "my", "myself", "no", "nor", "not", "of", "off",
    "on", "once", "only", "or", "other", "ought", "our", "ours", "ourselves", "out", "over", "own",
    "same", "shan't", "she", "she'd", "she'll", "she's", "should", "shouldn't", "so", "some",
    "such", "than", "that", "that's", "the", "their", "theirs", "them", "themselves", "then",
    "there", "there's", "these", "they", "they'd", "they'll", "they're", "they've", "this",
    "those", "through", "to", "too", "under", "until", "up", "very", "was", "wasn't", "we", "we'd",
    "we'll", "we're", "we've", "were", "weren't", "what", "what's", "when", "when's", "where",
    "where's", "which", "while", "who", "who's", "whom", "why", "why's", "with", "won't", "would",
    "wouldn't", "you", "you'd", "you'll", "you're", "you've", "your", "yours", "yourself",
    "yourselves",
    // French
    "le", "la", "les", "de", "des", "du", "un", "une", "et", "est", "en", "que", "qui", "dans",
    "pour", "sur", "par", "avec", "pas", "ce", "cette", "ces", "mais", "ou", "si", "ils", "elles",
    "nous", "vous", "il", "elle", "ne", "se", "au", "aux", "leur", "sa", "son", "ses", "mon", "ma",
    "mes", "ton", "ta", "tes", "votre", "notre",
    // SMS style
    "u", "ur", "4", "2", "im", "dont", "cant", "wont", "didnt", "isnt", "arent", "aint", "ill",
    "ive", "id", "youre", "youll", "youd", "shes", "hes", "thatll", "don", "didn", "won", "isn",
    "aren", "couldn", "shouldn", "wouldn", "hasn", "haven", "doesn", "weren", "m", "s", "t", "ll",
    "ve", "re", "d", "just", "now", "know", "got", "get", "will", "go", "ok", "lt", "gt", "amp",
    // Domain
    "free", "call",
];

/// Immutable stop-word set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl Default for StopWords {
    fn default() -> Self {
        Self::new(DEFAULT_STOP_WORDS.iter().copied())
    }
}

impl StopWords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(|w| w.into().to_lowercase()).collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Replace CSV-hostile punctuation with spaces and collapse whitespace.
pub fn clean_text(text: &str) -> String {
    text.replace([',', ';', '"', '\'', '`'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Clean, lowercase and split on runs of non-word characters.
pub fn tokenize(text: &str) -> Vec<String> {
    clean_text(text)
        .to_lowercase()
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Ordered vocabulary for one text column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    terms: Vec<String>,
}

impl Vocabulary {
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Count features produced for one text column
#[derive(Debug, Clone)]
pub struct TermFeature {
    pub term: String,
    /// Occurrences of the term in each row
    pub counts: Vec<f64>,
}

/// Text vectorizer with an injected stop-word set
#[derive(Debug, Clone)]
pub struct TextVectorizer {
    stop_words: StopWords,
    limit: usize,
}

impl Default for TextVectorizer {
    fn default() -> Self {
        Self::new(StopWords::default(), DEFAULT_VOCABULARY_LIMIT)
    }
}

impl TextVectorizer {
    pub fn new(stop_words: StopWords, limit: usize) -> Self {
        Self { stop_words, limit }
    }

    fn keeps(&self, token: &str) -> bool {
        token.len() > MIN_TOKEN_LEN && !is_numeric(token) && !self.stop_words.contains(token)
    }

    /// Build the vocabulary: top terms by frequency, ties in encounter order.
    pub fn build_vocabulary<S: AsRef<str>>(&self, texts: &[S]) -> Vocabulary {
        let mut order: Vec<(String, usize)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for text in texts {
            for token in tokenize(text.as_ref()) {
                if !self.keeps(&token) {
                    continue;
                }
                match positions.get(&token) {
                    Some(&pos) => order[pos].1 += 1,
                    None => {
                        positions.insert(token.clone(), order.len());
                        order.push((token, 1));
                    }
                }
            }
        }

        // Stable sort keeps encounter order among equal counts
        order.sort_by(|a, b| b.1.cmp(&a.1));
        let terms: Vec<String> = order
            .into_iter()
            .take(self.limit)
            .map(|(term, _)| term)
            .collect();

        info!("Built vocabulary (limit {}): {:?}", self.limit, terms);
        Vocabulary { terms }
    }

    /// Vectorize a column: one count feature per vocabulary term.
    pub fn vectorize<S: AsRef<str>>(&self, texts: &[S]) -> Vec<TermFeature> {
        let vocabulary = self.build_vocabulary(texts);
        let tokenized: Vec<Vec<String>> = texts.iter().map(|t| tokenize(t.as_ref())).collect();

        vocabulary
            .terms
            .into_iter()
            .map(|term| {
                let counts = tokenized
                    .iter()
                    .map(|tokens| tokens.iter().filter(|t| **t == term).count() as f64)
                    .collect();
                TermFeature { term, counts }
            })
            .collect()
    }
}
