use crate::{config::VectorizerConfig, vectorizer::{stop_words::StopWords, token::TokenFrequency}};

/// Word tokenizer with stop word removal and n-gram expansion.
///
/// A token is a maximal run of word characters (alphanumeric or `_`) at least
/// two characters long. Stop words are dropped before n-grams are formed, and
/// n-gram parts are joined with a single space.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    stop_words: StopWords,
    ngram_range: (usize, usize),
    lowercase: bool,
}

impl Tokenizer {
    pub fn new(stop_words: StopWords, ngram_range: (usize, usize), lowercase: bool) -> Self {
        let min_n = ngram_range.0.max(1);
        Self {
            stop_words,
            ngram_range: (min_n, ngram_range.1.max(min_n)),
            lowercase,
        }
    }

    pub fn from_config(config: &VectorizerConfig) -> Self {
        let stop_words = if config.use_stop_words { StopWords::english() } else { StopWords::none() };
        Self::new(stop_words, config.ngram_range, config.lowercase)
    }

    /// Split into word tokens, stop words removed
    pub fn words(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase { text.to_lowercase() } else { text.to_string() };
        text.split(|c: char| !is_word_char(c))
            .filter(|w| w.chars().nth(1).is_some())
            .filter(|w| !self.stop_words.contains(w))
            .map(str::to_string)
            .collect()
    }

    /// All n-gram terms of `text` in document order
    pub fn terms(&self, text: &str) -> Vec<String> {
        let words = self.words(text);
        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::with_capacity(words.len() * (max_n - min_n + 1));
        for n in min_n..=max_n {
            if n == 1 {
                terms.extend(words.iter().cloned());
            } else {
                terms.extend(words.windows(n).map(|gram| gram.join(" ")));
            }
        }
        terms
    }

    /// Term counts of one document
    pub fn token_frequency(&self, text: &str) -> TokenFrequency {
        let mut freq = TokenFrequency::new();
        freq.add_tokens(&self.terms(text));
        freq
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::from_config(&VectorizerConfig::default())
    }
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
