use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default cap on the fitted vocabulary
pub const DEFAULT_MAX_FEATURES: usize = 5000;
/// Default minimum document frequency for a term to be kept
pub const DEFAULT_MIN_DF: usize = 2;
/// Number of description characters folded into `combined_text`
pub const DEFAULT_DESCRIPTION_PREFIX_CHARS: usize = 200;

/// Vector space fitting parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    /// maximum vocabulary size, selected by corpus-wide term frequency
    pub max_features: usize,
    /// terms must occur in at least this many documents
    pub min_df: usize,
    /// inclusive (min_n, max_n) n-gram range
    pub ngram_range: (usize, usize),
    pub lowercase: bool,
    pub use_stop_words: bool,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            min_df: DEFAULT_MIN_DF,
            ngram_range: (1, 2),
            lowercase: true,
            use_stop_words: true,
        }
    }
}

impl VectorizerConfig {
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    pub fn with_min_df(mut self, min_df: usize) -> Self {
        self.min_df = min_df;
        self
    }

    /// n-gram bounds are clamped to at least 1 and kept ordered
    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Self {
        let min_n = min_n.max(1);
        self.ngram_range = (min_n, max_n.max(min_n));
        self
    }

    pub fn with_stop_words(mut self, enable: bool) -> Self {
        self.use_stop_words = enable;
        self
    }

    pub fn with_lowercase(mut self, enable: bool) -> Self {
        self.lowercase = enable;
        self
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub vectorizer: VectorizerConfig,
    pub description_prefix_chars: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            vectorizer: VectorizerConfig::default(),
            description_prefix_chars: DEFAULT_DESCRIPTION_PREFIX_CHARS,
        }
    }
}

impl EngineConfig {
    /// Load a (possibly partial) JSON config; missing keys keep their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn with_vectorizer(mut self, vectorizer: VectorizerConfig) -> Self {
        self.vectorizer = vectorizer;
        self
    }

    pub fn with_description_prefix_chars(mut self, chars: usize) -> Self {
        self.description_prefix_chars = chars;
        self
    }
}
