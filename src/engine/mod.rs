pub mod handle;
pub mod recommend;
pub mod retrieve;
pub mod stats;

use std::{io::Read, path::Path, time::Instant};

use crate::{
    config::EngineConfig,
    error::Result,
    projection::{project, Extras, VideoView},
    record::{Corpus, Record},
    vectorizer::VectorSpace,
};

pub use handle::EngineHandle;
pub use recommend::{AnchorSelector, Recommendation};
pub use retrieve::{Scored, TrendingFilter};
pub use stats::CorpusStats;

/// Recommendation, trending and search engine.
///
/// Owns the loaded corpus and its fitted vector space. Both are read-only after
/// construction, so every query takes `&self` and the engine can be shared
/// across threads behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Engine {
    corpus: Corpus,
    space: VectorSpace,
    config: EngineConfig,
}

impl Engine {
    /// Fit the vector space over an already loaded corpus
    pub fn new(corpus: Corpus, config: EngineConfig) -> Result<Self> {
        let start = Instant::now();
        let space = VectorSpace::build(corpus.records(), &config.vectorizer)?;
        tracing::info!(
            "engine ready with {} videos in {:.2}ms",
            corpus.len(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(Self { corpus, space, config })
    }

    /// Load a CSV file and build the engine
    pub fn from_path<P: AsRef<Path>>(path: P, config: EngineConfig) -> Result<Self> {
        let corpus = Corpus::from_path_with(path, config.description_prefix_chars)?;
        Self::new(corpus, config)
    }

    /// Load CSV data from a reader and build the engine
    pub fn from_reader<R: Read>(reader: R, config: EngineConfig) -> Result<Self> {
        let corpus = Corpus::from_reader_with(reader, config.description_prefix_chars)?;
        Self::new(corpus, config)
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn space(&self) -> &VectorSpace {
        &self.space
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn records(&self) -> &[Record] {
        self.corpus.records()
    }

    /// Single record with full description and tags, `None` when the id is unknown
    pub fn detail(&self, id: &str) -> Option<VideoView> {
        self.corpus.get(id).map(|rec| project(rec, Extras::Detail))
    }
}
