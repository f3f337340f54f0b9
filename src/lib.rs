/// This crate is a video recommendation engine built on a TF-IDF vector space.
pub mod config;
pub mod engine;
pub mod error;
pub mod projection;
pub mod record;
pub mod utils;
pub mod vectorizer;

/// Engine
/// The top-level struct of this crate. It owns the loaded corpus and the
/// fitted vector space, and answers every query:
/// - `recommend`: content similarity against an anchor record
/// - `recommend_for_text`: content similarity against free text
/// - `trending`: popularity ranking with country/category filters
/// - `search`: popularity ranking of substring matches
/// - `detail` and `stats`
///
/// All queries take `&self`; share it with `Arc` or through `EngineHandle`.
pub use engine::Engine;

/// Query and result types of the engine
pub use engine::{AnchorSelector, CorpusStats, EngineHandle, Recommendation, Scored, TrendingFilter};

/// Configuration
/// `EngineConfig` and `VectorizerConfig` carry the fitting parameters
/// (vocabulary cap, minimum document frequency, n-gram range) and the
/// description prefix length. Both deserialize from partial JSON.
pub use config::{EngineConfig, VectorizerConfig};

/// Error type and result alias
pub use error::{EngineError, Result};

/// Corpus of cleaned video records
/// Loaded from CSV (or raw rows), deduplicated by id with first occurrence
/// winning, with `combined_text`, `engagement_score` and `popularity_score`
/// derived per record.
pub use record::{Corpus, RawRecord, Record};

/// Public output shape of a record and the projector producing it
pub use projection::{project, Extras, VideoView};

/// Fitted TF-IDF vector space
/// Vocabulary, IDF weights and one L2-normalized sparse row per record.
/// Cosine similarity between rows is a dot product.
pub use vectorizer::VectorSpace;

/// TF-IDF Calculation Engine Trait
/// Plug a different weighting into `VectorSpace<N, E>`.
/// `DefaultTFIDFEngine` uses raw counts with smoothed IDF and supports f32 and f64.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
