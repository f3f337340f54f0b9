pub mod corpus;
pub mod evaluate;
pub mod stop_words;
pub mod tfidf;
pub mod token;
pub mod tokenizer;

use std::{marker::PhantomData, time::Instant};

use indexmap::IndexMap;
use num::Float;
use rayon::prelude::*;

use crate::{
    config::VectorizerConfig,
    error::{EngineError, Result},
    record::Record,
    utils::math::vector::SparseVector,
    vectorizer::{
        corpus::TermCorpus,
        tfidf::{DefaultTFIDFEngine, TFIDFEngine},
        token::TokenFrequency,
        tokenizer::Tokenizer,
    },
};

/// Fitted TF-IDF vector space over the records' `combined_text`.
///
/// Internally, it holds:
/// - The vocabulary (term to column index, lexicographic column order)
/// - One IDF weight per column
/// - One L2-normalized sparse vector per record, aligned by record position
/// - The tokenizer used to fit, so ad-hoc text projects the same way
///
/// Immutable after `build`; adding or removing records means building a new space.
#[derive(Debug, Clone)]
pub struct VectorSpace<N = f64, E = DefaultTFIDFEngine>
where
    N: Float + Into<f64> + Send + Sync,
    E: TFIDFEngine<N>,
{
    vocabulary: IndexMap<Box<str>, u32>,
    idf: Vec<N>,
    rows: Vec<SparseVector<N>>,
    tokenizer: Tokenizer,
    _marker: PhantomData<E>,
}

impl<N, E> VectorSpace<N, E>
where
    N: Float + Into<f64> + Send + Sync,
    E: TFIDFEngine<N>,
{
    /// Fit the vocabulary and weight every record.
    ///
    /// # Errors
    /// `EngineError::Data` when no term survives the document-frequency filter.
    pub fn build(records: &[Record], config: &VectorizerConfig) -> Result<Self> {
        let start = Instant::now();
        let tokenizer = Tokenizer::from_config(config);

        let freqs: Vec<TokenFrequency> = records
            .par_iter()
            .map(|rec| tokenizer.token_frequency(&rec.combined_text))
            .collect();
        let corpus = TermCorpus::from_docs(freqs.iter());

        let terms = corpus.select_vocabulary(config.min_df, config.max_features);
        if terms.is_empty() {
            return Err(EngineError::data(format!(
                "empty vocabulary: no term occurs in at least {} documents ({} distinct terms seen)",
                config.min_df,
                corpus.vocab_size()
            )));
        }
        let idf = E::idf_vec(&corpus, &terms);
        let vocabulary: IndexMap<Box<str>, u32> = terms
            .into_iter()
            .enumerate()
            .map(|(col, term)| (term, col as u32))
            .collect();

        let rows: Vec<SparseVector<N>> = freqs
            .par_iter()
            .map(|freq| E::tf_vec(freq, &vocabulary, &idf))
            .collect();

        tracing::info!(
            "vector space built: {} documents, {} terms ({} candidates) in {:.2}ms",
            rows.len(),
            vocabulary.len(),
            corpus.vocab_size(),
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(Self {
            vocabulary,
            idf,
            rows,
            tokenizer,
            _marker: PhantomData,
        })
    }

    /// Project ad-hoc text into the fitted space; unknown terms are ignored
    pub fn transform(&self, text: &str) -> SparseVector<N> {
        let freq = self.tokenizer.token_frequency(text);
        E::tf_vec(&freq, &self.vocabulary, &self.idf)
    }

    /// Vector of the record at `pos`
    #[inline]
    pub fn row(&self, pos: usize) -> Option<&SparseVector<N>> {
        self.rows.get(pos)
    }

    pub fn rows(&self) -> &[SparseVector<N>] {
        &self.rows
    }

    /// number of document rows
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Column of `term`
    pub fn term_index(&self, term: &str) -> Option<u32> {
        self.vocabulary.get(term).copied()
    }

    /// Fitted terms in column order
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.vocabulary.keys().map(|t| t.as_ref())
    }
}
