use indexmap::IndexMap;

use crate::{utils::math::vector::SparseVector, vectorizer::{corpus::TermCorpus, token::TokenFrequency}};

/// TF-IDF weighting strategy.
///
/// Implement this trait to plug a different weighting into
/// [`VectorSpace`](crate::vectorizer::VectorSpace).
pub trait TFIDFEngine<N>
where
    N: num::Float,
{
    /// IDF weight per vocabulary column
    ///
    /// # Arguments
    /// * `corpus` - corpus statistics
    /// * `vocabulary` - fitted terms in column order
    fn idf_vec(corpus: &TermCorpus, vocabulary: &[Box<str>]) -> Vec<N>;

    /// Weighted document vector
    ///
    /// # Arguments
    /// * `freq` - term counts of the document
    /// * `vocabulary` - term to column index
    /// * `idf` - output of `idf_vec`
    fn tf_vec(freq: &TokenFrequency, vocabulary: &IndexMap<Box<str>, u32>, idf: &[N]) -> SparseVector<N>;
}

/// Default engine: raw counts times smoothed IDF `ln((1 + n) / (1 + df)) + 1`,
/// each document vector L2-normalized.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl DefaultTFIDFEngine {
    /// Smoothed inverse document frequency
    #[inline]
    pub fn idf_calc(doc_num: u64, doc_freq: u64) -> f64 {
        ((1.0 + doc_num as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
    }

    fn weighted<N>(freq: &TokenFrequency, vocabulary: &IndexMap<Box<str>, u32>, idf: &[N]) -> SparseVector<N>
    where
        N: num::Float + Into<f64>,
    {
        let pairs: Vec<(u32, N)> = freq
            .iter()
            .filter_map(|(term, count)| {
                let col = *vocabulary.get(term)?;
                let weight = idf.get(col as usize).copied()?;
                Some((col, N::from(count)? * weight))
            })
            .collect();
        let mut vec = SparseVector::from_pairs(pairs);
        vec.l2_normalize();
        vec
    }
}

impl TFIDFEngine<f32> for DefaultTFIDFEngine {
    fn idf_vec(corpus: &TermCorpus, vocabulary: &[Box<str>]) -> Vec<f32> {
        let doc_num = corpus.get_doc_num();
        vocabulary
            .iter()
            .map(|term| Self::idf_calc(doc_num, corpus.get_doc_freq(term)) as f32)
            .collect()
    }

    fn tf_vec(freq: &TokenFrequency, vocabulary: &IndexMap<Box<str>, u32>, idf: &[f32]) -> SparseVector<f32> {
        Self::weighted(freq, vocabulary, idf)
    }
}

impl TFIDFEngine<f64> for DefaultTFIDFEngine {
    fn idf_vec(corpus: &TermCorpus, vocabulary: &[Box<str>]) -> Vec<f64> {
        let doc_num = corpus.get_doc_num();
        vocabulary
            .iter()
            .map(|term| Self::idf_calc(doc_num, corpus.get_doc_freq(term)))
            .collect()
    }

    fn tf_vec(freq: &TokenFrequency, vocabulary: &IndexMap<Box<str>, u32>, idf: &[f64]) -> SparseVector<f64> {
        Self::weighted(freq, vocabulary, idf)
    }
}
