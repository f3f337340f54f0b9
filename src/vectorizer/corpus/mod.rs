use indexmap::IndexMap;

use crate::vectorizer::token::TokenFrequency;

/// Corpus-wide term statistics used to fit the vocabulary and IDF.
/// Holds no document text, only counts.
#[derive(Debug, Clone, Default)]
pub struct TermCorpus {
    doc_num: u64,
    /// number of documents each term occurs in
    doc_freq: IndexMap<Box<str>, u64>,
    /// total occurrences of each term across the corpus
    term_total: IndexMap<Box<str>, u64>,
}

impl TermCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one document's term counts
    pub fn add_doc(&mut self, freq: &TokenFrequency) {
        self.doc_num += 1;
        for (term, count) in freq.iter() {
            match self.doc_freq.get_mut(term) {
                Some(df) => *df += 1,
                None => {
                    self.doc_freq.insert(term.into(), 1);
                }
            }
            match self.term_total.get_mut(term) {
                Some(total) => *total += count as u64,
                None => {
                    self.term_total.insert(term.into(), count as u64);
                }
            }
        }
    }

    pub fn from_docs<'a, I>(docs: I) -> Self
    where
        I: IntoIterator<Item = &'a TokenFrequency>,
    {
        let mut corpus = Self::new();
        for doc in docs {
            corpus.add_doc(doc);
        }
        corpus
    }

    #[inline]
    pub fn get_doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Number of documents containing `term`
    #[inline]
    pub fn get_doc_freq(&self, term: &str) -> u64 {
        self.doc_freq.get(term).copied().unwrap_or(0)
    }

    /// Corpus-wide occurrences of `term`
    #[inline]
    pub fn get_term_total(&self, term: &str) -> u64 {
        self.term_total.get(term).copied().unwrap_or(0)
    }

    /// number of distinct terms seen
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.doc_freq.len()
    }

    /// Select the fitted vocabulary.
    ///
    /// Terms with `df >= min_df` are kept; if more than `max_features` remain the
    /// most frequent (by corpus-wide count, then term order) win. The result is
    /// sorted lexicographically, which fixes the column order.
    pub fn select_vocabulary(&self, min_df: usize, max_features: usize) -> Vec<Box<str>> {
        let min_df = min_df as u64;
        let mut kept: Vec<(&Box<str>, u64)> = self
            .doc_freq
            .iter()
            .filter(|(_, df)| **df >= min_df)
            .map(|(term, _)| (term, self.get_term_total(term)))
            .collect();
        if kept.len() > max_features {
            kept.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            kept.truncate(max_features);
        }
        let mut vocab: Vec<Box<str>> = kept.into_iter().map(|(term, _)| term.clone()).collect();
        vocab.sort_unstable();
        vocab
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(tokens: &[&str]) -> TokenFrequency {
        let mut freq = TokenFrequency::new();
        freq.add_tokens(tokens);
        freq
    }

    #[test]
    fn doc_freq_counts_once_per_document() {
        let docs = [doc(&["a", "a", "b"]), doc(&["a"])];
        let corpus = TermCorpus::from_docs(docs.iter());
        assert_eq!(corpus.get_doc_num(), 2);
        assert_eq!(corpus.get_doc_freq("a"), 2);
        assert_eq!(corpus.get_term_total("a"), 3);
        assert_eq!(corpus.get_doc_freq("b"), 1);
    }

    #[test]
    fn vocabulary_respects_min_df_and_cap() {
        let docs = [doc(&["x", "y", "y", "z", "w"]), doc(&["x", "y", "z"]), doc(&["z", "w"])];
        let corpus = TermCorpus::from_docs(docs.iter());
        let boxed = |terms: &[&str]| terms.iter().map(|t| Box::<str>::from(*t)).collect::<Vec<_>>();
        assert_eq!(corpus.select_vocabulary(2, 10), boxed(&["w", "x", "y", "z"]));
        // totals: y=3, z=3, x=2, w=2 -> keep y, z
        assert_eq!(corpus.select_vocabulary(2, 2), boxed(&["y", "z"]));
        assert!(corpus.select_vocabulary(4, 10).is_empty());
    }
}
