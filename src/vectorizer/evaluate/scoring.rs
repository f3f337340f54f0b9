use num::Float;
use rayon::prelude::*;

use crate::{
    utils::{math::vector::SparseVector, sort::top_n_stable},
    vectorizer::{tfidf::TFIDFEngine, VectorSpace},
};

/// Scored rows from a similarity pass
#[derive(Debug)]
pub struct Hits {
    /// (row position, score) in ascending position
    pub list: Vec<(usize, f64)>,
}

impl Hits {
    pub fn new(list: Vec<(usize, f64)>) -> Self {
        Hits { list }
    }

    /// Drop one row by position
    pub fn exclude(&mut self, pos: usize) -> &mut Self {
        self.list.retain(|(p, _)| *p != pos);
        self
    }

    /// Best `n` hits, highest score first, equal scores in ascending position.
    /// NaN scores are removed.
    pub fn top(mut self, n: usize) -> Vec<(usize, f64)> {
        self.list.retain(|(_, s)| !s.is_nan());
        top_n_stable(self.list, n)
    }
}

impl<N, E> VectorSpace<N, E>
where
    N: Float + Into<f64> + Send + Sync,
    E: TFIDFEngine<N>,
{
    /// Cosine similarity of `query` against every row, in `[0, 1]`.
    /// Both norms are divided out so rounding in the stored unit rows can
    /// not push identical texts above 1.
    pub fn similarity(&self, query: &SparseVector<N>) -> Hits {
        let query_norm = query.norm();
        let list = self
            .rows()
            .par_iter()
            .enumerate()
            .map(|(pos, row)| {
                let row_norm = row.norm();
                let score = if query_norm == 0.0 || row_norm == 0.0 {
                    0.0
                } else {
                    (query.dot(row) / (query_norm * row_norm)).clamp(0.0, 1.0)
                };
                (pos, score)
            })
            .collect();
        Hits::new(list)
    }

    /// Similarity of the row at `pos` against every row, `None` when out of range
    pub fn similarity_to_row(&self, pos: usize) -> Option<Hits> {
        self.row(pos).map(|row| self.similarity(row))
    }
}
