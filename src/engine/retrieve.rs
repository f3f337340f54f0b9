use rayon::prelude::*;

use crate::{
    engine::Engine,
    error::{EngineError, Result},
    projection::{project, Extras, VideoView},
    record::Record,
    utils::sort::top_n_stable,
};

/// Equality filters for trending; `None` leaves a field unconstrained.
/// Category 0 is a real category, not "unset".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrendingFilter {
    pub country: Option<String>,
    pub category_id: Option<i64>,
}

impl TrendingFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    #[inline]
    pub fn matches(&self, record: &Record) -> bool {
        self.country.as_deref().map_or(true, |c| record.country == c)
            && self.category_id.map_or(true, |c| record.category_id == Some(c))
    }
}

/// A record ranked by popularity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scored<'a> {
    pub record: &'a Record,
    pub position: usize,
    pub popularity_score: f64,
}

impl Scored<'_> {
    pub fn view(&self) -> VideoView {
        project(self.record, Extras::None)
    }
}

impl Engine {
    /// Most popular records passing `filter`, best first
    pub fn trending(&self, filter: &TrendingFilter, n: usize) -> Vec<Scored<'_>> {
        let candidates: Vec<(usize, f64)> = self
            .records()
            .iter()
            .enumerate()
            .filter(|(_, rec)| filter.matches(rec))
            .map(|(pos, rec)| (pos, rec.popularity_score))
            .collect();
        tracing::debug!("trending {:?}: {} candidates", filter, candidates.len());
        self.rank_by_popularity(candidates, n)
    }

    /// Records whose title, tags or channel contain `query` (case-insensitive,
    /// literal substring), ranked by popularity.
    ///
    /// # Errors
    /// `EngineError::InvalidQuery` when `query` is empty.
    pub fn search(&self, query: &str, n: usize) -> Result<Vec<Scored<'_>>> {
        if query.is_empty() {
            return Err(EngineError::invalid_query("search query must not be empty"));
        }
        let needle = query.to_lowercase();
        let candidates: Vec<(usize, f64)> = self
            .records()
            .par_iter()
            .enumerate()
            .filter(|(_, rec)| {
                rec.title.to_lowercase().contains(&needle)
                    || rec.tags.to_lowercase().contains(&needle)
                    || rec.channel.to_lowercase().contains(&needle)
            })
            .map(|(pos, rec)| (pos, rec.popularity_score))
            .collect();
        tracing::debug!("search '{}': {} matches", query, candidates.len());
        Ok(self.rank_by_popularity(candidates, n))
    }

    fn rank_by_popularity(&self, candidates: Vec<(usize, f64)>, n: usize) -> Vec<Scored<'_>> {
        top_n_stable(candidates, n)
            .into_iter()
            .filter_map(|(pos, score)| {
                Some(Scored {
                    record: self.corpus().get_index(pos)?,
                    position: pos,
                    popularity_score: score,
                })
            })
            .collect()
    }
}
