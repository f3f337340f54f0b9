use crate::{
    engine::Engine,
    error::{EngineError, Result},
    projection::{project, Extras, VideoView},
    record::Record,
    vectorizer::evaluate::scoring::Hits,
};

/// Which record a recommendation is anchored on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorSelector {
    /// exact id match; an empty id matches nothing
    ById(String),
    /// case-insensitive title substring, first match in corpus order
    ByTitle(String),
}

impl AnchorSelector {
    /// Position of the anchor record, `None` when nothing matches
    pub fn resolve(&self, engine: &Engine) -> Option<usize> {
        match self {
            AnchorSelector::ById(id) => {
                if id.is_empty() {
                    return None;
                }
                engine.corpus().position(id)
            }
            AnchorSelector::ByTitle(pattern) => {
                if pattern.is_empty() {
                    return None;
                }
                let pattern = pattern.to_lowercase();
                engine
                    .records()
                    .iter()
                    .position(|rec| rec.title.to_lowercase().contains(&pattern))
            }
        }
    }
}

/// One ranked recommendation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recommendation<'a> {
    pub record: &'a Record,
    /// corpus position of `record`
    pub position: usize,
    pub similarity_score: f64,
    pub popularity_score: f64,
}

impl Recommendation<'_> {
    pub fn view(&self) -> VideoView {
        project(self.record, Extras::Similarity(self.similarity_score))
    }
}

impl Engine {
    /// Records most similar to the anchor, best first.
    ///
    /// The anchor itself is never returned. Equal similarities keep corpus order.
    /// An unresolved anchor or `n == 0` gives an empty result.
    pub fn recommend(&self, selector: &AnchorSelector, n: usize) -> Vec<Recommendation<'_>> {
        if n == 0 {
            return Vec::new();
        }
        let Some(anchor) = selector.resolve(self) else {
            tracing::debug!("anchor {:?} not found", selector);
            return Vec::new();
        };
        let Some(mut hits) = self.space().similarity_to_row(anchor) else {
            return Vec::new();
        };
        if self.space().row(anchor).map_or(true, |row| row.is_empty()) {
            tracing::warn!("anchor '{}' has no vocabulary terms; all similarities are zero", self.records()[anchor].id);
        }
        hits.exclude(anchor);
        self.to_recommendations(hits, n)
    }

    /// Records most similar to free text projected into the vector space.
    ///
    /// # Errors
    /// `EngineError::InvalidQuery` for an empty or whitespace-only query.
    pub fn recommend_for_text(&self, query: &str, n: usize) -> Result<Vec<Recommendation<'_>>> {
        if query.trim().is_empty() {
            return Err(EngineError::invalid_query("query text must not be empty"));
        }
        if n == 0 {
            return Ok(Vec::new());
        }
        let vector = self.space().transform(query);
        if vector.is_empty() {
            tracing::debug!("query '{}' has no vocabulary terms", query);
            return Ok(Vec::new());
        }
        Ok(self.to_recommendations(self.space().similarity(&vector), n))
    }

    fn to_recommendations(&self, hits: Hits, n: usize) -> Vec<Recommendation<'_>> {
        hits.top(n)
            .into_iter()
            .filter_map(|(pos, score)| {
                let record = self.corpus().get_index(pos)?;
                Some(Recommendation {
                    record,
                    position: pos,
                    similarity_score: score,
                    popularity_score: record.popularity_score,
                })
            })
            .collect()
    }
}
