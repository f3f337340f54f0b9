use std::{collections::HashMap, hash::Hash};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::engine::Engine;

/// How many categories `stats` reports
pub const TOP_CATEGORIES: usize = 10;

/// Aggregate counts over the loaded corpus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusStats {
    pub total_videos: usize,
    pub total_views: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    /// videos per country, most frequent first
    pub countries: IndexMap<String, usize>,
    /// videos per category, top entries only, most frequent first
    pub categories: IndexMap<i64, usize>,
}

impl Engine {
    pub fn stats(&self) -> CorpusStats {
        let records = self.records();
        let mut countries: HashMap<&str, usize> = HashMap::new();
        let mut categories: HashMap<i64, usize> = HashMap::new();
        let (mut views, mut likes, mut comments) = (0u64, 0u64, 0u64);
        for rec in records {
            views = views.saturating_add(rec.views);
            likes = likes.saturating_add(rec.likes);
            comments = comments.saturating_add(rec.comment_count);
            *countries.entry(rec.country.as_str()).or_insert(0) += 1;
            if let Some(category) = rec.category_id {
                *categories.entry(category).or_insert(0) += 1;
            }
        }
        CorpusStats {
            total_videos: records.len(),
            total_views: views,
            total_likes: likes,
            total_comments: comments,
            countries: ranked_counts(countries, usize::MAX)
                .into_iter()
                .map(|(c, n)| (c.to_string(), n))
                .collect(),
            categories: ranked_counts(categories, TOP_CATEGORIES).into_iter().collect(),
        }
    }
}

/// count descending, key ascending
fn ranked_counts<K: Ord + Hash>(counts: HashMap<K, usize>, limit: usize) -> Vec<(K, usize)> {
    let mut counts: Vec<(K, usize)> = counts.into_iter().collect();
    counts.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts.truncate(limit);
    counts
}
