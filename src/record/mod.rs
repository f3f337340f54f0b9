pub mod loader;

use serde::{Deserialize, Serialize};

pub use loader::Corpus;

/// Weights of the popularity score (views, likes, comments), summing to 1.0
pub const POPULARITY_WEIGHTS: (f64, f64, f64) = (0.4, 0.3, 0.3);

/// One row as it arrives from the tabular source.
/// Every cell is optional; numeric cells are kept as text and coerced when the
/// row is turned into a [`Record`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    #[serde(alias = "video_id")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub tags: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "channel_title")]
    pub channel: Option<String>,
    pub category_id: Option<String>,
    pub country: Option<String>,
    pub views: Option<String>,
    pub likes: Option<String>,
    pub dislikes: Option<String>,
    pub comment_count: Option<String>,
    #[serde(alias = "thumbnail_link")]
    pub thumbnail_url: Option<String>,
    pub publish_time: Option<String>,
}

/// A cleaned corpus row with its derived fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub title: String,
    /// space delimited
    pub tags: String,
    pub description: String,
    pub channel: String,
    /// `None` when the source cell is missing or not a non-negative integer
    pub category_id: Option<i64>,
    pub country: String,
    pub views: u64,
    pub likes: u64,
    pub dislikes: u64,
    pub comment_count: u64,
    pub thumbnail_url: String,
    pub publish_time: String,
    pub combined_text: String,
    pub engagement_score: f64,
    pub popularity_score: f64,
}

impl Record {
    /// Clean a raw row and compute the derived fields.
    ///
    /// # Arguments
    /// * `raw` - source row
    /// * `description_prefix_chars` - how many description characters go into `combined_text`
    pub fn from_raw(raw: RawRecord, description_prefix_chars: usize) -> Self {
        let text = |v: Option<String>| v.unwrap_or_default();

        let title = text(raw.title);
        let tags = text(raw.tags).replace('|', " ");
        let description = text(raw.description);
        let channel = text(raw.channel);

        let views = parse_count(raw.views.as_deref());
        let likes = parse_count(raw.likes.as_deref());
        let dislikes = parse_count(raw.dislikes.as_deref());
        let comment_count = parse_count(raw.comment_count.as_deref());

        let combined_text = combine_text(&title, &tags, &channel, &description, description_prefix_chars);

        Record {
            id: text(raw.id),
            category_id: parse_category(raw.category_id.as_deref()),
            country: text(raw.country),
            thumbnail_url: text(raw.thumbnail_url),
            publish_time: text(raw.publish_time),
            engagement_score: engagement_score(views, likes, dislikes, comment_count),
            popularity_score: popularity_score(views, likes, comment_count),
            title,
            tags,
            description,
            channel,
            views,
            likes,
            dislikes,
            comment_count,
            combined_text,
        }
    }
}

/// `title tags channel description[..prefix]`, prefix counted in characters
pub fn combine_text(title: &str, tags: &str, channel: &str, description: &str, prefix_chars: usize) -> String {
    let description: String = description.chars().take(prefix_chars).collect();
    let mut combined = String::with_capacity(title.len() + tags.len() + channel.len() + description.len() + 3);
    combined.push_str(title);
    combined.push(' ');
    combined.push_str(tags);
    combined.push(' ');
    combined.push_str(channel);
    combined.push(' ');
    combined.push_str(&description);
    combined
}

/// (likes + 2 * comments - dislikes) / (views + 1)
/// May be negative when dislikes dominate.
#[inline]
pub fn engagement_score(views: u64, likes: u64, dislikes: u64, comment_count: u64) -> f64 {
    (likes as f64 + 2.0 * comment_count as f64 - dislikes as f64) / (views as f64 + 1.0)
}

/// Log-scaled weighted sum of views, likes and comments
#[inline]
pub fn popularity_score(views: u64, likes: u64, comment_count: u64) -> f64 {
    let (w_views, w_likes, w_comments) = POPULARITY_WEIGHTS;
    (views as f64).ln_1p() * w_views
        + (likes as f64).ln_1p() * w_likes
        + (comment_count as f64).ln_1p() * w_comments
}

/// Category id of a cell.
/// Missing, negative and unparsable cells give `None` rather than a real category.
pub fn parse_category(cell: Option<&str>) -> Option<i64> {
    let cell = cell.map(str::trim).filter(|c| !c.is_empty())?;
    let parsed = match cell.parse::<i64>() {
        Ok(v) => Some(v),
        Err(_) => cell
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64)
            .map(|v| v as i64),
    };
    match parsed {
        Some(v) if v >= 0 => Some(v),
        _ => {
            tracing::debug!("category_id '{}' is not a valid category, left unset", cell);
            None
        }
    }
}

/// Lenient non-negative integer parse.
/// Empty, unparsable, negative and non-finite cells become 0; fractional values truncate.
pub fn parse_count(cell: Option<&str>) -> u64 {
    let Some(cell) = cell.map(str::trim).filter(|c| !c.is_empty()) else {
        return 0;
    };
    if let Ok(v) = cell.parse::<u64>() {
        return v;
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v.trunc() as u64,
        _ => 0,
    }
}
