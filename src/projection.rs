use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::record::Record;

/// Call-specific fields merged into the public shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extras {
    None,
    /// similarity score of a recommendation
    Similarity(f64),
    /// full description and tags for the single-record view
    Detail,
}

/// Public output shape of a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoView {
    pub id: String,
    pub title: String,
    pub channel: String,
    pub views: u64,
    pub likes: u64,
    pub dislikes: u64,
    pub comment_count: u64,
    pub category_id: i64,
    pub country: String,
    pub thumbnail_url: String,
    pub publish_time: String,
    pub popularity_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

impl VideoView {
    /// Field map of the serialized view
    pub fn into_map(self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            // a struct of plain fields always serializes to an object
            _ => Map::new(),
        }
    }
}

/// Select the public fields of `record` and merge `extras`
pub fn project(record: &Record, extras: Extras) -> VideoView {
    let mut view = VideoView {
        id: record.id.clone(),
        title: record.title.clone(),
        channel: record.channel.clone(),
        views: record.views,
        likes: record.likes,
        dislikes: record.dislikes,
        comment_count: record.comment_count,
        category_id: record.category_id.unwrap_or(0),
        country: record.country.clone(),
        thumbnail_url: record.thumbnail_url.clone(),
        publish_time: record.publish_time.clone(),
        popularity_score: record.popularity_score,
        similarity_score: None,
        description: None,
        tags: None,
    };
    match extras {
        Extras::None => {}
        Extras::Similarity(score) => view.similarity_score = Some(score),
        Extras::Detail => {
            view.description = Some(record.description.clone());
            view.tags = Some(record.tags.clone());
        }
    }
    view
}
