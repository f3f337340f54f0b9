use std::{collections::HashMap, fs::File, io::Read, path::Path, time::Instant};

use crate::{
    config::DEFAULT_DESCRIPTION_PREFIX_CHARS,
    error::{EngineError, Result},
    record::{RawRecord, Record},
};

/// Required columns, each with the header names accepted for it
pub const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("id", &["id", "video_id"]),
    ("title", &["title"]),
    ("tags", &["tags"]),
    ("description", &["description"]),
    ("channel", &["channel", "channel_title"]),
    ("category_id", &["category_id"]),
    ("country", &["country"]),
    ("views", &["views"]),
    ("likes", &["likes"]),
    ("dislikes", &["dislikes"]),
    ("comment_count", &["comment_count"]),
    ("thumbnail_url", &["thumbnail_url", "thumbnail_link"]),
    ("publish_time", &["publish_time"]),
];

/// Cleaned, deduplicated video records in source order.
/// Read-only once loaded.
#[derive(Debug, Clone)]
pub struct Corpus {
    records: Vec<Record>,
    positions: HashMap<String, usize>,
}

impl Corpus {
    /// Load a CSV file with the default description prefix
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_path_with(path, DEFAULT_DESCRIPTION_PREFIX_CHARS)
    }

    pub fn from_path_with<P: AsRef<Path>>(path: P, description_prefix_chars: usize) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!("loading corpus from {}", path.display());
        let file = File::open(path)?;
        Self::from_reader_with(file, description_prefix_chars)
    }

    /// Load CSV data from any reader with the default description prefix
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with(reader, DEFAULT_DESCRIPTION_PREFIX_CHARS)
    }

    pub fn from_reader_with<R: Read>(reader: R, description_prefix_chars: usize) -> Result<Self> {
        let start = Instant::now();
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        check_required_columns(headers.iter())?;

        let mut raws = Vec::new();
        for row in reader.deserialize::<RawRecord>() {
            raws.push(row?);
        }
        tracing::debug!("read {} csv rows in {:.2}ms", raws.len(), start.elapsed().as_secs_f64() * 1000.0);
        Self::from_raw_with(raws, description_prefix_chars)
    }

    /// Build from rows that are already in memory
    pub fn from_raw(raws: Vec<RawRecord>) -> Result<Self> {
        Self::from_raw_with(raws, DEFAULT_DESCRIPTION_PREFIX_CHARS)
    }

    /// Deduplicate by id (first occurrence wins) and derive per-record fields
    pub fn from_raw_with(raws: Vec<RawRecord>, description_prefix_chars: usize) -> Result<Self> {
        if raws.is_empty() {
            return Err(EngineError::data("source has no rows"));
        }
        let row_count = raws.len();
        let mut records = Vec::with_capacity(row_count);
        let mut positions = HashMap::with_capacity(row_count);
        for raw in raws {
            let id = raw.id.clone().unwrap_or_default();
            if positions.contains_key(&id) {
                continue;
            }
            positions.insert(id, records.len());
            records.push(Record::from_raw(raw, description_prefix_chars));
        }
        let dropped = row_count - records.len();
        if dropped > 0 {
            tracing::debug!("dropped {} duplicate rows", dropped);
        }
        tracing::info!("corpus loaded: {} rows, {} unique records", row_count, records.len());
        Ok(Self { records, positions })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of the record with the given id
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.position(id).map(|pos| &self.records[pos])
    }

    pub fn get_index(&self, pos: usize) -> Option<&Record> {
        self.records.get(pos)
    }
}

fn check_required_columns<'a>(headers: impl Iterator<Item = &'a str>) -> Result<()> {
    let present: Vec<&str> = headers.map(str::trim).collect();
    for (column, names) in REQUIRED_COLUMNS {
        if !names.iter().any(|name| present.contains(name)) {
            return Err(EngineError::data(format!("missing required column '{}'", column)));
        }
    }
    Ok(())
}
