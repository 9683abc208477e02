use crate::core::isbn::Isbn13;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Geographic coordinates in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Shelf state of a book. Serialized values match the stored documents of the
/// original app ("tsundoku" is a pile of bought-but-unread books).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum ReadingStatus {
    Reading,
    Completed,
    Tsundoku,
    WantToRead,
}

impl ReadingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingStatus::Reading => "reading",
            ReadingStatus::Completed => "completed",
            ReadingStatus::Tsundoku => "tsundoku",
            ReadingStatus::WantToRead => "want_to_read",
        }
    }
}

/// Metadata returned by an ISBN lookup, before it becomes a shelf record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookMeta {
    pub isbn: Isbn13,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub pubdate: String,
    pub cover: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: String,
    pub isbn: Isbn13,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub pubdate: String,
    pub cover: String,
    pub status: ReadingStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub rating: u8,
    pub review: String,
    pub created_at: DateTime<Utc>,
}

impl BookRecord {
    /// A fresh record lands on the tsundoku pile, unrated and unreviewed.
    pub fn new(meta: BookMeta) -> Self {
        Self {
            id: next_record_id(),
            isbn: meta.isbn,
            title: meta.title,
            author: meta.author,
            publisher: meta.publisher,
            pubdate: meta.pubdate,
            cover: meta.cover,
            status: ReadingStatus::Tsundoku,
            start_date: None,
            end_date: None,
            rating: 0,
            review: String::new(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnsenRecord {
    pub id: String,
    pub name: String,
    pub address: String,
    /// Best-effort geocoding result; None when the address was not found.
    pub coords: Option<GeoPoint>,
    /// Distance from the configured home point, km, one decimal.
    pub distance_km: Option<f64>,
    pub visited_on: NaiveDate,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// Record ids are millisecond timestamps, as in the original store.
pub fn next_record_id() -> String {
    Utc::now().timestamp_millis().to_string()
}
