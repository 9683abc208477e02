pub mod geo;
pub mod isbn;
pub mod library;
pub mod onsen;
pub mod stats;

pub use crate::domain::model::{BookMeta, BookRecord, GeoPoint, OnsenRecord, ReadingStatus};
pub use crate::domain::ports::{ConfigProvider, Geocoder, MetadataSource, Store};
pub use crate::utils::error::Result;
