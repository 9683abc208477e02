use crate::core::isbn::Isbn13;
use crate::domain::model::{BookMeta, GeoPoint};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Byte-level persistence for the record collections.
pub trait Store: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Wiring-level view of the configuration the CLI binary needs.
pub trait ConfigProvider: Send + Sync {
    fn metadata_endpoint(&self) -> &str;
    fn fallback_endpoint(&self) -> &str;
    fn cover_endpoint(&self) -> &str;
    fn geocode_endpoint(&self) -> &str;
    fn user_agent(&self) -> &str;
    fn region_hint(&self) -> Option<&str>;
    fn data_path(&self) -> &str;
    fn home(&self) -> Option<GeoPoint>;
}

/// A book metadata provider. Returning `Ok(None)` means "this source does not
/// know the book" and triggers fallback to the next source; errors abort the
/// lookup.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn lookup(&self, isbn: &Isbn13) -> Result<Option<BookMeta>>;
    fn name(&self) -> &'static str;
}

/// Free-text address to coordinates, at most one best match.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> Result<Option<GeoPoint>>;
}
