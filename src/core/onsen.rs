//! The hot-spring visit service: geocode the address, compute distance from
//! home, persist the visit.

use crate::core::geo;
use crate::domain::model::{next_record_id, GeoPoint, OnsenRecord};
use crate::domain::ports::{Geocoder, Store};
use crate::utils::error::{AppError, Result};
use chrono::{NaiveDate, Utc};

const ONSEN_FILE: &str = "onsen.json";

#[derive(Debug, Clone)]
pub struct VisitInput {
    pub name: String,
    pub address: String,
    pub visited_on: NaiveDate,
    pub notes: String,
}

pub struct OnsenService<S: Store, G: Geocoder> {
    store: S,
    geocoder: G,
    home: Option<GeoPoint>,
}

impl<S: Store, G: Geocoder> OnsenService<S, G> {
    pub fn new(store: S, geocoder: G, home: Option<GeoPoint>) -> Self {
        Self {
            store,
            geocoder,
            home,
        }
    }

    /// Geocoding is a single best-effort attempt: a miss or a failed request
    /// still records the visit, just without coordinates, matching how the
    /// original app stored null coords.
    pub async fn record_visit(&self, input: VisitInput) -> Result<OnsenRecord> {
        let coords = match self.geocoder.geocode(&input.address).await {
            Ok(coords) => {
                if coords.is_none() {
                    tracing::warn!("no coordinates found for address: {}", input.address);
                }
                coords
            }
            Err(e) => {
                tracing::warn!("geocoding failed for {}: {}", input.address, e);
                None
            }
        };

        let distance_km = match (self.home, coords) {
            (Some(home), Some(point)) => Some(geo::distance_km(home, point)),
            _ => None,
        };

        let record = OnsenRecord {
            id: next_record_id(),
            name: input.name,
            address: input.address,
            coords,
            distance_km,
            visited_on: input.visited_on,
            notes: input.notes,
            created_at: Utc::now(),
        };

        let mut visits = self.load().await?;
        visits.push(record.clone());
        self.save(&visits).await?;
        Ok(record)
    }

    /// Visits, newest first.
    pub async fn list(&self) -> Result<Vec<OnsenRecord>> {
        let mut visits = self.load().await?;
        visits.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(visits)
    }

    async fn load(&self) -> Result<Vec<OnsenRecord>> {
        match self.store.read_file(ONSEN_FILE).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(AppError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    async fn save(&self, visits: &[OnsenRecord]) -> Result<()> {
        let data = serde_json::to_vec_pretty(visits)?;
        self.store.write_file(ONSEN_FILE, &data).await
    }
}
