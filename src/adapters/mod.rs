// Adapters layer: concrete clients for the external services (book metadata
// and geocoding). Storage backends live under src/config alongside the
// configuration that selects them.

pub mod google_books;
pub mod nominatim;
pub mod openbd;

pub use google_books::GoogleBooksClient;
pub use nominatim::{Geocoded, NominatimClient};
pub use openbd::OpenBdClient;
