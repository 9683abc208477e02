//! Great-circle distance for the "distance from home" display.
//!
//! Haversine on a spherical Earth. Good to well under a kilometer at the
//! distances involved, which is all the one-decimal display needs.

use crate::domain::model::GeoPoint;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometers, rounded to one decimal place.
///
/// Total over all inputs: coordinates are assumed to already be valid
/// degrees, out-of-range values just produce a meaningless number.
pub fn distance_km(origin: GeoPoint, destination: GeoPoint) -> f64 {
    let d_lat = (destination.lat - origin.lat).to_radians();
    let d_lon = (destination.lon - origin.lon).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + origin.lat.to_radians().cos()
            * destination.lat.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    round1(EARTH_RADIUS_KM * c)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
