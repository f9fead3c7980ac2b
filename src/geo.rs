//! Great-circle geometry on a spherical Earth.

use serde::{Deserialize, Serialize};

use crate::error::{QuizError, QuizResult};

/// Mean Earth radius used for all distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude, positive north.
    pub latitude: f64,
    /// Longitude, positive east.
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a point, rejecting coordinates off the map.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::InvalidCoordinate`] unless latitude is within
    /// `[-90, 90]` and longitude within `[-180, 180]`.
    pub fn new(latitude: f64, longitude: f64) -> QuizResult<Self> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(QuizError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Great-circle distance to `other` in kilometres.
    #[must_use]
    pub fn distance_km(self, other: Self) -> f64 {
        distance_km(self, other)
    }

    /// The point reached from here after `distance_km` along the initial
    /// bearing `bearing_deg` (clockwise from north).
    ///
    /// Longitude is wrapped into `[-180, 180]`.
    #[must_use]
    pub fn destination(self, bearing_deg: f64, distance_km: f64) -> Self {
        let lat1 = self.latitude.to_radians();
        let lon1 = self.longitude.to_radians();
        let bearing = bearing_deg.to_radians();
        let delta = distance_km / EARTH_RADIUS_KM;

        let sin_lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * bearing.cos())
            .clamp(-1.0, 1.0);
        let lat2 = sin_lat2.asin();
        let lon2 = lon1
            + (bearing.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * sin_lat2);

        Self {
            latitude: lat2.to_degrees(),
            longitude: wrap_longitude(lon2.to_degrees()),
        }
    }
}

/// Haversine distance between two points in kilometres.
///
/// `a` is clamped to `[0, 1]` so rounding can never push the square roots
/// negative; identical points give exactly zero.
#[must_use]
pub fn distance_km(p1: GeoPoint, p2: GeoPoint) -> f64 {
    let lat1 = p1.latitude.to_radians();
    let lat2 = p2.latitude.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (p2.longitude - p1.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

fn wrap_longitude(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid maps +180 to -180; keep the sign the caller asked for
    if lon > 0.0 && wrapped <= -180.0 { 180.0 } else { wrapped }
}
