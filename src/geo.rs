/// A point on the globe, lat/lon in decimal degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Great-circle distance using the haversine formula.
/// Input lat/lon in degrees. Output in kilometers, rounded to 2 decimal places.
pub fn haversine_km(source: GeoPoint, destination: GeoPoint, earth_radius_km: f64) -> f64 {
    let (lat1, lon1, lat2, lon2) = (
        source.latitude.to_radians(),
        source.longitude.to_radians(),
        destination.latitude.to_radians(),
        destination.longitude.to_radians(),
    );
    let dlat = lat1 - lat2;
    let dlon = lon1 - lon2;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();
    round_to(c * earth_radius_km, 2)
}

/// Rounds half away from zero to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10_f64.powi(places);
    (value * scale).round() / scale
}
