//! Maps.me's flavor of spherical mercator: integer coordinates in
//! `[0, coord_size]` on both axes project linearly to `[-180, 180]` on
//! longitude, then the latitude axis gets the inverse Gudermannian applied.

use std::f64::consts::PI;

/// A WGS84 (EPSG:4326) coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

/// Project an integer-mercator point to WGS84 degrees. `coord_size` must
/// already be known (the caller enforces this via `Error::HeaderNotRead`).
pub(crate) fn to_wgs84(x: i64, y: i64, coord_size: u64) -> LonLat {
    const MERC_MIN: f64 = -180.0;
    const MERC_MAX: f64 = 180.0;

    let lon = x as f64 * (MERC_MAX - MERC_MIN) / coord_size as f64 + MERC_MIN;
    let y_scaled = y as f64 * (MERC_MAX - MERC_MIN) / coord_size as f64 + MERC_MIN;
    let lat = 360.0 * (y_scaled * PI / 360.0).tanh().atan() / PI;

    LonLat { lon, lat }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equator_at_origin_and_antimeridian() {
        let coord_size = (1u64 << 19) - 1;
        let half = coord_size / 2;

        let west = to_wgs84(0, half as i64, coord_size);
        assert!((west.lon - (-180.0)).abs() < 1e-6);
        assert!(west.lat.abs() < 1e-3);

        let east = to_wgs84(coord_size as i64, half as i64, coord_size);
        assert!((east.lon - 180.0).abs() < 1e-6);
        assert!(east.lat.abs() < 1e-3);
    }
}
