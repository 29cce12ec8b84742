//! Great-circle math on a spherical Earth.

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coordinate {
            latitude,
            longitude,
        }
    }
}

/// Anything that sits at a point on the globe.
pub trait Located {
    fn coordinate(&self) -> Coordinate;
}

impl Located for Coordinate {
    fn coordinate(&self) -> Coordinate {
        *self
    }
}

/// Haversine distance between `a` and `b` in statute miles.
pub fn distance<A: Located + ?Sized, B: Located + ?Sized>(a: &A, b: &B) -> f64 {
    let origin = a.coordinate();
    let dest = b.coordinate();

    let origin_lat_rad = origin.latitude.to_radians();
    let dest_lat_rad = dest.latitude.to_radians();
    let delta_lat = dest_lat_rad - origin_lat_rad;
    let delta_lon = dest.longitude.to_radians() - origin.longitude.to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + origin_lat_rad.cos() * dest_lat_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Initial great-circle bearing from `a` towards `b`, in degrees within `[0, 360)`.
///
/// Coincident points give `0`.
pub fn heading<A: Located + ?Sized, B: Located + ?Sized>(a: &A, b: &B) -> f64 {
    let origin = a.coordinate();
    let dest = b.coordinate();

    let lat1 = origin.latitude.to_radians();
    let lat2 = dest.latitude.to_radians();
    let delta_lon = (dest.longitude - origin.longitude).to_radians();

    let y = delta_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();

    (y.atan2(x).to_degrees() + 360.0) % 360.0
}
