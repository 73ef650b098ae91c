//! Geographic node type.

use serde::{Deserialize, Serialize};

/// Nautical miles per degree of arc.
const NAUTICAL_MILES_PER_DEGREE: f64 = 60.0;
/// Statute miles per nautical mile.
const STATUTE_MILES_PER_NAUTICAL_MILE: f64 = 1.1515;
/// Kilometres per statute mile.
const KM_PER_STATUTE_MILE: f64 = 1.609344;

/// A point on the globe identified by an externally supplied id.
///
/// Ids need not be 0-based or contiguous. Two nodes with the same id are the
/// same node: their distance is zero whatever their coordinates.
///
/// Serializes as `{ "nodeIndex": .., "lat": .., "lng": .. }`.
///
/// # Examples
///
/// ```
/// use u_tsp::models::GeoNode;
///
/// let warsaw = GeoNode::new(1, 52.2297, 21.0122);
/// let krakow = GeoNode::new(2, 50.0647, 19.9450);
/// let d = warsaw.distance_to(&krakow);
/// assert!((d - 251.96).abs() < 0.01);
/// assert_eq!(warsaw.distance_to(&warsaw), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoNode {
    #[serde(rename = "nodeIndex")]
    id: i64,
    lat: f64,
    lng: f64,
}

impl GeoNode {
    /// Creates a node at the given latitude and longitude (degrees).
    pub fn new(id: i64, lat: f64, lng: f64) -> Self {
        Self { id, lat, lng }
    }

    /// External identifier.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Returns `true` if both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Great-circle distance to another node in kilometres.
    ///
    /// Uses the spherical law of cosines on the central angle, converted
    /// through nautical and statute miles. The cosine is clamped to `[-1, 1]`
    /// so rounding cannot push `acos` out of its domain.
    pub fn distance_to(&self, other: &GeoNode) -> f64 {
        if self.id == other.id {
            return 0.0;
        }
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let delta_lng = (self.lng - other.lng).to_radians();

        let cos_angle = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * delta_lng.cos();
        let angle_deg = cos_angle.clamp(-1.0, 1.0).acos().to_degrees();

        angle_deg
            * NAUTICAL_MILES_PER_DEGREE
            * STATUTE_MILES_PER_NAUTICAL_MILE
            * KM_PER_STATUTE_MILE
    }
}
