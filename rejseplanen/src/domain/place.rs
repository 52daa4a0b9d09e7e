//! Places returned by location searches: stops, addresses and points of interest.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Rejseplanen encodes coordinates as integer micro-degrees.
const MICRO_DEGREES: f64 = 1_000_000.0;

/// A WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate from decimal degrees.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build a coordinate from the API's `x`/`y` string pair.
    ///
    /// `x` is the longitude and `y` the latitude, both scaled by 1,000,000.
    /// Returns `None` if either value is not a finite number.
    ///
    /// # Examples
    ///
    /// ```
    /// use rejseplanen::domain::Coordinate;
    ///
    /// let c = Coordinate::from_micro_degrees("12565562", "55673063").unwrap();
    /// assert_eq!(c.longitude, 12.565562);
    /// assert_eq!(c.latitude, 55.673063);
    ///
    /// assert!(Coordinate::from_micro_degrees("east", "55673063").is_none());
    /// ```
    pub fn from_micro_degrees(x: &str, y: &str) -> Option<Self> {
        let x: f64 = x.trim().parse().ok().filter(|v: &f64| v.is_finite())?;
        let y: f64 = y.trim().parse().ok().filter(|v: &f64| v.is_finite())?;

        Some(Self {
            latitude: y / MICRO_DEGREES,
            longitude: x / MICRO_DEGREES,
        })
    }

    /// True when both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Scale to the integer `(x, y)` micro-degree pair used in query strings.
    ///
    /// Only meaningful for finite coordinates; see [`is_finite`](Self::is_finite).
    ///
    /// Rounds to the nearest micro-degree so that a coordinate read from the
    /// API maps back to the exact integers it came from.
    pub fn to_micro_degrees(&self) -> (i64, i64) {
        (
            (self.longitude * MICRO_DEGREES).round() as i64,
            (self.latitude * MICRO_DEGREES).round() as i64,
        )
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// The payload shared by every place kind: a name and a position.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedLocation {
    name: String,
    coordinate: Coordinate,
}

impl NamedLocation {
    pub fn new(name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            name: name.into(),
            coordinate,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn latitude(&self) -> f64 {
        self.coordinate.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.coordinate.longitude
    }
}

impl fmt::Display for NamedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.coordinate)
    }
}

/// A public transport stop.
///
/// Two stops are equal when their API ids match, regardless of name or
/// position.
#[derive(Debug, Clone)]
pub struct Stop {
    id: String,
    location: NamedLocation,
}

impl Stop {
    /// Create a stop from values already known to the caller, for example a
    /// stop resolved by an earlier search.
    pub fn new(id: impl Into<String>, name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            location: NamedLocation::new(name, Coordinate::new(latitude, longitude)),
        }
    }

    pub(crate) fn from_parts(id: String, location: NamedLocation) -> Self {
        Self { id, location }
    }

    /// The API-assigned stop id.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        self.location.name()
    }

    pub fn location(&self) -> &NamedLocation {
        &self.location
    }
}

impl PartialEq for Stop {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Stop {}

impl Hash for Stop {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stop {}: {}", self.id, self.location)
    }
}

/// A street address.
#[derive(Debug, Clone, PartialEq)]
pub struct Address(NamedLocation);

impl Address {
    pub fn new(location: NamedLocation) -> Self {
        Self(location)
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub fn location(&self) -> &NamedLocation {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address: {}", self.0)
    }
}

/// A named point of interest (museum, park, venue, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct PointOfInterest(NamedLocation);

impl PointOfInterest {
    pub fn new(location: NamedLocation) -> Self {
        Self(location)
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub fn location(&self) -> &NamedLocation {
        &self.0
    }
}

impl fmt::Display for PointOfInterest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point of interest: {}", self.0)
    }
}

impl AsRef<NamedLocation> for Stop {
    fn as_ref(&self) -> &NamedLocation {
        &self.location
    }
}

impl AsRef<NamedLocation> for Address {
    fn as_ref(&self) -> &NamedLocation {
        &self.0
    }
}

impl AsRef<NamedLocation> for PointOfInterest {
    fn as_ref(&self) -> &NamedLocation {
        &self.0
    }
}

/// Any place kind, for code that only cares about name and position.
#[derive(Debug, Clone, PartialEq)]
pub enum Place {
    Stop(Stop),
    Address(Address),
    PointOfInterest(PointOfInterest),
}

impl Place {
    pub fn location(&self) -> &NamedLocation {
        match self {
            Place::Stop(stop) => stop.location(),
            Place::Address(address) => address.location(),
            Place::PointOfInterest(poi) => poi.location(),
        }
    }

    pub fn name(&self) -> &str {
        self.location().name()
    }

    /// Returns the stop, if this place is one.
    pub fn as_stop(&self) -> Option<&Stop> {
        match self {
            Place::Stop(stop) => Some(stop),
            _ => None,
        }
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Place::Stop(stop) => stop.fmt(f),
            Place::Address(address) => address.fmt(f),
            Place::PointOfInterest(poi) => poi.fmt(f),
        }
    }
}

/// Result of a location search, split by place kind.
///
/// Each list keeps the order the API returned it in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationResult {
    pub stops: Vec<Stop>,
    pub addresses: Vec<Address>,
    pub points_of_interest: Vec<PointOfInterest>,
}

impl LocationResult {
    /// Total number of places across all kinds.
    pub fn len(&self) -> usize {
        self.stops.len() + self.addresses.len() + self.points_of_interest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten into a single list: stops, then addresses, then points of interest.
    pub fn into_places(self) -> Vec<Place> {
        let mut places = Vec::with_capacity(self.len());
        places.extend(self.stops.into_iter().map(Place::Stop));
        places.extend(self.addresses.into_iter().map(Place::Address));
        places.extend(self.points_of_interest.into_iter().map(Place::PointOfInterest));
        places
    }
}
