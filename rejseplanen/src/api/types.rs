//! Rejseplanen API response DTOs.
//!
//! These types map directly to records in the JSON API. Every scalar arrives
//! as a string (coordinates, flags and counts included), so fields are kept
//! as `String` here and interpreted in `convert`.

use serde::Deserialize;

/// Envelope key of location and nearby-stop responses.
pub const LOCATION_LIST_KEY: &str = "LocationList";

/// Envelope key of departure board responses.
pub const DEPARTURE_BOARD_KEY: &str = "DepartureBoard";

/// Key of stop records inside a `LocationList`.
pub const STOP_LOCATION_KEY: &str = "StopLocation";

/// Key of address/POI records inside a `LocationList`.
pub const COORD_LOCATION_KEY: &str = "CoordLocation";

/// Key of departure records inside a `DepartureBoard`.
pub const DEPARTURE_KEY: &str = "Departure";

/// A stop record.
#[derive(Debug, Clone, Deserialize)]
pub struct StopLocation {
    pub id: String,
    pub name: String,
    /// Longitude in micro-degrees.
    pub x: String,
    /// Latitude in micro-degrees.
    pub y: String,
}

/// An address or point-of-interest record.
#[derive(Debug, Clone, Deserialize)]
pub struct CoordLocation {
    pub name: String,
    /// "ADR" or "POI".
    #[serde(rename = "type")]
    pub kind: String,
    pub x: String,
    pub y: String,
}

/// A departure record.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDeparture {
    pub name: String,

    /// Transport type code ("IC", "BUS", "M", ...).
    #[serde(rename = "type")]
    pub kind: String,

    /// Name of the stop the departure leaves from.
    pub stop: String,

    /// Scheduled time of day, "HH:MM".
    pub time: Option<String>,

    /// Scheduled date, "DD.MM.YY".
    pub date: Option<String>,

    pub track: Option<String>,

    #[serde(rename = "rtTime")]
    pub rt_time: Option<String>,

    #[serde(rename = "rtDate")]
    pub rt_date: Option<String>,

    #[serde(rename = "rtTrack")]
    pub rt_track: Option<String>,

    pub direction: Option<String>,

    /// "true" when cancelled; usually absent otherwise.
    pub cancelled: Option<String>,

    /// Number of attached messages, as a string.
    pub messages: Option<String>,

    #[serde(rename = "finalStop")]
    pub final_stop: Option<String>,

    #[serde(rename = "JourneyDetailRef")]
    pub journey_detail_ref: Option<JourneyDetailRef>,
}

/// Link to the journey detail resource of a departure.
#[derive(Debug, Clone, Deserialize)]
pub struct JourneyDetailRef {
    #[serde(rename = "ref")]
    pub reference: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_stop_location() {
        let json = r#"{
            "name": "København H",
            "x": "12565562",
            "y": "55673063",
            "id": "008600626"
        }"#;

        let stop: StopLocation = serde_json::from_str(json).unwrap();
        assert_eq!(stop.id, "008600626");
        assert_eq!(stop.name, "København H");
        assert_eq!(stop.x, "12565562");
        assert_eq!(stop.y, "55673063");
    }

    #[test]
    fn deserialize_coord_location() {
        let json = r#"{
            "name": "Tivoli, København",
            "x": "12568146",
            "y": "55673693",
            "type": "POI"
        }"#;

        let poi: CoordLocation = serde_json::from_str(json).unwrap();
        assert_eq!(poi.kind, "POI");
        assert_eq!(poi.name, "Tivoli, København");
    }

    #[test]
    fn stop_location_requires_all_fields() {
        let json = r#"{"name": "København H", "x": "12565562", "y": "55673063"}"#;
        assert!(serde_json::from_str::<StopLocation>(json).is_err());
    }

    #[test]
    fn deserialize_full_departure() {
        let json = r#"{
            "name": "IC 848",
            "type": "IC",
            "stop": "København H",
            "time": "14:02",
            "date": "15.03.24",
            "id": "1234",
            "track": "5",
            "rtTime": "14:06",
            "rtDate": "15.03.24",
            "rtTrack": "6",
            "messages": "2",
            "cancelled": "true",
            "finalStop": "Aarhus H",
            "direction": "Aarhus H",
            "JourneyDetailRef": {
                "ref": "http://webapp.rejseplanen.dk/bin/rest.exe/journeyDetail?ref=1234"
            }
        }"#;

        let dep: RawDeparture = serde_json::from_str(json).unwrap();
        assert_eq!(dep.kind, "IC");
        assert_eq!(dep.rt_time.as_deref(), Some("14:06"));
        assert_eq!(dep.rt_date.as_deref(), Some("15.03.24"));
        assert_eq!(dep.rt_track.as_deref(), Some("6"));
        assert_eq!(dep.final_stop.as_deref(), Some("Aarhus H"));
        assert_eq!(dep.cancelled.as_deref(), Some("true"));
        assert!(dep.journey_detail_ref.unwrap().reference.contains("ref=1234"));
    }

    #[test]
    fn deserialize_minimal_departure() {
        let json = r#"{
            "name": "Bus 5C",
            "type": "BUS",
            "stop": "Rådhuspladsen",
            "time": "10:15",
            "date": "15.03.24"
        }"#;

        let dep: RawDeparture = serde_json::from_str(json).unwrap();
        assert!(dep.track.is_none());
        assert!(dep.rt_time.is_none());
        assert!(dep.cancelled.is_none());
        assert!(dep.messages.is_none());
        assert!(dep.journey_detail_ref.is_none());
    }
}
