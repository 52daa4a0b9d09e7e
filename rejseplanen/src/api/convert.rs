//! Conversion from Rejseplanen DTOs to domain types.
//!
//! Field-level anomalies resolve to defaults here rather than errors: an
//! unknown transport code becomes `Unknown`, an unparsable message count
//! becomes 0, and a place with bad coordinates or an unknown kind is left
//! out. Only timestamps are strict, and a bad timestamp costs just the one
//! departure it belongs to.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::domain::{
    Address, Coordinate, Departure, DepartureCategory, LocationResult, NamedLocation,
    PointOfInterest, Stop, TimestampError, UnstampedBoard, parse_timestamp,
};

use super::flexible::decode_list;
use super::types::{
    COORD_LOCATION_KEY, CoordLocation, DEPARTURE_KEY, RawDeparture, STOP_LOCATION_KEY,
    StopLocation,
};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// A scheduled or realtime timestamp is malformed
    #[error(transparent)]
    InvalidTimestamp(#[from] TimestampError),

    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A response envelope is not a JSON object
    #[error("{0} is not a JSON object")]
    NotAnObject(&'static str),
}

/// Discriminator values of `CoordLocation.type`.
const ADDRESS_KIND: &str = "ADR";
const POINT_OF_INTEREST_KIND: &str = "POI";

/// Convert the contents of a `LocationList` envelope.
pub fn convert_location_list(list: &Value) -> Result<LocationResult, ConversionError> {
    let list = as_object(list, "LocationList")?;

    let stops = decode_list::<StopLocation>(list, STOP_LOCATION_KEY)
        .into_iter()
        .filter_map(convert_stop)
        .collect();

    let mut result = LocationResult {
        stops,
        ..LocationResult::default()
    };

    for coord in decode_list::<CoordLocation>(list, COORD_LOCATION_KEY) {
        let Some(location) = named_location(coord.name, &coord.x, &coord.y) else {
            continue;
        };
        match coord.kind.as_str() {
            ADDRESS_KIND => result.addresses.push(Address::new(location)),
            POINT_OF_INTEREST_KIND => result.points_of_interest.push(PointOfInterest::new(location)),
            other => debug!(kind = other, name = location.name(), "skipping place of unknown kind"),
        }
    }

    Ok(result)
}

/// Convert a stop record, or `None` if its coordinates are not numeric.
pub fn convert_stop(raw: StopLocation) -> Option<Stop> {
    let location = named_location(raw.name, &raw.x, &raw.y)?;
    Some(Stop::from_parts(raw.id, location))
}

fn named_location(name: String, x: &str, y: &str) -> Option<NamedLocation> {
    match Coordinate::from_micro_degrees(x, y) {
        Some(coordinate) => Some(NamedLocation::new(name, coordinate)),
        None => {
            debug!(%name, x, y, "skipping place with non-numeric coordinates");
            None
        }
    }
}

/// Convert the contents of a `DepartureBoard` envelope.
///
/// Departures that fail conversion are skipped individually; the board
/// carries no stop or board type until it is stamped.
pub fn convert_departure_board(board: &Value) -> Result<UnstampedBoard, ConversionError> {
    let board = as_object(board, "DepartureBoard")?;

    let departures = decode_list::<RawDeparture>(board, DEPARTURE_KEY)
        .into_iter()
        .filter_map(|raw| {
            let name = raw.name.clone();
            match convert_departure(raw) {
                Ok(departure) => Some(departure),
                Err(e) => {
                    warn!(%name, error = %e, "skipping departure");
                    None
                }
            }
        })
        .collect();

    Ok(UnstampedBoard::new(departures))
}

/// Convert a single departure record.
pub fn convert_departure(raw: RawDeparture) -> Result<Departure, ConversionError> {
    let time = raw.time.as_deref().ok_or(ConversionError::MissingField("time"))?;
    let date = raw.date.as_deref().ok_or(ConversionError::MissingField("date"))?;
    let scheduled_at = parse_timestamp(time, date)?;

    // A realtime time without its date (or the reverse) is ignored
    let realtime_at = match (raw.rt_time.as_deref(), raw.rt_date.as_deref()) {
        (Some(rt_time), Some(rt_date)) => Some(parse_timestamp(rt_time, rt_date)?),
        _ => None,
    };

    Ok(Departure {
        category: DepartureCategory::from_code(&raw.kind),
        name: raw.name,
        stop_name: raw.stop,
        scheduled_at,
        track: raw.track,
        realtime_at,
        realtime_track: raw.rt_track,
        direction: raw.direction,
        cancelled: parse_flag(raw.cancelled.as_deref()),
        message_count: parse_count(raw.messages.as_deref()),
        final_stop_name: raw.final_stop,
        journey_ref: raw.journey_detail_ref.map(|r| r.reference),
    })
}

/// Only the exact string "true" is true.
fn parse_flag(value: Option<&str>) -> bool {
    value == Some("true")
}

/// Absent or unparsable counts are 0. Negative counts pass through.
fn parse_count(value: Option<&str>) -> i32 {
    value.and_then(|v| v.parse().ok()).unwrap_or(0)
}

fn as_object<'a>(
    value: &'a Value,
    what: &'static str,
) -> Result<&'a Map<String, Value>, ConversionError> {
    value.as_object().ok_or(ConversionError::NotAnObject(what))
}
