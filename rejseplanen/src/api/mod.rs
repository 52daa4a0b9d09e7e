//! Rejseplanen REST API client.
//!
//! Key characteristics of the API:
//! - Every scalar is a string, including coordinates, flags and counts
//! - Coordinates are integer micro-degrees, with `x` the longitude
//! - A list with one element is sent as a bare object, and an empty list
//!   is sent as a missing key
//! - Timestamps are split into "HH:MM" and "DD.MM.YY" fields

mod client;
mod convert;
mod error;
mod flexible;
mod mock;
mod transport;
mod types;

pub use client::{DEFAULT_BASE_URL, NearbyQuery, RejseplanenClient, RejseplanenConfig};
pub use convert::{
    ConversionError, convert_departure, convert_departure_board, convert_location_list,
    convert_stop,
};
pub use error::ApiError;
pub use flexible::{FieldShape, decode_list, probe};
pub use mock::MockTransport;
pub use transport::{HttpTransport, Transport, TransportResponse};
pub use types::{CoordLocation, JourneyDetailRef, RawDeparture, StopLocation};
