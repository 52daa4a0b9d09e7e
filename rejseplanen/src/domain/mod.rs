//! Domain types for the Rejseplanen client.
//!
//! These are the strongly-typed results callers work with. Nothing in here
//! knows about JSON; the `api` module converts raw responses into these
//! types and drops or defaults anything malformed on the way.

mod departure;
mod place;
mod product;
mod time;

pub use departure::{
    BoardType, Departure, DepartureBoard, DepartureCategory, DepartureKey, UnstampedBoard,
};
pub use place::{Address, Coordinate, LocationResult, NamedLocation, Place, PointOfInterest, Stop};
pub use product::{ProductCategory, encode_products};
pub use time::{TimestampError, format_date, format_time, parse_timestamp};
