//! Client for the Rejseplanen open data API.
//!
//! Looks up stops, addresses and points of interest, finds stops near a
//! coordinate, and fetches departure boards, normalising the API's loosely
//! shaped JSON into the types in [`domain`].

pub mod api;
pub mod domain;
