//! Departures and departure boards.

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::NaiveDateTime;

use super::place::Stop;
use super::time::{format_date, format_time};

/// Transport type of a departure, as reported by the API's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepartureCategory {
    /// InterCity train (IC)
    InterCity,
    /// InterCityLyn express train (LYN)
    Express,
    /// Regional train (REG)
    Regional,
    /// S-train (S)
    SuburbanRail,
    /// Other train (TOG)
    Rail,
    /// Bus (BUS)
    Bus,
    /// Express bus (EXB)
    ExpressBus,
    /// Night bus (NB)
    NightBus,
    /// Demand-responsive bus (TB)
    TeleBus,
    /// Ferry (F)
    Ferry,
    /// Metro (M)
    Metro,
    /// Light rail (LET)
    LightRail,
    /// Any code not listed above
    Unknown,
}

impl DepartureCategory {
    /// Map an API type code to a category. Unrecognised codes map to
    /// [`DepartureCategory::Unknown`]; matching is case-sensitive.
    pub fn from_code(code: &str) -> Self {
        match code {
            "IC" => Self::InterCity,
            "LYN" => Self::Express,
            "REG" => Self::Regional,
            "S" => Self::SuburbanRail,
            "TOG" => Self::Rail,
            "BUS" => Self::Bus,
            "EXB" => Self::ExpressBus,
            "NB" => Self::NightBus,
            "TB" => Self::TeleBus,
            "F" => Self::Ferry,
            "M" => Self::Metro,
            "LET" => Self::LightRail,
            _ => Self::Unknown,
        }
    }

    /// The API code for this category.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InterCity => "IC",
            Self::Express => "LYN",
            Self::Regional => "REG",
            Self::SuburbanRail => "S",
            Self::Rail => "TOG",
            Self::Bus => "BUS",
            Self::ExpressBus => "EXB",
            Self::NightBus => "NB",
            Self::TeleBus => "TB",
            Self::Ferry => "F",
            Self::Metro => "M",
            Self::LightRail => "LET",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for DepartureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single departure from a stop.
///
/// Equality and hashing use [`Departure::key`] only: two departures with the
/// same line name, category, stop and scheduled time are the same departure
/// even if realtime data differs.
#[derive(Debug, Clone)]
pub struct Departure {
    /// Line name, e.g. "Bus 6A" or "IC 848".
    pub name: String,
    pub category: DepartureCategory,
    /// Name of the stop the departure leaves from.
    pub stop_name: String,
    pub scheduled_at: NaiveDateTime,
    pub track: Option<String>,
    /// Present only when the API sent both a realtime time and date.
    pub realtime_at: Option<NaiveDateTime>,
    pub realtime_track: Option<String>,
    pub direction: Option<String>,
    pub cancelled: bool,
    /// Number of service messages attached to the departure.
    pub message_count: i32,
    pub final_stop_name: Option<String>,
    /// Opaque reference to the journey detail resource.
    pub journey_ref: Option<String>,
}

/// Identity of a departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepartureKey<'a> {
    pub name: &'a str,
    pub category: DepartureCategory,
    pub stop_name: &'a str,
    pub scheduled_at: NaiveDateTime,
}

impl Departure {
    pub fn key(&self) -> DepartureKey<'_> {
        DepartureKey {
            name: &self.name,
            category: self.category,
            stop_name: &self.stop_name,
            scheduled_at: self.scheduled_at,
        }
    }

    /// Best known departure time: realtime if available, else scheduled.
    pub fn expected_at(&self) -> NaiveDateTime {
        self.realtime_at.unwrap_or(self.scheduled_at)
    }

    /// Delay against the timetable in whole minutes, if realtime data exists.
    pub fn delay_minutes(&self) -> Option<i64> {
        self.realtime_at
            .map(|rt| rt.signed_duration_since(self.scheduled_at).num_minutes())
    }
}

impl PartialEq for Departure {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Departure {}

impl Hash for Departure {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Departure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}) {}",
            format_time(&self.scheduled_at),
            format_date(&self.scheduled_at),
            self.category,
            self.name
        )?;
        if let Some(direction) = &self.direction {
            write!(f, " → {direction}")?;
        }
        if self.cancelled {
            f.write_str(" [cancelled]")?;
        } else if let Some(delay) = self.delay_minutes().filter(|d| *d != 0) {
            write!(f, " [{delay:+} min]")?;
        }
        Ok(())
    }
}

/// Which transport types a departure board request should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BoardType {
    #[default]
    All,
    Trains,
    Busses,
    Metros,
}

impl BoardType {
    /// Query flags selecting this board type. `All` needs none.
    pub fn query_flags(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            BoardType::All => &[],
            BoardType::Trains => &[("useTog", "1"), ("useBus", "0"), ("useMetro", "0")],
            BoardType::Busses => &[("useTog", "0"), ("useBus", "1"), ("useMetro", "0")],
            BoardType::Metros => &[("useTog", "0"), ("useBus", "0"), ("useMetro", "1")],
        }
    }
}

/// Departures decoded from a response, before the request context is known.
///
/// The payload does not say which stop or board type it answers, so the
/// only way to get a [`DepartureBoard`] is to [`stamp`](Self::stamp) one of
/// these with the values the request was made with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnstampedBoard {
    departures: Vec<Departure>,
}

impl UnstampedBoard {
    pub fn new(departures: Vec<Departure>) -> Self {
        Self { departures }
    }

    pub fn departures(&self) -> &[Departure] {
        &self.departures
    }

    /// Attach the requested stop and board type.
    pub fn stamp(self, stop: Stop, board_type: BoardType) -> DepartureBoard {
        DepartureBoard {
            stop,
            board_type,
            departures: self.departures,
        }
    }
}

/// Upcoming departures from a stop.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartureBoard {
    stop: Stop,
    board_type: BoardType,
    departures: Vec<Departure>,
}

impl DepartureBoard {
    /// The stop the board was requested for.
    pub fn stop(&self) -> &Stop {
        &self.stop
    }

    pub fn board_type(&self) -> BoardType {
        self.board_type
    }

    pub fn departures(&self) -> &[Departure] {
        &self.departures
    }

    pub fn into_departures(self) -> Vec<Departure> {
        self.departures
    }

    /// Drop departures whose identity repeats an earlier one, keeping order.
    pub fn dedup(&mut self) {
        let mut seen = HashSet::new();
        self.departures.retain(|d| {
            seen.insert((d.name.clone(), d.category, d.stop_name.clone(), d.scheduled_at))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parse_timestamp;

    fn make_departure(name: &str, time: &str) -> Departure {
        Departure {
            name: name.to_string(),
            category: DepartureCategory::Bus,
            stop_name: "Rådhuspladsen".to_string(),
            scheduled_at: parse_timestamp(time, "15.03.24").unwrap(),
            track: None,
            realtime_at: None,
            realtime_track: None,
            direction: Some("Nørreport St.".to_string()),
            cancelled: false,
            message_count: 0,
            final_stop_name: None,
            journey_ref: None,
        }
    }

    #[test]
    fn category_from_known_codes() {
        assert_eq!(DepartureCategory::from_code("IC"), DepartureCategory::InterCity);
        assert_eq!(DepartureCategory::from_code("LYN"), DepartureCategory::Express);
        assert_eq!(DepartureCategory::from_code("S"), DepartureCategory::SuburbanRail);
        assert_eq!(DepartureCategory::from_code("M"), DepartureCategory::Metro);
        assert_eq!(DepartureCategory::from_code("LET"), DepartureCategory::LightRail);
    }

    #[test]
    fn category_unknown_fallback() {
        assert_eq!(DepartureCategory::from_code("XX"), DepartureCategory::Unknown);
        assert_eq!(DepartureCategory::from_code(""), DepartureCategory::Unknown);
        assert_eq!(DepartureCategory::from_code("bus"), DepartureCategory::Unknown);
    }

    #[test]
    fn category_code_roundtrip() {
        let all = [
            DepartureCategory::InterCity,
            DepartureCategory::Express,
            DepartureCategory::Regional,
            DepartureCategory::SuburbanRail,
            DepartureCategory::Rail,
            DepartureCategory::Bus,
            DepartureCategory::ExpressBus,
            DepartureCategory::NightBus,
            DepartureCategory::TeleBus,
            DepartureCategory::Ferry,
            DepartureCategory::Metro,
            DepartureCategory::LightRail,
        ];
        for category in all {
            assert_eq!(DepartureCategory::from_code(category.code()), category);
        }
    }

    #[test]
    fn identity_ignores_realtime_fields() {
        let a = make_departure("Bus 6A", "10:15");
        let mut b = a.clone();
        b.realtime_at = Some(parse_timestamp("10:18", "15.03.24").unwrap());
        b.track = Some("3".to_string());
        b.message_count = 2;
        assert_eq!(a, b);

        let c = make_departure("Bus 6A", "10:25");
        assert_ne!(a, c);

        let mut d = a.clone();
        d.category = DepartureCategory::NightBus;
        assert_ne!(a, d);
    }

    #[test]
    fn delay_minutes() {
        let mut dep = make_departure("Bus 6A", "10:15");
        assert_eq!(dep.delay_minutes(), None);
        assert_eq!(dep.expected_at(), dep.scheduled_at);

        dep.realtime_at = Some(parse_timestamp("10:18", "15.03.24").unwrap());
        assert_eq!(dep.delay_minutes(), Some(3));
        assert_eq!(dep.expected_at(), dep.realtime_at.unwrap());
    }

    #[test]
    fn display() {
        let mut dep = make_departure("Bus 6A", "10:15");
        assert_eq!(dep.to_string(), "10:15 15.03.24 (BUS) Bus 6A → Nørreport St.");

        dep.realtime_at = Some(parse_timestamp("10:18", "15.03.24").unwrap());
        assert!(dep.to_string().ends_with("[+3 min]"));

        dep.cancelled = true;
        assert!(dep.to_string().ends_with("[cancelled]"));
    }

    #[test]
    fn board_type_flags() {
        assert!(BoardType::All.query_flags().is_empty());
        assert_eq!(
            BoardType::Trains.query_flags(),
            &[("useTog", "1"), ("useBus", "0"), ("useMetro", "0")]
        );
        assert_eq!(
            BoardType::Busses.query_flags(),
            &[("useTog", "0"), ("useBus", "1"), ("useMetro", "0")]
        );
        assert_eq!(
            BoardType::Metros.query_flags(),
            &[("useTog", "0"), ("useBus", "0"), ("useMetro", "1")]
        );
    }

    #[test]
    fn stamping_attaches_context() {
        let unstamped = UnstampedBoard::new(vec![make_departure("Bus 6A", "10:15")]);
        assert_eq!(unstamped.departures().len(), 1);

        let stop = Stop::new("000010845", "Rådhuspladsen", 55.676, 12.569);
        let board = unstamped.stamp(stop.clone(), BoardType::Busses);
        assert_eq!(board.stop(), &stop);
        assert_eq!(board.board_type(), BoardType::Busses);
        assert_eq!(board.departures().len(), 1);
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let first = make_departure("Bus 6A", "10:15");
        let mut duplicate = first.clone();
        duplicate.track = Some("B".to_string());
        let other = make_departure("Bus 6A", "10:25");

        let mut board = UnstampedBoard::new(vec![first, duplicate, other])
            .stamp(Stop::new("1", "Rådhuspladsen", 0.0, 0.0), BoardType::All);
        board.dedup();

        let departures = board.departures();
        assert_eq!(departures.len(), 2);
        assert!(departures[0].track.is_none());
        assert_eq!(format_time(&departures[1].scheduled_at), "10:25");
    }
}
