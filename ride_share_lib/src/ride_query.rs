use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use thiserror::Error;

use crate::text;

/// Raw `/findride` query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RideSearchParams {
    #[serde(default, deserialize_with = "text::truthy")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "text::truthy")]
    pub date: Option<String>,
    #[serde(default, rename = "seatsRequested", deserialize_with = "text::truthy")]
    pub seats_requested: Option<String>,
}

/// A validated ride search: location substring, exact ride date and the
/// minimum number of free seats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideQuery {
    pub location: String,
    pub date: NaiveDate,
    pub seats_requested: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RideQueryError {
    #[error("location, date and seatsRequested are required")]
    Missing,
    #[error("'{0}' is not a valid date")]
    InvalidDate(String),
    #[error("'{0}' is not a valid seat count")]
    InvalidSeats(String),
}

impl TryFrom<RideSearchParams> for RideQuery {
    type Error = RideQueryError;

    fn try_from(params: RideSearchParams) -> Result<Self, Self::Error> {
        let (Some(location), Some(date), Some(seats)) =
            (params.location, params.date, params.seats_requested)
        else {
            return Err(RideQueryError::Missing);
        };

        let date = parse_ride_date(&date).ok_or(RideQueryError::InvalidDate(date))?;
        let seats_requested = seats
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|seats| *seats >= 0)
            .ok_or_else(|| RideQueryError::InvalidSeats(seats.clone()))?;

        Ok(Self {
            location,
            date,
            seats_requested,
        })
    }
}

/// Ride dates arrive as `YYYY-MM-DD` from date inputs; full RFC 3339
/// timestamps are accepted and truncated to their UTC date.
pub fn parse_ride_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_utc().date()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(location: &str, date: &str, seats: &str) -> RideSearchParams {
        let some = |s: &str| (!s.is_empty()).then(|| s.to_string());
        RideSearchParams {
            location: some(location),
            date: some(date),
            seats_requested: some(seats),
        }
    }

    #[test]
    fn builds_query() {
        let query = RideQuery::try_from(params("Lagos", "2024-05-01", "2")).unwrap();
        assert_eq!(query.location, "Lagos");
        assert_eq!(query.date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(query.seats_requested, 2);
    }

    #[test]
    fn every_parameter_is_required() {
        assert_eq!(RideQuery::try_from(params("", "2024-05-01", "2")), Err(RideQueryError::Missing));
        assert_eq!(RideQuery::try_from(params("Lagos", "", "2")), Err(RideQueryError::Missing));
        assert_eq!(RideQuery::try_from(params("Lagos", "2024-05-01", "")), Err(RideQueryError::Missing));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            RideQuery::try_from(params("Lagos", "tomorrow", "2")),
            Err(RideQueryError::InvalidDate("tomorrow".into()))
        );
        assert_eq!(
            RideQuery::try_from(params("Lagos", "2024-05-01", "two")),
            Err(RideQueryError::InvalidSeats("two".into()))
        );
        assert_eq!(
            RideQuery::try_from(params("Lagos", "2024-05-01", "-5")),
            Err(RideQueryError::InvalidSeats("-5".into()))
        );
    }

    #[test]
    fn zero_seats_is_a_valid_request() {
        let query = RideQuery::try_from(params("Lagos", "2024-05-01", "0")).unwrap();
        assert_eq!(query.seats_requested, 0);
    }

    #[test]
    fn timestamps_truncate_to_date() {
        assert_eq!(
            parse_ride_date("2024-05-01T00:00:00.000Z"),
            NaiveDate::from_ymd_opt(2024, 5, 1)
        );
    }
}
