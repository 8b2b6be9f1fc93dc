//! NDFD request construction and validation.
//!
//! The NDFD REST endpoint takes a flat query string; this module owns
//! assembling it (including the four marine element flags) and
//! rejecting bad input before anything goes over the wire.

use std::fmt;

use chrono::DateTime;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Unit system
// ---------------------------------------------------------------------------

/// NDFD `Unit` query parameter: `e` (english/imperial) or `m` (metric).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnitSystem {
    Imperial,
    Metric,
}

impl UnitSystem {
    pub fn as_query_value(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "e",
            UnitSystem::Metric => "m",
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors raised by [`ForecastRequest::validate`].
#[derive(Debug, Clone, PartialEq)]
pub enum RequestError {
    /// Latitude or longitude outside its valid range.
    InvalidCoordinate { field: &'static str, value: f64 },
    /// `begin` or `end` is not RFC 3339.
    InvalidDate { field: &'static str, raw: String },
    /// `end` precedes `begin`.
    InvertedRange { begin: String, end: String },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::InvalidCoordinate { field, value } => {
                write!(f, "{field} out of range: {value}")
            }
            RequestError::InvalidDate { field, raw } => {
                write!(f, "{field} is not an RFC 3339 datetime: '{raw}'")
            }
            RequestError::InvertedRange { begin, end } => {
                write!(f, "end '{end}' precedes begin '{begin}'")
            }
        }
    }
}

impl std::error::Error for RequestError {}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Parameters for one NDFD time-series fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// Inclusive range start, RFC 3339.
    pub begin: String,
    /// Inclusive range end, RFC 3339.
    pub end: String,
    pub units: UnitSystem,
}

impl ForecastRequest {
    /// Check coordinates and the date range before dispatch.
    pub fn validate(&self) -> Result<(), RequestError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(RequestError::InvalidCoordinate {
                field: "latitude",
                value: self.latitude,
            });
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(RequestError::InvalidCoordinate {
                field: "longitude",
                value: self.longitude,
            });
        }
        let begin =
            DateTime::parse_from_rfc3339(&self.begin).map_err(|_| RequestError::InvalidDate {
                field: "begin",
                raw: self.begin.clone(),
            })?;
        let end =
            DateTime::parse_from_rfc3339(&self.end).map_err(|_| RequestError::InvalidDate {
                field: "end",
                raw: self.end.clone(),
            })?;
        if end < begin {
            return Err(RequestError::InvertedRange {
                begin: self.begin.clone(),
                end: self.end.clone(),
            });
        }
        Ok(())
    }

    /// Query pairs for the NDFDgen time-series product, marine element
    /// flags included.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("whichClient", "NDFDgen".to_string()),
            ("lat", self.latitude.to_string()),
            ("lon", self.longitude.to_string()),
            ("product", "time-series".to_string()),
            ("begin", self.begin.clone()),
            ("end", self.end.clone()),
            ("Unit", self.units.as_query_value().to_string()),
            ("wspd", "wspd".to_string()),
            ("wdir", "wdir".to_string()),
            ("waveh", "waveh".to_string()),
            ("wgust", "wgust".to_string()),
            ("Submit", "Submit".to_string()),
        ]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
