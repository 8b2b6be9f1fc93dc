//! Typed per-timestamp observations built from reconciled records.
//!
//! One fixed struct field per tracked marine variable; units come from
//! a static table keyed by variable name and unit system. No runtime
//! field synthesis.

use buoycast_core::{Timestamp, VariableRecord};
use serde::Serialize;

use crate::request::UnitSystem;

// ---------------------------------------------------------------------------
// Unit table
// ---------------------------------------------------------------------------

struct VariableUnits {
    name: &'static str,
    imperial: &'static str,
    metric: &'static str,
}

/// Unit labels for the marine variable set, by engine record key.
const MARINE_UNITS: &[VariableUnits] = &[
    VariableUnits {
        name: "wind_speed",
        imperial: "kt",
        metric: "km/h",
    },
    VariableUnits {
        name: "wind_gust",
        imperial: "kt",
        metric: "km/h",
    },
    VariableUnits {
        name: "wind_direction",
        imperial: "degrees true",
        metric: "degrees true",
    },
    VariableUnits {
        name: "wave_height",
        imperial: "ft",
        metric: "m",
    },
];

fn unit_for(name: &str, units: UnitSystem) -> &'static str {
    MARINE_UNITS
        .iter()
        .find(|u| u.name == name)
        .map(|u| match units {
            UnitSystem::Imperial => u.imperial,
            UnitSystem::Metric => u.metric,
        })
        .unwrap_or("")
}

// ---------------------------------------------------------------------------
// Measurement
// ---------------------------------------------------------------------------

/// One observed value with its unit label. The raw feed string is kept
/// verbatim; numeric access is on demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    /// Value text exactly as published.
    pub raw: String,
    pub unit: &'static str,
}

impl Measurement {
    /// The value as a float, or `None` when the feed text is not
    /// numeric. Distinct from a missing observation, which is the
    /// absence of the whole `Measurement`.
    pub fn value(&self) -> Option<f64> {
        self.raw.trim().parse().ok()
    }
}

// ---------------------------------------------------------------------------
// MarineForecast
// ---------------------------------------------------------------------------

/// The reconciled marine variables at one instant. `None` means the
/// feed had no observation for that variable at this timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarineForecast {
    pub valid_at: Timestamp,
    pub wind_speed: Option<Measurement>,
    pub wind_gust: Option<Measurement>,
    pub wind_direction: Option<Measurement>,
    pub wave_height: Option<Measurement>,
}

impl MarineForecast {
    /// Build from one engine record.
    pub fn from_record(valid_at: Timestamp, record: &VariableRecord, units: UnitSystem) -> Self {
        let field = |name: &str| {
            record
                .get(name)
                .and_then(|d| d.as_text())
                .map(|raw| Measurement {
                    raw: raw.to_string(),
                    unit: unit_for(name, units),
                })
        };
        MarineForecast {
            valid_at,
            wind_speed: field("wind_speed"),
            wind_gust: field("wind_gust"),
            wind_direction: field("wind_direction"),
            wave_height: field("wave_height"),
        }
    }
}

// ---------------------------------------------------------------------------
// ForecastSeries
// ---------------------------------------------------------------------------

/// Reconciled forecasts in ascending `valid_at` order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSeries {
    forecasts: Vec<MarineForecast>,
}

impl ForecastSeries {
    /// Build from the engine's ordered record sequence.
    pub fn from_records(
        records: Vec<(Timestamp, VariableRecord)>,
        units: UnitSystem,
    ) -> Self {
        let forecasts = records
            .iter()
            .map(|(ts, record)| MarineForecast::from_record(*ts, record, units))
            .collect();
        ForecastSeries { forecasts }
    }

    pub fn len(&self) -> usize {
        self.forecasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forecasts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MarineForecast> {
        self.forecasts.iter()
    }
}

impl IntoIterator for ForecastSeries {
    type Item = MarineForecast;
    type IntoIter = std::vec::IntoIter<MarineForecast>;

    fn into_iter(self) -> Self::IntoIter {
        self.forecasts.into_iter()
    }
}

impl<'a> IntoIterator for &'a ForecastSeries {
    type Item = &'a MarineForecast;
    type IntoIter = std::slice::Iter<'a, MarineForecast>;

    fn into_iter(self) -> Self::IntoIter {
        self.forecasts.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
