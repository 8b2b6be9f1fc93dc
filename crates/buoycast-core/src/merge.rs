//! SeriesMerger: fold the per-layout series into one synchronized
//! series on the base grid.

use crate::locator::Datum;
use crate::{TimedSeries, VariableRecord};

/// Merge `series` into a single series keyed by the base grid.
///
/// The base grid is the timestamp set of the input with the most
/// entries (first one wins ties). For every timestamp on the grid,
/// each variable takes the first non-missing value found scanning the
/// inputs in their given order; if every input is missing (or lacks
/// the timestamp), the value stays [`Datum::Missing`].
///
/// Timestamps present only in a non-base series are dropped: the grid
/// is fixed at selection time. In a well-formed feed a shorter
/// layout's timestamps are a subset of the longest, so nothing is
/// lost; the asymmetry only shows on feeds whose layouts disagree
/// about the instants themselves.
///
/// Pure function: inputs are not mutated.
pub fn merge(series: &[TimedSeries]) -> TimedSeries {
    let base = match series.iter().max_by(|a, b| {
        // strictly-greater wins, first wins ties
        match a.len().cmp(&b.len()) {
            std::cmp::Ordering::Equal => std::cmp::Ordering::Greater,
            other => other,
        }
    }) {
        Some(base) => base,
        None => return TimedSeries::new(),
    };

    let mut merged = TimedSeries::new();
    for (ts, base_record) in base {
        let mut record: VariableRecord = base_record
            .keys()
            .map(|&name| (name, Datum::Missing))
            .collect();

        for s in series {
            let Some(incoming) = s.get(ts) else { continue };
            for (&name, datum) in incoming {
                if datum.is_missing() {
                    continue;
                }
                match record.get(name) {
                    Some(Datum::Missing) | None => {
                        record.insert(name, datum.clone());
                    }
                    Some(Datum::Text(_)) => {}
                }
            }
        }

        merged.insert(*ts, record);
    }

    merged
}
