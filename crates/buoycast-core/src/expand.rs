//! RecordExpander: turn one layout group into per-timestamp records.

use crate::group::LayoutGroup;
use crate::locator::Datum;
use crate::{TimedSeries, VariableRecord};

/// Expand `group` into a timestamp-keyed series.
///
/// Every record carries all of `names`; a variable absent from this
/// group, or whose value list is shorter than the timestamp sequence
/// (ragged feed), yields [`Datum::Missing`] rather than an error.
pub fn expand(group: &LayoutGroup<'_>, names: &[&'static str]) -> TimedSeries {
    let mut series = TimedSeries::new();

    for (i, ts) in group.layout.timestamps.iter().enumerate() {
        let mut record = VariableRecord::new();
        for &name in names {
            let datum = group
                .variables
                .get(name)
                .and_then(|values| values.get(i))
                .map(|v| Datum::Text(v.clone()))
                .unwrap_or(Datum::Missing);
            record.insert(name, datum);
        }
        series.insert(*ts, record);
    }

    series
}
