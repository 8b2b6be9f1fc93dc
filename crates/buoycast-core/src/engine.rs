//! Orchestration: document in, synchronized record sequence out.

use buoycast_xml::Document;

use crate::error::ReconcileError;
use crate::extract::{extract, Extraction};
use crate::group::group_by_layout;
use crate::layout::index_time_layouts;
use crate::locator::VariableLocator;
use crate::merge::merge;
use crate::{expand, TimedSeries, Timestamp, VariableRecord};

/// Output of one [`reconcile`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Merged records, ascending by timestamp.
    pub records: Vec<(Timestamp, VariableRecord)>,
    /// `<time-layout>` blocks dropped for lacking a layout key, for
    /// the caller to log at its discretion.
    pub skipped_layout_blocks: usize,
}

/// Run the full reconciliation pipeline over `doc` for the tracked
/// variables in `locators`.
///
/// Extraction runs once per locator, layout indexing once, then each
/// layout group expands to a per-timestamp series and the series merge
/// onto the base grid. Stateless: every call reads the document fresh
/// and shares nothing with other calls.
///
/// An empty document (no variables, no layouts) reconciles to an empty
/// record list; only a malformed timestamp is an error.
pub fn reconcile(
    doc: &Document,
    locators: &[VariableLocator],
) -> Result<Reconciliation, ReconcileError> {
    let extractions: Vec<Extraction<'_>> =
        locators.iter().map(|loc| extract(doc, loc)).collect();

    let index = index_time_layouts(doc)?;
    let groups = group_by_layout(&index.layouts, &extractions);

    let names: Vec<&'static str> = locators.iter().map(|loc| loc.name).collect();
    let series: Vec<TimedSeries> = groups.iter().map(|g| expand(g, &names)).collect();

    let merged = merge(&series);

    Ok(Reconciliation {
        records: merged.into_iter().collect(),
        skipped_layout_blocks: index.skipped_blocks,
    })
}
