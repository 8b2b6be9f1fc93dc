//! LayoutGrouper: attach each extracted variable's value list to the
//! time layout whose key its owner declares.

use std::collections::{BTreeMap, BTreeSet};

use crate::extract::Extraction;
use crate::layout::TimeLayout;

/// One time layout together with every variable aligned to it.
///
/// A group may have an empty variable map; its timestamps still feed
/// the merge grid (and seed it if the layout is the longest).
#[derive(Debug, Clone)]
pub struct LayoutGroup<'a> {
    pub layout: &'a TimeLayout,
    /// Variable name to positionally aligned value list.
    pub variables: BTreeMap<&'static str, &'a [String]>,
}

/// Build one [`LayoutGroup`] per input layout, in order.
///
/// A variable joins the group whose key equals its owner's
/// `time-layout` attribute. Extractions without an owner join nothing.
/// Should two blocks share a key (malformed feed), the first block in
/// document order claims the variables; later blocks with the same key
/// still produce (variable-less) groups.
pub fn group_by_layout<'a>(
    layouts: &'a [TimeLayout],
    extractions: &'a [Extraction<'a>],
) -> Vec<LayoutGroup<'a>> {
    let mut claimed_keys: BTreeSet<&str> = BTreeSet::new();
    let mut groups = Vec::with_capacity(layouts.len());

    for layout in layouts {
        let claims = claimed_keys.insert(layout.key.as_str());

        let mut variables: BTreeMap<&'static str, &'a [String]> = BTreeMap::new();
        if claims {
            for ex in extractions {
                if ex.layout_key() == Some(layout.key.as_str()) {
                    variables.insert(ex.locator.name, ex.values.as_slice());
                }
            }
        }

        groups.push(LayoutGroup { layout, variables });
    }

    groups
}
