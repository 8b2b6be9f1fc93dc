//! Variable identity: locators, the missing-value sentinel, and the
//! built-in marine variable table.

use buoycast_xml::Element;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Datum
// ---------------------------------------------------------------------------

/// A single observed value: the raw feed string, or an explicit marker
/// that this variable has no observation at this timestamp.
///
/// Records always carry every tracked variable name, so "missing" is a
/// value, never an absent key. Missing is distinct from a parse
/// failure: the engine never coerces a bad timestamp to `Missing`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Datum {
    /// Raw value text exactly as published (not yet type-converted).
    Text(String),
    /// No observation for this variable at this timestamp.
    Missing,
}

impl Datum {
    pub fn is_missing(&self) -> bool {
        matches!(self, Datum::Missing)
    }

    /// The raw text, or `None` when missing.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Datum::Text(s) => Some(s),
            Datum::Missing => None,
        }
    }
}

// ---------------------------------------------------------------------------
// VariableLocator
// ---------------------------------------------------------------------------

/// Static descriptor telling the extractor where one variable lives in
/// the document.
///
/// An element *owns* a variable when it matches both the optional tag
/// name and the optional `type` attribute discriminator (DWML reuses
/// tags like `<wind-speed>` for both sustained wind and gusts,
/// distinguished only by `type="sustained"` / `type="gust"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableLocator {
    /// Variable name used as the record key (e.g. `"wind_speed"`).
    pub name: &'static str,
    /// Required tag name of the owning element, or `None` for any tag.
    pub tag: Option<&'static str>,
    /// Required `type` attribute value, or `None` for any.
    pub type_attr: Option<&'static str>,
    /// Child-tag path from the owning element down to the value
    /// elements whose text forms the value list.
    pub value_path: &'static [&'static str],
}

impl VariableLocator {
    /// Whether `el` is this variable's owning element.
    pub fn matches(&self, el: &Element) -> bool {
        if let Some(tag) = self.tag {
            if el.name() != tag {
                return false;
            }
        }
        if let Some(ty) = self.type_attr {
            if el.attr("type") != Some(ty) {
                return false;
            }
        }
        self.tag.is_some() || self.type_attr.is_some()
    }
}

/// The four marine variables of the NDFD time-series product.
///
/// Callers are free to supply their own ordered table instead; the
/// engine takes any `&[VariableLocator]`.
pub const MARINE_LOCATORS: &[VariableLocator] = &[
    VariableLocator {
        name: "wind_speed",
        tag: None,
        type_attr: Some("sustained"),
        value_path: &["value"],
    },
    VariableLocator {
        name: "wind_gust",
        tag: None,
        type_attr: Some("gust"),
        value_path: &["value"],
    },
    VariableLocator {
        name: "wind_direction",
        tag: Some("direction"),
        type_attr: None,
        value_path: &["value"],
    },
    VariableLocator {
        name: "wave_height",
        tag: Some("water-state"),
        type_attr: None,
        value_path: &["waves", "value"],
    },
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
