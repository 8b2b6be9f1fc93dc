//! VariableExtractor: pull one variable's owning element and raw value
//! list out of the document. Pure read; no type conversion here.

use buoycast_xml::{Document, Element};

use crate::locator::VariableLocator;

/// Result of locating one variable in a document.
#[derive(Debug, Clone)]
pub struct Extraction<'a> {
    /// The locator this extraction was produced from.
    pub locator: &'a VariableLocator,
    /// The owning element, or `None` when the document has no match.
    /// The owner carries the `time-layout` attribute used for grouping.
    pub owner: Option<&'a Element>,
    /// Value texts in document order. Empty when `owner` is `None`.
    pub values: Vec<String>,
}

impl Extraction<'_> {
    /// `time-layout` attribute declared by the owning element, if any.
    pub fn layout_key(&self) -> Option<&str> {
        self.owner.and_then(|el| el.attr("time-layout"))
    }
}

/// Locate `locator`'s owning element (first match in document order)
/// and collect its value texts along the locator's value path.
pub fn extract<'a>(doc: &'a Document, locator: &'a VariableLocator) -> Extraction<'a> {
    let owner = doc.find_first(|el| locator.matches(el));
    let values = match owner {
        Some(el) => collect_values(el, locator.value_path),
        None => Vec::new(),
    };
    Extraction {
        locator,
        owner,
        values,
    }
}

/// Walk `path` one direct-child level at a time, keeping document
/// order, and return the text of the elements at the final level.
fn collect_values(owner: &Element, path: &[&str]) -> Vec<String> {
    let mut level: Vec<&Element> = vec![owner];
    for &segment in path {
        let mut next = Vec::new();
        for el in level {
            next.extend(el.children_named(segment));
        }
        level = next;
    }
    level.into_iter().map(Element::text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::MARINE_LOCATORS;
    use buoycast_xml::Document;

    fn sustained() -> &'static VariableLocator {
        &MARINE_LOCATORS[0]
    }

    fn wave_height() -> &'static VariableLocator {
        &MARINE_LOCATORS[3]
    }

    #[test]
    fn extracts_values_in_document_order() {
        let doc = Document::parse(
            r#"<dwml><parameters>
                 <wind-speed type="sustained" time-layout="k1">
                   <value>10</value><value>12</value><value>14</value>
                 </wind-speed>
               </parameters></dwml>"#,
        )
        .unwrap();
        let ex = extract(&doc, sustained());
        assert!(ex.owner.is_some());
        assert_eq!(ex.values, vec!["10", "12", "14"]);
        assert_eq!(ex.layout_key(), Some("k1"));
    }

    #[test]
    fn absent_variable_yields_none_and_empty_list() {
        let doc = Document::parse("<dwml><parameters/></dwml>").unwrap();
        let ex = extract(&doc, sustained());
        assert!(ex.owner.is_none());
        assert!(ex.values.is_empty());
        assert_eq!(ex.layout_key(), None);
    }

    #[test]
    fn first_matching_element_wins() {
        let doc = Document::parse(
            r#"<dwml>
                 <wind-speed type="sustained" time-layout="k1"><value>1</value></wind-speed>
                 <wind-speed type="sustained" time-layout="k2"><value>9</value></wind-speed>
               </dwml>"#,
        )
        .unwrap();
        let ex = extract(&doc, sustained());
        assert_eq!(ex.layout_key(), Some("k1"));
        assert_eq!(ex.values, vec!["1"]);
    }

    #[test]
    fn nested_value_path_descends_per_level() {
        let doc = Document::parse(
            r#"<dwml>
                 <water-state time-layout="k2">
                   <waves><value>3.1</value><value>3.3</value></waves>
                   <value>decoy</value>
                 </water-state>
               </dwml>"#,
        )
        .unwrap();
        let ex = extract(&doc, wave_height());
        // The direct <value> child of <water-state> is not on the
        // ["waves", "value"] path.
        assert_eq!(ex.values, vec!["3.1", "3.3"]);
    }

    #[test]
    fn only_direct_children_are_followed() {
        let doc = Document::parse(
            r#"<dwml>
                 <wind-speed type="sustained" time-layout="k1">
                   <value>10</value>
                   <extra><value>nested</value></extra>
                 </wind-speed>
               </dwml>"#,
        )
        .unwrap();
        let ex = extract(&doc, sustained());
        assert_eq!(ex.values, vec!["10"]);
    }
}
