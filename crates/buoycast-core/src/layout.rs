//! TimeLayoutIndex: every `<time-layout>` block with its key and
//! parsed start timestamps.

use buoycast_xml::Document;
use chrono::DateTime;

use crate::error::ReconcileError;
use crate::Timestamp;

/// One `<time-layout>` block: its key and its ordered start instants.
///
/// Position `i` of `timestamps` corresponds to position `i` of every
/// value list that declares this key. The feed is trusted to keep the
/// counts consistent; ragged lists are tolerated downstream, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLayout {
    /// The `<layout-key>` text identifying this block.
    pub key: String,
    /// `<start-valid-time>` instants in block order, offset preserved.
    pub timestamps: Vec<Timestamp>,
}

/// Result of indexing a document's time layouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutIndex {
    /// Usable blocks, in document order.
    pub layouts: Vec<TimeLayout>,
    /// Blocks dropped for lacking a `<layout-key>` child. Exposed so
    /// the caller can log the degradation; the engine itself does not.
    pub skipped_blocks: usize,
}

/// Index every `<time-layout>` block in document order.
///
/// A block without a `<layout-key>` child is skipped (nothing can
/// align to it). A `<start-valid-time>` whose text is not valid
/// RFC 3339 fails the whole call: timestamps are structural, so they
/// are never coerced to a missing value.
pub fn index_time_layouts(doc: &Document) -> Result<LayoutIndex, ReconcileError> {
    let mut layouts = Vec::new();
    let mut skipped_blocks = 0usize;

    for block in doc.find_all_named("time-layout") {
        let key = match block.child_text("layout-key") {
            Some(key) if !key.is_empty() => key,
            _ => {
                skipped_blocks += 1;
                continue;
            }
        };

        let mut timestamps = Vec::new();
        for start in block.children_named("start-valid-time") {
            let raw = start.text();
            let parsed = DateTime::parse_from_rfc3339(raw.trim()).map_err(|_| {
                ReconcileError::MalformedTimestamp {
                    layout_key: key.clone(),
                    raw: raw.clone(),
                }
            })?;
            timestamps.push(parsed);
        }

        layouts.push(TimeLayout { key, timestamps });
    }

    Ok(LayoutIndex {
        layouts,
        skipped_blocks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use buoycast_xml::Document;

    fn doc(xml: &str) -> Document {
        Document::parse(xml).unwrap()
    }

    #[test]
    fn indexes_blocks_in_document_order() {
        let d = doc(
            r#"<dwml><data>
                 <time-layout>
                   <layout-key>k1</layout-key>
                   <start-valid-time>2024-05-01T06:00:00-04:00</start-valid-time>
                   <start-valid-time>2024-05-01T18:00:00-04:00</start-valid-time>
                 </time-layout>
                 <time-layout>
                   <layout-key>k2</layout-key>
                   <start-valid-time>2024-05-01T06:00:00-04:00</start-valid-time>
                 </time-layout>
               </data></dwml>"#,
        );
        let index = index_time_layouts(&d).unwrap();
        assert_eq!(index.skipped_blocks, 0);
        assert_eq!(index.layouts.len(), 2);
        assert_eq!(index.layouts[0].key, "k1");
        assert_eq!(index.layouts[0].timestamps.len(), 2);
        assert_eq!(index.layouts[1].key, "k2");
        assert_eq!(index.layouts[1].timestamps.len(), 1);
    }

    #[test]
    fn offset_is_preserved_as_published() {
        let d = doc(
            r#"<dwml><time-layout>
                 <layout-key>k1</layout-key>
                 <start-valid-time>2024-05-01T06:00:00-04:00</start-valid-time>
               </time-layout></dwml>"#,
        );
        let index = index_time_layouts(&d).unwrap();
        let ts = index.layouts[0].timestamps[0];
        assert_eq!(ts.to_rfc3339(), "2024-05-01T06:00:00-04:00");
    }

    #[test]
    fn block_without_layout_key_is_skipped_and_counted() {
        let d = doc(
            r#"<dwml>
                 <time-layout>
                   <start-valid-time>2024-05-01T06:00:00-04:00</start-valid-time>
                 </time-layout>
                 <time-layout>
                   <layout-key>k1</layout-key>
                   <start-valid-time>2024-05-01T06:00:00-04:00</start-valid-time>
                 </time-layout>
               </dwml>"#,
        );
        let index = index_time_layouts(&d).unwrap();
        assert_eq!(index.skipped_blocks, 1);
        assert_eq!(index.layouts.len(), 1);
        assert_eq!(index.layouts[0].key, "k1");
    }

    #[test]
    fn malformed_timestamp_fails_the_call() {
        let d = doc(
            r#"<dwml><time-layout>
                 <layout-key>k1</layout-key>
                 <start-valid-time>not-a-date</start-valid-time>
               </time-layout></dwml>"#,
        );
        let err = index_time_layouts(&d).unwrap_err();
        assert_eq!(
            err,
            ReconcileError::MalformedTimestamp {
                layout_key: "k1".to_string(),
                raw: "not-a-date".to_string(),
            }
        );
    }

    #[test]
    fn empty_document_yields_empty_index() {
        let d = doc("<dwml/>");
        let index = index_time_layouts(&d).unwrap();
        assert!(index.layouts.is_empty());
        assert_eq!(index.skipped_blocks, 0);
    }

    #[test]
    fn block_with_key_but_no_timestamps_is_kept() {
        let d = doc(
            r#"<dwml><time-layout>
                 <layout-key>k1</layout-key>
               </time-layout></dwml>"#,
        );
        let index = index_time_layouts(&d).unwrap();
        assert_eq!(index.layouts.len(), 1);
        assert!(index.layouts[0].timestamps.is_empty());
    }
}
