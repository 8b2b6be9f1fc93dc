//! buoycast-core
//!
//! Reconciliation engine for multi-layout time-series feeds.
//!
//! The NDFD "time-series" product does not publish its variables on one
//! shared timeline: each variable (sustained wind, gust, direction,
//! wave height) aligns its value list to its own `<time-layout>` block.
//! This crate joins those independently timed series into one
//! timestamp-keyed record set.
//!
//! Architectural decisions:
//! - Pure, deterministic logic. No IO. No HTTP. No logging.
//! - The engine reads an already-parsed [`buoycast_xml::Document`];
//!   it never sees raw bytes.
//! - The tracked variable set is an ordered caller-supplied table of
//!   [`VariableLocator`]s, so variables can be added without touching
//!   the merge logic.
//! - A malformed timestamp fails the whole call (timestamps are the
//!   join key); every other feed anomaly degrades to
//!   [`Datum::Missing`] or omission.

mod engine;
mod error;
mod expand;
mod extract;
mod group;
mod layout;
mod locator;
mod merge;

pub use engine::{reconcile, Reconciliation};
pub use error::ReconcileError;
pub use expand::expand;
pub use extract::{extract, Extraction};
pub use group::{group_by_layout, LayoutGroup};
pub use layout::{index_time_layouts, LayoutIndex, TimeLayout};
pub use locator::{Datum, VariableLocator, MARINE_LOCATORS};
pub use merge::merge;

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};

/// An instant from the feed, offset preserved as published.
pub type Timestamp = DateTime<FixedOffset>;

/// One per-timestamp record. Every tracked variable name is always
/// present, carrying either a raw feed value or [`Datum::Missing`].
pub type VariableRecord = BTreeMap<&'static str, Datum>;

/// A timestamp-keyed record series produced from one layout group.
/// `BTreeMap` keys give ascending timestamp order structurally.
pub type TimedSeries = BTreeMap<Timestamp, VariableRecord>;
