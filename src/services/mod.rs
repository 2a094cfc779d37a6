// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Record parsers - the normalization layer.
//!
//! Every parser is a pure function of one raw record and a shared
//! [`TimeNormalizer`](crate::time_utils::TimeNormalizer).

pub mod basal;
pub mod bolus;
pub mod dispatch;
pub mod events;
mod fields;
pub mod readings;

pub use basal::{
    manual_suspension_to_basal, parse_basal_entry, parse_suspension_entry, CiqBasalEntry,
    CiqSuspensionEntry,
};
pub use bolus::{parse_bolus_entry, BolusEntry};
pub use dispatch::{normalize_entry, EntryKind, NormalizedEvent};
pub use events::{
    parse_activity_event, parse_basal_suspension_event, BasalSuspensionEntry, CiqActivityEntry,
};
pub use readings::{
    parse_bg_reading_entry, parse_cgm_entry, parse_iob_entry, IobEntry, ReadingEntry,
};
