// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route a raw JSON record to the parser for its caller-selected kind.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::{basal, bolus, events, readings};
use crate::config::Feature;
use crate::error::{ParseError, Result};
use crate::models::{
    ActivityEvent, BasalSegment, BgReading, Bolus, CgmReading, DeliveryType, IobSample,
    SuspensionEvent, SuspensionRecord,
};
use crate::time_utils::TimeNormalizer;

/// Which parser a raw record is meant for. Never sniffed from the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Basal,
    AlgorithmBasal,
    Suspension,
    Bolus,
    Cgm,
    BgReading,
    Iob,
    Activity,
    BasalSuspension,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Basal => "basal",
            EntryKind::AlgorithmBasal => "algorithm_basal",
            EntryKind::Suspension => "suspension",
            EntryKind::Bolus => "bolus",
            EntryKind::Cgm => "cgm",
            EntryKind::BgReading => "bg_reading",
            EntryKind::Iob => "iob",
            EntryKind::Activity => "activity",
            EntryKind::BasalSuspension => "basal_suspension",
        }
    }

    /// The sync feature that gates this kind of record.
    pub fn feature(&self) -> Feature {
        match self {
            EntryKind::Basal | EntryKind::AlgorithmBasal | EntryKind::Suspension => {
                Feature::Basal
            }
            EntryKind::Bolus => Feature::Bolus,
            EntryKind::Cgm => Feature::Cgm,
            EntryKind::BgReading => Feature::BolusBg,
            EntryKind::Iob => Feature::Iob,
            EntryKind::Activity => Feature::PumpEvents,
            EntryKind::BasalSuspension => Feature::PumpEventsBasalSuspension,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any canonical event, tagged with its kind when serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NormalizedEvent {
    Basal(BasalSegment),
    Suspension(SuspensionRecord),
    Bolus(Bolus),
    Cgm(CgmReading),
    BgReading(BgReading),
    Iob(IobSample),
    Activity(ActivityEvent),
    BasalSuspension(SuspensionEvent),
}

fn decode<T: DeserializeOwned>(kind: EntryKind, record: Value) -> Result<T> {
    serde_json::from_value(record).map_err(|source| ParseError::InvalidRecord {
        kind: kind.as_str(),
        source,
    })
}

/// Normalize one raw record.
///
/// `Ok(None)` means the record was valid but produces no event.
pub fn normalize_entry(
    normalizer: &TimeNormalizer,
    kind: EntryKind,
    record: Value,
) -> Result<Option<NormalizedEvent>> {
    let event = match kind {
        EntryKind::Basal => NormalizedEvent::Basal(basal::parse_basal_entry(
            normalizer,
            &decode(kind, record)?,
            DeliveryType::Standard,
        )?),
        EntryKind::AlgorithmBasal => NormalizedEvent::Basal(basal::parse_basal_entry(
            normalizer,
            &decode(kind, record)?,
            DeliveryType::Algorithm,
        )?),
        EntryKind::Suspension => NormalizedEvent::Suspension(basal::parse_suspension_entry(
            normalizer,
            &decode(kind, record)?,
        )?),
        EntryKind::Bolus => {
            NormalizedEvent::Bolus(bolus::parse_bolus_entry(normalizer, &decode(kind, record)?)?)
        }
        EntryKind::Cgm => {
            NormalizedEvent::Cgm(readings::parse_cgm_entry(normalizer, &decode(kind, record)?)?)
        }
        EntryKind::BgReading => NormalizedEvent::BgReading(readings::parse_bg_reading_entry(
            normalizer,
            &decode(kind, record)?,
        )?),
        EntryKind::Iob => {
            NormalizedEvent::Iob(readings::parse_iob_entry(normalizer, &decode(kind, record)?)?)
        }
        EntryKind::Activity => NormalizedEvent::Activity(events::parse_activity_event(
            normalizer,
            &decode(kind, record)?,
        )?),
        EntryKind::BasalSuspension => {
            return Ok(
                events::parse_basal_suspension_event(normalizer, &decode(kind, record)?)?
                    .map(NormalizedEvent::BasalSuspension),
            );
        }
    };

    Ok(Some(event))
}
