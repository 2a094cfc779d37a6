// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CIQ basal and suspension record parsing.

use serde::Deserialize;

use crate::error::Result;
use crate::models::{BasalSegment, DeliveryType, SuspensionRecord};
use crate::time_utils::TimeNormalizer;

/// A basal rate segment from the CIQ therapy graph.
#[derive(Debug, Clone, Deserialize)]
pub struct CiqBasalEntry {
    /// Epoch seconds
    pub x: i64,
    /// Seconds
    pub duration: f64,
    /// Units per hour
    pub y: f64,
}

/// A basal suspension marker from the CIQ therapy graph.
#[derive(Debug, Clone, Deserialize)]
pub struct CiqSuspensionEntry {
    pub x: i64,
    #[serde(rename = "suspendReason")]
    pub suspend_reason: String,
    #[serde(default)]
    pub continuation: Option<String>,
}

/// Convert a CIQ basal entry into a segment.
///
/// `delivery_type` comes from which graph series the entry was read from.
pub fn parse_basal_entry(
    normalizer: &TimeNormalizer,
    entry: &CiqBasalEntry,
    delivery_type: DeliveryType,
) -> Result<BasalSegment> {
    Ok(BasalSegment {
        time: normalizer.parse_epoch(entry.x)?,
        delivery_type,
        duration_mins: entry.duration / 60.0,
        basal_rate: entry.y,
    })
}

pub fn parse_suspension_entry(
    normalizer: &TimeNormalizer,
    entry: &CiqSuspensionEntry,
) -> Result<SuspensionRecord> {
    Ok(SuspensionRecord {
        time: normalizer.parse_epoch(entry.x)?,
        continuation: entry.continuation.clone(),
        suspend_reason: entry.suspend_reason.clone(),
    })
}

/// Model a manual suspension as a zero-rate basal segment lasting `seconds`.
pub fn manual_suspension_to_basal(suspension: &SuspensionRecord, seconds: f64) -> BasalSegment {
    BasalSegment {
        time: suspension.time,
        delivery_type: DeliveryType::ManualSuspension,
        duration_mins: seconds / 60.0,
        basal_rate: 0.0,
    }
}
