// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Device event classification.
//!
//! Both vocabularies are closed. A code the vendor adds later must surface
//! as an error naming the code rather than be mapped to a default label.

use serde::Deserialize;

use crate::error::Result;
use crate::models::{ActivityEvent, ActivityEventType, SuspensionEvent, SuspensionEventType};
use crate::time_utils::TimeNormalizer;

/// A Control-IQ sleep/exercise activity entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CiqActivityEntry {
    pub x: i64,
    /// Seconds
    pub duration: f64,
    #[serde(rename = "eventType")]
    pub event_type: i64,
}

/// A basal suspension entry from the therapy timeline.
#[derive(Debug, Clone, Deserialize)]
pub struct BasalSuspensionEntry {
    /// `/Date(<millis>-0000)/`
    #[serde(rename = "EventDateTime")]
    pub event_date_time: String,
    #[serde(rename = "SuspendReason")]
    pub suspend_reason: String,
}

pub fn parse_activity_event(
    normalizer: &TimeNormalizer,
    entry: &CiqActivityEntry,
) -> Result<ActivityEvent> {
    let time = normalizer.parse_epoch(entry.x)?;
    let event_type = ActivityEventType::from_code(entry.event_type).inspect_err(|_| {
        tracing::warn!(
            event_type = entry.event_type,
            time = %time,
            "Unknown CIQ activity event type"
        );
    })?;

    Ok(ActivityEvent {
        time,
        duration_mins: entry.duration / 60.0,
        event_type,
    })
}

/// Classify a basal suspension.
///
/// Returns `Ok(None)` for reasons that duplicate other records
/// (`basal-profile`, `previous`).
pub fn parse_basal_suspension_event(
    normalizer: &TimeNormalizer,
    entry: &BasalSuspensionEntry,
) -> Result<Option<SuspensionEvent>> {
    // Validate the timestamp even for skipped codes.
    let time = normalizer.parse_dotnet_date(&entry.event_date_time)?;
    let reason = entry.suspend_reason.as_str();

    let event_type = SuspensionEventType::classify(reason).inspect_err(|_| {
        tracing::warn!(
            suspend_reason = reason,
            time = %time,
            "Unknown basal suspension reason"
        );
    })?;

    match event_type {
        Some(event_type) => Ok(Some(SuspensionEvent { time, event_type })),
        None => {
            tracing::debug!(suspend_reason = reason, time = %time, "Skipping suspension");
            Ok(None)
        }
    }
}
