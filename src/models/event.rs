// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Device events and their closed code vocabularies.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ParseError, Result};
use crate::time_utils::LocalTimestamp;

/// Control-IQ activity modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityEventType {
    Sleep,
    Exercise,
}

/// Raw `eventType` codes for CIQ activity events.
const ACTIVITY_EVENT_CODES: &[(i64, ActivityEventType)] = &[
    (1, ActivityEventType::Sleep),
    (2, ActivityEventType::Exercise),
];

impl ActivityEventType {
    pub fn label(&self) -> &'static str {
        match self {
            ActivityEventType::Sleep => "Sleep",
            ActivityEventType::Exercise => "Exercise",
        }
    }

    /// Look up a raw `eventType` code. Unknown codes are an error, never a guess.
    pub fn from_code(code: i64) -> Result<Self> {
        ACTIVITY_EVENT_CODES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, event_type)| *event_type)
            .ok_or(ParseError::UnknownActivityEvent(code))
    }
}

impl fmt::Display for ActivityEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A sleep or exercise mode interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub time: LocalTimestamp,
    pub duration_mins: f64,
    pub event_type: ActivityEventType,
}

/// Why basal delivery was suspended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuspensionEventType {
    #[serde(rename = "Site/Cartridge Change")]
    SiteCartridgeChange,
    #[serde(rename = "Empty Cartridge/Pump Shutdown")]
    EmptyCartridge,
    #[serde(rename = "User Suspended")]
    UserSuspended,
    #[serde(rename = "Basal Rate Change")]
    BasalRateChange,
}

/// Raw `SuspendReason` codes that map to an event.
const SUSPEND_REASON_CODES: &[(&str, SuspensionEventType)] = &[
    ("site-cart", SuspensionEventType::SiteCartridgeChange),
    ("alarm", SuspensionEventType::EmptyCartridge),
    ("manual", SuspensionEventType::UserSuspended),
    ("temp-profile", SuspensionEventType::BasalRateChange),
];

/// Raw `SuspendReason` codes that duplicate other records and produce no event.
pub const SKIPPED_SUSPEND_REASONS: &[&str] = &["basal-profile", "previous"];

impl SuspensionEventType {
    pub fn label(&self) -> &'static str {
        match self {
            SuspensionEventType::SiteCartridgeChange => "Site/Cartridge Change",
            SuspensionEventType::EmptyCartridge => "Empty Cartridge/Pump Shutdown",
            SuspensionEventType::UserSuspended => "User Suspended",
            SuspensionEventType::BasalRateChange => "Basal Rate Change",
        }
    }

    /// Classify a raw `SuspendReason`.
    ///
    /// Returns `Ok(None)` for skipped codes and an error for anything outside
    /// the known vocabulary.
    pub fn classify(code: &str) -> Result<Option<Self>> {
        if SKIPPED_SUSPEND_REASONS.contains(&code) {
            return Ok(None);
        }
        SUSPEND_REASON_CODES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, event_type)| Some(*event_type))
            .ok_or_else(|| ParseError::UnknownBasalSuspensionEvent(code.to_string()))
    }
}

impl fmt::Display for SuspensionEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A basal suspension with a human-readable cause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspensionEvent {
    pub time: LocalTimestamp,
    pub event_type: SuspensionEventType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_codes() {
        assert_eq!(
            ActivityEventType::from_code(1).unwrap(),
            ActivityEventType::Sleep
        );
        assert_eq!(
            ActivityEventType::from_code(2).unwrap(),
            ActivityEventType::Exercise
        );
        assert!(matches!(
            ActivityEventType::from_code(0),
            Err(ParseError::UnknownActivityEvent(0))
        ));
    }

    #[test]
    fn test_suspension_labels_serialize() {
        let json = serde_json::to_string(&SuspensionEventType::EmptyCartridge).unwrap();
        assert_eq!(json, "\"Empty Cartridge/Pump Shutdown\"");
    }

    #[test]
    fn test_suspension_skip_codes() {
        for code in SKIPPED_SUSPEND_REASONS {
            assert_eq!(SuspensionEventType::classify(code).unwrap(), None);
        }
    }
}
