// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Point samples: CGM/BG readings and insulin-on-board.

use serde::{Deserialize, Serialize};

use crate::time_utils::LocalTimestamp;

/// A CGM reading. Values like "HI"/"LO" are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CgmReading {
    pub time: LocalTimestamp,
    pub reading: String,
    /// e.g. "EGV"
    pub reading_type: String,
}

/// A glucose reading attached to bolus history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BgReading {
    pub time: LocalTimestamp,
    pub bg: String,
    #[serde(rename = "type")]
    pub reading_type: String,
}

/// The pump's insulin-on-board estimate at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IobSample {
    pub time: LocalTimestamp,
    /// Decimal units, as reported
    pub iob: String,
    pub event_id: String,
}
