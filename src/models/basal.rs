// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Basal delivery segments.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::time_utils::LocalTimestamp;

/// How a basal segment was delivered.
///
/// Supplied by the caller; the raw record carries no marker for it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryType {
    /// Profile-driven delivery
    #[default]
    #[serde(rename = "")]
    Standard,
    /// Closed-loop (Control-IQ) adjusted delivery
    #[serde(rename = "algorithmDelivery")]
    Algorithm,
    /// Synthesized zero-rate segment covering a manual suspension
    #[serde(rename = "manual suspension")]
    ManualSuspension,
}

impl DeliveryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryType::Standard => "",
            DeliveryType::Algorithm => "algorithmDelivery",
            DeliveryType::ManualSuspension => "manual suspension",
        }
    }
}

impl fmt::Display for DeliveryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A continuous interval of basal delivery at a fixed rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasalSegment {
    /// Segment start
    pub time: LocalTimestamp,
    pub delivery_type: DeliveryType,
    /// Raw duration seconds / 60, unrounded
    pub duration_mins: f64,
    /// Units per hour
    pub basal_rate: f64,
}

/// A CIQ suspension record, passed through with its time normalized.
///
/// Only consumed by basal synthesis for manual suspensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspensionRecord {
    pub time: LocalTimestamp,
    pub continuation: Option<String>,
    #[serde(rename = "suspendReason")]
    pub suspend_reason: String,
}
