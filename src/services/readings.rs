// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CGM, BG and IOB sample parsing.

use serde::Deserialize;

use super::fields::lenient_string;
use crate::error::Result;
use crate::models::{BgReading, CgmReading, IobSample};
use crate::time_utils::TimeNormalizer;

/// A CGM/BGM reading row.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadingEntry {
    #[serde(rename = "EventDateTime")]
    pub event_date_time: String,
    #[serde(rename = "Readings (CGM / BGM)", default, deserialize_with = "lenient_string")]
    pub reading: String,
    #[serde(rename = "Description", default, deserialize_with = "lenient_string")]
    pub description: String,
}

/// An insulin-on-board row.
#[derive(Debug, Clone, Deserialize)]
pub struct IobEntry {
    #[serde(rename = "EventDateTime")]
    pub event_date_time: String,
    #[serde(rename = "IOB", default, deserialize_with = "lenient_string")]
    pub iob: String,
    #[serde(rename = "EventID", default, deserialize_with = "lenient_string")]
    pub event_id: String,
}

pub fn parse_cgm_entry(normalizer: &TimeNormalizer, entry: &ReadingEntry) -> Result<CgmReading> {
    Ok(CgmReading {
        time: normalizer.parse_local_iso(&entry.event_date_time)?,
        reading: entry.reading.clone(),
        reading_type: entry.description.clone(),
    })
}

pub fn parse_bg_reading_entry(
    normalizer: &TimeNormalizer,
    entry: &ReadingEntry,
) -> Result<BgReading> {
    Ok(BgReading {
        time: normalizer.parse_local_iso(&entry.event_date_time)?,
        bg: entry.reading.clone(),
        reading_type: entry.description.clone(),
    })
}

pub fn parse_iob_entry(normalizer: &TimeNormalizer, entry: &IobEntry) -> Result<IobSample> {
    Ok(IobSample {
        time: normalizer.parse_local_iso(&entry.event_date_time)?,
        iob: entry.iob.clone(),
        event_id: entry.event_id.clone(),
    })
}
