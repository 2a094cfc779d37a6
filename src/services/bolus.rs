// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bolus history record parsing.
//!
//! A bolus row is wide and sparse: standard and extended boluses share one
//! shape and most columns are empty for any given row. The parser decides
//! which kind of bolus the row describes and only reads the timestamps that
//! belong to that kind.

use serde::Deserialize;

use super::fields::lenient_string;
use crate::error::{ParseError, Result};
use crate::models::{Bolus, BolusTiming};
use crate::time_utils::TimeNormalizer;

/// Raw bolus row from the therapy timeline.
///
/// Only the columns the normalizer reads are listed; the rest are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BolusEntry {
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_string")]
    pub completion_status_desc: String,
    #[serde(deserialize_with = "lenient_string")]
    pub bolus_is_complete: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub request_date_time: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub completion_date_time: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub insulin_delivered: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub actual_total_bolus_requested: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub carb_size: String,
    #[serde(rename = "BG", default, deserialize_with = "lenient_string")]
    pub bg: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub user_override: String,

    // Extended ("bolex") phase
    #[serde(rename = "BolexCompletionID", default, deserialize_with = "lenient_string")]
    pub bolex_completion_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub bolex_start_date_time: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub bolex_completion_date_time: String,
    /// Declared extension duration in minutes
    #[serde(default, deserialize_with = "lenient_string")]
    pub duration: String,
}

impl BolusEntry {
    /// An extended bolus has a bolex completion ID and a non-zero duration.
    pub fn is_extended(&self) -> Result<bool> {
        if self.bolex_completion_id.trim().is_empty() {
            return Ok(false);
        }
        Ok(declared_duration(&self.duration)? > 0.0)
    }

    /// Only an explicit `"1"` counts as complete.
    pub fn is_complete(&self) -> bool {
        self.bolus_is_complete.trim() == "1"
    }
}

fn declared_duration(raw: &str) -> Result<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse::<f64>().map_err(|_| ParseError::InvalidField {
        field: "Duration",
        value: raw.to_string(),
    })
}

fn required(value: &str, field: &'static str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(ParseError::MissingField(field));
    }
    Ok(value.to_string())
}

/// Convert a bolus row into a canonical [`Bolus`].
pub fn parse_bolus_entry(normalizer: &TimeNormalizer, entry: &BolusEntry) -> Result<Bolus> {
    let description = required(&entry.description, "Description")?;
    let completion = required(&entry.completion_status_desc, "CompletionStatusDesc")?;

    let timing = if entry.is_extended()? {
        BolusTiming::Extended {
            bolex_start_time: normalizer.parse_local_iso(&entry.bolex_start_date_time)?,
            bolex_completion_time: normalizer
                .parse_local_iso(&entry.bolex_completion_date_time)?,
        }
    } else {
        BolusTiming::Standard {
            request_time: normalizer.parse_local_iso(&entry.request_date_time)?,
            completion_time: normalizer.parse_local_iso(&entry.completion_date_time)?,
        }
    };

    Ok(Bolus {
        description,
        complete: entry.is_complete(),
        completion,
        insulin: entry.insulin_delivered.clone(),
        requested_insulin: entry.actual_total_bolus_requested.clone(),
        carbs: entry.carb_size.clone(),
        bg: entry.bg.clone(),
        user_override: entry.user_override.clone(),
        timing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(bolex_id: &str, duration: &str) -> BolusEntry {
        BolusEntry {
            description: "Extended 50.00%/0.00".to_string(),
            completion_status_desc: "Completed".to_string(),
            bolus_is_complete: "1".to_string(),
            request_date_time: String::new(),
            completion_date_time: String::new(),
            insulin_delivered: String::new(),
            actual_total_bolus_requested: String::new(),
            carb_size: String::new(),
            bg: String::new(),
            user_override: String::new(),
            bolex_completion_id: bolex_id.to_string(),
            bolex_start_date_time: String::new(),
            bolex_completion_date_time: String::new(),
            duration: duration.to_string(),
        }
    }

    #[test]
    fn test_extension_needs_id_and_duration() {
        assert!(entry("16757133", "15").is_extended().unwrap());
        assert!(!entry("", "15").is_extended().unwrap());
        assert!(!entry("16757133", "0").is_extended().unwrap());
        assert!(!entry("16757133", "").is_extended().unwrap());
    }

    #[test]
    fn test_garbage_duration_is_rejected() {
        let err = entry("16757133", "fifteen").is_extended().unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidField {
                field: "Duration",
                ..
            }
        ));
    }

    #[test]
    fn test_complete_flag_only_accepts_one() {
        let mut e = entry("", "0");
        for (raw, expected) in [("1", true), ("0", false), ("", false), ("true", false)] {
            e.bolus_is_complete = raw.to_string();
            assert_eq!(e.is_complete(), expected, "BolusIsComplete={:?}", raw);
        }
    }
}
