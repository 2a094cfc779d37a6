// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Canonical bolus model.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::time_utils::LocalTimestamp;

/// Description prefix the pump uses for Control-IQ automatic corrections.
const AUTOMATIC_PREFIX: &str = "Automatic";

/// When the bolus was delivered.
///
/// A standard bolus has request/completion times. An extended bolus only has
/// its extended-phase start/completion times. No record has both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BolusTiming {
    Standard {
        request_time: LocalTimestamp,
        completion_time: LocalTimestamp,
    },
    Extended {
        bolex_start_time: LocalTimestamp,
        bolex_completion_time: LocalTimestamp,
    },
}

/// User-initiated vs. closed-loop bolus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BolusKind {
    Standard,
    Automatic,
}

/// A single bolus delivery.
///
/// `complete` follows the pump's completion flag and `completion` is the
/// status text, kept independently even when they disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bolus {
    pub description: String,
    pub complete: bool,
    /// Completion status text ("Completed", "User Aborted", ...)
    pub completion: String,
    /// Units delivered
    pub insulin: String,
    /// Units requested
    pub requested_insulin: String,
    pub carbs: String,
    /// Empty when no BG was entered
    pub bg: String,
    pub user_override: String,
    pub timing: BolusTiming,
}

impl Bolus {
    pub fn kind(&self) -> BolusKind {
        if self.description.starts_with(AUTOMATIC_PREFIX) {
            BolusKind::Automatic
        } else {
            BolusKind::Standard
        }
    }

    pub fn is_extended(&self) -> bool {
        matches!(self.timing, BolusTiming::Extended { .. })
    }

    /// `"1"` when fully delivered, otherwise `""`.
    pub fn complete_flag(&self) -> &'static str {
        flag(self.complete)
    }

    /// `"1"` for an extended bolus, otherwise `""`.
    pub fn extended_flag(&self) -> &'static str {
        flag(self.is_extended())
    }

    pub fn request_time(&self) -> Option<LocalTimestamp> {
        match self.timing {
            BolusTiming::Standard { request_time, .. } => Some(request_time),
            BolusTiming::Extended { .. } => None,
        }
    }

    pub fn completion_time(&self) -> Option<LocalTimestamp> {
        match self.timing {
            BolusTiming::Standard {
                completion_time, ..
            } => Some(completion_time),
            BolusTiming::Extended { .. } => None,
        }
    }

    pub fn bolex_start_time(&self) -> Option<LocalTimestamp> {
        match self.timing {
            BolusTiming::Extended {
                bolex_start_time, ..
            } => Some(bolex_start_time),
            BolusTiming::Standard { .. } => None,
        }
    }

    pub fn bolex_completion_time(&self) -> Option<LocalTimestamp> {
        match self.timing {
            BolusTiming::Extended {
                bolex_completion_time,
                ..
            } => Some(bolex_completion_time),
            BolusTiming::Standard { .. } => None,
        }
    }
}

fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        ""
    }
}

// Serialized flat, with absent times as null, so downstream payload mappers
// see one shape for every bolus.
impl Serialize for Bolus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Bolus", 13)?;
        s.serialize_field("description", &self.description)?;
        s.serialize_field("complete", self.complete_flag())?;
        s.serialize_field("completion", &self.completion)?;
        s.serialize_field("request_time", &self.request_time())?;
        s.serialize_field("completion_time", &self.completion_time())?;
        s.serialize_field("insulin", &self.insulin)?;
        s.serialize_field("requested_insulin", &self.requested_insulin)?;
        s.serialize_field("carbs", &self.carbs)?;
        s.serialize_field("bg", &self.bg)?;
        s.serialize_field("user_override", &self.user_override)?;
        s.serialize_field("extended_bolus", self.extended_flag())?;
        s.serialize_field("bolex_start_time", &self.bolex_start_time())?;
        s.serialize_field("bolex_completion_time", &self.bolex_completion_time())?;
        s.end()
    }
}
