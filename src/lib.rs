// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Pumpsync: normalize insulin pump cloud history into canonical events
//!
//! This crate turns raw t:connect telemetry records (basal segments,
//! suspensions, boluses, CGM/IOB samples and device events) into a small
//! closed set of typed events with pump-local timestamps. Retrieval and
//! upload are handled by the caller.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;

pub use error::{ParseError, Result};
pub use time_utils::{LocalTimestamp, TimeNormalizer};
