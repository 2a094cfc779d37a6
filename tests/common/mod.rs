// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use pumpsync::LocalTimestamp;
use pumpsync::TimeNormalizer;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Normalizer matching the recorded fixtures: an Eastern pump whose epoch
/// values the cloud service renders in Pacific time.
#[allow(dead_code)]
pub fn fixture_normalizer() -> TimeNormalizer {
    TimeNormalizer::new(
        chrono_tz::America::New_York,
        chrono_tz::America::Los_Angeles,
    )
}

/// Load a named record from a fixture file keyed by record name.
#[allow(dead_code)]
pub fn load_fixture(file: &str, name: &str) -> Value {
    let path = Path::new("tests/fixtures").join(file);
    let json = fs::read_to_string(&path).expect("Failed to read fixture");
    let mut records: Value = serde_json::from_str(&json).expect("Failed to parse fixture");
    records
        .get_mut(name)
        .map(Value::take)
        .unwrap_or_else(|| panic!("Fixture {} has no record {}", file, name))
}

/// Parse a timestamp literal in the normalized format.
#[allow(dead_code)]
pub fn ts(s: &str) -> LocalTimestamp {
    s.parse().expect("Invalid timestamp literal")
}
