// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

mod common;

use common::{fixture_normalizer, ts};
use pretty_assertions::assert_eq;
use pumpsync::models::{BasalSegment, DeliveryType, SuspensionRecord};
use pumpsync::services::{
    manual_suspension_to_basal, parse_basal_entry, parse_suspension_entry, CiqBasalEntry,
    CiqSuspensionEntry,
};
use serde_json::json;

fn basal_entry(value: serde_json::Value) -> CiqBasalEntry {
    serde_json::from_value(value).expect("Failed to parse CiqBasalEntry")
}

fn suspension_entry(value: serde_json::Value) -> CiqSuspensionEntry {
    serde_json::from_value(value).expect("Failed to parse CiqSuspensionEntry")
}

#[test]
fn test_parse_basal_entry() {
    let entry = basal_entry(json!({ "y": 0.8, "duration": 1221, "x": 1615878000 }));

    assert_eq!(
        parse_basal_entry(&fixture_normalizer(), &entry, DeliveryType::Standard).unwrap(),
        BasalSegment {
            time: ts("2021-03-16 00:00:00-04:00"),
            delivery_type: DeliveryType::Standard,
            duration_mins: 1221.0 / 60.0,
            basal_rate: 0.8,
        }
    );
}

#[test]
fn test_parse_algorithm_basal_entry() {
    let entry = basal_entry(json!({ "y": 0.797, "duration": 300, "x": 1615879521 }));

    assert_eq!(
        parse_basal_entry(&fixture_normalizer(), &entry, DeliveryType::Algorithm).unwrap(),
        BasalSegment {
            time: ts("2021-03-16 00:25:21-04:00"),
            delivery_type: DeliveryType::Algorithm,
            duration_mins: 5.0,
            basal_rate: 0.797,
        }
    );
}

#[test]
fn test_basal_segment_serializes_delivery_label() {
    let entry = basal_entry(json!({ "y": 0.797, "duration": 300, "x": 1615879521 }));
    let segment =
        parse_basal_entry(&fixture_normalizer(), &entry, DeliveryType::Algorithm).unwrap();

    assert_eq!(
        serde_json::to_value(&segment).unwrap(),
        json!({
            "time": "2021-03-16 00:25:21-04:00",
            "delivery_type": "algorithmDelivery",
            "duration_mins": 5.0,
            "basal_rate": 0.797,
        })
    );
}

#[test]
fn test_parse_suspension_entry() {
    let n = fixture_normalizer();

    let entry = suspension_entry(json!({
        "suspendReason": "control-iq",
        "continuation": null,
        "x": 1615879821
    }));
    assert_eq!(
        parse_suspension_entry(&n, &entry).unwrap(),
        SuspensionRecord {
            time: ts("2021-03-16 00:30:21-04:00"),
            continuation: None,
            suspend_reason: "control-iq".to_string(),
        }
    );

    let entry = suspension_entry(json!({
        "suspendReason": "control-iq",
        "continuation": "previous",
        "x": 1634022000
    }));
    assert_eq!(
        parse_suspension_entry(&n, &entry).unwrap(),
        SuspensionRecord {
            time: ts("2021-10-12 00:00:00-04:00"),
            continuation: Some("previous".to_string()),
            suspend_reason: "control-iq".to_string(),
        }
    );
}

#[test]
fn test_manual_suspension_to_basal_entry() {
    let suspension = SuspensionRecord {
        time: ts("2021-03-16 00:30:21-04:00"),
        continuation: None,
        suspend_reason: "manual".to_string(),
    };

    assert_eq!(
        manual_suspension_to_basal(&suspension, 300.0),
        BasalSegment {
            time: ts("2021-03-16 00:30:21-04:00"),
            delivery_type: DeliveryType::ManualSuspension,
            duration_mins: 5.0,
            basal_rate: 0.0,
        }
    );
}

#[test]
fn test_suspension_chain_into_basal() {
    let n = fixture_normalizer();
    let entry = suspension_entry(json!({ "suspendReason": "manual", "x": 1615879821 }));

    let suspension = parse_suspension_entry(&n, &entry).unwrap();
    let segment = manual_suspension_to_basal(&suspension, 90.0);

    assert_eq!(segment.time, suspension.time);
    assert_eq!(segment.duration_mins, 1.5);
    assert_eq!(segment.delivery_type.as_str(), "manual suspension");
}

#[test]
fn test_basal_entry_requires_epoch() {
    let result: Result<CiqBasalEntry, _> =
        serde_json::from_value(json!({ "y": 0.8, "duration": 1221, "x": "2021-03-16" }));
    assert!(result.is_err());
}
