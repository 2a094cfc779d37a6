// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pumpsync batch normalizer
//!
//! Reads a JSON array of `{"kind": ..., "record": {...}}` entries and writes
//! one normalized event per line to stdout. Records that fail to parse are
//! logged and skipped.

use anyhow::Context;
use pumpsync::{
    config::Config,
    services::{normalize_entry, EntryKind},
};
use serde::Deserialize;
use std::io::{self, BufWriter, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// One input entry.
#[derive(Debug, Deserialize)]
struct RawEntry {
    kind: EntryKind,
    record: serde_json::Value,
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        pump_timezone = %config.pump_timezone,
        source_timezone = %config.source_timezone,
        features = ?config.features,
        "Starting pumpsync normalizer"
    );

    let path = std::env::args()
        .nth(1)
        .context("Usage: pumpsync <records.json>")?;
    let input = std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path))?;
    let entries: Vec<RawEntry> =
        serde_json::from_str(&input).with_context(|| format!("Failed to parse {}", path))?;

    let normalizer = config.normalizer();
    let mut out = BufWriter::new(io::stdout().lock());
    let (mut written, mut skipped, mut failed) = (0usize, 0usize, 0usize);

    for (index, entry) in entries.into_iter().enumerate() {
        if !config.is_enabled(entry.kind.feature()) {
            skipped += 1;
            continue;
        }

        match normalize_entry(&normalizer, entry.kind, entry.record) {
            Ok(Some(event)) => {
                serde_json::to_writer(&mut out, &event)?;
                out.write_all(b"\n")?;
                written += 1;
            }
            Ok(None) => skipped += 1,
            Err(e) => {
                tracing::warn!(index, kind = %entry.kind, error = %e, "Skipping record");
                failed += 1;
            }
        }
    }

    out.flush()?;
    tracing::info!(written, skipped, failed, "Normalization complete");
    Ok(())
}

/// Initialize structured JSON logging on stderr.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(io::stderr)
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pumpsync=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
