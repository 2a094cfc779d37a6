// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Canonical events produced by the normalization layer.

pub mod basal;
pub mod bolus;
pub mod event;
pub mod reading;

pub use basal::{BasalSegment, DeliveryType, SuspensionRecord};
pub use bolus::{Bolus, BolusKind, BolusTiming};
pub use event::{ActivityEvent, ActivityEventType, SuspensionEvent, SuspensionEventType};
pub use reading::{BgReading, CgmReading, IobSample};
