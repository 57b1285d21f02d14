// This file is part of the disaster-response governance protocol.
// SPDX-License-Identifier: Apache-2.0

//! Wire types shared by every pallet in the disaster-response protocol.
//!
//! These mirror the `ValidatedEvent` / severity vocabulary described in the
//! system's data model: an opaque, audited record produced off-chain by the
//! intelligence pipeline and consumed, unmodified, by the on-chain Factory.

#![cfg_attr(not(feature = "std"), no_std)]

use codec::{Decode, Encode, MaxEncodedLen};
use frame_support::{traits::ConstU32, BoundedVec, RuntimeDebug};
use scale_info::TypeInfo;

/// Per-disaster DAO identifier, assigned sequentially by the Factory.
pub type DaoId = u32;

/// Dense, sequential proposal identifier, scoped to a single DAO.
pub type ProposalId = u32;

/// Globally monotonic SBT identifier, scoped to the whole Ledger.
pub type BadgeId = u64;

/// Maximum byte length of a `ValidatedEvent::event_type` tag.
pub const MAX_EVENT_TYPE_LEN: u32 = 64;
/// Maximum byte length of a `ValidatedEvent::severity` tag.
pub const MAX_SEVERITY_LEN: u32 = 32;
/// Maximum byte length of the opaque `details_json` audit blob.
pub const MAX_DETAILS_LEN: u32 = 4096;
/// Maximum byte length of short free text (proposal titles, DID names, badge types, ...).
pub const MAX_SHORT_TEXT_LEN: u32 = 256;
/// Maximum byte length of long free text (proposal descriptions, contact info).
pub const MAX_LONG_TEXT_LEN: u32 = 2048;

/// Strictly-greater-than bound on `votes_for` required for a proposal to auto-execute.
///
/// Part of the external contract: changing this is a protocol change, not a tuning knob, so it
/// lives here rather than behind a `Config::Get`.
pub const APPROVAL_THRESHOLD: u32 = 5;

/// The parametric payout table, in bookkeeping units. Part of the external contract: any other
/// severity tag (including the empty string) yields zero payout.
pub const PAYOUT_TINGGI: u128 = 100_000_000;
pub const PAYOUT_SEDANG: u128 = 50_000_000;
pub const PAYOUT_RENDAH: u128 = 10_000_000;

pub type BoundedEventType = BoundedVec<u8, ConstU32<MAX_EVENT_TYPE_LEN>>;
pub type BoundedSeverity = BoundedVec<u8, ConstU32<MAX_SEVERITY_LEN>>;
pub type BoundedDetails = BoundedVec<u8, ConstU32<MAX_DETAILS_LEN>>;
pub type BoundedShortText = BoundedVec<u8, ConstU32<MAX_SHORT_TEXT_LEN>>;
pub type BoundedLongText = BoundedVec<u8, ConstU32<MAX_LONG_TEXT_LEN>>;

/// Classification of a raw severity tag. `Unknown` covers any tag outside the three recognized
/// values, including the empty string — accepted, but it yields no payout.
#[derive(Clone, Copy, Encode, Decode, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub enum Severity {
	Tinggi,
	Sedang,
	Rendah,
	Unknown,
}

impl Severity {
	/// Classify a raw severity tag using the exact, case-sensitive strings in the external
	/// contract. A pure function of the tag, deterministic in both directions.
	pub fn classify(tag: &[u8]) -> Self {
		match tag {
			b"Tinggi" => Severity::Tinggi,
			b"Sedang" => Severity::Sedang,
			b"Rendah" => Severity::Rendah,
			_ => Severity::Unknown,
		}
	}

	/// The parametric payout for this severity class, in bookkeeping units.
	pub fn payout(&self) -> u128 {
		match self {
			Severity::Tinggi => PAYOUT_TINGGI,
			Severity::Sedang => PAYOUT_SEDANG,
			Severity::Rendah => PAYOUT_RENDAH,
			Severity::Unknown => 0,
		}
	}
}

/// An immutable disaster record produced by the off-chain intelligence pipeline and consumed by
/// the Factory. Never mutated once constructed.
#[derive(Clone, Encode, Decode, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct ValidatedEvent {
	pub event_type: BoundedEventType,
	pub severity: BoundedSeverity,
	pub details_json: BoundedDetails,
}

impl ValidatedEvent {
	/// Classify this event's severity tag.
	pub fn severity_class(&self) -> Severity {
		Severity::classify(&self.severity)
	}
}
