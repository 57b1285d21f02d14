// This file is part of the disaster-response governance protocol.
// SPDX-License-Identifier: Apache-2.0

use codec::{Decode, Encode, MaxEncodedLen};
use disaster_primitives::{BadgeId, BoundedLongText, BoundedShortText};
use frame_support::RuntimeDebug;
use scale_info::TypeInfo;

/// A self-registered identity record keyed by the owner's account.
#[derive(Clone, Encode, Decode, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct DidProfile<Moment> {
	pub name: BoundedShortText,
	pub entity_type: BoundedShortText,
	pub contact_info: BoundedLongText,
	/// Time of the most recent registration; overwritten on re-registration.
	pub registration_date: Moment,
}

/// A non-transferable badge recording participation. Never mutated or removed once minted.
#[derive(Clone, Encode, Decode, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct Sbt<AccountId, Moment> {
	pub badge_id: BadgeId,
	pub issuer: AccountId,
	pub event_name: BoundedShortText,
	pub badge_type: BoundedShortText,
	pub issued_at: Moment,
}
