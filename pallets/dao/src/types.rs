// This file is part of the disaster-response governance protocol.
// SPDX-License-Identifier: Apache-2.0

use codec::{Decode, Encode, MaxEncodedLen};
use disaster_primitives::{BoundedLongText, BoundedShortText, ProposalId};
use frame_support::RuntimeDebug;
use scale_info::TypeInfo;

/// A mutable record owned by its DAO. The voter set lives in a separate storage map
/// (`Voters`) rather than inline here, so this struct doubles as the voter-set-free snapshot
/// projection returned by `get_all_proposals`/`get_proposal`.
#[derive(Clone, Encode, Decode, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct Proposal<AccountId, Balance> {
	pub id: ProposalId,
	pub proposer: AccountId,
	pub title: BoundedShortText,
	pub description: BoundedLongText,
	pub amount_requested: Balance,
	pub recipient: AccountId,
	pub votes_for: u32,
	pub votes_against: u32,
	pub is_executed: bool,
}

/// Why a vote attempted inside `donate_and_vote` did not result in a tally update. The preceding
/// donation is never rolled back regardless of this outcome.
#[derive(Clone, Encode, Decode, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub enum VoteRejectReason {
	ProposalNotFound,
	AlreadyVoted,
}
