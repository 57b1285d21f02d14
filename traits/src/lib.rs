// This file is part of the disaster-response governance protocol.
// SPDX-License-Identifier: Apache-2.0

//! Interfaces the Factory, DAO, and Vault pallets bind to in their `Config` traits so that calls
//! between them compose through a trait object rather than a hard crate dependency, the same
//! loose-coupling idiom Substrate pallets use for `treasury::SpendFunds` and
//! `name-service::NameServiceResolver`.

#![cfg_attr(not(feature = "std"), no_std)]

use disaster_primitives::{BadgeId, DaoId, ValidatedEvent};
use frame_support::dispatch::DispatchResult;
use sp_runtime::DispatchError;

/// Implemented by the Insurance Vault pallet; called by the Factory on event declaration.
///
/// `caller` is the identity the Vault checks against its `authorized_factory`: the Factory passes
/// the signed account that invoked `declare_event`.
pub trait InsuranceVault<AccountId, Balance> {
	/// Release the parametric payout for `event`'s severity into `dao_id`. Returns the amount
	/// released (zero for an unrecognized severity).
	fn release_initial_funding(
		caller: &AccountId,
		dao_id: DaoId,
		event: &ValidatedEvent,
	) -> Result<Balance, DispatchError>;
}

/// Implemented by the Event DAO pallet; called by the Factory on event declaration.
pub trait DaoLifecycle<AccountId> {
	/// Initialize `dao_id` with `event` and `factory`. Idempotent by refusal: a second call for
	/// an already-initialized `dao_id` leaves state untouched and returns `Ok(())`; callers
	/// observe the "already initialized" outcome through a query, not an error.
	fn initialize(dao_id: DaoId, event: ValidatedEvent, factory: AccountId) -> DispatchResult;

	/// Whether `dao_id` has already been initialized.
	fn is_initialized(dao_id: DaoId) -> bool;
}

/// Implemented by the DID/SBT Ledger pallet; called by the DAO pallet after a successful vote.
pub trait SbtIssuer<AccountId> {
	/// Mint a non-transferable badge to `recipient` on behalf of `minter`. Fails with an
	/// authorization error if `minter` is not in the Ledger's `authorized_minters` set.
	fn mint(
		minter: &AccountId,
		recipient: &AccountId,
		event_name: &[u8],
		badge_type: &[u8],
	) -> Result<BadgeId, DispatchError>;
}
