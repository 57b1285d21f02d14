// This file is part of the disaster-response governance protocol.
// SPDX-License-Identifier: Apache-2.0

//! # DID/SBT Ledger Pallet
//!
//! Identity registry plus issuer of non-transferable achievement credentials ("Soulbound
//! Tokens"). Holds two mappings — DID profiles and per-owner SBT sequences — and an
//! admin-managed authorized-minter set. Has no dependency on any other pallet in this protocol;
//! the Event DAO pallet depends on it for participation credentials.
//!
//! ## Interface
//!
//! ### Dispatchable Functions
//!
//! - `register_did` — create or replace the caller's profile. Always succeeds.
//! - `mint_sbt` — issue a badge to `recipient`. Requires the caller to be an authorized minter.
//! - `authorize_minter` — admin-only; idempotent on an already-authorized minter.
//!
//! ### Queries
//!
//! - `get_did` / `get_sbts` — read-only, side-effect free.

#![cfg_attr(not(feature = "std"), no_std)]

mod types;

#[cfg(test)]
mod mock;

pub use pallet::*;
pub use types::*;

use disaster_primitives::BadgeId;
use disaster_traits::SbtIssuer;
use sp_std::prelude::*;

const LOG_TARGET: &str = "runtime::disaster-identity";

#[frame_support::pallet]
pub mod pallet {
	use super::*;
	use disaster_primitives::{BoundedLongText, BoundedShortText};
	use frame_support::pallet_prelude::*;
	use frame_system::pallet_prelude::*;

	#[pallet::pallet]
	pub struct Pallet<T>(_);

	#[pallet::config]
	pub trait Config: frame_system::Config + pallet_timestamp::Config {
		/// The overarching event type.
		type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;
	}

	/// DID profiles, at most one entry per owner.
	#[pallet::storage]
	#[pallet::getter(fn did_registry)]
	pub type DidRegistry<T: Config> =
		StorageMap<_, Blake2_128Concat, T::AccountId, DidProfile<T::Moment>, OptionQuery>;

	/// Length of the append-only SBT sequence held by each owner. Doubles as the next local
	/// index to insert at.
	#[pallet::storage]
	pub type SbtCount<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, u32, ValueQuery>;

	/// The append-only, per-owner SBT sequence, keyed by (owner, local index). Reading the
	/// sequence in order is done by iterating `0..SbtCount::<T>::get(owner)`, which is robust to
	/// the hash-ordered iteration of the underlying trie and preserves chronological order
	/// regardless.
	#[pallet::storage]
	pub type SbtOf<T: Config> = StorageDoubleMap<
		_,
		Blake2_128Concat,
		T::AccountId,
		Twox64Concat,
		u32,
		Sbt<T::AccountId, T::Moment>,
		OptionQuery,
	>;

	/// Globally monotonic badge id counter.
	#[pallet::storage]
	pub type NextBadgeId<T: Config> = StorageValue<_, BadgeId, ValueQuery>;

	/// Identities permitted to mint SBTs. Grown only by `admin`.
	#[pallet::storage]
	#[pallet::getter(fn is_authorized_minter)]
	pub type AuthorizedMinters<T: Config> =
		StorageMap<_, Blake2_128Concat, T::AccountId, (), ValueQuery>;

	/// The ledger administrator. Set once at genesis; immutable thereafter.
	#[pallet::storage]
	#[pallet::getter(fn admin)]
	pub type Admin<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

	#[pallet::genesis_config]
	pub struct GenesisConfig<T: Config> {
		pub admin: T::AccountId,
	}

	impl<T: Config> Default for GenesisConfig<T> {
		fn default() -> Self {
			Self { admin: Default::default() }
		}
	}

	#[pallet::genesis_build]
	impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
		fn build(&self) {
			Admin::<T>::put(&self.admin);
		}
	}

	#[pallet::event]
	#[pallet::generate_deposit(pub(super) fn deposit_event)]
	pub enum Event<T: Config> {
		/// A DID profile was created or replaced.
		DidRegistered { owner: T::AccountId },
		/// A new SBT was minted.
		SbtMinted { recipient: T::AccountId, badge_id: BadgeId, issuer: T::AccountId },
		/// A new minter was authorized by the admin.
		MinterAuthorized { minter: T::AccountId },
	}

	#[pallet::error]
	pub enum Error<T> {
		/// The caller is not in `authorized_minters`.
		NotAuthorizedMinter,
		/// The caller is not the ledger admin.
		NotAdmin,
		/// The admin has not been configured.
		AdminNotSet,
	}

	#[pallet::call]
	impl<T: Config> Pallet<T> {
		/// Create or replace the profile owned by the caller. Always succeeds.
		#[pallet::call_index(0)]
		#[pallet::weight(10_000)]
		pub fn register_did(
			origin: OriginFor<T>,
			name: Vec<u8>,
			entity_type: Vec<u8>,
			contact_info: Vec<u8>,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;

			// Oversized free text is truncated to the bound, never silently blanked: "always
			// succeeds" (spec §4.1) rules out rejecting the call, but the caller's data must
			// survive as far as it fits.
			let name = BoundedShortText::truncate_from(name);
			let entity_type = BoundedShortText::truncate_from(entity_type);
			let contact_info = BoundedLongText::truncate_from(contact_info);
			let registration_date = pallet_timestamp::Pallet::<T>::get();

			DidRegistry::<T>::insert(
				&who,
				DidProfile { name, entity_type, contact_info, registration_date },
			);

			Self::deposit_event(Event::DidRegistered { owner: who });
			Ok(())
		}

		/// Issue a badge to `recipient`. The caller must be an authorized minter.
		#[pallet::call_index(1)]
		#[pallet::weight(10_000)]
		pub fn mint_sbt(
			origin: OriginFor<T>,
			recipient: T::AccountId,
			event_name: Vec<u8>,
			badge_type: Vec<u8>,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;
			Self::do_mint_sbt(&who, &recipient, &event_name, &badge_type)?;
			Ok(())
		}

		/// Authorize `minter` to call `mint_sbt`. Admin-only; idempotent on an already-authorized
		/// minter.
		#[pallet::call_index(2)]
		#[pallet::weight(10_000)]
		pub fn authorize_minter(origin: OriginFor<T>, minter: T::AccountId) -> DispatchResult {
			let who = ensure_signed(origin)?;
			let admin = Admin::<T>::get().ok_or(Error::<T>::AdminNotSet)?;
			ensure!(who == admin, Error::<T>::NotAdmin);

			if !AuthorizedMinters::<T>::contains_key(&minter) {
				AuthorizedMinters::<T>::insert(&minter, ());
				Self::deposit_event(Event::MinterAuthorized { minter });
			}
			Ok(())
		}
	}

	impl<T: Config> Pallet<T> {
		/// Shared implementation behind both the `mint_sbt` extrinsic and the `SbtIssuer` trait
		/// used by the DAO pallet.
		pub(crate) fn do_mint_sbt(
			minter: &T::AccountId,
			recipient: &T::AccountId,
			event_name: &[u8],
			badge_type: &[u8],
		) -> Result<BadgeId, DispatchError> {
			ensure!(AuthorizedMinters::<T>::contains_key(minter), Error::<T>::NotAuthorizedMinter);

			let badge_id = NextBadgeId::<T>::get();
			let issued_at = pallet_timestamp::Pallet::<T>::get();
			// Truncated to the bound rather than silently blanked on oversized input, same as
			// `register_did`.
			let sbt = Sbt {
				badge_id,
				issuer: minter.clone(),
				event_name: BoundedShortText::truncate_from(event_name.to_vec()),
				badge_type: BoundedShortText::truncate_from(badge_type.to_vec()),
				issued_at,
			};

			let local_index = SbtCount::<T>::get(recipient);
			SbtOf::<T>::insert(recipient, local_index, sbt);
			SbtCount::<T>::insert(recipient, local_index.saturating_add(1));
			NextBadgeId::<T>::put(badge_id.saturating_add(1));

			log::debug!(target: LOG_TARGET, "minted badge {:?} to {:?}", badge_id, recipient);
			Self::deposit_event(Event::SbtMinted {
				recipient: recipient.clone(),
				badge_id,
				issuer: minter.clone(),
			});
			Ok(badge_id)
		}

		/// Query: the DID profile for `owner`, if any.
		pub fn get_did(owner: &T::AccountId) -> Option<DidProfile<T::Moment>> {
			DidRegistry::<T>::get(owner)
		}

		/// Query: the chronologically ordered SBT sequence for `owner`. Empty if `owner` has none.
		pub fn get_sbts(owner: &T::AccountId) -> Vec<Sbt<T::AccountId, T::Moment>> {
			let count = SbtCount::<T>::get(owner);
			(0..count).filter_map(|i| SbtOf::<T>::get(owner, i)).collect()
		}
	}
}

impl<T: Config> SbtIssuer<T::AccountId> for Pallet<T> {
	fn mint(
		minter: &T::AccountId,
		recipient: &T::AccountId,
		event_name: &[u8],
		badge_type: &[u8],
	) -> Result<BadgeId, sp_runtime::DispatchError> {
		Self::do_mint_sbt(minter, recipient, event_name, badge_type)
	}
}
