// This file is part of the disaster-response governance protocol.
// SPDX-License-Identifier: Apache-2.0

//! # Event Factory Pallet
//!
//! Single entry point: turns an authenticated [`disaster_primitives::ValidatedEvent`] into a
//! running Event DAO backed by initial parametric capital. Depends on both the Event DAO pallet
//! (`disaster_traits::DaoLifecycle`) and the Insurance Vault pallet
//! (`disaster_traits::InsuranceVault`) — the only component in this protocol that depends on both
//! of its peers.
//!
//! ## Interface
//!
//! ### Dispatchable Functions
//!
//! - `declare_event` — restricted to the configured `authorized_bridge`, an explicit authorized
//!   identity exposed at genesis rather than left open to any caller.
//!
//! ## Non-atomicity
//!
//! The DAO-initialize step and the Vault-release step are not atomic with each other: a Vault
//! failure (insufficient liquidity) leaves an initialized but unfunded DAO rather than unwinding
//! the DAO creation. `declare_event` therefore never propagates the Vault's error as its own
//! `DispatchResult::Err` — doing so would let FRAME's per-extrinsic storage transaction roll back
//! the DAO initialization too, which is stronger atomicity than intended here. Instead, exactly
//! like `pallet_disaster_dao::donate_and_vote`, the call always returns `Ok(())` at the extrinsic
//! level and reports the funding outcome through an event (`EventDeclared` on success,
//! `InitialFundingFailed` when the Vault declines) — the DAO id is always assigned and always
//! queryable via `Dao::get_event_details` regardless of which event fires.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(test)]
mod mock;

pub use pallet::*;

use disaster_primitives::{DaoId, ValidatedEvent};
use disaster_traits::{DaoLifecycle, InsuranceVault};

const LOG_TARGET: &str = "runtime::disaster-factory";

#[frame_support::pallet]
pub mod pallet {
	use super::*;
	use frame_support::pallet_prelude::*;
	use frame_system::pallet_prelude::*;
	use sp_runtime::traits::AtLeast32BitUnsigned;

	#[pallet::pallet]
	pub struct Pallet<T>(_);

	#[pallet::config]
	pub trait Config: frame_system::Config {
		/// The overarching event type.
		type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

		/// Integer bookkeeping unit, shared with the Vault and DAO pallets' `Balance`.
		type Balance: Parameter + Member + AtLeast32BitUnsigned + Default + Copy + MaxEncodedLen + TypeInfo;

		/// The Event DAO pallet, called to initialize a fresh per-disaster instance.
		type Dao: DaoLifecycle<Self::AccountId>;

		/// The Insurance Vault pallet, called to release parametric initial funding.
		type Vault: InsuranceVault<Self::AccountId, Self::Balance>;
	}

	/// The sole identity permitted to call `declare_event`. Immutable after genesis.
	#[pallet::storage]
	#[pallet::getter(fn authorized_bridge)]
	pub type AuthorizedBridge<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

	/// Monotonically increasing DAO identifier counter.
	#[pallet::storage]
	#[pallet::getter(fn next_dao_id)]
	pub type NextDaoId<T: Config> = StorageValue<_, DaoId, ValueQuery>;

	#[pallet::genesis_config]
	pub struct GenesisConfig<T: Config> {
		pub authorized_bridge: T::AccountId,
	}

	impl<T: Config> Default for GenesisConfig<T> {
		fn default() -> Self {
			Self { authorized_bridge: Default::default() }
		}
	}

	#[pallet::genesis_build]
	impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
		fn build(&self) {
			AuthorizedBridge::<T>::put(&self.authorized_bridge);
		}
	}

	#[pallet::event]
	#[pallet::generate_deposit(pub(super) fn deposit_event)]
	pub enum Event<T: Config> {
		/// A new Event DAO was declared and its initial funding released.
		EventDeclared { dao_id: DaoId, bridge: T::AccountId, payout: T::Balance },
		/// The DAO was initialized but the Vault declined to release funding; the DAO is still
		/// usable (it can accept donations and run governance) but starts unfunded.
		InitialFundingFailed { dao_id: DaoId, bridge: T::AccountId },
	}

	#[pallet::error]
	pub enum Error<T> {
		/// The caller is not the configured `authorized_bridge`.
		NotAuthorizedBridge,
		/// Genesis did not configure `authorized_bridge`.
		NotConfigured,
	}

	#[pallet::call]
	impl<T: Config> Pallet<T> {
		/// Declare a validated disaster event: assign a fresh DAO id, initialize the DAO with
		/// `event`, then request the Vault's parametric initial funding for it.
		#[pallet::call_index(0)]
		#[pallet::weight(10_000)]
		pub fn declare_event(origin: OriginFor<T>, event: ValidatedEvent) -> DispatchResult {
			let who = ensure_signed(origin)?;
			let bridge = AuthorizedBridge::<T>::get().ok_or(Error::<T>::NotConfigured)?;
			ensure!(who == bridge, Error::<T>::NotAuthorizedBridge);

			let dao_id = NextDaoId::<T>::get();
			NextDaoId::<T>::put(dao_id.saturating_add(1));

			// `initialize` never fails in the current protocol: a fresh `dao_id` can never already
			// be initialized, and re-initialization is a no-op `Ok(())`.
			T::Dao::initialize(dao_id, event.clone(), who.clone())?;

			match T::Vault::release_initial_funding(&who, dao_id, &event) {
				Ok(payout) => {
					Self::deposit_event(Event::EventDeclared { dao_id, bridge: who, payout });
				},
				Err(err) => {
					log::warn!(
						target: LOG_TARGET,
						"initial funding release failed for dao {:?}: {:?}; dao remains initialized but unfunded",
						dao_id,
						err,
					);
					Self::deposit_event(Event::InitialFundingFailed { dao_id, bridge: who });
				},
			}

			Ok(())
		}
	}

	impl<T: Config> Pallet<T> {
		/// Query: the identity permitted to declare events, if configured.
		pub fn get_authorized_bridge() -> Option<T::AccountId> {
			AuthorizedBridge::<T>::get()
		}
	}
}
