// This file is part of the disaster-response governance protocol.
// SPDX-License-Identifier: Apache-2.0

//! # Parametric Insurance Vault Pallet
//!
//! Custodian of liquidity and sole source of parametric disaster payouts. Depends on no peer
//! pallet at rest; invoked by the Event Factory on event declaration through the
//! `disaster_traits::InsuranceVault` interface.
//!
//! Balances here are integer bookkeeping units only: no real asset transfer backs
//! `total_liquidity`, so this `Config` does not bind a `Currency` — just a plain unsigned
//! integer `Balance` type.
//!
//! ## Interface
//!
//! ### Dispatchable Functions
//!
//! - `add_funder` — admin-only; idempotent on an already-authorized funder.
//! - `fund_vault` — authorized-funder-only; increases `total_liquidity`.
//!
//! `release_initial_funding` is not a dispatchable: it is reached only through the
//! `InsuranceVault` trait, invoked by the Factory pallet.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(test)]
mod mock;

pub use pallet::*;

use disaster_primitives::{DaoId, ValidatedEvent};
use disaster_traits::InsuranceVault;
use sp_std::prelude::*;

const LOG_TARGET: &str = "runtime::disaster-vault";

#[frame_support::pallet]
pub mod pallet {
	use super::*;
	use frame_support::pallet_prelude::*;
	use frame_system::pallet_prelude::*;
	use sp_runtime::traits::{AtLeast32BitUnsigned, SaturatedConversion, Zero};

	#[pallet::pallet]
	pub struct Pallet<T>(_);

	#[pallet::config]
	pub trait Config: frame_system::Config {
		/// The overarching event type.
		type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

		/// Integer bookkeeping unit for liquidity and payouts. No real currency is moved.
		type Balance: Parameter
			+ Member
			+ AtLeast32BitUnsigned
			+ Default
			+ Copy
			+ MaxEncodedLen
			+ TypeInfo;
	}

	/// Current liquidity available for release.
	#[pallet::storage]
	#[pallet::getter(fn total_liquidity)]
	pub type TotalLiquidity<T: Config> = StorageValue<_, T::Balance, ValueQuery>;

	/// The sole identity permitted to call `release_initial_funding`. Immutable after genesis.
	#[pallet::storage]
	#[pallet::getter(fn authorized_factory)]
	pub type AuthorizedFactory<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

	/// Always an effective funder; immutable after genesis.
	#[pallet::storage]
	#[pallet::getter(fn initial_funder)]
	pub type InitialFunder<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

	/// The Vault administrator. Immutable after genesis; cannot deposit unless also a funder and
	/// can never release funds.
	#[pallet::storage]
	#[pallet::getter(fn admin)]
	pub type Admin<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

	/// Funders added by `admin` beyond `initial_funder`.
	#[pallet::storage]
	pub type AdditionalFunders<T: Config> =
		StorageMap<_, Blake2_128Concat, T::AccountId, (), ValueQuery>;

	#[pallet::genesis_config]
	pub struct GenesisConfig<T: Config> {
		pub admin: T::AccountId,
		pub initial_funder: T::AccountId,
		pub authorized_factory: T::AccountId,
	}

	impl<T: Config> Default for GenesisConfig<T> {
		fn default() -> Self {
			Self {
				admin: Default::default(),
				initial_funder: Default::default(),
				authorized_factory: Default::default(),
			}
		}
	}

	#[pallet::genesis_build]
	impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
		fn build(&self) {
			Admin::<T>::put(&self.admin);
			InitialFunder::<T>::put(&self.initial_funder);
			AuthorizedFactory::<T>::put(&self.authorized_factory);
		}
	}

	#[pallet::event]
	#[pallet::generate_deposit(pub(super) fn deposit_event)]
	pub enum Event<T: Config> {
		/// `funder` was added to `additional_funders`.
		FunderAdded { funder: T::AccountId },
		/// `funder` increased liquidity by `amount`.
		VaultFunded { funder: T::AccountId, amount: T::Balance },
		/// A payout was released into `dao_id`. `amount` is zero for an unrecognized severity.
		InitialFundingReleased { dao_id: DaoId, amount: T::Balance },
	}

	#[pallet::error]
	pub enum Error<T> {
		/// The caller is not the Vault admin.
		NotAdmin,
		/// The caller is neither `initial_funder` nor in `additional_funders`.
		NotAuthorizedFunder,
		/// The caller is not `authorized_factory`.
		NotAuthorizedFactory,
		/// `fund_vault` was called with a zero amount.
		ZeroAmount,
		/// `total_liquidity` is lower than the requested payout.
		InsufficientLiquidity,
		/// Genesis did not configure the required identity.
		NotConfigured,
	}

	#[pallet::call]
	impl<T: Config> Pallet<T> {
		/// Add `funder` to the authorized funder set. Admin-only; idempotent.
		#[pallet::call_index(0)]
		#[pallet::weight(10_000)]
		pub fn add_funder(origin: OriginFor<T>, funder: T::AccountId) -> DispatchResult {
			let who = ensure_signed(origin)?;
			let admin = Admin::<T>::get().ok_or(Error::<T>::NotConfigured)?;
			ensure!(who == admin, Error::<T>::NotAdmin);

			if !AdditionalFunders::<T>::contains_key(&funder) {
				AdditionalFunders::<T>::insert(&funder, ());
				Self::deposit_event(Event::FunderAdded { funder });
			}
			Ok(())
		}

		/// Increase `total_liquidity` by `amount`. Fails on a zero amount or an unauthorized
		/// caller.
		#[pallet::call_index(1)]
		#[pallet::weight(10_000)]
		pub fn fund_vault(origin: OriginFor<T>, amount: T::Balance) -> DispatchResult {
			let who = ensure_signed(origin)?;
			ensure!(!amount.is_zero(), Error::<T>::ZeroAmount);
			ensure!(Self::is_authorized_funder(&who), Error::<T>::NotAuthorizedFunder);

			TotalLiquidity::<T>::mutate(|total| *total = total.saturating_add(amount));
			Self::deposit_event(Event::VaultFunded { funder: who, amount });
			Ok(())
		}
	}

	impl<T: Config> Pallet<T> {
		fn is_authorized_funder(who: &T::AccountId) -> bool {
			InitialFunder::<T>::get().as_ref() == Some(who) ||
				AdditionalFunders::<T>::contains_key(who)
		}

		/// Query: the identities permitted to fund the Vault, `initial_funder` first.
		pub fn get_authorized_funders() -> Vec<T::AccountId> {
			let mut funders = Vec::new();
			if let Some(initial) = InitialFunder::<T>::get() {
				funders.push(initial);
			}
			funders.extend(AdditionalFunders::<T>::iter_keys());
			funders
		}

		/// Query: current liquidity.
		pub fn get_total_liquidity() -> T::Balance {
			TotalLiquidity::<T>::get()
		}
	}
}

impl<T: Config> InsuranceVault<T::AccountId, T::Balance> for Pallet<T> {
	fn release_initial_funding(
		caller: &T::AccountId,
		dao_id: DaoId,
		event: &ValidatedEvent,
	) -> Result<T::Balance, sp_runtime::DispatchError> {
		use frame_support::ensure;
		use sp_runtime::traits::{SaturatedConversion, Zero};

		let factory = AuthorizedFactory::<T>::get().ok_or(Error::<T>::NotConfigured)?;
		ensure!(*caller == factory, Error::<T>::NotAuthorizedFactory);

		let payout = event.severity_class().payout();
		let payout: T::Balance = payout.saturated_into();

		if payout.is_zero() {
			log::debug!(
				target: LOG_TARGET,
				"release_initial_funding for dao {:?}: unrecognized severity, no payout",
				dao_id,
			);
			Pallet::<T>::deposit_event(Event::InitialFundingReleased {
				dao_id,
				amount: payout,
			});
			return Ok(payout);
		}

		let total = TotalLiquidity::<T>::get();
		ensure!(total >= payout, Error::<T>::InsufficientLiquidity);

		TotalLiquidity::<T>::put(total - payout);
		Pallet::<T>::deposit_event(Event::InitialFundingReleased { dao_id, amount: payout });
		Ok(payout)
	}
}
