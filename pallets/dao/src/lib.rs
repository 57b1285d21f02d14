// This file is part of the disaster-response governance protocol.
// SPDX-License-Identifier: Apache-2.0

//! # Event DAO Pallet
//!
//! A per-disaster governance unit: treasury, proposal book, vote ledger and execution engine.
//! A single pallet instance hosts every disaster's state, keyed by [`disaster_primitives::DaoId`]
//! — one pallet-per-instance is not expressible at compile time, so the instance boundary becomes
//! a storage-map key, the same technique `frame/name-service` uses for per-name state.
//!
//! Depends on the DID/SBT Ledger through `disaster_traits::SbtIssuer` for participation
//! credentials; invoked by the Event Factory through `disaster_traits::DaoLifecycle`.
//!
//! ## Interface
//!
//! ### Dispatchable Functions
//!
//! - `submit_proposal` — any signed caller.
//! - `donate` — any signed caller.
//! - `donate_and_vote` — the only entry point that can change a proposal's tally; always
//!   succeeds at the extrinsic level (there is no standalone `vote` entry point). Partial
//!   outcomes (vote rejected, SBT mint failed) are reported through events rather than an `Err`,
//!   since the preceding donation must survive those outcomes and a `DispatchResult::Err` would
//!   roll back the whole extrinsic under FRAME's default semantics.
//!
//! `initialize` is reached only through the `DaoLifecycle` trait, invoked by the Factory pallet.

#![cfg_attr(not(feature = "std"), no_std)]

mod types;

#[cfg(test)]
mod mock;

pub use pallet::*;
pub use types::*;

use disaster_primitives::{DaoId, ProposalId, ValidatedEvent, APPROVAL_THRESHOLD};
use disaster_traits::{DaoLifecycle, SbtIssuer};
use sp_std::prelude::*;

const LOG_TARGET: &str = "runtime::disaster-dao";
const DONOR_SBT_BADGE_TYPE: &[u8] = b"Donor & Participant";
const UNKNOWN_EVENT_LABEL: &[u8] = b"Unknown Event";

#[frame_support::pallet]
pub mod pallet {
	use super::*;
	use disaster_primitives::{BoundedLongText, BoundedShortText};
	use frame_support::{pallet_prelude::*, traits::tokens::AtLeast32BitUnsigned, PalletId};
	use frame_system::pallet_prelude::*;
	use sp_runtime::traits::{AccountIdConversion, Zero};

	#[pallet::pallet]
	pub struct Pallet<T>(_);

	#[pallet::config]
	pub trait Config: frame_system::Config {
		/// The overarching event type.
		type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

		/// Integer bookkeeping unit for donations, treasury balance, and proposal requests.
		type Balance: Parameter
			+ Member
			+ AtLeast32BitUnsigned
			+ Default
			+ Copy
			+ MaxEncodedLen
			+ TypeInfo;

		/// The DID/SBT Ledger participation-credential issuer.
		type Sbt: SbtIssuer<Self::AccountId>;

		/// This pallet's id, used to derive the sovereign account it mints participation SBTs as.
		/// That account must be authorized as a minter on the Ledger once, at genesis — unlike an
		/// individual donor, it is known in advance and never changes.
		#[pallet::constant]
		type PalletId: Get<PalletId>;
	}

	/// The immutable event payload each DAO was initialized with.
	#[pallet::storage]
	#[pallet::getter(fn event_data)]
	pub type EventData<T: Config> = StorageMap<_, Blake2_128Concat, DaoId, ValidatedEvent, OptionQuery>;

	/// The identity of the Factory that initialized this DAO.
	#[pallet::storage]
	pub type FactoryOf<T: Config> =
		StorageMap<_, Blake2_128Concat, DaoId, T::AccountId, OptionQuery>;

	/// Invariant: `treasury_balance == Σ donations − Σ executed_proposal_amounts`.
	#[pallet::storage]
	#[pallet::getter(fn treasury_balance)]
	pub type TreasuryBalance<T: Config> = StorageMap<_, Blake2_128Concat, DaoId, T::Balance, ValueQuery>;

	/// Cumulative donation per donor. Always `> 0` for any present key.
	#[pallet::storage]
	pub type Donors<T: Config> = StorageDoubleMap<
		_,
		Blake2_128Concat,
		DaoId,
		Blake2_128Concat,
		T::AccountId,
		T::Balance,
		ValueQuery,
	>;

	#[pallet::storage]
	pub type Proposals<T: Config> = StorageDoubleMap<
		_,
		Blake2_128Concat,
		DaoId,
		Twox64Concat,
		ProposalId,
		Proposal<T::AccountId, T::Balance>,
		OptionQuery,
	>;

	/// Equals `|proposals|` at steady state.
	#[pallet::storage]
	pub type NextProposalId<T: Config> = StorageMap<_, Blake2_128Concat, DaoId, ProposalId, ValueQuery>;

	/// Whether `(dao_id, proposal_id, voter)` has already cast a vote. An identity appears here
	/// at most once per proposal.
	#[pallet::storage]
	pub type Voters<T: Config> = StorageNMap<
		_,
		(
			NMapKey<Blake2_128Concat, DaoId>,
			NMapKey<Twox64Concat, ProposalId>,
			NMapKey<Blake2_128Concat, T::AccountId>,
		),
		(),
		ValueQuery,
	>;

	#[pallet::event]
	#[pallet::generate_deposit(pub(super) fn deposit_event)]
	pub enum Event<T: Config> {
		/// A new DAO was initialized.
		DaoInitialized { dao_id: DaoId, factory: T::AccountId },
		/// `initialize` was called on an already-initialized DAO; no state changed.
		DaoAlreadyInitialized { dao_id: DaoId },
		/// A proposal was recorded.
		ProposalSubmitted { dao_id: DaoId, proposal_id: ProposalId, proposer: T::AccountId },
		/// A donation was recorded.
		DonationRecorded { dao_id: DaoId, donor: T::AccountId, amount: T::Balance },
		/// A vote was cast and tallied.
		VoteCast {
			dao_id: DaoId,
			proposal_id: ProposalId,
			voter: T::AccountId,
			in_favor: bool,
		},
		/// A vote attempt inside `donate_and_vote` was rejected; the donation still stands.
		VoteRejected {
			dao_id: DaoId,
			proposal_id: ProposalId,
			voter: T::AccountId,
			reason: VoteRejectReason,
		},
		/// A proposal crossed the approval threshold with sufficient treasury and executed.
		ProposalExecuted { dao_id: DaoId, proposal_id: ProposalId, amount: T::Balance },
		/// The participation SBT mint requested after a successful vote failed. The donation and
		/// vote are not rolled back.
		SbtMintFailed { dao_id: DaoId, proposal_id: ProposalId, donor: T::AccountId },
	}

	#[pallet::error]
	pub enum Error<T> {
		/// No DAO exists at this id, or it has not yet been initialized.
		DaoNotInitialized,
		/// `donate`/`donate_and_vote` was called with a zero amount.
		ZeroAmount,
		/// No proposal exists at this id within this DAO.
		ProposalNotFound,
	}

	#[pallet::call]
	impl<T: Config> Pallet<T> {
		/// Record a new proposal against `dao_id`. Any signed caller may propose.
		#[pallet::call_index(0)]
		#[pallet::weight(10_000)]
		pub fn submit_proposal(
			origin: OriginFor<T>,
			dao_id: DaoId,
			title: Vec<u8>,
			description: Vec<u8>,
			amount_requested: T::Balance,
			recipient: T::AccountId,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;
			ensure!(EventData::<T>::contains_key(dao_id), Error::<T>::DaoNotInitialized);

			let proposal_id = NextProposalId::<T>::get(dao_id);
			// Truncated to the bound rather than silently blanked on oversized input.
			let proposal = Proposal {
				id: proposal_id,
				proposer: who.clone(),
				title: BoundedShortText::truncate_from(title),
				description: BoundedLongText::truncate_from(description),
				amount_requested,
				recipient,
				votes_for: 0,
				votes_against: 0,
				is_executed: false,
			};
			Proposals::<T>::insert(dao_id, proposal_id, proposal);
			NextProposalId::<T>::insert(dao_id, proposal_id.saturating_add(1));

			Self::deposit_event(Event::ProposalSubmitted { dao_id, proposal_id, proposer: who });
			Ok(())
		}

		/// Record a donation from the caller into `dao_id`'s treasury. Any signed caller may
		/// donate.
		#[pallet::call_index(1)]
		#[pallet::weight(10_000)]
		pub fn donate(origin: OriginFor<T>, dao_id: DaoId, amount: T::Balance) -> DispatchResult {
			let who = ensure_signed(origin)?;
			ensure!(EventData::<T>::contains_key(dao_id), Error::<T>::DaoNotInitialized);
			ensure!(!amount.is_zero(), Error::<T>::ZeroAmount);

			Self::do_donate(dao_id, &who, amount);
			Ok(())
		}

		/// Donate, then attempt to cast a vote on `proposal_id`, then — if the vote was cast —
		/// request a participation SBT. Every sub-step's outcome is reported via an event; the
		/// call itself only fails (rolling back the donation too) if the preconditions checked
		/// before any state is touched are not met.
		#[pallet::call_index(2)]
		#[pallet::weight(10_000)]
		pub fn donate_and_vote(
			origin: OriginFor<T>,
			dao_id: DaoId,
			amount: T::Balance,
			proposal_id: ProposalId,
			in_favor: bool,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;
			ensure!(EventData::<T>::contains_key(dao_id), Error::<T>::DaoNotInitialized);
			ensure!(!amount.is_zero(), Error::<T>::ZeroAmount);

			Self::do_donate(dao_id, &who, amount);

			let Some(mut proposal) = Proposals::<T>::get(dao_id, proposal_id) else {
				Self::deposit_event(Event::VoteRejected {
					dao_id,
					proposal_id,
					voter: who,
					reason: VoteRejectReason::ProposalNotFound,
				});
				return Ok(());
			};

			if Voters::<T>::contains_key((dao_id, proposal_id, &who)) {
				Self::deposit_event(Event::VoteRejected {
					dao_id,
					proposal_id,
					voter: who,
					reason: VoteRejectReason::AlreadyVoted,
				});
				return Ok(());
			}

			Voters::<T>::insert((dao_id, proposal_id, &who), ());
			if in_favor {
				proposal.votes_for = proposal.votes_for.saturating_add(1);
			} else {
				proposal.votes_against = proposal.votes_against.saturating_add(1);
			}
			Proposals::<T>::insert(dao_id, proposal_id, &proposal);
			Self::deposit_event(Event::VoteCast { dao_id, proposal_id, voter: who.clone(), in_favor });

			Self::try_execute_proposal(dao_id, proposal_id);

			let event_name = Self::participation_event_name(dao_id);
			match T::Sbt::mint(&Self::account_id(), &who, &event_name, DONOR_SBT_BADGE_TYPE) {
				Ok(_badge_id) => {},
				Err(err) => {
					log::debug!(
						target: LOG_TARGET,
						"SBT mint failed for dao {:?} proposal {:?}: {:?}",
						dao_id,
						proposal_id,
						err,
					);
					Self::deposit_event(Event::SbtMintFailed { dao_id, proposal_id, donor: who });
				},
			}

			Ok(())
		}
	}

	impl<T: Config> Pallet<T> {
		fn do_donate(dao_id: DaoId, donor: &T::AccountId, amount: T::Balance) {
			Donors::<T>::mutate(dao_id, donor, |total| *total = total.saturating_add(amount));
			TreasuryBalance::<T>::mutate(dao_id, |total| *total = total.saturating_add(amount));
			Self::deposit_event(Event::DonationRecorded { dao_id, donor: donor.clone(), amount });
		}

		/// The sovereign account this pallet mints participation SBTs as. Configured once as an
		/// authorized minter on the Ledger; never an individual donor's own account.
		///
		/// This actually does computation. If you need to keep using it, then make sure you cache
		/// the value and only call this once.
		pub fn account_id() -> T::AccountId {
			T::PalletId::get().into_account_truncating()
		}

		/// `event_type` if non-empty, else the "Unknown Event" label.
		fn participation_event_name(dao_id: DaoId) -> Vec<u8> {
			EventData::<T>::get(dao_id)
				.map(|event| event.event_type.to_vec())
				.filter(|bytes| !bytes.is_empty())
				.unwrap_or_else(|| UNKNOWN_EVENT_LABEL.to_vec())
		}

		/// A proposal transitions `Open -> Executed` exactly when, evaluated immediately after a
		/// vote tally update, `votes_for > APPROVAL_THRESHOLD` and the treasury covers the
		/// request. No other transition exists: no expiry, no cancellation, no veto.
		fn try_execute_proposal(dao_id: DaoId, proposal_id: ProposalId) {
			let Some(mut proposal) = Proposals::<T>::get(dao_id, proposal_id) else { return };
			if proposal.is_executed {
				return;
			}
			if proposal.votes_for <= APPROVAL_THRESHOLD {
				return;
			}

			let treasury = TreasuryBalance::<T>::get(dao_id);
			if treasury < proposal.amount_requested {
				return;
			}

			TreasuryBalance::<T>::insert(dao_id, treasury - proposal.amount_requested);
			proposal.is_executed = true;
			let amount = proposal.amount_requested;
			Proposals::<T>::insert(dao_id, proposal_id, proposal);

			Self::deposit_event(Event::ProposalExecuted { dao_id, proposal_id, amount });
		}

		/// Query: the event this DAO was initialized with, if any.
		pub fn get_event_details(dao_id: DaoId) -> Option<ValidatedEvent> {
			EventData::<T>::get(dao_id)
		}

		/// Query: every proposal recorded against `dao_id`, as a voter-set-free snapshot.
		pub fn get_all_proposals(dao_id: DaoId) -> Vec<Proposal<T::AccountId, T::Balance>> {
			Proposals::<T>::iter_prefix_values(dao_id).collect()
		}

		/// Query: a single proposal's snapshot, if it exists.
		pub fn get_proposal(
			dao_id: DaoId,
			proposal_id: ProposalId,
		) -> Option<Proposal<T::AccountId, T::Balance>> {
			Proposals::<T>::get(dao_id, proposal_id)
		}

		/// Query: `donor`'s cumulative contribution to `dao_id`, zero if absent.
		pub fn get_donor_contribution(dao_id: DaoId, donor: &T::AccountId) -> T::Balance {
			Donors::<T>::get(dao_id, donor)
		}
	}
}

impl<T: Config> DaoLifecycle<T::AccountId> for Pallet<T> {
	fn initialize(
		dao_id: DaoId,
		event: ValidatedEvent,
		factory: T::AccountId,
	) -> frame_support::dispatch::DispatchResult {
		if Self::is_initialized(dao_id) {
			log::debug!(target: LOG_TARGET, "dao {:?} already initialized, ignoring", dao_id);
			Pallet::<T>::deposit_event(Event::DaoAlreadyInitialized { dao_id });
			return Ok(());
		}

		EventData::<T>::insert(dao_id, event);
		FactoryOf::<T>::insert(dao_id, factory.clone());
		TreasuryBalance::<T>::insert(dao_id, T::Balance::default());
		NextProposalId::<T>::insert(dao_id, 0);

		Pallet::<T>::deposit_event(Event::DaoInitialized { dao_id, factory });
		Ok(())
	}

	fn is_initialized(dao_id: DaoId) -> bool {
		EventData::<T>::contains_key(dao_id)
	}
}
