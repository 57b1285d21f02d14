// This file is part of the disaster-response governance protocol.
// SPDX-License-Identifier: Apache-2.0

//! Test utilities

#![cfg(test)]

use super::*;

use crate as pallet_disaster_dao;
use frame_support::{
	parameter_types,
	traits::{ConstU32, ConstU64},
	weights::Weight,
	PalletId,
};
use sp_core::H256;
use sp_runtime::{
	testing::Header,
	traits::{BlakeTwo256, IdentityLookup},
};

type UncheckedExtrinsic = frame_system::mocking::MockUncheckedExtrinsic<Test>;
type Block = frame_system::mocking::MockBlock<Test>;

frame_support::construct_runtime!(
	pub enum Test where
		Block = Block,
		NodeBlock = Block,
		UncheckedExtrinsic = UncheckedExtrinsic,
	{
		System: frame_system,
		Timestamp: pallet_timestamp,
		Identity: pallet_disaster_identity,
		Dao: pallet_disaster_dao,
	}
);

type BlockNumber = u64;
type AccountId = u64;

parameter_types! {
	pub BlockWeights: frame_system::limits::BlockWeights =
		frame_system::limits::BlockWeights::simple_max(Weight::MAX);
}
impl frame_system::Config for Test {
	type BaseCallFilter = frame_support::traits::Everything;
	type BlockWeights = ();
	type BlockLength = ();
	type RuntimeOrigin = RuntimeOrigin;
	type RuntimeCall = RuntimeCall;
	type Index = u64;
	type BlockNumber = BlockNumber;
	type Hash = H256;
	type Hashing = BlakeTwo256;
	type AccountId = AccountId;
	type Lookup = IdentityLookup<Self::AccountId>;
	type Header = Header;
	type RuntimeEvent = RuntimeEvent;
	type BlockHashCount = ConstU64<250>;
	type DbWeight = ();
	type Version = ();
	type PalletInfo = PalletInfo;
	type AccountData = ();
	type OnNewAccount = ();
	type OnKilledAccount = ();
	type SystemWeightInfo = ();
	type SS58Prefix = ();
	type OnSetCode = ();
	type MaxConsumers = ConstU32<16>;
}

impl pallet_timestamp::Config for Test {
	type Moment = u64;
	type OnTimestampSet = ();
	type MinimumPeriod = ConstU64<1>;
	type WeightInfo = ();
}

impl pallet_disaster_identity::Config for Test {
	type RuntimeEvent = RuntimeEvent;
}

parameter_types! {
	pub const DaoPalletId: PalletId = PalletId(*b"py/ddao0");
}

impl Config for Test {
	type RuntimeEvent = RuntimeEvent;
	type Balance = u128;
	type Sbt = Identity;
	type PalletId = DaoPalletId;
}

pub const ADMIN: AccountId = 1;
pub const PROPOSER: AccountId = 2;
pub const DONOR_A: AccountId = 10;
pub const DONOR_B: AccountId = 11;
pub const DONOR_C: AccountId = 12;
pub const DONOR_D: AccountId = 13;
pub const DONOR_E: AccountId = 14;
pub const DONOR_F: AccountId = 15;
pub const DONOR_G: AccountId = 16;
pub const RECIPIENT: AccountId = 20;
pub const FACTORY: AccountId = 99;

pub(crate) fn new_test_ext() -> sp_io::TestExternalities {
	let mut t = frame_system::GenesisConfig::default().build_storage::<Test>().unwrap();

	pallet_disaster_identity::GenesisConfig::<Test> { admin: ADMIN }
		.assimilate_storage(&mut t)
		.unwrap();

	let mut ext = sp_io::TestExternalities::new(t);
	ext.execute_with(|| {
		System::set_block_number(1);
		// The DAO pallet mints participation SBTs as its own sovereign account (see
		// `Pallet::account_id`), never as the voting donor — that account is authorized once here,
		// exactly as an admin would at genesis on a live chain.
		assert!(Identity::authorize_minter(
			RuntimeOrigin::signed(ADMIN),
			Dao::account_id(),
		)
		.is_ok());
	});
	ext
}

pub type DaoEvent = crate::Event<Test>;
pub type IdentityEvent = pallet_disaster_identity::Event<Test>;
