// This file is part of the disaster-response governance protocol.
// SPDX-License-Identifier: Apache-2.0

//! Test utilities

#![cfg(test)]

use super::*;

use crate as pallet_disaster_factory;
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
		Vault: pallet_disaster_vault,
		Dao: pallet_disaster_dao,
		Factory: pallet_disaster_factory,
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

impl pallet_disaster_vault::Config for Test {
	type RuntimeEvent = RuntimeEvent;
	type Balance = u128;
}

parameter_types! {
	pub const DaoPalletId: PalletId = PalletId(*b"py/ddao0");
}

impl pallet_disaster_dao::Config for Test {
	type RuntimeEvent = RuntimeEvent;
	type Balance = u128;
	type Sbt = Identity;
	type PalletId = DaoPalletId;
}

impl Config for Test {
	type RuntimeEvent = RuntimeEvent;
	type Balance = u128;
	type Dao = Dao;
	type Vault = Vault;
}

pub const ADMIN: AccountId = 1;
pub const BRIDGE: AccountId = 2;
pub const OUTSIDER: AccountId = 3;
pub const FUNDER: AccountId = 4;
pub const PROPOSER: AccountId = 5;
pub const RECIPIENT: AccountId = 6;

pub(crate) fn new_test_ext() -> sp_io::TestExternalities {
	let mut t = frame_system::GenesisConfig::default().build_storage::<Test>().unwrap();

	pallet_disaster_identity::GenesisConfig::<Test> { admin: ADMIN }
		.assimilate_storage(&mut t)
		.unwrap();

	// The Factory calls `Vault::release_initial_funding` as itself (its own extrinsic caller, the
	// authorized bridge), so `authorized_factory` on the Vault is the same identity as
	// `authorized_bridge` on the Factory.
	pallet_disaster_vault::GenesisConfig::<Test> {
		admin: ADMIN,
		initial_funder: FUNDER,
		authorized_factory: BRIDGE,
	}
	.assimilate_storage(&mut t)
	.unwrap();

	pallet_disaster_factory::GenesisConfig::<Test> { authorized_bridge: BRIDGE }
		.assimilate_storage(&mut t)
		.unwrap();

	let mut ext = sp_io::TestExternalities::new(t);
	ext.execute_with(|| {
		System::set_block_number(1);
		// The DAO pallet mints participation SBTs as its own sovereign account; authorize it once,
		// exactly as an admin would at genesis on a live chain.
		assert!(Identity::authorize_minter(RuntimeOrigin::signed(ADMIN), Dao::account_id()).is_ok());
	});
	ext
}

pub type FactoryEvent = crate::Event<Test>;
