// This file is part of the disaster-response governance protocol.
// SPDX-License-Identifier: Apache-2.0

//! End-to-end scenarios wiring all four pallets — Identity, Vault, Dao, Factory — into one
//! runtime, exercising them the way a live chain would: through the Factory's `declare_event`
//! extrinsic rather than each pallet's trait methods directly.

#![cfg(test)]

mod mock;
