//! Public interface layer defining account layouts, instruction schemas, address derivation, and
//! shared utilities for on-chain and client integration.

#![no_std]

#[cfg(any(feature = "std", test))]
extern crate std;

pub mod error;
pub mod instructions;
pub mod pack;
pub mod seeds;
pub mod state;

pub mod program {
    use solana_address::Address;

    /// `EnomEJjzkSXyDuWgP817RqTEVPqhe6izm71zkvScVjP9`
    pub const ID: Address = Address::new_from_array([
        204, 227, 240, 233, 150, 187, 4, 176, 39, 54, 223, 238, 101, 211, 133, 68, 208, 166, 201,
        166, 112, 203, 69, 73, 76, 150, 208, 148, 208, 59, 126, 220,
    ]);
}
