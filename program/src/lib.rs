//! The journal program: an ownership-checked, address-derived record store for journals and their
//! entries.
//!
//! All lifecycle logic is written against the [`store::SlotStore`] contract so that the same code
//! runs on-chain over `AccountView`s and off-chain over [`store::memory::MemoryStore`].

#![no_std]

#[cfg(any(feature = "std", test))]
extern crate std;

pub mod config;
pub mod context;
pub mod debug;
pub mod instructions;
pub mod processor;
#[cfg(not(feature = "no-entrypoint"))]
pub mod shared;
pub mod store;
pub mod validation;

#[cfg(not(feature = "no-entrypoint"))]
pub mod entrypoint;

pub use journal_interface::program::ID;
