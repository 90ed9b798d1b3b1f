//! The narrow storage contract the lifecycle operations are written against.
//!
//! A slot is an addressable, program-owned byte blob. The backend is responsible for the rent
//! deposit backing each slot and for making a whole instruction atomic; the program never sees a
//! partially applied instruction.

#[cfg(not(feature = "no-entrypoint"))]
pub mod account_store;
#[cfg(any(feature = "std", test))]
pub mod memory;

use journal_interface::error::{
    JournalError,
    JournalResult,
};
use solana_address::Address;

pub trait SlotStore {
    /// The backend's error type. Every contract violation is reported as a [`JournalError`].
    type Error: From<JournalError>;

    /// Whether a live, program-owned record occupies `address`.
    fn exists(&self, address: &Address) -> bool;

    /// Copies the slot's bytes into `dst` and returns how many were written.
    ///
    /// Fails with [`JournalError::NotFound`] if the slot is absent.
    fn load(&self, address: &Address, dst: &mut [u8]) -> Result<usize, Self::Error>;

    /// Creates a zeroed, program-owned slot of `size` bytes at `address`. `payer` funds the rent
    /// deposit. `signer_seeds` are the address's derivation seeds including the bump.
    ///
    /// Fails with [`JournalError::AlreadyExists`] if the slot is occupied.
    fn alloc(
        &mut self,
        address: &Address,
        signer_seeds: &[&[u8]],
        size: usize,
        payer: &Address,
    ) -> Result<(), Self::Error>;

    /// Overwrites the slot's bytes. `bytes` must match the slot's current size exactly.
    fn store(&mut self, address: &Address, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Changes the slot's size. `payer` tops up the deposit when growing and is refunded the
    /// excess when shrinking.
    fn resize(&mut self, address: &Address, new_size: usize, payer: &Address)
        -> Result<(), Self::Error>;

    /// Reclaims the slot entirely and returns the refunded deposit to `recipient`.
    fn free(&mut self, address: &Address, recipient: &Address) -> Result<u64, Self::Error>;
}

/// Supplies the creation timestamp for new entries.
pub trait ClockSource {
    type Error;

    fn unix_timestamp(&self) -> Result<i64, Self::Error>;
}

/// A clock that always reports the same time.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FixedClock(pub i64);

impl ClockSource for FixedClock {
    type Error = JournalError;

    #[inline(always)]
    fn unix_timestamp(&self) -> Result<i64, JournalError> {
        Ok(self.0)
    }
}

/// Checks that a store write matches the slot's capacity.
#[inline(always)]
pub fn check_exact_fit(capacity: usize, len: usize) -> JournalResult {
    if capacity != len {
        return Err(JournalError::CapacityExceeded);
    }
    Ok(())
}
