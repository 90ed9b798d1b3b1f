//! See [`MemoryStore`].

use std::{
    collections::HashMap,
    vec,
    vec::Vec,
};

use journal_interface::{
    error::JournalError,
    program,
    state::RecordKind,
};
use solana_address::Address;

use crate::store::{
    check_exact_fit,
    SlotStore,
};

/// Bytes charged for every account on top of its data, matching the Solana runtime.
pub const ACCOUNT_STORAGE_OVERHEAD: u64 = 128;

/// A flat rent-exempt deposit schedule: `(overhead + size) * lamports_per_byte`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RentSchedule {
    pub lamports_per_byte: u64,
}

impl RentSchedule {
    /// 3480 lamports per byte-year with a two year exemption threshold.
    pub const DEFAULT: RentSchedule = RentSchedule {
        lamports_per_byte: 3480 * 2,
    };

    #[inline(always)]
    pub fn minimum_balance(&self, size: usize) -> u64 {
        (ACCOUNT_STORAGE_OVERHEAD + size as u64) * self.lamports_per_byte
    }
}

impl Default for RentSchedule {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A single stored account.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Slot {
    /// The program that owns the slot. Only slots owned by the journal program are records.
    pub owner_program: Address,
    /// The rent deposit held by the slot.
    pub lamports: u64,
    pub data: Vec<u8>,
}

/// An in-memory account store with rent accounting, used by tests and the local ledger harness.
///
/// Principals hold plain lamport balances; slots hold their rent deposit. Every lamport moved by
/// [`SlotStore`] calls is conserved between the two.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    slots: HashMap<Address, Slot>,
    balances: HashMap<Address, u64>,
    rent: RentSchedule,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rent(&self) -> RentSchedule {
        self.rent
    }

    /// Credits `lamports` to a principal, like an airdrop.
    pub fn fund(&mut self, principal: &Address, lamports: u64) {
        let balance = self.balances.entry(*principal).or_default();
        *balance = balance.saturating_add(lamports);
    }

    pub fn balance(&self, principal: &Address) -> u64 {
        self.balances.get(principal).copied().unwrap_or_default()
    }

    pub fn slot(&self, address: &Address) -> Option<&Slot> {
        self.slots.get(address)
    }

    /// Places an arbitrary slot at `address`, bypassing every check. For setting up foreign or
    /// corrupted accounts.
    pub fn insert_slot(&mut self, address: Address, slot: Slot) {
        self.slots.insert(address, slot);
    }

    /// All program-owned slots whose first byte is `kind`'s discriminant.
    pub fn slots_of_kind(&self, kind: RecordKind) -> impl Iterator<Item = (&Address, &[u8])> {
        self.slots.iter().filter_map(move |(address, slot)| {
            let is_kind = slot.owner_program == program::ID
                && RecordKind::of(&slot.data).is_ok_and(|k| k == kind);
            is_kind.then_some((address, slot.data.as_slice()))
        })
    }

    /// Runs `f` as a single transaction: if it fails, every slot and balance is restored to its
    /// state before the call.
    pub fn atomically<T, E>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, E>) -> Result<T, E> {
        let snapshot = (self.slots.clone(), self.balances.clone());
        let res = f(self);
        if res.is_err() {
            (self.slots, self.balances) = snapshot;
        }
        res
    }

    fn live_slot(&self, address: &Address) -> Result<&Slot, JournalError> {
        let slot = self.slots.get(address).ok_or(JournalError::NotFound)?;
        if slot.owner_program != program::ID {
            return Err(JournalError::InvalidAccountOwner);
        }
        if slot.data.is_empty() {
            return Err(JournalError::NotFound);
        }
        Ok(slot)
    }

    fn live_slot_mut(&mut self, address: &Address) -> Result<&mut Slot, JournalError> {
        self.live_slot(address)?;
        self.slots.get_mut(address).ok_or(JournalError::NotFound)
    }

    fn debit(&mut self, principal: &Address, lamports: u64) -> Result<(), JournalError> {
        let balance = self.balances.entry(*principal).or_default();
        *balance = balance
            .checked_sub(lamports)
            .ok_or(JournalError::InsufficientFunds)?;
        Ok(())
    }

    fn credit(&mut self, principal: &Address, lamports: u64) -> Result<(), JournalError> {
        let balance = self.balances.entry(*principal).or_default();
        *balance = balance
            .checked_add(lamports)
            .ok_or(JournalError::ArithmeticOverflow)?;
        Ok(())
    }
}

impl SlotStore for MemoryStore {
    type Error = JournalError;

    fn exists(&self, address: &Address) -> bool {
        self.live_slot(address).is_ok()
    }

    fn load(&self, address: &Address, dst: &mut [u8]) -> Result<usize, JournalError> {
        let slot = self.live_slot(address)?;
        let len = slot.data.len();
        if len > dst.len() {
            return Err(JournalError::MalformedRecord);
        }
        dst[..len].copy_from_slice(&slot.data);
        Ok(len)
    }

    fn alloc(
        &mut self,
        address: &Address,
        _signer_seeds: &[&[u8]],
        size: usize,
        payer: &Address,
    ) -> Result<(), JournalError> {
        // Any existing slot blocks allocation, including ones owned by another program.
        if self.slots.contains_key(address) {
            return Err(JournalError::AlreadyExists);
        }
        let deposit = self.rent.minimum_balance(size);
        self.debit(payer, deposit)?;
        self.slots.insert(
            *address,
            Slot {
                owner_program: program::ID,
                lamports: deposit,
                data: vec![0; size],
            },
        );
        Ok(())
    }

    fn store(&mut self, address: &Address, bytes: &[u8]) -> Result<(), JournalError> {
        let slot = self.live_slot_mut(address)?;
        check_exact_fit(slot.data.len(), bytes.len())?;
        slot.data.copy_from_slice(bytes);
        Ok(())
    }

    fn resize(
        &mut self,
        address: &Address,
        new_size: usize,
        payer: &Address,
    ) -> Result<(), JournalError> {
        let current = self.live_slot(address)?.lamports;
        let required = self.rent.minimum_balance(new_size);

        if required > current {
            self.debit(payer, required - current)?;
        } else {
            self.credit(payer, current - required)?;
        }

        let slot = self.live_slot_mut(address)?;
        slot.lamports = required;
        slot.data.resize(new_size, 0);
        Ok(())
    }

    fn free(&mut self, address: &Address, recipient: &Address) -> Result<u64, JournalError> {
        self.live_slot(address)?;
        let slot = self.slots.remove(address).ok_or(JournalError::NotFound)?;
        self.credit(recipient, slot.lamports)?;
        Ok(slot.lamports)
    }
}
