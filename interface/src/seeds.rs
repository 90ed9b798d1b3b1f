//! Deterministic address derivation for journal and entry accounts.
//!
//! Every address is a program-derived address over `[namespace, parent, discriminator]`, so any
//! party that knows the inputs can compute it without reading chain state:
//!
//! - journal: `["journal", owner, title]`
//! - entry:   `["entry", journal, id seed]`

use solana_address::Address;

use crate::{
    error::JournalError,
    program,
    state::text::TextField,
};

pub const JOURNAL_SEED: &[u8] = b"journal";
pub const ENTRY_SEED: &[u8] = b"entry";

/// How an entry id is turned into the last seed of its address.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum EntryIdSeed {
    /// One byte. Ids `0..=255`. This is what existing clients derive with `[id]`.
    #[default]
    SingleByte,
    /// Two little-endian bytes. Ids `0..=65534`: the journal's u16 `entry_count` has to reach one
    /// past the last id.
    U16Le,
}

/// An encoded id seed. At most two bytes, so it lives on the stack.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IdSeedBytes {
    bytes: [u8; 2],
    len: usize,
}

impl IdSeedBytes {
    #[inline(always)]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

impl EntryIdSeed {
    /// The number of entries a journal can ever hold under this encoding.
    #[inline(always)]
    pub const fn capacity(self) -> u32 {
        match self {
            EntryIdSeed::SingleByte => 1 << 8,
            EntryIdSeed::U16Le => u16::MAX as u32,
        }
    }

    #[inline(always)]
    pub fn encode(self, id: u16) -> Result<IdSeedBytes, JournalError> {
        match self {
            EntryIdSeed::SingleByte => {
                let byte = u8::try_from(id).map_err(|_| JournalError::CapacityExceeded)?;
                Ok(IdSeedBytes {
                    bytes: [byte, 0],
                    len: 1,
                })
            }
            EntryIdSeed::U16Le => Ok(IdSeedBytes {
                bytes: id.to_le_bytes(),
                len: 2,
            }),
        }
    }
}

/// Finds the canonical address and bump for `[namespace_tag, owner, discriminator]` under the
/// journal program.
///
/// Fails with [`JournalError::AddressDerivationFailed`] if no bump yields an off-curve address or
/// a seed is over the 32-byte seed limit.
#[inline(always)]
pub fn derive(
    namespace_tag: &[u8],
    owner: &Address,
    discriminator: &[u8],
) -> Result<(Address, u8), JournalError> {
    Address::try_find_program_address(
        &[namespace_tag, owner.as_ref(), discriminator],
        &program::ID,
    )
    .ok_or(JournalError::AddressDerivationFailed)
}

/// Recomputes an address from its seeds and a known bump.
#[inline(always)]
pub fn derive_with_bump(
    namespace_tag: &[u8],
    owner: &Address,
    discriminator: &[u8],
    bump: u8,
) -> Result<Address, JournalError> {
    Address::create_program_address(
        &[namespace_tag, owner.as_ref(), discriminator, &[bump]],
        &program::ID,
    )
    .map_err(|_| JournalError::AddressMismatch)
}

/// The journal address for `owner` and `title`. The title is bounds-checked first.
pub fn find_journal_address(owner: &Address, title: &str) -> Result<(Address, u8), JournalError> {
    TextField::Title.check(title)?;
    derive(JOURNAL_SEED, owner, title.as_bytes())
}

/// Checks `address` against a journal's stored owner, title, and bump.
pub fn verify_journal_address(
    address: &Address,
    owner: &Address,
    title: &str,
    bump: u8,
) -> Result<(), JournalError> {
    let expected = derive_with_bump(JOURNAL_SEED, owner, title.as_bytes(), bump)?;
    if &expected != address {
        return Err(JournalError::AddressMismatch);
    }
    Ok(())
}

/// The entry address for entry `id` of `journal`.
pub fn find_entry_address(
    journal: &Address,
    id: u16,
    id_seed: EntryIdSeed,
) -> Result<(Address, u8), JournalError> {
    derive(ENTRY_SEED, journal, id_seed.encode(id)?.as_slice())
}

/// Checks `address` against an entry's stored journal, id, and bump.
pub fn verify_entry_address(
    address: &Address,
    journal: &Address,
    id: u16,
    id_seed: EntryIdSeed,
    bump: u8,
) -> Result<(), JournalError> {
    let expected = derive_with_bump(ENTRY_SEED, journal, id_seed.encode(id)?.as_slice(), bump)?;
    if &expected != address {
        return Err(JournalError::AddressMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    const OWNER: Address = Address::new_from_array([9; 32]);
    const OTHER_OWNER: Address = Address::new_from_array([10; 32]);

    #[test]
    fn journal_address_is_deterministic() {
        let first = find_journal_address(&OWNER, "My Journal").unwrap();
        let second = find_journal_address(&OWNER, "My Journal").unwrap();
        assert_eq!(first, second);
        verify_journal_address(&first.0, &OWNER, "My Journal", first.1).unwrap();
    }

    #[test]
    fn distinct_titles_and_owners_give_distinct_addresses() {
        let titles = ["My Journal", "My journal", "My Journal ", "a", "b"];
        let mut seen = HashSet::new();
        for owner in [OWNER, OTHER_OWNER] {
            for title in titles {
                let (address, _) = find_journal_address(&owner, title).unwrap();
                assert!(seen.insert(address), "collision for {title}");
            }
        }
    }

    #[test]
    fn journal_and_entry_namespaces_never_collide() {
        let (journal, _) = find_journal_address(&OWNER, "\0").unwrap();
        let (entry, _) = find_entry_address(&OWNER, 0, EntryIdSeed::SingleByte).unwrap();
        assert_ne!(journal, entry);
    }

    #[test]
    fn oversized_title_is_rejected_before_derivation() {
        let title = "x".repeat(31);
        assert_eq!(
            find_journal_address(&OWNER, &title),
            Err(JournalError::FieldTooLong)
        );
        assert_eq!(find_journal_address(&OWNER, ""), Err(JournalError::EmptyField));
    }

    #[test]
    fn entry_addresses_are_unique_per_id() {
        let (journal, _) = find_journal_address(&OWNER, "My Journal").unwrap();
        let mut seen = HashSet::new();
        for id in 0..32u16 {
            let (address, bump) = find_entry_address(&journal, id, EntryIdSeed::SingleByte).unwrap();
            verify_entry_address(&address, &journal, id, EntryIdSeed::SingleByte, bump).unwrap();
            assert!(seen.insert(address));
        }
    }

    #[test]
    fn single_byte_seed_matches_raw_byte_derivation() {
        let (journal, _) = find_journal_address(&OWNER, "My Journal").unwrap();
        let expected = derive(ENTRY_SEED, &journal, &[7]).unwrap();
        assert_eq!(
            find_entry_address(&journal, 7, EntryIdSeed::SingleByte).unwrap(),
            expected
        );
    }

    #[test]
    fn id_seed_capacity() {
        assert_eq!(EntryIdSeed::SingleByte.capacity(), 256);
        assert_eq!(EntryIdSeed::U16Le.capacity(), 65535);
        assert_eq!(
            EntryIdSeed::SingleByte.encode(256),
            Err(JournalError::CapacityExceeded)
        );
        assert_eq!(EntryIdSeed::U16Le.encode(256).unwrap().as_slice(), &[0, 1]);
    }

    #[test]
    fn wrong_bump_or_seed_is_a_mismatch() {
        let (address, bump) = find_journal_address(&OWNER, "My Journal").unwrap();
        assert_eq!(
            verify_journal_address(&address, &OTHER_OWNER, "My Journal", bump),
            Err(JournalError::AddressMismatch)
        );
        assert_eq!(
            verify_journal_address(&address, &OWNER, "Other", bump),
            Err(JournalError::AddressMismatch)
        );
    }
}
