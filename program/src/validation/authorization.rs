//! Ownership and address checks run before any write.

use journal_interface::{
    error::{
        JournalError,
        JournalResult,
    },
    seeds::{
        verify_entry_address,
        verify_journal_address,
        EntryIdSeed,
    },
    state::{
        entry::JournalEntry,
        journal::Journal,
    },
};
use solana_address::Address;

/// Checks that `signer` owns `journal` and that `journal` really lives at `address`.
///
/// Ownership is checked first so that a foreign signer always sees [`JournalError::Unauthorized`].
#[inline(always)]
pub fn authorize_journal(journal: &Journal, address: &Address, signer: &Address) -> JournalResult {
    if &journal.owner != signer {
        return Err(JournalError::Unauthorized);
    }
    verify_journal_address(address, &journal.owner, journal.title, journal.bump)
}

/// Checks that `entry` belongs to the journal at `journal_address` and lives at `address`.
///
/// The journal itself must already have passed [`authorize_journal`].
#[inline(always)]
pub fn authorize_entry(
    entry: &JournalEntry,
    address: &Address,
    journal_address: &Address,
    id_seed: EntryIdSeed,
) -> JournalResult {
    if &entry.journal != journal_address {
        return Err(JournalError::PreconditionFailed);
    }
    verify_entry_address(address, journal_address, entry.id, id_seed, entry.bump)
}

#[cfg(test)]
mod tests {
    use journal_interface::seeds::{
        find_entry_address,
        find_journal_address,
    };

    use super::*;

    const OWNER: Address = Address::new_from_array([11; 32]);
    const STRANGER: Address = Address::new_from_array([12; 32]);

    #[test]
    fn only_the_owner_is_authorized() {
        let (address, bump) = find_journal_address(&OWNER, "My Journal").unwrap();
        let journal = Journal::new(OWNER, "My Journal", bump);

        assert_eq!(authorize_journal(&journal, &address, &OWNER), Ok(()));
        assert_eq!(
            authorize_journal(&journal, &address, &STRANGER),
            Err(JournalError::Unauthorized)
        );
    }

    #[test]
    fn journal_at_the_wrong_address_is_a_mismatch() {
        let (_, bump) = find_journal_address(&OWNER, "My Journal").unwrap();
        let (elsewhere, _) = find_journal_address(&OWNER, "Elsewhere").unwrap();
        let journal = Journal::new(OWNER, "My Journal", bump);

        assert_eq!(
            authorize_journal(&journal, &elsewhere, &OWNER),
            Err(JournalError::AddressMismatch)
        );
    }

    #[test]
    fn entry_must_point_back_at_its_journal() {
        let (journal, _) = find_journal_address(&OWNER, "My Journal").unwrap();
        let (other_journal, _) = find_journal_address(&OWNER, "Other").unwrap();
        let (address, bump) = find_entry_address(&journal, 0, EntryIdSeed::SingleByte).unwrap();
        let entry = JournalEntry {
            bump,
            journal,
            id: 0,
            timestamp: 0,
            content: "hello",
        };

        assert_eq!(
            authorize_entry(&entry, &address, &journal, EntryIdSeed::SingleByte),
            Ok(())
        );
        assert_eq!(
            authorize_entry(&entry, &address, &other_journal, EntryIdSeed::SingleByte),
            Err(JournalError::PreconditionFailed)
        );
    }
}
