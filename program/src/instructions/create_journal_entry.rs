//! See [`Processor::create_journal_entry`].

use journal_interface::{
    error::JournalError,
    seeds::{
        derive,
        ENTRY_SEED,
    },
    state::{
        entry::JournalEntry,
        text::TextField,
    },
};
use solana_address::Address;

use crate::{
    debug,
    instructions::Processor,
    store::{
        ClockSource,
        SlotStore,
    },
    validation::{
        authorization::authorize_journal,
        record_buf::{
            EntryBuf,
            JournalBuf,
        },
    },
};

impl<S, C> Processor<'_, S, C>
where
    S: SlotStore,
    C: ClockSource,
    S::Error: From<C::Error>,
{
    /// Appends an entry to the journal at `journal_address` and returns the entry's address and
    /// id.
    ///
    /// The id is the journal's `entry_count` before the call. `owner` must own the journal and
    /// pays the entry's rent deposit.
    pub fn create_journal_entry(
        &mut self,
        owner: &Address,
        journal_address: &Address,
        content: &str,
    ) -> Result<(Address, u16), S::Error> {
        self.append_entry(owner, journal_address, None, content)
    }

    /// Same as [`Processor::create_journal_entry`], but fails with
    /// [`JournalError::AddressMismatch`] unless the new entry derives to `entry_address`.
    pub fn create_journal_entry_at(
        &mut self,
        owner: &Address,
        journal_address: &Address,
        entry_address: &Address,
        content: &str,
    ) -> Result<u16, S::Error> {
        let (_, id) = self.append_entry(owner, journal_address, Some(entry_address), content)?;
        Ok(id)
    }

    fn append_entry(
        &mut self,
        owner: &Address,
        journal_address: &Address,
        expected_address: Option<&Address>,
        content: &str,
    ) -> Result<(Address, u16), S::Error> {
        let journal_buf = JournalBuf::load(&*self.store, journal_address)?;
        let mut journal = journal_buf.journal()?;
        authorize_journal(&journal, journal_address, owner)?;

        let id = journal.try_allocate_entry_id(self.config.entry_capacity())?;
        let id_seed = self.config.entry_id_seed.encode(id)?;
        let (entry_address, bump) = derive(ENTRY_SEED, journal_address, id_seed.as_slice())?;
        if expected_address.is_some_and(|expected| expected != &entry_address) {
            return Err(JournalError::AddressMismatch.into());
        }
        TextField::Content.check(content)?;

        let orphan_len = self.orphaned_entry_len(&entry_address, journal_address, id)?;

        let entry = JournalEntry {
            bump,
            journal: *journal_address,
            id,
            timestamp: self.clock.unix_timestamp()?,
            content,
        };
        let encoded_entry = EntryBuf::from_entry(&entry)?;
        let encoded_journal = JournalBuf::from_journal(&journal)?;

        match orphan_len {
            // The journal address pins the owner, so the orphan's deposit was paid by `owner` and
            // the slot is reused in place.
            Some(len) => {
                if len != encoded_entry.len() {
                    self.store
                        .resize(&entry_address, encoded_entry.len(), owner)?;
                }
                debug!("orphaned entry {} taken over", id);
            }
            None => self.store.alloc(
                &entry_address,
                &[ENTRY_SEED, journal_address.as_ref(), id_seed.as_slice(), &[bump]],
                encoded_entry.len(),
                owner,
            )?,
        }
        self.store.store(&entry_address, encoded_entry.as_bytes())?;
        self.store.store(journal_address, encoded_journal.as_bytes())?;

        debug!("entry {} created in: {}", id, journal.title);

        Ok((entry_address, id))
    }

    /// The slot size of an entry left at `entry_address` by an earlier journal at
    /// `journal_address`, or `None` if the slot is free.
    fn orphaned_entry_len(
        &self,
        entry_address: &Address,
        journal_address: &Address,
        id: u16,
    ) -> Result<Option<usize>, S::Error> {
        if !self.store.exists(entry_address) {
            return Ok(None);
        }
        let orphan_buf = EntryBuf::load(&*self.store, entry_address)?;
        let orphan = orphan_buf.entry()?;
        if &orphan.journal != journal_address || orphan.id != id {
            return Err(JournalError::AlreadyExists.into());
        }
        Ok(Some(orphan_buf.len()))
    }
}

#[cfg(test)]
mod tests {
    use journal_interface::{
        error::JournalError,
        seeds::{
            find_entry_address,
            EntryIdSeed,
        },
        state::{
            entry::JournalEntry,
            text::MAX_CONTENT_LEN,
        },
    };

    use crate::{
        config::{
            JournalDeletePolicy,
            ProgramConfig,
        },
        instructions::test_utils::*,
        store::SlotStore,
        validation::record_buf::EntryBuf,
    };

    const LOOSE: ProgramConfig = ProgramConfig {
        delete_policy: JournalDeletePolicy::AllowOrphans,
        entry_id_seed: EntryIdSeed::SingleByte,
    };

    #[test]
    fn first_entry_gets_id_zero() {
        let mut store = funded_store();
        let journal = run(&mut store, |p| p.create_journal(&OWNER, "My Journal")).unwrap();
        let (entry, id) = run(&mut store, |p| {
            p.create_journal_entry(&OWNER, &journal, "This is a journal entry!")
        })
        .unwrap();

        assert_eq!(id, 0);
        assert_eq!(
            entry,
            find_entry_address(&journal, 0, EntryIdSeed::SingleByte).unwrap().0
        );
        assert_eq!(counts_of(&store, &journal), Ok((1, 1)));

        let buf = EntryBuf::load(&store, &entry).unwrap();
        let stored = buf.entry().unwrap();
        assert_eq!(stored.journal, journal);
        assert_eq!(stored.timestamp, NOW);
        assert_eq!(stored.content, "This is a journal entry!");
    }

    #[test]
    fn stranger_is_unauthorized_and_changes_nothing() {
        let mut store = funded_store();
        let journal = run(&mut store, |p| p.create_journal(&OWNER, "My Journal")).unwrap();
        assert_eq!(
            run(&mut store, |p| p.create_journal_entry(&STRANGER, &journal, "hi")),
            Err(JournalError::Unauthorized)
        );
        assert_eq!(counts_of(&store, &journal), Ok((0, 0)));
        assert_eq!(store.balance(&STRANGER), FUNDS);
    }

    #[test]
    fn missing_journal_is_not_found() {
        let mut store = funded_store();
        let nowhere = solana_address::Address::new_from_array([77; 32]);
        assert_eq!(
            run(&mut store, |p| p.create_journal_entry(&OWNER, &nowhere, "hi")),
            Err(JournalError::NotFound)
        );
    }

    #[test]
    fn long_content_leaves_the_counter_alone() {
        let mut store = funded_store();
        let journal = run(&mut store, |p| p.create_journal(&OWNER, "My Journal")).unwrap();
        let content = "c".repeat(MAX_CONTENT_LEN + 1);
        assert_eq!(
            run(&mut store, |p| p.create_journal_entry(&OWNER, &journal, &content)),
            Err(JournalError::FieldTooLong)
        );
        assert_eq!(counts_of(&store, &journal), Ok((0, 0)));
    }

    #[test]
    fn capacity_is_the_id_seed_width() {
        let mut store = funded_store();
        let journal = run(&mut store, |p| p.create_journal(&OWNER, "Full")).unwrap();
        for expected in 0..=u8::MAX as u16 {
            let (_, id) = run(&mut store, |p| p.create_journal_entry(&OWNER, &journal, "x")).unwrap();
            assert_eq!(id, expected);
        }
        assert_eq!(
            run(&mut store, |p| p.create_journal_entry(&OWNER, &journal, "x")),
            Err(JournalError::CapacityExceeded)
        );
        assert_eq!(counts_of(&store, &journal), Ok((256, 256)));

        let wide = ProgramConfig {
            entry_id_seed: EntryIdSeed::U16Le,
            ..ProgramConfig::default()
        };
        let wide_journal = run_with(&mut store, wide, |p| p.create_journal(&OWNER, "Wide")).unwrap();
        for _ in 0..=256 {
            run_with(&mut store, wide, |p| {
                p.create_journal_entry(&OWNER, &wide_journal, "x")
            })
            .unwrap();
        }
        assert_eq!(counts_of(&store, &wide_journal), Ok((257, 257)));
    }

    #[test]
    fn entry_account_must_be_the_next_id() {
        let mut store = funded_store();
        let journal = run(&mut store, |p| p.create_journal(&OWNER, "My Journal")).unwrap();
        let (next, _) = find_entry_address(&journal, 0, EntryIdSeed::SingleByte).unwrap();
        let (later, _) = find_entry_address(&journal, 1, EntryIdSeed::SingleByte).unwrap();

        assert_eq!(
            run(&mut store, |p| p.create_journal_entry_at(&OWNER, &journal, &later, "hi")),
            Err(JournalError::AddressMismatch)
        );
        assert_eq!(counts_of(&store, &journal), Ok((0, 0)));

        assert_eq!(
            run(&mut store, |p| p.create_journal_entry_at(&OWNER, &journal, &next, "hi")),
            Ok(0)
        );
    }

    #[test]
    fn recreated_journal_takes_over_orphaned_slots() {
        let mut store = funded_store();
        let journal = run_with(&mut store, LOOSE, |p| p.create_journal(&OWNER, "Phoenix")).unwrap();
        let (orphan, _) = run_with(&mut store, LOOSE, |p| {
            p.create_journal_entry(&OWNER, &journal, "from the first journal")
        })
        .unwrap();
        run_with(&mut store, LOOSE, |p| p.delete_journal(&OWNER, &journal)).unwrap();

        let again = run_with(&mut store, LOOSE, |p| p.create_journal(&OWNER, "Phoenix")).unwrap();
        assert_eq!(again, journal);
        let (entry, id) = run_with(&mut store, LOOSE, |p| {
            p.create_journal_entry(&OWNER, &journal, "second life")
        })
        .unwrap();

        assert_eq!((entry, id), (orphan, 0));
        assert_eq!(content_of(&store, &entry).unwrap(), "second life");
        assert_eq!(counts_of(&store, &journal), Ok((1, 1)));
        assert_eq!(
            store.slot(&entry).unwrap().lamports,
            store.rent().minimum_balance(JournalEntry::space("second life".len()))
        );

        run_with(&mut store, LOOSE, |p| p.delete_journal_entry(&OWNER, &journal, &entry)).unwrap();
        run_with(&mut store, LOOSE, |p| p.delete_journal(&OWNER, &journal)).unwrap();
        assert!(!store.exists(&entry));
        assert_eq!(store.balance(&OWNER), FUNDS);
    }
}
