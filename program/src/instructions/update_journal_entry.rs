//! See [`Processor::update_journal_entry`].

use journal_interface::{
    error::JournalError,
    state::text::TextField,
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
        authorization::{
            authorize_entry,
            authorize_journal,
        },
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
    /// Replaces the content of the entry at `entry_address`. The id and creation timestamp are
    /// kept.
    ///
    /// An entry left behind by an earlier journal at the same address can't be updated.
    ///
    /// The entry slot is resized to the new content's exact size; `owner` pays for growth and is
    /// refunded on shrinkage.
    pub fn update_journal_entry(
        &mut self,
        owner: &Address,
        journal_address: &Address,
        entry_address: &Address,
        content: &str,
    ) -> Result<(), S::Error> {
        let journal_buf = JournalBuf::load(&*self.store, journal_address)?;
        let journal = journal_buf.journal()?;
        authorize_journal(&journal, journal_address, owner)?;

        let entry_buf = EntryBuf::load(&*self.store, entry_address)?;
        let entry = entry_buf.entry()?;
        authorize_entry(
            &entry,
            entry_address,
            journal_address,
            self.config.entry_id_seed,
        )?;
        if !journal.has_issued(entry.id) {
            return Err(JournalError::PreconditionFailed.into());
        }

        TextField::Content.check(content)?;
        let updated = entry.with_content(content);
        let encoded = EntryBuf::from_entry(&updated)?;

        if encoded.len() != entry_buf.len() {
            self.store.resize(entry_address, encoded.len(), owner)?;
        }
        self.store.store(entry_address, encoded.as_bytes())?;

        debug!("entry {} updated in: {}", entry.id, journal.title);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use journal_interface::{
        error::JournalError,
        state::{
            entry::JournalEntry,
            text::MAX_CONTENT_LEN,
        },
    };
    use solana_address::Address;

    use crate::{
        config::{
            JournalDeletePolicy,
            ProgramConfig,
        },
        instructions::test_utils::*,
        store::memory::MemoryStore,
        validation::record_buf::EntryBuf,
    };

    fn journal_with_entry(store: &mut MemoryStore) -> (Address, Address) {
        let journal = run(store, |p| p.create_journal(&OWNER, "My Journal")).unwrap();
        let (entry, _) = run(store, |p| {
            p.create_journal_entry(&OWNER, &journal, "This is a journal entry!")
        })
        .unwrap();
        (journal, entry)
    }

    #[test]
    fn update_replaces_content_and_keeps_timestamp() {
        let mut store = funded_store();
        let (journal, entry) = journal_with_entry(&mut store);

        run(&mut store, |p| {
            p.update_journal_entry(&OWNER, &journal, &entry, "This is an updated journal entry.")
        })
        .unwrap();

        let buf = EntryBuf::load(&store, &entry).unwrap();
        let stored = buf.entry().unwrap();
        assert_eq!(stored.content, "This is an updated journal entry.");
        assert_eq!(stored.timestamp, NOW);
        assert_eq!(stored.id, 0);
        assert_eq!(
            store.slot(&entry).unwrap().data.len(),
            JournalEntry::space("This is an updated journal entry.".len())
        );
    }

    #[test]
    fn stranger_update_is_unauthorized_and_leaves_bytes() {
        let mut store = funded_store();
        let (journal, entry) = journal_with_entry(&mut store);
        let before = store.slot(&entry).unwrap().clone();

        assert_eq!(
            run(&mut store, |p| p.update_journal_entry(&STRANGER, &journal, &entry, "pwned")),
            Err(JournalError::Unauthorized)
        );
        assert_eq!(store.slot(&entry), Some(&before));
        assert_eq!(
            content_of(&store, &entry).unwrap(),
            "This is a journal entry!"
        );
    }

    #[test]
    fn entry_from_another_journal_is_rejected() {
        let mut store = funded_store();
        let (_, entry) = journal_with_entry(&mut store);
        let other = run(&mut store, |p| p.create_journal(&OWNER, "Other")).unwrap();

        assert_eq!(
            run(&mut store, |p| p.update_journal_entry(&OWNER, &other, &entry, "moved")),
            Err(JournalError::PreconditionFailed)
        );
    }

    #[test]
    fn shrinking_refunds_and_growing_charges() {
        let mut store = funded_store();
        let (journal, entry) = journal_with_entry(&mut store);
        let rent = store.rent();
        let after_create = store.balance(&OWNER);

        run(&mut store, |p| p.update_journal_entry(&OWNER, &journal, &entry, "short")).unwrap();
        let refund =
            rent.minimum_balance(JournalEntry::space(24)) - rent.minimum_balance(JournalEntry::space(5));
        assert_eq!(store.balance(&OWNER), after_create + refund);

        let long = "l".repeat(MAX_CONTENT_LEN);
        run(&mut store, |p| p.update_journal_entry(&OWNER, &journal, &entry, &long)).unwrap();
        assert_eq!(content_of(&store, &entry).unwrap(), long);
        assert_eq!(
            store.slot(&entry).unwrap().lamports,
            rent.minimum_balance(JournalEntry::MAX_LEN)
        );
    }

    #[test]
    fn invalid_content_and_missing_entry() {
        let mut store = funded_store();
        let (journal, entry) = journal_with_entry(&mut store);
        let long = "l".repeat(MAX_CONTENT_LEN + 1);
        assert_eq!(
            run(&mut store, |p| p.update_journal_entry(&OWNER, &journal, &entry, &long)),
            Err(JournalError::FieldTooLong)
        );
        assert_eq!(
            run(&mut store, |p| p.update_journal_entry(&OWNER, &journal, &entry, "")),
            Err(JournalError::EmptyField)
        );

        let nowhere = Address::new_from_array([78; 32]);
        assert_eq!(
            run(&mut store, |p| p.update_journal_entry(&OWNER, &journal, &nowhere, "hi")),
            Err(JournalError::NotFound)
        );
    }

    #[test]
    fn orphan_of_an_earlier_journal_is_read_only() {
        let mut store = funded_store();
        let loose = ProgramConfig {
            delete_policy: JournalDeletePolicy::AllowOrphans,
            ..ProgramConfig::default()
        };
        let journal = run_with(&mut store, loose, |p| p.create_journal(&OWNER, "Phoenix")).unwrap();
        let (orphan, _) =
            run_with(&mut store, loose, |p| p.create_journal_entry(&OWNER, &journal, "old")).unwrap();
        run_with(&mut store, loose, |p| p.delete_journal(&OWNER, &journal)).unwrap();
        run_with(&mut store, loose, |p| p.create_journal(&OWNER, "Phoenix")).unwrap();

        assert_eq!(
            run_with(&mut store, loose, |p| {
                p.update_journal_entry(&OWNER, &journal, &orphan, "new")
            }),
            Err(JournalError::PreconditionFailed)
        );
        assert_eq!(content_of(&store, &orphan).unwrap(), "old");
    }
}
