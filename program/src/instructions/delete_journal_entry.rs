//! See [`Processor::delete_journal_entry`].

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
    /// Reclaims the entry at `entry_address` and refunds its deposit to `owner`. Returns the
    /// refunded lamports.
    ///
    /// The journal's `entry_count` is unchanged so the id is never handed out again. Entries left
    /// behind by an earlier journal at `journal_address` are reclaimed the same way.
    pub fn delete_journal_entry(
        &mut self,
        owner: &Address,
        journal_address: &Address,
        entry_address: &Address,
    ) -> Result<u64, S::Error> {
        let journal_buf = JournalBuf::load(&*self.store, journal_address)?;
        let mut journal = journal_buf.journal()?;
        authorize_journal(&journal, journal_address, owner)?;

        let entry_buf = EntryBuf::load(&*self.store, entry_address)?;
        let entry = entry_buf.entry()?;
        authorize_entry(
            &entry,
            entry_address,
            journal_address,
            self.config.entry_id_seed,
        )?;

        // An orphan of an earlier journal at this address was never counted by this one.
        if journal.has_issued(entry.id) {
            journal.try_release_entry()?;
            let encoded_journal = JournalBuf::from_journal(&journal)?;
            self.store.store(journal_address, encoded_journal.as_bytes())?;
        }
        let refund = self.store.free(entry_address, owner)?;

        debug!("entry {} deleted from: {}", entry.id, journal.title);

        Ok(refund)
    }
}
