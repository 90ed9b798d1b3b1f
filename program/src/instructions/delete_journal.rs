//! See [`Processor::delete_journal`].

use journal_interface::error::JournalError;
use solana_address::Address;

use crate::{
    config::JournalDeletePolicy,
    debug,
    instructions::Processor,
    store::{
        ClockSource,
        SlotStore,
    },
    validation::{
        authorization::authorize_journal,
        record_buf::JournalBuf,
    },
};

impl<S, C> Processor<'_, S, C>
where
    S: SlotStore,
    C: ClockSource,
    S::Error: From<C::Error>,
{
    /// Reclaims the journal at `journal_address` and refunds its deposit to `owner`. Returns the
    /// refunded lamports.
    ///
    /// Under [`JournalDeletePolicy::RequireEmpty`] every entry must be deleted first.
    pub fn delete_journal(
        &mut self,
        owner: &Address,
        journal_address: &Address,
    ) -> Result<u64, S::Error> {
        let journal_buf = JournalBuf::load(&*self.store, journal_address)?;
        let journal = journal_buf.journal()?;
        authorize_journal(&journal, journal_address, owner)?;

        if self.config.delete_policy == JournalDeletePolicy::RequireEmpty
            && journal.live_entries > 0
        {
            return Err(JournalError::PreconditionFailed.into());
        }

        let refund = self.store.free(journal_address, owner)?;

        debug!("journal deleted: {}", journal.title);

        Ok(refund)
    }
}
