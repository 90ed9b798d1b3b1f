//! See [`Processor::create_journal`].

use journal_interface::{
    error::JournalError,
    seeds::{
        find_journal_address,
        JOURNAL_SEED,
    },
    state::journal::Journal,
};
use solana_address::Address;

use crate::{
    debug,
    instructions::Processor,
    store::{
        ClockSource,
        SlotStore,
    },
    validation::record_buf::JournalBuf,
};

impl<S, C> Processor<'_, S, C>
where
    S: SlotStore,
    C: ClockSource,
    S::Error: From<C::Error>,
{
    /// Creates an empty journal titled `title` at the address derived from `owner` and `title`.
    ///
    /// `owner` pays the rent deposit. Fails with [`JournalError::AlreadyExists`] if a record
    /// already occupies the address.
    pub fn create_journal(&mut self, owner: &Address, title: &str) -> Result<Address, S::Error> {
        let (address, bump) = find_journal_address(owner, title)?;
        if self.store.exists(&address) {
            return Err(JournalError::AlreadyExists.into());
        }

        let journal = Journal::new(*owner, title, bump);
        let encoded = JournalBuf::from_journal(&journal)?;

        self.store.alloc(
            &address,
            &[JOURNAL_SEED, owner.as_ref(), title.as_bytes(), &[bump]],
            encoded.len(),
            owner,
        )?;
        self.store.store(&address, encoded.as_bytes())?;

        debug!("journal created: {}", title);

        Ok(address)
    }
}
