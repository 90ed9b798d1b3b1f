//! See [`RecordBuf`].

use journal_interface::{
    error::{
        JournalError,
        JournalResult,
    },
    state::{
        entry::JournalEntry,
        journal::Journal,
        text::TextField,
    },
};
use solana_address::Address;

use crate::store::SlotStore;

pub const JOURNAL_BUF_LEN: usize = Journal::<'static>::MAX_LEN;
pub const ENTRY_BUF_LEN: usize = JournalEntry::<'static>::MAX_LEN;

/// A stack copy of a record's bytes.
///
/// Decoded records borrow their text from the buffer, so the store stays free to be mutated while
/// a record is in use.
#[derive(Clone, Copy)]
pub struct RecordBuf<const N: usize> {
    bytes: [u8; N],
    len: usize,
}

pub type JournalBuf = RecordBuf<JOURNAL_BUF_LEN>;
pub type EntryBuf = RecordBuf<ENTRY_BUF_LEN>;

impl<const N: usize> RecordBuf<N> {
    /// Copies the slot at `address` out of `store`.
    ///
    /// A slot larger than `N` can't hold a valid record and fails with
    /// [`JournalError::MalformedRecord`].
    #[inline(always)]
    pub fn load<S: SlotStore>(store: &S, address: &Address) -> Result<Self, S::Error> {
        let mut bytes = [0u8; N];
        let len = store.load(address, &mut bytes)?;
        Ok(Self { bytes, len })
    }

    /// Encodes a record of exactly `len` bytes with `encode`.
    #[inline(always)]
    pub fn encode_with(
        len: usize,
        encode: impl FnOnce(&mut [u8]) -> JournalResult,
    ) -> Result<Self, JournalError> {
        if len > N {
            return Err(JournalError::CapacityExceeded);
        }
        let mut bytes = [0u8; N];
        encode(&mut bytes[..len])?;
        Ok(Self { bytes, len })
    }

    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl JournalBuf {
    /// Encodes `journal`. An out-of-bounds title fails with its field error, never with the
    /// buffer bound.
    pub fn from_journal(journal: &Journal) -> Result<Self, JournalError> {
        TextField::Title.check(journal.title)?;
        Self::encode_with(journal.encoded_len(), |dst| journal.encode(dst))
    }

    #[inline(always)]
    pub fn journal(&self) -> Result<Journal<'_>, JournalError> {
        Journal::decode(self.as_bytes())
    }
}

impl EntryBuf {
    /// Encodes `entry`. Out-of-bounds content fails with its field error, never with the buffer
    /// bound.
    pub fn from_entry(entry: &JournalEntry) -> Result<Self, JournalError> {
        TextField::Content.check(entry.content)?;
        Self::encode_with(entry.encoded_len(), |dst| entry.encode(dst))
    }

    #[inline(always)]
    pub fn entry(&self) -> Result<JournalEntry<'_>, JournalError> {
        JournalEntry::decode(self.as_bytes())
    }
}
