//! See [`Journal`].

use solana_address::Address;
use static_assertions::const_assert_eq;

use crate::{
    error::{
        JournalError,
        JournalResult,
    },
    pack::{
        ByteReader,
        ByteWriter,
    },
    state::{
        text::{
            TextField,
            MAX_TITLE_LEN,
        },
        LeU16,
        RecordKind,
        ADDRESS_SIZE,
        LAYOUT_VERSION,
        LEN_PREFIX_SIZE,
    },
};

/// A titled collection of entries owned by a single principal.
///
/// Account data layout, all integers little-endian:
///
/// ```text
/// [0]       kind          RecordKind::Journal
/// [1]       version       LAYOUT_VERSION
/// [2]       bump          PDA bump for ["journal", owner, title]
/// [3..35]   owner
/// [35..37]  entry_count   u16, ids handed out so far
/// [37..39]  live_entries  u16, entries not yet deleted
/// [39..43]  title_len     u32
/// [43..]    title         title_len UTF-8 bytes
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Journal<'a> {
    /// The bump for the journal PDA.
    pub bump: u8,
    /// The principal that created the journal. Never changes.
    pub owner: Address,
    /// The number of entries ever created. Also the id of the next entry.
    pub entry_count: u16,
    /// The number of entries created and not yet deleted.
    pub live_entries: u16,
    /// The journal title, 1 to [`MAX_TITLE_LEN`] bytes.
    pub title: &'a str,
}

/// The size of everything before the title's length prefix.
#[allow(clippy::identity_op)]
pub const JOURNAL_HEADER_LEN: usize = 0
/* kind */         + size_of::<u8>()
/* version */      + size_of::<u8>()
/* bump */         + size_of::<u8>()
/* owner */        + ADDRESS_SIZE
/* entry_count */  + size_of::<LeU16>()
/* live_entries */ + size_of::<LeU16>();

const_assert_eq!(JOURNAL_HEADER_LEN, 39);
const_assert_eq!(size_of::<Address>(), ADDRESS_SIZE);

impl<'a> Journal<'a> {
    /// The largest possible journal account.
    pub const MAX_LEN: usize = Self::space(MAX_TITLE_LEN);

    /// A freshly created journal with no entries.
    pub fn new(owner: Address, title: &'a str, bump: u8) -> Self {
        Self {
            bump,
            owner,
            entry_count: 0,
            live_entries: 0,
            title,
        }
    }

    /// The exact account size needed to hold a journal with a title of `title_len` bytes.
    #[inline(always)]
    pub const fn space(title_len: usize) -> usize {
        JOURNAL_HEADER_LEN + LEN_PREFIX_SIZE + title_len
    }

    #[inline(always)]
    pub fn encoded_len(&self) -> usize {
        Self::space(self.title.len())
    }

    /// Writes the journal into `dst`, which must be exactly [`Journal::encoded_len`] bytes.
    ///
    /// The title is checked before anything is written.
    pub fn encode(&self, dst: &mut [u8]) -> JournalResult {
        TextField::Title.check(self.title)?;
        if dst.len() != self.encoded_len() {
            return Err(JournalError::CapacityExceeded);
        }

        let mut writer = ByteWriter::new(dst);
        writer.write_u8(RecordKind::Journal as u8)?;
        writer.write_u8(LAYOUT_VERSION)?;
        writer.write_u8(self.bump)?;
        writer.write(self.owner.as_ref())?;
        writer.write(&self.entry_count.to_le_bytes())?;
        writer.write(&self.live_entries.to_le_bytes())?;
        writer.write_length_prefixed(self.title.as_bytes())?;
        debug_assert_eq!(writer.finish(), self.encoded_len());

        Ok(())
    }

    /// Reads a journal from account data. Every failure is [`JournalError::MalformedRecord`].
    pub fn decode(data: &'a [u8]) -> Result<Self, JournalError> {
        let mut reader = ByteReader::new(data, JournalError::MalformedRecord);
        if RecordKind::try_from(reader.read_u8()?)? != RecordKind::Journal {
            return Err(JournalError::MalformedRecord);
        }
        if reader.read_u8()? != LAYOUT_VERSION {
            return Err(JournalError::MalformedRecord);
        }
        let bump = reader.read_u8()?;
        let owner = reader.read_address()?;
        let entry_count = reader.read_u16()?;
        let live_entries = reader.read_u16()?;
        let title = TextField::Title
            .parse(reader.read_length_prefixed()?, JournalError::MalformedRecord)
            .map_err(|_| JournalError::MalformedRecord)?;
        reader.finish()?;

        if live_entries > entry_count {
            return Err(JournalError::MalformedRecord);
        }

        Ok(Self {
            bump,
            owner,
            entry_count,
            live_entries,
            title,
        })
    }

    /// Hands out the next entry id and bumps both counters.
    ///
    /// `capacity` is the size of the entry id space; once `entry_count` reaches it the journal
    /// can't hold new entries, even if earlier ones were deleted.
    pub fn try_allocate_entry_id(&mut self, capacity: u32) -> Result<u16, JournalError> {
        if u32::from(self.entry_count) >= capacity {
            return Err(JournalError::CapacityExceeded);
        }
        let id = self.entry_count;
        self.entry_count = id
            .checked_add(1)
            .ok_or(JournalError::CapacityExceeded)?;
        self.live_entries = self
            .live_entries
            .checked_add(1)
            .ok_or(JournalError::ArithmeticOverflow)?;
        Ok(id)
    }

    /// Whether this journal handed out `id`.
    ///
    /// A journal re-created at a freed address starts counting from zero again, so an entry left
    /// behind by the earlier journal carries an id this one hasn't reached yet.
    #[inline(always)]
    pub fn has_issued(&self, id: u16) -> bool {
        id < self.entry_count
    }

    /// Records that one live entry was reclaimed. `entry_count` is left untouched so ids are never
    /// reused.
    pub fn try_release_entry(&mut self) -> JournalResult {
        self.live_entries = self
            .live_entries
            .checked_sub(1)
            .ok_or(JournalError::ArithmeticOverflow)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::vec;

    use super::*;

    const OWNER: Address = Address::new_from_array([7; 32]);

    #[test]
    fn round_trip_fresh_journal() {
        let journal = Journal::new(OWNER, "My Journal", 254);
        let mut data = vec![0u8; journal.encoded_len()];
        journal.encode(&mut data).unwrap();

        let decoded = Journal::decode(&data).unwrap();
        assert_eq!(decoded, journal);
        assert_eq!(decoded.owner, OWNER);
        assert_eq!(decoded.title, "My Journal");
        assert_eq!(decoded.entry_count, 0);
    }

    #[test]
    fn space_matches_layout() {
        assert_eq!(Journal::space(10), 39 + 4 + 10);
        assert_eq!(Journal::MAX_LEN, 73);
    }

    #[test]
    fn encode_rejects_long_title_without_writing() {
        let title = "t".repeat(MAX_TITLE_LEN + 1);
        let journal = Journal::new(OWNER, &title, 255);
        let mut data = vec![0u8; journal.encoded_len()];
        assert_eq!(journal.encode(&mut data), Err(JournalError::FieldTooLong));
        assert!(data.iter().all(|b| *b == 0));
    }

    #[test]
    fn encode_requires_exact_capacity() {
        let journal = Journal::new(OWNER, "abc", 255);
        let mut data = vec![0u8; journal.encoded_len() + 1];
        assert_eq!(journal.encode(&mut data), Err(JournalError::CapacityExceeded));
    }

    #[test]
    fn decode_rejects_entry_discriminant() {
        let journal = Journal::new(OWNER, "abc", 255);
        let mut data = vec![0u8; journal.encoded_len()];
        journal.encode(&mut data).unwrap();
        data[0] = RecordKind::Entry as u8;
        assert_eq!(Journal::decode(&data), Err(JournalError::MalformedRecord));
    }

    #[test]
    fn decode_rejects_oversized_declared_title() {
        // A 31-byte title is only producible by hand; the encoder refuses it.
        let mut data = vec![0u8; Journal::space(31)];
        data[0] = RecordKind::Journal as u8;
        data[1] = LAYOUT_VERSION;
        data[JOURNAL_HEADER_LEN..JOURNAL_HEADER_LEN + 4].copy_from_slice(&31u32.to_le_bytes());
        data[JOURNAL_HEADER_LEN + 4..].fill(b'a');
        assert_eq!(Journal::decode(&data), Err(JournalError::MalformedRecord));
    }

    #[test]
    fn decode_rejects_truncated_data() {
        let journal = Journal::new(OWNER, "My Journal", 255);
        let mut data = vec![0u8; journal.encoded_len()];
        journal.encode(&mut data).unwrap();
        assert_eq!(
            Journal::decode(&data[..data.len() - 1]),
            Err(JournalError::MalformedRecord)
        );
        assert_eq!(
            Journal::decode(&data[..JOURNAL_HEADER_LEN]),
            Err(JournalError::MalformedRecord)
        );
    }

    #[test]
    fn entry_ids_are_monotonic_and_bounded() {
        let mut journal = Journal::new(OWNER, "ids", 255);
        for expected in 0..3u16 {
            assert_eq!(journal.try_allocate_entry_id(3), Ok(expected));
        }
        assert_eq!(
            journal.try_allocate_entry_id(3),
            Err(JournalError::CapacityExceeded)
        );

        journal.try_release_entry().unwrap();
        assert_eq!(journal.entry_count, 3);
        assert_eq!(journal.live_entries, 2);
        // Deleting doesn't free up an id.
        assert_eq!(
            journal.try_allocate_entry_id(3),
            Err(JournalError::CapacityExceeded)
        );
    }

    #[test]
    fn wide_id_space_ends_where_the_counter_does() {
        let capacity = crate::seeds::EntryIdSeed::U16Le.capacity();
        let mut journal = Journal::new(OWNER, "wide", 255);
        journal.entry_count = u16::MAX - 1;

        assert_eq!(journal.try_allocate_entry_id(capacity), Ok(u16::MAX - 1));
        assert_eq!(journal.entry_count, u16::MAX);
        assert_eq!(
            journal.try_allocate_entry_id(capacity),
            Err(JournalError::CapacityExceeded)
        );
    }

    #[test]
    fn issued_ids_are_below_the_counter() {
        let mut journal = Journal::new(OWNER, "ids", 255);
        assert!(!journal.has_issued(0));
        journal.try_allocate_entry_id(256).unwrap();
        assert!(journal.has_issued(0));
        assert!(!journal.has_issued(1));
    }

    #[test]
    fn release_without_live_entries_fails() {
        let mut journal = Journal::new(OWNER, "empty", 255);
        assert_eq!(
            journal.try_release_entry(),
            Err(JournalError::ArithmeticOverflow)
        );
    }
}
