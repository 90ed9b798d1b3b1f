//! See [`JournalEntry`].

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
            MAX_CONTENT_LEN,
        },
        LeI64,
        LeU16,
        RecordKind,
        ADDRESS_SIZE,
        LAYOUT_VERSION,
        LEN_PREFIX_SIZE,
    },
};

/// A single content record belonging to exactly one journal.
///
/// Account data layout, all integers little-endian:
///
/// ```text
/// [0]       kind         RecordKind::Entry
/// [1]       version      LAYOUT_VERSION
/// [2]       bump         PDA bump for ["entry", journal, id seed]
/// [3..35]   journal      the owning journal's address
/// [35..37]  id           u16
/// [37..45]  timestamp    i64 unix seconds at creation
/// [45..49]  content_len  u32
/// [49..]    content      content_len UTF-8 bytes
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct JournalEntry<'a> {
    /// The bump for the entry PDA.
    pub bump: u8,
    /// The owning journal's address. Never changes.
    pub journal: Address,
    /// The journal's `entry_count` at the moment this entry was created.
    pub id: u16,
    /// Unix timestamp of creation.
    pub timestamp: i64,
    /// The entry body, 1 to [`MAX_CONTENT_LEN`] bytes.
    pub content: &'a str,
}

/// The size of everything before the content's length prefix.
#[allow(clippy::identity_op)]
pub const ENTRY_HEADER_LEN: usize = 0
/* kind */      + size_of::<u8>()
/* version */   + size_of::<u8>()
/* bump */      + size_of::<u8>()
/* journal */   + ADDRESS_SIZE
/* id */        + size_of::<LeU16>()
/* timestamp */ + size_of::<LeI64>();

const_assert_eq!(ENTRY_HEADER_LEN, 45);

impl<'a> JournalEntry<'a> {
    /// The largest possible entry account.
    pub const MAX_LEN: usize = Self::space(MAX_CONTENT_LEN);

    /// The exact account size needed to hold an entry with `content_len` bytes of content.
    #[inline(always)]
    pub const fn space(content_len: usize) -> usize {
        ENTRY_HEADER_LEN + LEN_PREFIX_SIZE + content_len
    }

    #[inline(always)]
    pub fn encoded_len(&self) -> usize {
        Self::space(self.content.len())
    }

    /// Returns a copy of this entry with new content. Everything else, including the creation
    /// timestamp, is kept.
    #[inline(always)]
    pub fn with_content<'b>(&self, content: &'b str) -> JournalEntry<'b> {
        JournalEntry {
            bump: self.bump,
            journal: self.journal,
            id: self.id,
            timestamp: self.timestamp,
            content,
        }
    }

    /// Writes the entry into `dst`, which must be exactly [`JournalEntry::encoded_len`] bytes.
    ///
    /// The content is checked before anything is written.
    pub fn encode(&self, dst: &mut [u8]) -> JournalResult {
        TextField::Content.check(self.content)?;
        if dst.len() != self.encoded_len() {
            return Err(JournalError::CapacityExceeded);
        }

        let mut writer = ByteWriter::new(dst);
        writer.write_u8(RecordKind::Entry as u8)?;
        writer.write_u8(LAYOUT_VERSION)?;
        writer.write_u8(self.bump)?;
        writer.write(self.journal.as_ref())?;
        writer.write(&self.id.to_le_bytes())?;
        writer.write(&self.timestamp.to_le_bytes())?;
        writer.write_length_prefixed(self.content.as_bytes())?;
        debug_assert_eq!(writer.finish(), self.encoded_len());

        Ok(())
    }

    /// Reads an entry from account data. Every failure is [`JournalError::MalformedRecord`].
    pub fn decode(data: &'a [u8]) -> Result<Self, JournalError> {
        let mut reader = ByteReader::new(data, JournalError::MalformedRecord);
        if RecordKind::try_from(reader.read_u8()?)? != RecordKind::Entry {
            return Err(JournalError::MalformedRecord);
        }
        if reader.read_u8()? != LAYOUT_VERSION {
            return Err(JournalError::MalformedRecord);
        }
        let bump = reader.read_u8()?;
        let journal = reader.read_address()?;
        let id = reader.read_u16()?;
        let timestamp = reader.read_i64()?;
        let content = TextField::Content
            .parse(reader.read_length_prefixed()?, JournalError::MalformedRecord)
            .map_err(|_| JournalError::MalformedRecord)?;
        reader.finish()?;

        Ok(Self {
            bump,
            journal,
            id,
            timestamp,
            content,
        })
    }
}
