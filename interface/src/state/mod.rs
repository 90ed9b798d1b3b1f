//! On-chain account record definitions: journals, their entries, and the kind discriminant that
//! prefixes every record.

pub mod entry;
pub mod journal;
pub mod text;

use crate::error::JournalError;

pub const U16_SIZE: usize = core::mem::size_of::<u16>();
pub const I64_SIZE: usize = core::mem::size_of::<i64>();
pub const ADDRESS_SIZE: usize = 32;
/// The u32 byte length that precedes every variable-length text field.
pub const LEN_PREFIX_SIZE: usize = core::mem::size_of::<u32>();

/// Alias type for a u16 stored as little-endian bytes.
pub type LeU16 = [u8; U16_SIZE];
/// Alias type for an i64 stored as little-endian bytes.
pub type LeI64 = [u8; I64_SIZE];

/// The current layout version written to every record.
pub const LAYOUT_VERSION: u8 = 1;

/// The system program's address, needed by instructions that allocate accounts.
pub const SYSTEM_PROGRAM_ID: solana_address::Address =
    solana_address::Address::new_from_array([0; ADDRESS_SIZE]);

/// The first byte of every record. Prevents a journal account from being read as an entry and
/// vice versa.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum RecordKind {
    Journal = 1,
    Entry = 2,
}

impl TryFrom<u8> for RecordKind {
    type Error = JournalError;

    #[inline(always)]
    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            1 => Ok(RecordKind::Journal),
            2 => Ok(RecordKind::Entry),
            _ => Err(JournalError::MalformedRecord),
        }
    }
}

impl RecordKind {
    /// Returns the kind of record stored in `data` without decoding the rest of it.
    #[inline(always)]
    pub fn of(data: &[u8]) -> Result<Self, JournalError> {
        let [tag, ..] = data else {
            return Err(JournalError::MalformedRecord);
        };
        Self::try_from(*tag)
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn record_kind_try_from_exhaustive() {
        for v in 0..=u8::MAX {
            match RecordKind::iter().find(|kind| *kind as u8 == v) {
                Some(kind) => assert_eq!(RecordKind::try_from(v), Ok(kind)),
                None => assert_eq!(RecordKind::try_from(v), Err(JournalError::MalformedRecord)),
            }
        }
    }

    #[test]
    fn record_kind_of_empty_data() {
        assert_eq!(RecordKind::of(&[]), Err(JournalError::MalformedRecord));
        assert_eq!(RecordKind::of(&[2, 0, 0]), Ok(RecordKind::Entry));
    }
}
