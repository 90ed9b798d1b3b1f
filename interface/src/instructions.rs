//! Instruction tags and instruction data for the journal program.
//!
//! Instruction data is a one-byte [`JournalInstruction`] tag followed by that instruction's
//! arguments. Text arguments are a u32 little-endian length followed by UTF-8 bytes, the same
//! encoding the account records use.
//!
//! ### Accounts
//!
//! | Instruction          | 0                       | 1                 | 2                 | 3              |
//! |----------------------|-------------------------|-------------------|-------------------|----------------|
//! | `CreateJournal`      | `[WRITE, SIGNER]` owner | `[WRITE]` journal | system program    |                |
//! | `CreateJournalEntry` | `[WRITE, SIGNER]` owner | `[WRITE]` journal | `[WRITE]` entry   | system program |
//! | `UpdateJournalEntry` | `[WRITE, SIGNER]` owner | `[WRITE]` journal | `[WRITE]` entry   | system program |
//! | `DeleteJournalEntry` | `[WRITE, SIGNER]` owner | `[WRITE]` journal | `[WRITE]` entry   |                |
//! | `DeleteJournal`      | `[WRITE, SIGNER]` owner | `[WRITE]` journal |                   |                |

use crate::{
    error::JournalError,
    pack::ByteReader,
    state::text::TextField,
};

#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(any(test, feature = "client"), derive(strum_macros::FromRepr, strum_macros::EnumIter))]
#[cfg_attr(feature = "client", derive(strum_macros::Display))]
pub enum JournalInstruction {
    CreateJournal,
    CreateJournalEntry,
    UpdateJournalEntry,
    DeleteJournalEntry,
    DeleteJournal,
}

impl TryFrom<u8> for JournalInstruction {
    type Error = JournalError;

    #[inline(always)]
    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(JournalInstruction::CreateJournal),
            1 => Ok(JournalInstruction::CreateJournalEntry),
            2 => Ok(JournalInstruction::UpdateJournalEntry),
            3 => Ok(JournalInstruction::DeleteJournalEntry),
            4 => Ok(JournalInstruction::DeleteJournal),
            _ => Err(JournalError::InvalidInstructionTag),
        }
    }
}

impl JournalInstruction {
    /// The minimum number of accounts the instruction reads.
    #[inline(always)]
    pub const fn num_accounts(self) -> usize {
        match self {
            JournalInstruction::CreateJournal => 3,
            JournalInstruction::CreateJournalEntry => 4,
            JournalInstruction::UpdateJournalEntry => 4,
            JournalInstruction::DeleteJournalEntry => 3,
            JournalInstruction::DeleteJournal => 2,
        }
    }
}

/// Splits tagged instruction data into its tag and the remaining argument bytes.
#[inline(always)]
pub fn split_tag(instruction_data: &[u8]) -> Result<(JournalInstruction, &[u8]), JournalError> {
    let [tag, rest @ ..] = instruction_data else {
        return Err(JournalError::InvalidInstructionTag);
    };
    Ok((JournalInstruction::try_from(*tag)?, rest))
}

/// Unpacks a single length-prefixed text argument, checking it against `field`'s bounds.
#[inline(always)]
fn unpack_text(field: TextField, data: &[u8]) -> Result<&str, JournalError> {
    let mut reader = ByteReader::new(data, JournalError::InvalidInstructionData);
    let text = field.parse(
        reader.read_length_prefixed()?,
        JournalError::InvalidInstructionData,
    )?;
    reader.finish()?;
    Ok(text)
}

#[cfg(feature = "std")]
fn pack_text(tag: JournalInstruction, text: &str) -> std::vec::Vec<u8> {
    let mut data = std::vec::Vec::with_capacity(1 + crate::state::LEN_PREFIX_SIZE + text.len());
    data.push(tag as u8);
    data.extend_from_slice(&(text.len() as u32).to_le_bytes());
    data.extend_from_slice(text.as_bytes());
    data
}

/// Arguments for [`JournalInstruction::CreateJournal`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CreateJournalInstructionData<'a> {
    /// The journal title. Also a seed of the journal address.
    pub title: &'a str,
}

impl<'a> CreateJournalInstructionData<'a> {
    pub fn new(title: &'a str) -> Self {
        Self { title }
    }

    /// Unpacks the untagged instruction data.
    #[inline(always)]
    pub fn unpack(data: &'a [u8]) -> Result<Self, JournalError> {
        Ok(Self {
            title: unpack_text(TextField::Title, data)?,
        })
    }

    /// Packs the tagged instruction data. Bounds aren't checked here so that clients can submit
    /// invalid input and observe the program's rejection.
    #[cfg(feature = "std")]
    pub fn pack(&self) -> std::vec::Vec<u8> {
        pack_text(JournalInstruction::CreateJournal, self.title)
    }
}

/// Arguments for [`JournalInstruction::CreateJournalEntry`] and
/// [`JournalInstruction::UpdateJournalEntry`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EntryContentInstructionData<'a> {
    /// The entry body.
    pub content: &'a str,
}

impl<'a> EntryContentInstructionData<'a> {
    pub fn new(content: &'a str) -> Self {
        Self { content }
    }

    /// Unpacks the untagged instruction data.
    #[inline(always)]
    pub fn unpack(data: &'a [u8]) -> Result<Self, JournalError> {
        Ok(Self {
            content: unpack_text(TextField::Content, data)?,
        })
    }

    /// Packs the tagged instruction data for either the create or the update instruction.
    #[cfg(feature = "std")]
    pub fn pack(&self, tag: JournalInstruction) -> std::vec::Vec<u8> {
        debug_assert!(matches!(
            tag,
            JournalInstruction::CreateJournalEntry | JournalInstruction::UpdateJournalEntry
        ));
        pack_text(tag, self.content)
    }
}

/// Fails unless the argument bytes are empty. Used by the two delete instructions.
#[inline(always)]
pub fn unpack_no_args(data: &[u8]) -> Result<(), JournalError> {
    ByteReader::new(data, JournalError::InvalidInstructionData).finish()
}
