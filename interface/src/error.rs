//! Common error types and conversion helpers to represent them as error message strings.

use pinocchio::error::ProgramError;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(
    any(test, feature = "client"),
    derive(strum_macros::FromRepr, strum_macros::EnumIter)
)]
#[repr(u8)]
pub enum JournalError {
    AlreadyExists,
    NotFound,
    Unauthorized,
    FieldTooLong,
    MalformedRecord,
    CapacityExceeded,
    PreconditionFailed,
    EmptyField,
    AddressDerivationFailed,
    AddressMismatch,
    InsufficientFunds,
    InvalidInstructionTag,
    InvalidInstructionData,
    NotEnoughAccountKeys,
    OwnerMustBeSigner,
    InvalidAccountOwner,
    ArithmeticOverflow,
}

impl From<JournalError> for ProgramError {
    #[inline(always)]
    fn from(e: JournalError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl From<JournalError> for &'static str {
    fn from(value: JournalError) -> Self {
        match value {
            JournalError::AlreadyExists => "A record already exists at the derived address",
            JournalError::NotFound => "No record exists at the given address",
            JournalError::Unauthorized => "Only the journal owner can perform this action",
            JournalError::FieldTooLong => "Text field exceeds its maximum length",
            JournalError::MalformedRecord => "Account data is not a valid record",
            JournalError::CapacityExceeded => "Journal has no entry ids left",
            JournalError::PreconditionFailed => "Record state doesn't allow this operation",
            JournalError::EmptyField => "Text field can't be empty",
            JournalError::AddressDerivationFailed => "PDA derivation failed",
            JournalError::AddressMismatch => "Account address doesn't match its derivation seeds",
            JournalError::InsufficientFunds => "Payer can't cover the rent-exempt deposit",
            JournalError::InvalidInstructionTag => "Invalid instruction tag",
            JournalError::InvalidInstructionData => "Instruction data is invalid",
            JournalError::NotEnoughAccountKeys => "Not enough accounts passed",
            JournalError::OwnerMustBeSigner => "The owner account must be a signer",
            JournalError::InvalidAccountOwner => "Account isn't owned by the journal program",
            JournalError::ArithmeticOverflow => "Arithmetic overflow",
        }
    }
}

#[cfg(not(target_os = "solana"))]
impl core::fmt::Display for JournalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let message: &'static str = (*self).into();
        write!(f, "{:?}: {}", self, message)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for JournalError {}

pub type JournalResult = Result<(), JournalError>;
