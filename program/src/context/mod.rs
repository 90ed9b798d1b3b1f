//! Structures the raw account list of an instruction into the addresses each operation reads.

use journal_interface::{
    error::JournalError,
    instructions::JournalInstruction,
};
use solana_address::Address;

/// The parts of an account the dispatcher needs: its address and whether it signed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AccountKey {
    pub address: Address,
    pub is_signer: bool,
}

impl AccountKey {
    pub const fn new(address: Address, is_signer: bool) -> Self {
        Self { address, is_signer }
    }
}

/// The accounts of a journal instruction.
///
/// The owner is always account 0 and the journal account 1. The two entry instructions take the
/// entry as account 2. Trailing accounts such as the system program are only used through CPIs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InstructionAccounts {
    pub owner: Address,
    pub journal: Address,
    pub entry: Option<Address>,
}

impl InstructionAccounts {
    pub fn load(
        instruction: JournalInstruction,
        accounts: &[AccountKey],
    ) -> Result<InstructionAccounts, JournalError> {
        if accounts.len() < instruction.num_accounts() {
            return Err(JournalError::NotEnoughAccountKeys);
        }
        let [owner, journal, rest @ ..] = accounts else {
            return Err(JournalError::NotEnoughAccountKeys);
        };
        if !owner.is_signer {
            return Err(JournalError::OwnerMustBeSigner);
        }

        let entry = match instruction {
            JournalInstruction::CreateJournalEntry
            | JournalInstruction::UpdateJournalEntry
            | JournalInstruction::DeleteJournalEntry => Some(
                rest.first()
                    .ok_or(JournalError::NotEnoughAccountKeys)?
                    .address,
            ),
            JournalInstruction::CreateJournal | JournalInstruction::DeleteJournal => None,
        };

        Ok(Self {
            owner: owner.address,
            journal: journal.address,
            entry,
        })
    }

    /// The entry account, for instructions that take one.
    #[inline(always)]
    pub fn entry(&self) -> Result<&Address, JournalError> {
        self.entry.as_ref().ok_or(JournalError::NotEnoughAccountKeys)
    }
}
