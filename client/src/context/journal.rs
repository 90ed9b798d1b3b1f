//! Journal-level context for building journal program instructions from contextual address data.

use journal_interface::{
    instructions::{
        CreateJournalInstructionData,
        EntryContentInstructionData,
        JournalInstruction,
    },
    seeds::{
        self,
        EntryIdSeed,
    },
    state::SYSTEM_PROGRAM_ID,
};
use solana_address::Address;
use solana_instruction::{
    AccountMeta,
    Instruction,
};

/// A struct containing contextual fields for one journal.
///
/// Implements helper methods for building all program instructions using those values. The
/// builders don't check text bounds so that invalid input reaches the program and is rejected
/// there.
#[derive(Clone, Debug)]
pub struct JournalContext {
    pub owner: Address,
    pub title: String,
    pub journal: Address,
    pub id_seed: EntryIdSeed,
}

impl JournalContext {
    /// Derives the journal address for `owner` and `title` with the default id seed encoding.
    pub fn new(owner: Address, title: impl Into<String>) -> anyhow::Result<Self> {
        Self::with_id_seed(owner, title, EntryIdSeed::default())
    }

    pub fn with_id_seed(
        owner: Address,
        title: impl Into<String>,
        id_seed: EntryIdSeed,
    ) -> anyhow::Result<Self> {
        let title = title.into();
        let (journal, _bump) = seeds::find_journal_address(&owner, &title)?;
        Ok(Self {
            owner,
            title,
            journal,
            id_seed,
        })
    }

    /// The address of entry `id` in this journal.
    pub fn entry_address(&self, id: u16) -> anyhow::Result<Address> {
        let (entry, _bump) = seeds::find_entry_address(&self.journal, id, self.id_seed)?;
        Ok(entry)
    }

    pub fn create_journal(&self) -> Instruction {
        self.instruction(
            vec![self.system_program_meta()],
            CreateJournalInstructionData::new(&self.title).pack(),
        )
    }

    /// Creates entry `id`, which must be the journal's current `entry_count`.
    pub fn create_entry(&self, id: u16, content: &str) -> anyhow::Result<Instruction> {
        Ok(self.instruction(
            vec![
                AccountMeta::new(self.entry_address(id)?, false),
                self.system_program_meta(),
            ],
            EntryContentInstructionData::new(content).pack(JournalInstruction::CreateJournalEntry),
        ))
    }

    pub fn update_entry(&self, id: u16, content: &str) -> anyhow::Result<Instruction> {
        Ok(self.instruction(
            vec![
                AccountMeta::new(self.entry_address(id)?, false),
                self.system_program_meta(),
            ],
            EntryContentInstructionData::new(content).pack(JournalInstruction::UpdateJournalEntry),
        ))
    }

    pub fn delete_entry(&self, id: u16) -> anyhow::Result<Instruction> {
        Ok(self.instruction(
            vec![AccountMeta::new(self.entry_address(id)?, false)],
            vec![JournalInstruction::DeleteJournalEntry as u8],
        ))
    }

    pub fn delete_journal(&self) -> Instruction {
        self.instruction(vec![], vec![JournalInstruction::DeleteJournal as u8])
    }

    /// Prepends the owner and journal accounts shared by every instruction.
    fn instruction(&self, trailing: Vec<AccountMeta>, data: Vec<u8>) -> Instruction {
        let mut accounts = vec![
            AccountMeta::new(self.owner, true),
            AccountMeta::new(self.journal, false),
        ];
        accounts.extend(trailing);
        Instruction {
            program_id: ::journal::ID,
            accounts,
            data,
        }
    }

    fn system_program_meta(&self) -> AccountMeta {
        AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false)
    }
}
