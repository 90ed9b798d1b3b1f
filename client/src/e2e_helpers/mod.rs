//! An off-chain ledger for running journal instructions end to end.
//!
//! [`LocalLedger`] executes the same [`Instruction`]s a wallet would send, through the program's
//! own dispatcher, over an in-memory store with rent accounting. Each call to
//! [`LocalLedger::send`] is one transaction: all of its instructions apply or none do.

pub mod mollusk;

use itertools::Itertools;
use journal::{
    config::ProgramConfig,
    context::AccountKey,
    processor::process_instruction,
    store::{
        memory::MemoryStore,
        FixedClock,
        SlotStore,
    },
};
use journal_interface::{
    error::JournalError,
    state::RecordKind,
};
use solana_address::Address;
use solana_instruction::Instruction;

use crate::{
    context::journal::JournalContext,
    views::{
        JournalEntryView,
        JournalView,
    },
};

/// Lamports airdropped by [`LocalLedger::fund`] callers that don't care about the amount.
pub const DEFAULT_FUND_AMOUNT: u64 = 10_000_000_000;

/// The ledger clock's starting unix timestamp.
pub const GENESIS_TIMESTAMP: i64 = 1_700_000_000;

pub struct LocalLedger {
    store: MemoryStore,
    clock: FixedClock,
    config: ProgramConfig,
}

impl Default for LocalLedger {
    fn default() -> Self {
        Self::new(ProgramConfig::default())
    }
}

impl LocalLedger {
    pub fn new(config: ProgramConfig) -> Self {
        Self {
            store: MemoryStore::new(),
            clock: FixedClock(GENESIS_TIMESTAMP),
            config,
        }
    }

    pub fn config(&self) -> ProgramConfig {
        self.config
    }

    pub fn fund(&mut self, principal: &Address, lamports: u64) {
        self.store.fund(principal, lamports);
    }

    pub fn balance(&self, principal: &Address) -> u64 {
        self.store.balance(principal)
    }

    /// The rent deposit held by the record at `address`, if any.
    pub fn deposit(&self, address: &Address) -> Option<u64> {
        self.store.slot(address).map(|slot| slot.lamports)
    }

    /// Moves the ledger clock to `unix_timestamp`.
    pub fn warp_to(&mut self, unix_timestamp: i64) {
        self.clock = FixedClock(unix_timestamp);
    }

    /// Runs `instructions` as one transaction.
    ///
    /// Fails with [`JournalError::InvalidAccountOwner`] if an instruction targets another program.
    pub fn send(&mut self, instructions: &[Instruction]) -> Result<(), JournalError> {
        let clock = self.clock;
        let config = self.config;
        self.store.atomically(|store| {
            instructions
                .iter()
                .try_for_each(|ix| execute(store, &clock, config, ix))
        })
    }

    pub fn send_one(&mut self, instruction: Instruction) -> Result<(), JournalError> {
        self.send(&[instruction])
    }

    pub fn exists(&self, address: &Address) -> bool {
        self.store.exists(address)
    }

    /// Whether `owner` already has a journal titled `title`.
    pub fn journal_exists(&self, owner: &Address, title: &str) -> anyhow::Result<bool> {
        let ctx = JournalContext::new(*owner, title)?;
        Ok(self.exists(&ctx.journal))
    }

    pub fn view_journal(&self, address: &Address) -> anyhow::Result<JournalView> {
        let slot = self.store.slot(address).ok_or(JournalError::NotFound)?;
        JournalView::try_from_owner_and_data(*address, &slot.owner_program, &slot.data)
    }

    pub fn view_entry(&self, address: &Address) -> anyhow::Result<JournalEntryView> {
        let slot = self.store.slot(address).ok_or(JournalError::NotFound)?;
        JournalEntryView::try_from_owner_and_data(*address, &slot.owner_program, &slot.data)
    }

    /// Every live journal, optionally only those of `owner`, sorted by owner then title.
    pub fn list_journals(&self, owner: Option<&Address>) -> anyhow::Result<Vec<JournalView>> {
        let journals = self
            .store
            .slots_of_kind(RecordKind::Journal)
            .map(|(address, data)| {
                JournalView::try_from_owner_and_data(*address, &journal::ID, data)
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(journals
            .into_iter()
            .filter(|view| owner.map_or(true, |owner| &view.owner == owner))
            .sorted_by(|a, b| (&a.owner, &a.title).cmp(&(&b.owner, &b.title)))
            .collect())
    }

    /// The live entries of `journal` in id order. Ids whose entries were deleted are skipped.
    pub fn list_journal_entries(
        &self,
        journal: &JournalView,
    ) -> anyhow::Result<Vec<JournalEntryView>> {
        let mut entries = Vec::with_capacity(journal.live_entries as usize);
        for id in 0..journal.entry_count {
            let (address, _) = journal_interface::seeds::find_entry_address(
                &journal.address,
                id,
                self.config.entry_id_seed,
            )?;
            if self.exists(&address) {
                entries.push(self.view_entry(&address)?);
            }
        }
        Ok(entries)
    }
}

/// Runs one instruction through the program dispatcher.
fn execute(
    store: &mut MemoryStore,
    clock: &FixedClock,
    config: ProgramConfig,
    instruction: &Instruction,
) -> Result<(), JournalError> {
    if instruction.program_id != journal::ID {
        return Err(JournalError::InvalidAccountOwner);
    }
    let accounts = instruction
        .accounts
        .iter()
        .map(|meta| AccountKey::new(meta.pubkey, meta.is_signer))
        .collect_vec();
    process_instruction(store, clock, config, &accounts, &instruction.data)
}

/// Convenience harness for end-to-end tests and examples.
///
/// Upon instantiation it funds the owner with [`DEFAULT_FUND_AMOUNT`] lamports and creates a
/// journal titled `title`.
pub struct E2e {
    pub ledger: LocalLedger,
    pub journal: JournalContext,
}

impl E2e {
    pub fn new_owner_and_journal(owner: Address, title: &str) -> anyhow::Result<Self> {
        Self::with_config(ProgramConfig::default(), owner, title)
    }

    pub fn with_config(config: ProgramConfig, owner: Address, title: &str) -> anyhow::Result<Self> {
        let mut ledger = LocalLedger::new(config);
        ledger.fund(&owner, DEFAULT_FUND_AMOUNT);

        let journal = JournalContext::with_id_seed(owner, title, config.entry_id_seed)?;
        ledger.send_one(journal.create_journal())?;

        Ok(Self { ledger, journal })
    }

    pub fn view_journal(&self) -> anyhow::Result<JournalView> {
        self.ledger.view_journal(&self.journal.journal)
    }

    pub fn view_entry(&self, id: u16) -> anyhow::Result<JournalEntryView> {
        self.ledger.view_entry(&self.journal.entry_address(id)?)
    }

    /// Appends an entry with the journal's next id and returns that id.
    pub fn create_entry(&mut self, content: &str) -> anyhow::Result<u16> {
        let id = self.view_journal()?.entry_count;
        self.ledger
            .send_one(self.journal.create_entry(id, content)?)?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: Address = Address::new_from_array([61; 32]);

    #[test]
    fn harness_creates_the_journal() {
        let e2e = E2e::new_owner_and_journal(OWNER, "My Journal").unwrap();
        let view = e2e.view_journal().unwrap();
        assert_eq!(view.title, "My Journal");
        assert_eq!(view.owner, OWNER);
    }

    #[test]
    fn foreign_program_instructions_are_rejected() {
        let mut ledger = LocalLedger::default();
        let ix = Instruction {
            program_id: OWNER,
            accounts: vec![],
            data: vec![0],
        };
        assert_eq!(ledger.send_one(ix), Err(JournalError::InvalidAccountOwner));
    }

    #[test]
    fn a_failing_instruction_rolls_back_the_whole_transaction() {
        let mut ledger = LocalLedger::default();
        ledger.fund(&OWNER, DEFAULT_FUND_AMOUNT);
        let ctx = JournalContext::new(OWNER, "My Journal").unwrap();

        let res = ledger.send(&[ctx.create_journal(), ctx.create_journal()]);
        assert_eq!(res, Err(JournalError::AlreadyExists));
        assert!(!ledger.exists(&ctx.journal));
        assert_eq!(ledger.balance(&OWNER), DEFAULT_FUND_AMOUNT);
    }
}
