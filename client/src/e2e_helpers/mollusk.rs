//! Runs the deployed journal program under the Mollusk SVM.
//!
//! Unlike [`super::LocalLedger`], every instruction here goes through the built program's
//! entrypoint, its account-backed store, and real system program CPIs. Build the program with
//! `cargo build-sbf` first so `target/deploy/journal.so` exists.

use std::{
    collections::HashMap,
    path::PathBuf,
};

use anyhow::{
    anyhow,
    Context,
};
use journal_interface::{
    error::JournalError,
    state::SYSTEM_PROGRAM_ID,
};
use mollusk_svm::{
    program::keyed_account_for_system_program,
    result::ProgramResult,
    Mollusk,
    MolluskContext,
};
use solana_account::Account;
use solana_address::Address;
use solana_instruction::Instruction;
use solana_program_error::ProgramError;

use crate::{
    e2e_helpers::GENESIS_TIMESTAMP,
    views::{
        JournalEntryView,
        JournalView,
    },
};

/// Converts an input deploy file to a program name used by the [`Mollusk::new`] function.
///
/// Requires the full file name; for example, `journal.so` returns the absolute path version of
/// `../target/deploy/journal`, which is exactly what [`Mollusk::new`] expects.
fn deploy_file_to_program_name(program_name: &str) -> anyhow::Result<String> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("target/deploy/")
        .join(program_name)
        .canonicalize()
        .with_context(|| format!("{program_name} isn't built; run `cargo build-sbf`"))?;
    let path = path
        .to_str()
        .ok_or_else(|| anyhow!("Deploy path isn't valid UTF-8"))?;
    path.strip_suffix(".so")
        .map(str::to_string)
        .ok_or_else(|| anyhow!("Deploy file should have an `.so` suffix"))
}

/// A system-owned wallet holding `lamports`.
pub fn wallet(lamports: u64) -> Account {
    Account::new(lamports, 0, &SYSTEM_PROGRAM_ID)
}

/// The deployed journal program in a Mollusk context with a hashmap account store.
///
/// The clock starts at [`GENESIS_TIMESTAMP`] so entry timestamps match the local ledger's.
pub struct SvmLedger {
    pub context: MolluskContext<HashMap<Address, Account>>,
}

impl SvmLedger {
    /// Loads the program and creates each of `accounts` at its address.
    pub fn new(accounts: Vec<(Address, Account)>) -> anyhow::Result<Self> {
        let mut mollusk = Mollusk::new(&journal::ID, &deploy_file_to_program_name("journal.so")?);
        mollusk.sysvars.clock.unix_timestamp = GENESIS_TIMESTAMP;

        let context = mollusk.with_context(HashMap::new());
        let (system_program, system_account) = keyed_account_for_system_program();
        context
            .account_store
            .borrow_mut()
            .insert(system_program, system_account);
        for (address, account) in accounts {
            context.account_store.borrow_mut().insert(address, account);
        }

        Ok(Self { context })
    }

    /// Processes one instruction. A custom error the program returned comes back as its
    /// [`JournalError`].
    pub fn send(&self, instruction: &Instruction) -> anyhow::Result<()> {
        match self.context.process_instruction(instruction).program_result {
            ProgramResult::Success => Ok(()),
            ProgramResult::Failure(ProgramError::Custom(code)) => {
                match u8::try_from(code).ok().and_then(JournalError::from_repr) {
                    Some(err) => Err(err.into()),
                    None => Err(anyhow!("Custom program error {code}")),
                }
            }
            other => Err(anyhow!("Instruction failed: {other:?}")),
        }
    }

    pub fn account(&self, address: &Address) -> Option<Account> {
        self.context.account_store.borrow().get(address).cloned()
    }

    pub fn lamports(&self, address: &Address) -> u64 {
        self.account(address).map_or(0, |account| account.lamports)
    }

    /// Whether a live journal program account occupies `address`.
    pub fn exists(&self, address: &Address) -> bool {
        self.account(address)
            .is_some_and(|account| account.lamports > 0 && account.owner == journal::ID)
    }

    /// The rent-exempt minimum for `size` bytes under the SVM's rent sysvar.
    pub fn minimum_balance(&self, size: usize) -> u64 {
        self.context.mollusk.sysvars.rent.minimum_balance(size)
    }

    fn live_account(&self, address: &Address) -> anyhow::Result<Account> {
        let account = self
            .account(address)
            .filter(|account| account.lamports > 0 && !account.data.is_empty())
            .ok_or(JournalError::NotFound)?;
        Ok(account)
    }

    pub fn view_journal(&self, address: &Address) -> anyhow::Result<JournalView> {
        let account = self.live_account(address)?;
        JournalView::try_from_owner_and_data(*address, &account.owner, &account.data)
    }

    pub fn view_entry(&self, address: &Address) -> anyhow::Result<JournalEntryView> {
        let account = self.live_account(address)?;
        JournalEntryView::try_from_owner_and_data(*address, &account.owner, &account.data)
    }
}
