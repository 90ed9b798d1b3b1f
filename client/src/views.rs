//! Read-only view helpers for decoding journal program accounts into owned Rust structs.

use std::fmt;

use anyhow::bail;
use colored::Colorize;
use journal_interface::state::{
    entry::JournalEntry,
    journal::Journal,
};
use solana_address::Address;

use crate::{
    fmt_kv,
    LogColor,
};

/// Fails unless the account is owned by the journal program.
fn check_program_owner(program_owner: &Address) -> anyhow::Result<()> {
    if program_owner != &journal::ID {
        bail!("Account isn't owned by the journal program");
    }
    Ok(())
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct JournalView {
    pub address: Address,
    pub owner: Address,
    pub title: String,
    pub entry_count: u16,
    pub live_entries: u16,
    pub bump: u8,
}

impl JournalView {
    pub fn try_from_owner_and_data(
        address: Address,
        program_owner: &Address,
        data: &[u8],
    ) -> anyhow::Result<Self> {
        check_program_owner(program_owner)?;
        let journal = Journal::decode(data)?;
        Ok(Self {
            address,
            owner: journal.owner,
            title: journal.title.to_string(),
            entry_count: journal.entry_count,
            live_entries: journal.live_entries,
            bump: journal.bump,
        })
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct JournalEntryView {
    pub address: Address,
    pub journal: Address,
    pub id: u16,
    pub timestamp: i64,
    pub content: String,
    pub bump: u8,
}

impl JournalEntryView {
    pub fn try_from_owner_and_data(
        address: Address,
        program_owner: &Address,
        data: &[u8],
    ) -> anyhow::Result<Self> {
        check_program_owner(program_owner)?;
        let entry = JournalEntry::decode(data)?;
        Ok(Self {
            address,
            journal: entry.journal,
            id: entry.id,
            timestamp: entry.timestamp,
            content: entry.content.to_string(),
            bump: entry.bump,
        })
    }
}

impl fmt::Display for JournalView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", fmt_kv!("Journal", &self.title, LogColor::Header))?;
        writeln!(f, "  {}", fmt_kv!("address", format!("{:?}", self.address)))?;
        writeln!(f, "  {}", fmt_kv!("owner", format!("{:?}", self.owner)))?;
        writeln!(f, "  {}", fmt_kv!("entry_count", self.entry_count))?;
        write!(f, "  {}", fmt_kv!("live_entries", self.live_entries))
    }
}

impl fmt::Display for JournalEntryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", fmt_kv!("Entry", self.id, LogColor::Info))?;
        writeln!(f, "  {}", fmt_kv!("address", format!("{:?}", self.address)))?;
        writeln!(f, "  {}", fmt_kv!("timestamp", self.timestamp))?;
        write!(f, "  {}", fmt_kv!("content", &self.content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: Address = Address::new_from_array([51; 32]);
    const JOURNAL: Address = Address::new_from_array([52; 32]);

    fn encoded_journal() -> Vec<u8> {
        let journal = Journal::new(OWNER, "My Journal", 254);
        let mut data = vec![0; journal.encoded_len()];
        journal.encode(&mut data).unwrap();
        data
    }

    #[test]
    fn journal_view_from_data() {
        let view =
            JournalView::try_from_owner_and_data(JOURNAL, &journal::ID, &encoded_journal()).unwrap();
        assert_eq!(view.owner, OWNER);
        assert_eq!(view.title, "My Journal");
        assert_eq!(view.entry_count, 0);
        assert!(view.to_string().contains("My Journal"));
    }

    #[test]
    fn foreign_owner_is_rejected() {
        assert!(JournalView::try_from_owner_and_data(JOURNAL, &OWNER, &encoded_journal()).is_err());
    }
}
