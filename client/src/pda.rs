//! PDA finders for journal and entry accounts with the program's default id seed encoding.

use journal::config::ProgramConfig;
use journal_interface::seeds;
use solana_address::Address;

/// The journal address for `owner` and `title`.
pub fn find_journal_address(owner: &Address, title: &str) -> anyhow::Result<(Address, u8)> {
    Ok(seeds::find_journal_address(owner, title)?)
}

/// The address of entry `id` of `journal` under the deployed id seed encoding.
pub fn find_entry_address(journal: &Address, id: u16) -> anyhow::Result<(Address, u8)> {
    Ok(seeds::find_entry_address(
        journal,
        id,
        ProgramConfig::DEPLOYED.entry_id_seed,
    )?)
}
