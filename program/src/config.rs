//! Program-wide policy knobs.
//!
//! The deployed program picks its configuration at compile time through Cargo features; tests and
//! the off-chain harness build [`ProgramConfig`] values directly.

pub use journal_interface::seeds::EntryIdSeed;

/// What `DeleteJournal` does when the journal still has live entries.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum JournalDeletePolicy {
    /// Refuse with `PreconditionFailed` until every entry has been deleted. Entry accounts can
    /// never point at a reclaimed journal.
    #[default]
    RequireEmpty,
    /// Reclaim the journal regardless. Remaining entries keep their rent deposit and a
    /// `journal` field that no longer resolves.
    AllowOrphans,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ProgramConfig {
    pub delete_policy: JournalDeletePolicy,
    /// Entry id seed encoding. Also fixes how many entries a journal can ever hold.
    pub entry_id_seed: EntryIdSeed,
}

impl ProgramConfig {
    /// The configuration compiled into the on-chain program.
    pub const DEPLOYED: ProgramConfig = ProgramConfig {
        delete_policy: if cfg!(feature = "allow-orphaned-entries") {
            JournalDeletePolicy::AllowOrphans
        } else {
            JournalDeletePolicy::RequireEmpty
        },
        entry_id_seed: if cfg!(feature = "wide-entry-ids") {
            EntryIdSeed::U16Le
        } else {
            EntryIdSeed::SingleByte
        },
    };

    #[inline(always)]
    pub const fn entry_capacity(&self) -> u32 {
        self.entry_id_seed.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_strict_single_byte() {
        let config = ProgramConfig::default();
        assert_eq!(config.delete_policy, JournalDeletePolicy::RequireEmpty);
        assert_eq!(config.entry_capacity(), 256);
    }
}
