//! The five lifecycle operations of the journal program.
//!
//! Each operation is a method on [`Processor`] in its own module. Operations load and check
//! everything they need before the first write, so a failing operation never leaves a partial
//! effect behind even on a store without transactions.

pub mod create_journal;
pub mod create_journal_entry;
pub mod delete_journal;
pub mod delete_journal_entry;
pub mod update_journal_entry;

use crate::{
    config::ProgramConfig,
    store::{
        ClockSource,
        SlotStore,
    },
};

/// Runs lifecycle operations against a store, a clock, and a fixed configuration.
pub struct Processor<'a, S, C> {
    pub store: &'a mut S,
    pub clock: &'a C,
    pub config: ProgramConfig,
}

impl<'a, S, C> Processor<'a, S, C>
where
    S: SlotStore,
    C: ClockSource,
    S::Error: From<C::Error>,
{
    pub fn new(store: &'a mut S, clock: &'a C, config: ProgramConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }
}
