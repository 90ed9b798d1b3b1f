//! Decodes a tagged instruction and routes it to its lifecycle operation.

use journal_interface::instructions::{
    split_tag,
    unpack_no_args,
    CreateJournalInstructionData,
    EntryContentInstructionData,
    JournalInstruction,
};

use crate::{
    config::ProgramConfig,
    context::{
        AccountKey,
        InstructionAccounts,
    },
    instructions::Processor,
    store::{
        ClockSource,
        SlotStore,
    },
};

/// Processes one instruction against `store`.
///
/// The caller provides atomicity: on error, effects already applied to `store` must be discarded.
/// On-chain the runtime does this for the whole transaction.
pub fn process_instruction<S, C>(
    store: &mut S,
    clock: &C,
    config: ProgramConfig,
    accounts: &[AccountKey],
    instruction_data_with_tag: &[u8],
) -> Result<(), S::Error>
where
    S: SlotStore,
    C: ClockSource,
    S::Error: From<C::Error>,
{
    let (instruction, instruction_data) = split_tag(instruction_data_with_tag)?;
    let ctx = InstructionAccounts::load(instruction, accounts)?;
    let mut processor = Processor::new(store, clock, config);

    match instruction {
        JournalInstruction::CreateJournal => {
            let title = CreateJournalInstructionData::unpack(instruction_data)?.title;
            processor.create_journal(&ctx.owner, title)?;
        }
        JournalInstruction::CreateJournalEntry => {
            let content = EntryContentInstructionData::unpack(instruction_data)?.content;
            processor.create_journal_entry_at(&ctx.owner, &ctx.journal, ctx.entry()?, content)?;
        }
        JournalInstruction::UpdateJournalEntry => {
            let content = EntryContentInstructionData::unpack(instruction_data)?.content;
            processor.update_journal_entry(&ctx.owner, &ctx.journal, ctx.entry()?, content)?;
        }
        JournalInstruction::DeleteJournalEntry => {
            unpack_no_args(instruction_data)?;
            processor.delete_journal_entry(&ctx.owner, &ctx.journal, ctx.entry()?)?;
        }
        JournalInstruction::DeleteJournal => {
            unpack_no_args(instruction_data)?;
            processor.delete_journal(&ctx.owner, &ctx.journal)?;
        }
    }

    Ok(())
}
