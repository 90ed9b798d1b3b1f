//! Solana program entrypoint.
//!
//! Forwards incoming instructions from the runtime into the program's core instruction processing
//! logic, backed by the instruction's accounts and the clock sysvar.

use pinocchio::{
    account::AccountView,
    no_allocator,
    nostd_panic_handler,
    program_entrypoint,
    Address,
    ProgramResult,
};

use crate::{
    config::ProgramConfig,
    context::AccountKey,
    processor,
    store::account_store::{
        AccountStore,
        SysvarClock,
    },
};

program_entrypoint!(process_instruction);
no_allocator!();
nostd_panic_handler!();

/// No instruction reads more than this many accounts.
const MAX_ACCOUNTS: usize = 4;

#[inline(never)]
pub fn process_instruction(
    _program_id: &Address,
    accounts: &[AccountView],
    instruction_data_with_tag: &[u8],
) -> ProgramResult {
    let mut keys = [AccountKey::new(Address::new_from_array([0; 32]), false); MAX_ACCOUNTS];
    for (key, account) in keys.iter_mut().zip(accounts) {
        *key = AccountKey::new(*account.address(), account.is_signer());
    }
    let num_keys = accounts.len().min(MAX_ACCOUNTS);

    processor::process_instruction(
        &mut AccountStore::new(accounts),
        &SysvarClock,
        ProgramConfig::DEPLOYED,
        &keys[..num_keys],
        instruction_data_with_tag,
    )
}
