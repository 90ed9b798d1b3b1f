use pinocchio::{
    account::AccountView,
    error::ProgramError,
    sysvars::{
        rent::Rent,
        Sysvar,
    },
    ProgramResult,
};

/// Transfers the extra rent deposit `account` needs at `new_size` from `payer`, then grows the
/// account's data to `new_size`.
///
/// - If the account already holds enough lamports, the transfer CPI isn't invoked.
/// - Otherwise, the `payer` transfers the difference.
///
/// ### Accounts
///   0. `[WRITE, SIGNER]` Payer
///   1. `[WRITE]` Account to be resized
pub fn fund_then_resize(
    payer: &AccountView,
    account: &AccountView,
    new_size: usize,
) -> ProgramResult {
    let new_lamports_required = Rent::get()?.try_minimum_balance(new_size)?;
    let lamports_diff = new_lamports_required.saturating_sub(account.lamports());

    if lamports_diff > 0 {
        pinocchio_system::instructions::Transfer {
            from: payer, // WRITE
            to: account, // WRITE
            lamports: lamports_diff,
        }
        .invoke()?;
    }

    account.resize(new_size)
}

/// Shrinks the account's data to `new_size`, then moves the rent deposit it no longer needs back to
/// `payer`.
///
/// The account is program-owned, so the excess is moved by writing lamports directly instead of a
/// system transfer.
///
/// ### Accounts
///   0. `[WRITE]` Payer
///   1. `[WRITE]` Account to be resized
pub fn resize_then_refund(
    payer: &AccountView,
    account: &AccountView,
    new_size: usize,
) -> ProgramResult {
    account.resize(new_size)?;

    let new_lamports_required = Rent::get()?.try_minimum_balance(new_size)?;
    let excess = account.lamports().saturating_sub(new_lamports_required);

    if excess > 0 {
        let payer_lamports = payer
            .lamports()
            .checked_add(excess)
            .ok_or(ProgramError::ArithmeticOverflow)?;
        account.set_lamports(account.lamports() - excess);
        payer.set_lamports(payer_lamports);
    }

    Ok(())
}
