//! The on-chain [`SlotStore`], backed by the accounts passed to the instruction.

use journal_interface::{
    error::JournalError,
    program,
    state::SYSTEM_PROGRAM_ID,
};
use pinocchio::{
    account::AccountView,
    error::ProgramError,
    sysvars::{
        clock::Clock,
        rent::Rent,
        Sysvar,
    },
    Address,
};
use solana_instruction_view::cpi::{
    Seed,
    Signer,
};

use crate::{
    shared::account_resize::{
        fund_then_resize,
        resize_then_refund,
    },
    store::{
        check_exact_fit,
        ClockSource,
        SlotStore,
    },
};

/// Resolves slots to the instruction's account views by address.
///
/// Every address the operations touch must be among `accounts`; an address that isn't fails with
/// [`JournalError::NotEnoughAccountKeys`].
pub struct AccountStore<'a> {
    accounts: &'a [AccountView],
}

impl<'a> AccountStore<'a> {
    pub fn new(accounts: &'a [AccountView]) -> Self {
        Self { accounts }
    }

    #[inline(always)]
    fn account(&self, address: &Address) -> Result<&'a AccountView, JournalError> {
        self.accounts
            .iter()
            .find(|account| account.address() == address)
            .ok_or(JournalError::NotEnoughAccountKeys)
    }

    /// The account at `address`, checked to be a live program-owned slot.
    #[inline(always)]
    fn live_account(&self, address: &Address) -> Result<&'a AccountView, JournalError> {
        let account = self.account(address)?;
        if account.data_len() == 0 || account.lamports() == 0 {
            return Err(JournalError::NotFound);
        }
        if !account.owned_by(&program::ID) {
            return Err(JournalError::InvalidAccountOwner);
        }
        Ok(account)
    }
}

impl SlotStore for AccountStore<'_> {
    type Error = ProgramError;

    fn exists(&self, address: &Address) -> bool {
        self.live_account(address).is_ok()
    }

    fn load(&self, address: &Address, dst: &mut [u8]) -> Result<usize, ProgramError> {
        let account = self.live_account(address)?;
        let data = account.try_borrow()?;
        let len = data.len();
        if len > dst.len() {
            return Err(JournalError::MalformedRecord.into());
        }
        dst[..len].copy_from_slice(&data);
        Ok(len)
    }

    fn alloc(
        &mut self,
        address: &Address,
        signer_seeds: &[&[u8]],
        size: usize,
        payer: &Address,
    ) -> Result<(), ProgramError> {
        let payer = self.account(payer)?;
        let account = self.account(address)?;
        if account.data_len() != 0 || !account.owned_by(&SYSTEM_PROGRAM_ID) {
            return Err(JournalError::AlreadyExists.into());
        }

        let [namespace, parent, discriminator, bump] = signer_seeds else {
            return Err(JournalError::AddressDerivationFailed.into());
        };
        let seeds = [
            Seed::from(*namespace),
            Seed::from(*parent),
            Seed::from(*discriminator),
            Seed::from(*bump),
        ];

        let lamports_required = Rent::get()?.try_minimum_balance(size)?;
        let current_lamports = account.lamports();

        if current_lamports == 0 {
            pinocchio_system::instructions::CreateAccount {
                from: payer, // WRITE
                to: account, // WRITE
                lamports: lamports_required,
                space: size as u64,
                owner: &program::ID,
            }
            .invoke_signed(&[Signer::from(&seeds)])?;
            return Ok(());
        }

        // Someone already sent lamports to the address, which makes `CreateAccount` fail. Top it
        // up instead and allocate and assign it directly.
        let top_up = lamports_required.saturating_sub(current_lamports);
        if top_up > 0 {
            pinocchio_system::instructions::Transfer {
                from: payer, // WRITE
                to: account, // WRITE
                lamports: top_up,
            }
            .invoke()?;
        }

        pinocchio_system::instructions::Allocate {
            account, // WRITE
            space: size as u64,
        }
        .invoke_signed(&[Signer::from(&seeds)])?;

        pinocchio_system::instructions::Assign {
            account, // WRITE
            owner: &program::ID,
        }
        .invoke_signed(&[Signer::from(&seeds)])
    }

    fn store(&mut self, address: &Address, bytes: &[u8]) -> Result<(), ProgramError> {
        let account = self.live_account(address)?;
        let mut data = account.try_borrow_mut()?;
        check_exact_fit(data.len(), bytes.len())?;
        data.copy_from_slice(bytes);
        Ok(())
    }

    fn resize(
        &mut self,
        address: &Address,
        new_size: usize,
        payer: &Address,
    ) -> Result<(), ProgramError> {
        let account = self.live_account(address)?;
        let payer = self.account(payer)?;
        if new_size >= account.data_len() {
            fund_then_resize(payer, account, new_size)
        } else {
            resize_then_refund(payer, account, new_size)
        }
    }

    fn free(&mut self, address: &Address, recipient: &Address) -> Result<u64, ProgramError> {
        let account = self.live_account(address)?;
        let recipient = self.account(recipient)?;

        let refund = account.lamports();
        let recipient_lamports = recipient
            .lamports()
            .checked_add(refund)
            .ok_or(JournalError::ArithmeticOverflow)?;
        recipient.set_lamports(recipient_lamports);
        account.set_lamports(0);
        account.close()?;

        Ok(refund)
    }
}

/// Reads the timestamp from the clock sysvar.
#[derive(Clone, Copy, Debug, Default)]
pub struct SysvarClock;

impl ClockSource for SysvarClock {
    type Error = ProgramError;

    #[inline(always)]
    fn unix_timestamp(&self) -> Result<i64, ProgramError> {
        Ok(Clock::get()?.unix_timestamp)
    }
}
