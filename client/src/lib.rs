//! Client-side utilities for interacting with the journal program.
//!
//! Includes instruction builders, decoded account views, a local ledger for running instructions
//! off-chain, pretty-printing utilities, and PDA derivations.

pub mod context;
pub mod e2e_helpers;
pub mod logs;
pub mod pda;
pub mod views;

pub use logs::LogColor;
