//! Shared utilities and helpers for journal program logic.

pub mod account_resize;
