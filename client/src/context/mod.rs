//! Contexts that hold the addresses an instruction needs and build the instructions from them.

pub mod journal;
