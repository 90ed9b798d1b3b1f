//! Loading and checking stored records before an operation mutates anything.

pub mod authorization;
pub mod record_buf;
