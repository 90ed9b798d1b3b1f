//! Program logging helpers.

/// Logs through the solana program log crate when the `debug` feature is enabled. Compiles to
/// nothing otherwise.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug")]
        solana_program_log::log!($($arg)*)
    };
}
