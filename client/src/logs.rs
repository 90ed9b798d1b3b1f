//! Colored terminal output for examples and test harnesses.

use std::fmt::Display;

use colored::{
    Color,
    Colorize,
};

/// Format a key/value pair with optional color overrides.
///
/// Requires the `colored::Colorize` trait to be in scope.
///
/// Examples, where `key_color` and `value_color` are `LogColor` values:
/// - fmt_kv!(key, value)
/// - fmt_kv!(key, value, key_color)
/// - fmt_kv!(key, value, key_color, value_color)
#[macro_export]
macro_rules! fmt_kv {
    ($key:expr, $value:expr $(,)?) => {
        $crate::fmt_kv!(
            $key,
            $value,
            $crate::LogColor::Highlight,
            $crate::LogColor::FadedGray
        )
    };
    ($key:expr, $value:expr, $key_color:expr $(,)?) => {
        $crate::fmt_kv!($key, $value, $key_color, $crate::LogColor::FadedGray)
    };
    ($key:expr, $value:expr, $key_color:expr, $value_color:expr $(,)?) => {{
        let __k = ::std::string::ToString::to_string(&$key);
        let __v = ::std::string::ToString::to_string(&$value);
        ::std::format!("{}: {}", __k.color($key_color), __v.color($value_color))
    }};
}

/// Prints a key/value pair with the same arguments as [`fmt_kv!`].
#[macro_export]
macro_rules! print_kv {
    ($($arg:tt)*) => {
        ::std::println!("{}", $crate::fmt_kv!($($arg)*))
    };
}

#[derive(Clone, Copy, Debug)]
pub enum LogColor {
    Highlight,
    Success,
    Error,
    Header,
    Info,
    FadedGray,
}

impl From<LogColor> for Color {
    fn from(value: LogColor) -> Color {
        match value {
            LogColor::Highlight => Color::TrueColor { r: 255, g: 215, b: 87 },
            LogColor::Success => Color::TrueColor { r: 0, g: 200, b: 120 },
            LogColor::Error => Color::TrueColor { r: 255, g: 0, b: 45 },
            LogColor::Header => Color::TrueColor { r: 0, g: 255, b: 0 },
            LogColor::Info => Color::TrueColor { r: 0, g: 95, b: 255 },
            LogColor::FadedGray => Color::TrueColor { r: 95, g: 95, b: 95 },
        }
    }
}

pub fn fmt_divider() -> String {
    "-".repeat(80)
}

pub fn log_divider() {
    println!("{}", fmt_divider().color(LogColor::FadedGray));
}

/// Formats the outcome of a labeled step: the label in green on success, or the label and the
/// error in red on failure.
pub fn fmt_outcome<T, E: Display>(label: &str, result: &Result<T, E>) -> String {
    match result {
        Ok(_) => fmt_kv!(label, "ok", LogColor::Success),
        Err(e) => fmt_kv!(label, e, LogColor::Error, LogColor::Error),
    }
}

pub fn log_outcome<T, E: Display>(label: &str, result: &Result<T, E>) {
    println!("{}", fmt_outcome(label, result));
}
