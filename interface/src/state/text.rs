//! Bounds for the two variable-length text fields.

use crate::error::JournalError;

/// The maximum byte length of a journal title. Also keeps the title within the 32-byte PDA seed
/// limit.
pub const MAX_TITLE_LEN: usize = 30;
/// The maximum byte length of a journal entry's content.
pub const MAX_CONTENT_LEN: usize = 280;

static_assertions::const_assert!(MAX_TITLE_LEN <= 32);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TextField {
    Title,
    Content,
}

impl TextField {
    #[inline(always)]
    pub const fn max_len(self) -> usize {
        match self {
            TextField::Title => MAX_TITLE_LEN,
            TextField::Content => MAX_CONTENT_LEN,
        }
    }

    /// Checks that `text` is between 1 and [`TextField::max_len`] bytes.
    #[inline(always)]
    pub fn check(self, text: &str) -> Result<(), JournalError> {
        self.check_len(text.len())
    }

    #[inline(always)]
    pub fn check_len(self, len: usize) -> Result<(), JournalError> {
        if len == 0 {
            return Err(JournalError::EmptyField);
        }
        if len > self.max_len() {
            return Err(JournalError::FieldTooLong);
        }
        Ok(())
    }

    /// Validates raw bytes as a UTF-8 text field.
    ///
    /// Length violations keep their own error kinds; invalid UTF-8 is reported as `invalid_utf8`.
    #[inline(always)]
    pub fn parse(self, bytes: &[u8], invalid_utf8: JournalError) -> Result<&str, JournalError> {
        self.check_len(bytes.len())?;
        core::str::from_utf8(bytes).map_err(|_| invalid_utf8)
    }
}
