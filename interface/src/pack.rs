//! Bounds-checked little-endian cursors used by both the account record codecs and the instruction
//! data unpackers.
//!
//! Neither cursor panics: every read or write past the end of the underlying slice returns the
//! error the cursor was created with, so callers decide whether a short buffer means
//! [`JournalError::MalformedRecord`] or [`JournalError::InvalidInstructionData`].

use solana_address::Address;

use crate::{
    error::{
        JournalError,
        JournalResult,
    },
    state::{
        ADDRESS_SIZE,
        I64_SIZE,
        LEN_PREFIX_SIZE,
        U16_SIZE,
    },
};

/// A forward-only reader over a byte slice.
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    offset: usize,
    error: JournalError,
}

impl<'a> ByteReader<'a> {
    /// Creates a reader that reports `error` for any out-of-bounds or trailing-data condition.
    #[inline(always)]
    pub fn new(bytes: &'a [u8], error: JournalError) -> Self {
        Self {
            bytes,
            offset: 0,
            error,
        }
    }

    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    #[inline(always)]
    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8], JournalError> {
        if len > self.remaining() {
            return Err(self.error);
        }
        let slice = &self.bytes[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    #[inline(always)]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], JournalError> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.read_slice(N)?);
        Ok(array)
    }

    #[inline(always)]
    pub fn read_u8(&mut self) -> Result<u8, JournalError> {
        Ok(self.read_array::<1>()?[0])
    }

    #[inline(always)]
    pub fn read_u16(&mut self) -> Result<u16, JournalError> {
        Ok(u16::from_le_bytes(self.read_array::<U16_SIZE>()?))
    }

    #[inline(always)]
    pub fn read_u32(&mut self) -> Result<u32, JournalError> {
        Ok(u32::from_le_bytes(self.read_array::<LEN_PREFIX_SIZE>()?))
    }

    #[inline(always)]
    pub fn read_i64(&mut self) -> Result<i64, JournalError> {
        Ok(i64::from_le_bytes(self.read_array::<I64_SIZE>()?))
    }

    #[inline(always)]
    pub fn read_address(&mut self) -> Result<Address, JournalError> {
        Ok(Address::new_from_array(self.read_array::<ADDRESS_SIZE>()?))
    }

    /// Reads a u32 length prefix followed by that many bytes.
    ///
    /// Only the buffer bound is checked here; field-specific bounds are the caller's concern.
    #[inline(always)]
    pub fn read_length_prefixed(&mut self) -> Result<&'a [u8], JournalError> {
        let len = self.read_u32()? as usize;
        self.read_slice(len)
    }

    /// Fails if any bytes were left unread.
    #[inline(always)]
    pub fn finish(self) -> JournalResult {
        if self.remaining() != 0 {
            return Err(self.error);
        }
        Ok(())
    }
}

/// A forward-only writer into a fixed-size byte slice.
pub struct ByteWriter<'a> {
    dst: &'a mut [u8],
    offset: usize,
}

impl<'a> ByteWriter<'a> {
    #[inline(always)]
    pub fn new(dst: &'a mut [u8]) -> Self {
        Self { dst, offset: 0 }
    }

    #[inline(always)]
    pub fn write(&mut self, src: &[u8]) -> JournalResult {
        let end = self
            .offset
            .checked_add(src.len())
            .ok_or(JournalError::ArithmeticOverflow)?;
        if end > self.dst.len() {
            return Err(JournalError::CapacityExceeded);
        }
        self.dst[self.offset..end].copy_from_slice(src);
        self.offset = end;
        Ok(())
    }

    #[inline(always)]
    pub fn write_u8(&mut self, value: u8) -> JournalResult {
        self.write(&[value])
    }

    /// Writes a u32 length prefix followed by `bytes`.
    #[inline(always)]
    pub fn write_length_prefixed(&mut self, bytes: &[u8]) -> JournalResult {
        let len = u32::try_from(bytes.len()).map_err(|_| JournalError::FieldTooLong)?;
        self.write(&len.to_le_bytes())?;
        self.write(bytes)
    }

    /// Returns the number of bytes written.
    #[inline(always)]
    pub fn finish(self) -> usize {
        self.offset
    }
}
