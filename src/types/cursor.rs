//! Forward-only little-endian byte cursor

use crate::{Result, TelemetryError};

/// Sequential reader over one immutable packet buffer.
///
/// Every read advances the position by exactly the width of the type read. There
/// is no seek or rewind. After a failed read the buffer should be abandoned.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Current offset into the buffer.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes left between the position and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Whether every byte has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self
            .position
            .checked_add(N)
            .and_then(|end| self.data.get(self.position..end))
            .ok_or_else(|| TelemetryError::unexpected_eof(self.position, N, self.remaining()))?;

        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        self.position += N;
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(u8::from_le_bytes(self.take()?))
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(i8::from_le_bytes(self.take()?))
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.take()?))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(i16::from_le_bytes(self.take()?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.take()?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.take()?))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.take()?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_le_bytes(self.take()?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.take()?))
    }

    /// Read a boolean byte. Only 0 and 1 are valid.
    pub fn read_bool(&mut self) -> Result<bool> {
        let offset = self.position;
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(TelemetryError::invalid_boolean(offset, value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_mixed_reads_advance_by_width(
            a in any::<u16>(),
            b in any::<i32>(),
            c in any::<u64>(),
            d in any::<i8>(),
        ) {
            let mut data = Vec::new();
            data.extend_from_slice(&a.to_le_bytes());
            data.extend_from_slice(&b.to_le_bytes());
            data.extend_from_slice(&c.to_le_bytes());
            data.extend_from_slice(&d.to_le_bytes());

            let mut cursor = ByteCursor::new(&data);
            prop_assert_eq!(cursor.read_u16().unwrap(), a);
            prop_assert_eq!(cursor.position(), 2);
            prop_assert_eq!(cursor.read_i32().unwrap(), b);
            prop_assert_eq!(cursor.position(), 6);
            prop_assert_eq!(cursor.read_u64().unwrap(), c);
            prop_assert_eq!(cursor.position(), 14);
            prop_assert_eq!(cursor.read_i8().unwrap(), d);
            prop_assert!(cursor.is_exhausted());
        }

        #[test]
        fn prop_f32_bits_preserved(value in any::<f32>()) {
            let data = value.to_le_bytes();
            let parsed = ByteCursor::new(&data).read_f32().unwrap();
            prop_assert_eq!(parsed.to_bits(), value.to_bits());
        }

        #[test]
        fn prop_short_buffers_report_eof(len in 0usize..8) {
            let data = vec![0u8; len];
            let mut cursor = ByteCursor::new(&data);
            match cursor.read_u64() {
                Err(TelemetryError::UnexpectedEof { offset, needed, remaining, .. }) => {
                    prop_assert_eq!(offset, 0);
                    prop_assert_eq!(needed, 8);
                    prop_assert_eq!(remaining, len);
                }
                other => prop_assert!(false, "expected UnexpectedEof, got {:?}", other),
            }
        }
    }

    #[test]
    fn little_endian_byte_order() {
        let data = [0x34, 0x12, 0x78, 0x56, 0x34, 0x12];
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_u16().unwrap(), 0x1234);
        assert_eq!(cursor.read_u32().unwrap(), 0x1234_5678);
    }

    #[test]
    fn signed_reads_sign_extend() {
        let data = [0xFE, 0xFF, 0xFF];
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_i8().unwrap(), -2);
        assert_eq!(cursor.read_i16().unwrap(), -1);
    }

    #[test]
    fn booleans_accept_only_zero_and_one() {
        let data = [0, 1, 2];
        let mut cursor = ByteCursor::new(&data);
        assert!(!cursor.read_bool().unwrap());
        assert!(cursor.read_bool().unwrap());
        match cursor.read_bool() {
            Err(TelemetryError::InvalidBoolean { offset, value, field }) => {
                assert_eq!(offset, 2);
                assert_eq!(value, 2);
                assert!(field.is_none());
            }
            other => panic!("expected InvalidBoolean, got {other:?}"),
        }
    }

    #[test]
    fn eof_mid_buffer_reports_position() {
        let data = [1, 2, 3];
        let mut cursor = ByteCursor::new(&data);
        cursor.read_u16().unwrap();
        let err = cursor.read_u32().unwrap_err();
        assert!(matches!(
            err,
            TelemetryError::UnexpectedEof { offset: 2, needed: 4, remaining: 1, .. }
        ));
    }
}
