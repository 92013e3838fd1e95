//! Primitive payload decoders.
//!
//! Three building blocks every class decoder is written in terms of:
//! 4-byte little-endian enums indexing a string table, NUL-terminated
//! strings, and a bounds-checked little-endian field cursor. All failures
//! are [`TelemetryError`] decode faults; nothing here panics on hostile
//! input.

use crate::error::{Result, TelemetryError};

/// Decode a 4-byte little-endian enum and use it to index a string table.
///
/// The region must be exactly 4 bytes; the value is read unsigned. Values at
/// or past the end of the table are an [`TelemetryError::EnumOutOfRange`]
/// fault, never a clamp.
pub fn decode_enum(raw: &[u8], table: &[&'static str]) -> Result<&'static str> {
    if raw.len() != 4 {
        return Err(TelemetryError::EnumBadSize { len: raw.len() });
    }
    let value = u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]);
    table
        .get(value as usize)
        .copied()
        .ok_or(TelemetryError::EnumOutOfRange { value, table_len: table.len() })
}

/// Split a region presumed to contain a NUL-terminated string.
///
/// Returns the prefix before the first 0x00 as text and the residue after
/// it. A region with no NUL at all is a [`TelemetryError::NotTerminated`]
/// fault. Non-UTF-8 prefixes are decoded lossily; the device speaks ASCII in
/// practice but firmware strings are not trusted.
pub fn parse_null_termed_string(region: &[u8]) -> Result<(String, &[u8])> {
    let nul = region.iter().position(|&b| b == 0).ok_or(TelemetryError::NotTerminated)?;
    let text = String::from_utf8_lossy(&region[..nul]).into_owned();
    Ok((text, &region[nul + 1..]))
}

/// Bounds-checked little-endian cursor over a payload region.
///
/// Each read consumes its field width and fails with
/// [`TelemetryError::ShortRead`] when the region runs out, carrying the
/// offset so error events can say where a frame was truncated.
#[derive(Debug)]
pub struct FieldReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> FieldReader<'a> {
    /// Create a cursor at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let available = self.data.len() - self.pos;
        if available < n {
            return Err(TelemetryError::short_read(self.pos, n, available));
        }
        let region = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(region)
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.take(1)?[0] as i8)
    }

    /// One byte; 0 is false, anything else is true.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.take(1)?[0] != 0)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        let b = self.take(2)?;
        Ok(i16::from_le_bytes([b[0], b[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        let b = self.take(4)?;
        Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        let b = self.take(8)?;
        Ok(f64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]))
    }

    /// Consume a 4-byte enum region and index `table` with it.
    pub fn read_enum(&mut self, table: &[&'static str]) -> Result<&'static str> {
        decode_enum(self.take(4)?, table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const COLORS: &[&str] = &["red", "green", "blue"];

    proptest! {
        #[test]
        fn decode_enum_is_total_on_four_byte_input(value in any::<u32>()) {
            let raw = value.to_le_bytes();
            match decode_enum(&raw, COLORS) {
                Ok(name) => {
                    prop_assert!((value as usize) < COLORS.len());
                    prop_assert_eq!(name, COLORS[value as usize]);
                }
                Err(TelemetryError::EnumOutOfRange { value: v, table_len }) => {
                    prop_assert_eq!(v, value);
                    prop_assert_eq!(table_len, COLORS.len());
                    prop_assert!(value as usize >= COLORS.len());
                }
                Err(other) => prop_assert!(false, "unexpected fault: {other}"),
            }
        }

        #[test]
        fn decode_enum_rejects_wrong_sizes(raw in prop::collection::vec(any::<u8>(), 0..16)) {
            prop_assume!(raw.len() != 4);
            let result = decode_enum(&raw, COLORS);
            let is_expected = matches!(result, Err(TelemetryError::EnumBadSize { len }) if len == raw.len());
            prop_assert!(is_expected);
        }

        #[test]
        fn null_termed_string_round_trips(
            prefix in "[a-zA-Z0-9 _./-]{0,32}",
            suffix in prop::collection::vec(any::<u8>(), 0..16),
        ) {
            let mut region = prefix.as_bytes().to_vec();
            region.push(0);
            region.extend_from_slice(&suffix);

            let (text, rest) = parse_null_termed_string(&region).unwrap();
            prop_assert_eq!(text, prefix);
            prop_assert_eq!(rest, &suffix[..]);
        }

        #[test]
        fn missing_nul_is_a_fault(region in prop::collection::vec(1u8..=255, 0..32)) {
            let result = parse_null_termed_string(&region);
            prop_assert!(matches!(result, Err(TelemetryError::NotTerminated)));
        }

        #[test]
        fn field_reader_round_trips_scalars(
            a in any::<u8>(),
            b in any::<i16>(),
            c in any::<u32>(),
            d in any::<f32>(),
            e in any::<f64>(),
        ) {
            let mut data = vec![a];
            data.extend_from_slice(&b.to_le_bytes());
            data.extend_from_slice(&c.to_le_bytes());
            data.extend_from_slice(&d.to_le_bytes());
            data.extend_from_slice(&e.to_le_bytes());

            let mut reader = FieldReader::new(&data);
            prop_assert_eq!(reader.read_u8().unwrap(), a);
            prop_assert_eq!(reader.read_i16().unwrap(), b);
            prop_assert_eq!(reader.read_u32().unwrap(), c);
            let rd = reader.read_f32().unwrap();
            prop_assert!(rd == d || (rd.is_nan() && d.is_nan()));
            let re = reader.read_f64().unwrap();
            prop_assert!(re == e || (re.is_nan() && e.is_nan()));
            prop_assert!(reader.remaining().is_empty());
        }

        #[test]
        fn field_reader_reports_truncation_offset(len in 0usize..8) {
            let data = vec![0u8; len];
            let mut reader = FieldReader::new(&data);
            let result = reader.read_f64();
            let is_expected = matches!(
                result,
                Err(TelemetryError::ShortRead { offset: 0, needed: 8, available }) if available == len
            );
            prop_assert!(is_expected);
        }
    }

    #[test]
    fn enum_at_table_boundary() {
        assert_eq!(decode_enum(&2u32.to_le_bytes(), COLORS).unwrap(), "blue");
        assert!(matches!(
            decode_enum(&3u32.to_le_bytes(), COLORS),
            Err(TelemetryError::EnumOutOfRange { value: 3, table_len: 3 })
        ));
    }

    #[test]
    fn bool_reads_any_nonzero_as_true() {
        let data = [0u8, 1, 0x7F, 0xFF];
        let mut reader = FieldReader::new(&data);
        assert!(!reader.read_bool().unwrap());
        assert!(reader.read_bool().unwrap());
        assert!(reader.read_bool().unwrap());
        assert!(reader.read_bool().unwrap());
    }

    #[test]
    fn empty_string_before_nul() {
        let (text, rest) = parse_null_termed_string(&[0, 42]).unwrap();
        assert_eq!(text, "");
        assert_eq!(rest, &[42]);
    }
}
