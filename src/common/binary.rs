//! Binary record primitives shared by the cell store codec.
//!
//! Records are ordered, non-self-describing sequences of little-endian
//! primitives. A reader must consume fields in exactly the order the writer
//! produced them; the only integrity check is the end-of-record marker.
//!
//! | Type   | Encoding                                   |
//! |--------|--------------------------------------------|
//! | bool   | 1 byte, `0` or `1`                         |
//! | int    | `i64`, little-endian                       |
//! | float  | `f64`, little-endian                       |
//! | string | `u32` byte length, little-endian, + UTF-8  |
//! | marker | 1 byte, [`END_OF_RECORD`]                  |

use bytes::{BufMut, Bytes, BytesMut};
use zerocopy::{F64, FromBytes, I64, LE, U32};

/// Byte written after the last field of every record.
pub const END_OF_RECORD: u8 = 0x1E;

/// Binary parsing error type
#[derive(Debug, Clone)]
pub enum BinaryError {
    /// Not enough data to read the requested type
    InsufficientData { expected: usize, available: usize },
    /// Failed to parse the data
    ParseError(String),
}

impl std::fmt::Display for BinaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryError::InsufficientData {
                expected,
                available,
            } => {
                write!(
                    f,
                    "Insufficient data: expected {}, got {}",
                    expected, available
                )
            },
            BinaryError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for BinaryError {}

/// Result type for binary operations
pub type BinaryResult<T> = Result<T, BinaryError>;

/// Sequential reader over an encoded record.
#[derive(Debug, Clone)]
pub struct RecordReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> RecordReader<'a> {
    /// Create a reader positioned at the start of `data`.
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current byte offset.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of bytes left.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, len: usize) -> BinaryResult<&'a [u8]> {
        let end = self.pos.checked_add(len).ok_or_else(|| {
            BinaryError::ParseError(format!("length {} overflows at offset {}", len, self.pos))
        })?;
        if end > self.data.len() {
            return Err(BinaryError::InsufficientData {
                expected: end,
                available: self.data.len(),
            });
        }
        let data = self.data;
        let slice = &data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    /// Read a single-byte boolean.
    pub fn read_bool(&mut self) -> BinaryResult<bool> {
        let offset = self.pos;
        match self.take(1)?[0] {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(BinaryError::ParseError(format!(
                "invalid bool byte 0x{:02X} at offset {}",
                other, offset
            ))),
        }
    }

    /// Read a little-endian `i64`.
    pub fn read_int(&mut self) -> BinaryResult<i64> {
        I64::<LE>::read_from_bytes(self.take(8)?)
            .map(|v| v.get())
            .map_err(|_| BinaryError::ParseError("Failed to read i64".to_string()))
    }

    /// Read a little-endian `f64`.
    pub fn read_float(&mut self) -> BinaryResult<f64> {
        F64::<LE>::read_from_bytes(self.take(8)?)
            .map(|v| v.get())
            .map_err(|_| BinaryError::ParseError("Failed to read f64".to_string()))
    }

    /// Read a length-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> BinaryResult<String> {
        let len = U32::<LE>::read_from_bytes(self.take(4)?)
            .map(|v| v.get())
            .map_err(|_| BinaryError::ParseError("Failed to read string length".to_string()))?;
        let offset = self.pos;
        let raw = self.take(len as usize)?;
        std::str::from_utf8(raw).map(str::to_owned).map_err(|e| {
            BinaryError::ParseError(format!("invalid UTF-8 string at offset {}: {}", offset, e))
        })
    }

    /// Read a presence flag followed, when set, by a string.
    pub fn read_opt_string(&mut self) -> BinaryResult<Option<String>> {
        if self.read_bool()? {
            self.read_string().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Consume the end-of-record marker.
    pub fn read_end_of_record(&mut self) -> BinaryResult<()> {
        let offset = self.pos;
        let byte = self.take(1)?[0];
        if byte != END_OF_RECORD {
            return Err(BinaryError::ParseError(format!(
                "expected end of record at offset {}, found 0x{:02X}",
                offset, byte
            )));
        }
        Ok(())
    }
}

/// Append-only writer for records.
#[derive(Debug, Default)]
pub struct RecordWriter {
    buf: BytesMut,
}

impl RecordWriter {
    /// Create an empty writer.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty writer with room for `capacity` bytes.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Write a single-byte boolean.
    #[inline]
    pub fn write_bool(&mut self, value: bool) {
        self.buf.put_u8(u8::from(value));
    }

    /// Write a little-endian `i64`.
    #[inline]
    pub fn write_int(&mut self, value: i64) {
        self.buf.put_i64_le(value);
    }

    /// Write a little-endian `f64`.
    #[inline]
    pub fn write_float(&mut self, value: f64) {
        self.buf.put_f64_le(value);
    }

    /// Write a length-prefixed UTF-8 string.
    pub fn write_string(&mut self, value: &str) -> BinaryResult<()> {
        let len = u32::try_from(value.len()).map_err(|_| {
            BinaryError::ParseError(format!("string of {} bytes is too long", value.len()))
        })?;
        self.buf.put_u32_le(len);
        self.buf.put_slice(value.as_bytes());
        Ok(())
    }

    /// Write a presence flag followed, when present, by the string.
    pub fn write_opt_string(&mut self, value: Option<&str>) -> BinaryResult<()> {
        self.write_bool(value.is_some());
        match value {
            Some(s) => self.write_string(s),
            None => Ok(()),
        }
    }

    /// Write the end-of-record marker.
    #[inline]
    pub fn write_end_of_record(&mut self) {
        self.buf.put_u8(END_OF_RECORD);
    }

    /// Bytes written so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True if nothing has been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Discard the contents, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Borrow the encoded bytes.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Take the encoded bytes, leaving the writer empty.
    #[inline]
    pub fn split(&mut self) -> Bytes {
        self.buf.split().freeze()
    }
}
