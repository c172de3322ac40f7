//! A frame is an assembly of bytes, held either as the raw byte sequence or
//! as the non-negative integer whose big-endian bytes are the same data.
//!
//! Both forms answer the same questions (`nth_byte`, `bytes_from_to`). For
//! the integer form, byte 0 is the highest byte that is not zero,
//! which is also how `int_to_bytes` lays the integer out.
use std::convert::TryFrom;

use bytes::{ Bytes, BytesMut };

use crate::convert::{ bytes_to_int, int_to_bytes, significant_bytes, MAX_INT_WIDTH };
use crate::{ WebsocketError, WebsocketResult };

pub mod header;
pub mod opcode;

pub use header::{ apply_mask, FrameHeader };
pub use opcode::Opcode;

const BYTES_FORM: &str = "byte sequence";
const VALUE_FORM: &str = "integer";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Bytes(Bytes),
    Value(u64),
}

impl Frame {
    /// Byte at `byte_number`, counting from 0.
    pub fn nth_byte(&self, byte_number: usize) -> WebsocketResult<u8> {
        match self {
            Frame::Bytes(bytes) => bytes.get(byte_number).copied().ok_or(WebsocketError::FrameTooShort {
                index: byte_number,
                len: bytes.len(),
            }),
            Frame::Value(value) => {
                let (bytes, skip) = significant_bytes(*value);
                bytes[skip..].get(byte_number).copied().ok_or(WebsocketError::FrameTooShort {
                    index: byte_number,
                    len: MAX_INT_WIDTH - skip,
                })
            },
        }
    }

    /// Fold the bytes `from..=to` into an integer, most significant first.
    ///
    /// A span of 8 bytes may set the top bit of the result; callers have to
    /// ask for it with `force_8_bytes`. More than 8 bytes never fit.
    ///
    /// ```
    /// use websocket_bits::Frame;
    ///
    /// let frame = Frame::from(&b"\x01\x02\x03"[..]);
    /// assert_eq!(frame.bytes_from_to(0, 2, false).unwrap(), 0x010203);
    /// ```
    pub fn bytes_from_to(&self, from: usize, to: usize, force_8_bytes: bool) -> WebsocketResult<u64> {
        check_width(from, to, force_8_bytes)?;

        match self {
            Frame::Bytes(bytes) => bytes_to_int(span(bytes, from, to)?),
            Frame::Value(value) => {
                let (bytes, skip) = significant_bytes(*value);
                bytes_to_int(span(&bytes[skip..], from, to)?)
            },
        }
    }

    /// Number of bytes held by the frame. For the integer form this is the
    /// number of significant bytes.
    pub fn len(&self) -> usize {
        match self {
            Frame::Bytes(bytes) => bytes.len(),
            Frame::Value(value) => MAX_INT_WIDTH - significant_bytes(*value).1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> WebsocketResult<&[u8]> {
        match self {
            Frame::Bytes(bytes) => Ok(&bytes[..]),
            Frame::Value(_) => Err(WebsocketError::InvalidFrameType { expected: BYTES_FORM, found: VALUE_FORM }),
        }
    }

    pub fn as_value(&self) -> WebsocketResult<u64> {
        match self {
            Frame::Value(value) => Ok(*value),
            Frame::Bytes(_) => Err(WebsocketError::InvalidFrameType { expected: VALUE_FORM, found: BYTES_FORM }),
        }
    }

    /// Byte sequence view of either form.
    pub fn to_bytes(&self) -> Bytes {
        match self {
            Frame::Bytes(bytes) => bytes.clone(),
            Frame::Value(value) => int_to_bytes(*value, None),
        }
    }
}

/// Validate an inclusive byte range that is about to be folded into an
/// integer and return its width.
pub(crate) fn check_width(from: usize, to: usize, force_8_bytes: bool) -> WebsocketResult<usize> {
    if from > to {
        return Err(WebsocketError::InvalidRange { from, to })
    }

    let width = to - from + 1;

    if width > MAX_INT_WIDTH || (width == MAX_INT_WIDTH && !force_8_bytes) {
        return Err(WebsocketError::UnsupportedWidth { width, forced: force_8_bytes })
    }

    Ok(width)
}

fn span(bytes: &[u8], from: usize, to: usize) -> WebsocketResult<&[u8]> {
    bytes.get(from..=to).ok_or(WebsocketError::FrameTooShort { index: to, len: bytes.len() })
}

impl From<u64> for Frame {
    fn from(value: u64) -> Self {
        Frame::Value(value)
    }
}

impl TryFrom<i64> for Frame {
    type Error = WebsocketError;

    fn try_from(value: i64) -> WebsocketResult<Self> {
        if value < 0 {
            return Err(WebsocketError::NegativeFrame { value })
        }

        Ok(Frame::Value(value as u64))
    }
}

impl From<Bytes> for Frame {
    fn from(bytes: Bytes) -> Self {
        Frame::Bytes(bytes)
    }
}

impl From<BytesMut> for Frame {
    fn from(bytes: BytesMut) -> Self {
        Frame::Bytes(bytes.freeze())
    }
}

impl From<Vec<u8>> for Frame {
    fn from(bytes: Vec<u8>) -> Self {
        Frame::Bytes(Bytes::from(bytes))
    }
}

impl From<&[u8]> for Frame {
    fn from(bytes: &[u8]) -> Self {
        Frame::Bytes(Bytes::copy_from_slice(bytes))
    }
}
