//! Hexadecimal helpers, for test fixtures and for logging frames.
use std::fmt::Write;

use bytes::{ Bytes, BytesMut, BufMut };

use crate::{ Frame, WebsocketError, WebsocketResult };

/// Build a byte sequence out of hexadecimal values, one byte per value.
///
/// Values may carry a `0x` prefix and use either case.
///
/// ```
/// use websocket_bits::hex::hex_array_to_bytes;
///
/// assert_eq!(&hex_array_to_bytes(&["41", "42"]).unwrap()[..], b"AB");
/// ```
pub fn hex_array_to_bytes<I, S>(values: I) -> WebsocketResult<Bytes>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let values = values.into_iter();
    let mut buf = BytesMut::with_capacity(values.size_hint().0);

    for value in values {
        let value = value.as_ref();
        let digits = value.trim();
        let digits = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")).unwrap_or(digits);

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(WebsocketError::InvalidHex { value: value.to_string() })
        }

        let byte = u8::from_str_radix(digits, 16)
            .map_err(|_| WebsocketError::InvalidHex { value: value.to_string() })?;

        buf.put_u8(byte);
    }

    Ok(buf.freeze())
}

/// Lowercase hex rendering of a byte sequence frame, two digits per byte.
pub fn frame_to_hex(frame: &Frame) -> WebsocketResult<String> {
    Ok(bytes_to_hex(frame.as_bytes()?))
}

pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut hex = String::with_capacity(bytes.len() * 2);

    for byte in bytes {
        // writing into a String cannot fail
        let _ = write!(hex, "{:02x}", byte);
    }

    hex
}
