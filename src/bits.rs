//! Single bits and nibbles of a byte.
//!
//! Bits are numbered from 1 (most significant) to 8 (least significant), the
//! way RFC 6455 draws them: in the first header byte bit 1 is `FIN`, bits 2-4
//! are `RSV1..3` and the low nibble is the opcode.
use crate::{ WebsocketError, WebsocketResult };

/// Validate that `value` is a byte.
///
/// Values outside `0..=255` are rejected, never masked down.
pub fn checked_byte<B: Into<i64>>(value: B) -> WebsocketResult<u8> {
    let value = value.into();

    if value < 0 || value > 255 {
        return Err(WebsocketError::InvalidInput { value })
    }

    Ok(value as u8)
}

/// Return the bit `bit_number` (1 = most significant) of `byte`, as 0 or 1.
///
/// ```
/// use websocket_bits::bits::nth_bit;
///
/// assert_eq!(nth_bit(0b1000_0000, 1).unwrap(), 1);
/// assert_eq!(nth_bit(0b1000_0000, 2).unwrap(), 0);
/// ```
pub fn nth_bit<B: Into<i64>>(byte: B, bit_number: u32) -> WebsocketResult<u8> {
    let byte = checked_byte(byte)?;

    if bit_number < 1 || bit_number > 8 {
        return Err(WebsocketError::InvalidBitIndex { index: bit_number })
    }

    let mask = 1u8 << (8 - bit_number);

    Ok((byte & mask == mask) as u8)
}

/// Return one half of `byte`: part 1 is the high nibble, part 2 the low one.
pub fn part_of_byte<B: Into<i64>>(byte: B, part: u32) -> WebsocketResult<u8> {
    let byte = checked_byte(byte)?;

    match part {
        1 => Ok((byte & 0xF0) >> 4),
        2 => Ok(byte & 0x0F),
        part => Err(WebsocketError::UnsupportedPart { part }),
    }
}
