//! REFERENCE
//! =========
//! [RFC 6455 5.2](https://tools.ietf.org/html/rfc6455#section-5.2)
//!
//!  ```ignore
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-------+-+-------------+-------------------------------+
//! |F|R|R|R| opcode|M| Payload len |    Extended payload length    |
//! |I|S|S|S|  (4)  |A|     (7)     |             (16/64)           |
//! |N|V|V|V|       |S|             |   (if payload len==126/127)   |
//! | |1|2|3|       |K|             |                               |
//! +-+-+-+-+-------+-+-------------+ - - - - - - - - - - - - - - - +
//! |     Extended payload length continued, if payload len == 127  |
//! + - - - - - - - - - - - - - - - +-------------------------------+
//! |                               |Masking-key, if MASK set to 1  |
//! +-------------------------------+-------------------------------+
//! | Masking-key (continued)       |          Payload Data         |
//! +-------------------------------- - - - - - - - - - - - - - - - +
//! ```
//!
//! Byte 0 is read with `nth_bit` (FIN, RSV1..3) and `part_of_byte` (opcode),
//! byte 1 with `nth_bit` (MASK) and its low 7 bits (length code). A code of
//! 126 means bytes 2..=3 hold the length, 127 means bytes 2..=9 do; the
//! masking key, when present, is the next 4 bytes.
use bytes::{ BytesMut, BufMut };

use crate::bits::{ nth_bit, part_of_byte };
use crate::convert::int_to_bytes;
use crate::{ Frame, Opcode, WebsocketError, WebsocketResult };

/// Longest possible header: 2 bytes, 8 bytes of length, 4 bytes of key.
pub const MAX_HEADER_LEN: usize = 14;

const LEN_16: u8 = 126;
const LEN_64: u8 = 127;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub fin: bool,                      // 1 bit
    pub rsv: u8,                        // 3 bits, RSV1 is 0b100
    pub opcode: Opcode,                 // 4 bits
    pub mask: bool,                     // 1 bit
    pub payload_len: u64,               // 7, 7+16 or 7+64 bits
    pub masking_key: Option<[u8; 4]>,   // 0 or 4 bytes
}

impl FrameHeader {
    /// Read a header from the start of `buf`.
    ///
    /// Returns `Ok(None)` while `buf` is too short to hold the whole header,
    /// otherwise the header and the number of bytes it takes.
    pub fn parse(buf: &[u8]) -> WebsocketResult<Option<(Self, usize)>> {
        if buf.len() < 2 {
            return Ok(None)
        }

        let frame = Frame::from(&buf[..buf.len().min(MAX_HEADER_LEN)]);

        let second = frame.nth_byte(1)?;
        let mask = nth_bit(second, 1)? == 1;
        let len_code = second & 0x7F;

        let ext_len = match len_code {
            LEN_16 => 2,
            LEN_64 => 8,
            _ => 0,
        };
        let header_len = 2 + ext_len + if mask { 4 } else { 0 };

        if buf.len() < header_len {
            return Ok(None)
        }

        let first = frame.nth_byte(0)?;
        let rsv = (nth_bit(first, 2)? << 2) | (nth_bit(first, 3)? << 1) | nth_bit(first, 4)?;

        let payload_len = match len_code {
            LEN_16 => frame.bytes_from_to(2, 3, false)?,
            LEN_64 => frame.bytes_from_to(2, 9, true)?,
            len => u64::from(len),
        };

        let masking_key = if mask {
            let from = 2 + ext_len;
            let key = frame.bytes_from_to(from, from + 3, false)? as u32;
            Some(key.to_be_bytes())
        } else {
            None
        };

        let header = Self {
            fin: nth_bit(first, 1)? == 1,
            rsv,
            opcode: Opcode::from_nibble(part_of_byte(first, 2)?),
            mask,
            payload_len,
            masking_key,
        };

        Ok(Some((header, header_len)))
    }

    /// Number of bytes `encode` writes.
    pub fn header_len(&self) -> usize {
        let ext_len = match self.payload_len {
            0..=125 => 0,
            126..=0xFFFF => 2,
            _ => 8,
        };

        2 + ext_len + if self.masking_key.is_some() { 4 } else { 0 }
    }

    /// Write the header, using the shortest length encoding.
    ///
    /// The MASK bit follows `masking_key`, not the `mask` field. An `rsv`
    /// wider than 3 bits is refused and nothing is written.
    pub fn encode(&self, dst: &mut BytesMut) -> WebsocketResult<()> {
        if self.rsv > 0x07 {
            return Err(WebsocketError::InvalidRsv { rsv: self.rsv })
        }

        dst.reserve(self.header_len());

        dst.put_u8(((self.fin as u8) << 7) | (self.rsv << 4) | self.opcode.as_nibble());

        let mask_bit = if self.masking_key.is_some() { 0x80 } else { 0x00 };

        match self.payload_len {
            len @ 0..=125 => dst.put_u8(mask_bit | len as u8),
            len @ 126..=0xFFFF => {
                dst.put_u8(mask_bit | LEN_16);
                dst.put_slice(&int_to_bytes(len, Some(2)));
            },
            len => {
                dst.put_u8(mask_bit | LEN_64);
                dst.put_slice(&int_to_bytes(len, Some(8)));
            },
        }

        if let Some(key) = self.masking_key {
            dst.put_slice(&key);
        }

        Ok(())
    }
}

/// XOR `payload` with the masking key (RFC 6455 5.3).
///
/// `offset` is the position of `payload[0]` within the whole frame payload,
/// so a payload can be unmasked in pieces. Applying it twice is a no-op.
pub fn apply_mask(payload: &mut [u8], key: [u8; 4], offset: usize) {
    for (i, byte) in payload.iter_mut().enumerate() {
        *byte ^= key[(offset + i) % 4];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(header: &FrameHeader) -> BytesMut {
        let mut buf = BytesMut::new();
        header.encode(&mut buf).unwrap();
        buf
    }

    #[test]
    fn parses_a_masked_text_header() {
        // "Hello" from a client, RFC 6455 5.7
        let buf = [0x81, 0x85, 0x37, 0xfa, 0x21, 0x3d, 0x7f, 0x9f, 0x4d, 0x51, 0x58];
        let (header, len) = FrameHeader::parse(&buf).unwrap().unwrap();

        assert_eq!(len, 6);
        assert!(header.fin);
        assert_eq!(header.rsv, 0);
        assert_eq!(header.opcode, Opcode::Text);
        assert!(header.mask);
        assert_eq!(header.payload_len, 5);
        assert_eq!(header.masking_key, Some([0x37, 0xfa, 0x21, 0x3d]));

        let mut payload = buf[len..].to_vec();
        apply_mask(&mut payload, header.masking_key.unwrap(), 0);
        assert_eq!(&payload[..], b"Hello");
    }

    #[test]
    fn reads_rsv_bits_and_reserved_opcodes() {
        let (header, _) = FrameHeader::parse(&[0b0101_0011, 0x00]).unwrap().unwrap();
        assert!(!header.fin);
        assert_eq!(header.rsv, 0b101);
        assert_eq!(header.opcode, Opcode::RsvNonControl(0x3));
    }

    #[test]
    fn waits_for_the_whole_header() {
        assert!(FrameHeader::parse(&[]).unwrap().is_none());
        assert!(FrameHeader::parse(&[0x82]).unwrap().is_none());
        assert!(FrameHeader::parse(&[0x82, 0x7E, 0x01]).unwrap().is_none());
        assert!(FrameHeader::parse(&[0x82, 0x7F, 0, 0, 0, 0, 0, 1, 0]).unwrap().is_none());
        assert!(FrameHeader::parse(&[0x82, 0x81, 1, 2, 3]).unwrap().is_none());
    }

    #[test]
    fn extended_lengths_survive_a_trip() {
        for len in [0u64, 125, 126, 0xFFFF, 0x1_0000, u64::max_value()].iter() {
            let header = FrameHeader {
                fin: true,
                opcode: Opcode::Binary,
                payload_len: *len,
                ..Default::default()
            };
            let buf = encoded(&header);
            assert_eq!(buf.len(), header.header_len());

            let (parsed, consumed) = FrameHeader::parse(&buf).unwrap().unwrap();
            assert_eq!(consumed, buf.len());
            assert_eq!(parsed, header);
        }
    }

    #[test]
    fn uses_the_shortest_length_encoding() {
        let header = FrameHeader { payload_len: 256, ..Default::default() };
        assert_eq!(&encoded(&header)[..], &[0x00, 0x7E, 0x01, 0x00]);

        let header = FrameHeader { payload_len: 0x1_0000, ..Default::default() };
        assert_eq!(&encoded(&header)[..], &[0x00, 0x7F, 0, 0, 0, 0, 0, 1, 0, 0]);
    }

    #[test]
    fn refuses_rsv_wider_than_three_bits() {
        let mut buf = BytesMut::new();
        let header = FrameHeader { rsv: 0b1000, ..Default::default() };

        assert!(matches!(header.encode(&mut buf), Err(WebsocketError::InvalidRsv { rsv: 0b1000 })));
        assert!(buf.is_empty());

        let header = FrameHeader { rsv: 0b111, ..Default::default() };
        assert_eq!(&encoded(&header)[..], &[0x70, 0x00]);
    }

    #[test]
    fn writes_the_masking_key() {
        let header = FrameHeader {
            fin: true,
            opcode: Opcode::Ping,
            mask: true,
            payload_len: 0,
            masking_key: Some([1, 2, 3, 4]),
            ..Default::default()
        };
        assert_eq!(&encoded(&header)[..], &[0x89, 0x80, 1, 2, 3, 4]);
    }

    #[test]
    fn masking_in_pieces_matches_masking_at_once() {
        let key = [0xAA, 0xBB, 0xCC, 0xDD];
        let mut whole = b"websocket payload".to_vec();
        let mut pieces = whole.clone();

        apply_mask(&mut whole, key, 0);
        let (head, tail) = pieces.split_at_mut(5);
        apply_mask(head, key, 0);
        apply_mask(tail, key, 5);
        assert_eq!(whole, pieces);

        apply_mask(&mut whole, key, 0);
        assert_eq!(&whole[..], b"websocket payload");
    }
}
