//! Bit and byte level building blocks for websocket frames.
//!
//! A frame header packs FIN, RSV1..3, the opcode, MASK and a 7, 16 or 64 bit
//! payload length into its first bytes. This crate reads and writes those
//! fields, moves multi-byte fields between byte sequences and integers, and
//! rejects any value that does not fit instead of truncating it silently.
//!
//! ```
//! use websocket_bits::{ bits, Frame };
//!
//! let frame = Frame::from(&b"\x81\x7e\x01\x00"[..]);
//! let first = frame.nth_byte(0).unwrap();
//!
//! assert_eq!(bits::nth_bit(first, 1).unwrap(), 1);           // FIN
//! assert_eq!(bits::part_of_byte(first, 2).unwrap(), 0x1);    // text
//! assert_eq!(frame.bytes_from_to(2, 3, false).unwrap(), 256); // extended length
//! ```
pub mod error;
pub mod bits;
pub mod convert;
pub mod frame;
pub mod hex;
pub mod codec;
pub mod http;

pub use error::{ WebsocketError, WebsocketResult };
pub use bits::{ nth_bit, part_of_byte };
pub use convert::{ bytes_to_int, int_to_bytes };
pub use frame::{ Frame, FrameHeader, Opcode };
pub use hex::{ frame_to_hex, hex_array_to_bytes };
pub use codec::{ WireCodec, WireFrame };
pub use http::{ HttpHeaders, HttpMessage, HttpResponse };
