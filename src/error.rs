use std::io;

use thiserror::Error;

pub type WebsocketResult<T> = Result<T, WebsocketError>;

#[derive(Debug, Error)]
pub enum WebsocketError {
    #[error("the given integer {value} is not a byte (0-255 required)")]
    InvalidInput { value: i64 },

    #[error("the bit number {index} is not a correct value for a byte (1-8 required)")]
    InvalidBitIndex { index: u32 },

    #[error("a byte has only 2 parts, part {part} asked")]
    UnsupportedPart { part: u32 },

    #[error("the frame is only {len} bytes large but byte {index} was requested")]
    FrameTooShort { index: usize, len: usize },

    #[error("expected a {expected} frame, {found} given")]
    InvalidFrameType { expected: &'static str, found: &'static str },

    #[error("a frame cannot be a negative number, {value} given")]
    NegativeFrame { value: i64 },

    #[error("{width} bytes cannot be folded into an integer (max 8, and 8 only when forced; forced: {forced})")]
    UnsupportedWidth { width: usize, forced: bool },

    #[error("rsv {rsv:#05b} does not fit in the 3 reserved bits")]
    InvalidRsv { rsv: u8 },

    #[error("invalid byte range {from}..={to}")]
    InvalidRange { from: usize, to: usize },

    #[error("{value:?} is not a hexadecimal byte")]
    InvalidHex { value: String },

    #[error("payload of {len} bytes exceeds the maximum of {max} bytes")]
    PayloadTooLarge { len: u64, max: u64 },

    #[error("{0}")]
    IoError(#[from] io::Error),
}
