use std::convert::TryFrom;

use bytes::{ Buf, BufMut, Bytes, BytesMut };
use tokio_util::codec::{ Decoder, Encoder };
use tracing::{ debug, trace };

use crate::frame::{ apply_mask, FrameHeader };
use crate::hex::bytes_to_hex;
use crate::{ WebsocketError, WebsocketResult };

/// Upper bound on what `decode` reserves ahead of a partial frame. The
/// declared length comes off the wire, so it is never reserved in one go.
const RESERVE_CHUNK: usize = 64 * 1024;

/// One frame as it travels on the wire. The payload is always held unmasked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireFrame {
    pub header: FrameHeader,
    pub payload: Bytes,
}

/// Reads and writes single frames. Nothing is remembered between frames:
/// reassembling fragmented messages is up to the caller.
#[derive(Debug, Default, Clone, Copy)]
pub struct WireCodec {
    max_payload_len: Option<u64>,
}

impl WireCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse frames that announce more than `max` payload bytes, before any
    /// of the payload is buffered.
    pub fn with_max_payload_len(max: u64) -> Self {
        Self { max_payload_len: Some(max) }
    }

    fn check_payload_len(&self, len: u64) -> WebsocketResult<usize> {
        if let Some(max) = self.max_payload_len {
            if len > max {
                debug!(len = len, max = max, "rejecting oversized frame");
                return Err(WebsocketError::PayloadTooLarge { len, max })
            }
        }

        usize::try_from(len).map_err(|_| WebsocketError::PayloadTooLarge { len, max: usize::max_value() as u64 })
    }
}

impl Decoder for WireCodec {
    type Item = WireFrame;
    type Error = WebsocketError;

    fn decode(&mut self, buf: &mut BytesMut) -> WebsocketResult<Option<Self::Item>> {
        let (header, header_len) = match FrameHeader::parse(&buf[..])? {
            Some(parsed) => parsed,
            None => return Ok(None),
        };

        let payload_len = self.check_payload_len(header.payload_len)?;
        let frame_len = header_len.checked_add(payload_len).ok_or(WebsocketError::PayloadTooLarge {
            len: header.payload_len,
            max: (usize::max_value() - header_len) as u64,
        })?;

        if buf.len() < frame_len {
            buf.reserve((frame_len - buf.len()).min(RESERVE_CHUNK));
            return Ok(None)
        }

        trace!(
            opcode = ?header.opcode,
            fin = header.fin,
            payload_len = header.payload_len,
            header = %bytes_to_hex(&buf[..header_len]),
            "decoded frame header"
        );

        buf.advance(header_len);
        let mut payload = buf.split_to(payload_len);

        if let Some(key) = header.masking_key {
            apply_mask(&mut payload, key, 0);
        }

        Ok(Some(WireFrame { header, payload: payload.freeze() }))
    }
}

impl Encoder<WireFrame> for WireCodec {
    type Error = WebsocketError;

    fn encode(&mut self, frame: WireFrame, buf: &mut BytesMut) -> WebsocketResult<()> {
        let WireFrame { mut header, payload } = frame;

        header.payload_len = payload.len() as u64;
        header.mask = header.masking_key.is_some();
        self.check_payload_len(header.payload_len)?;

        let start = buf.len();
        header.encode(buf)?;

        trace!(
            opcode = ?header.opcode,
            fin = header.fin,
            payload_len = header.payload_len,
            header = %bytes_to_hex(&buf[start..]),
            "encoded frame header"
        );

        let payload_start = buf.len();
        buf.put_slice(&payload);

        if let Some(key) = header.masking_key {
            apply_mask(&mut buf[payload_start..], key, 0);
        }

        Ok(())
    }
}
