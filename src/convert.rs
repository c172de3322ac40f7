//! Conversions between integers and big-endian byte sequences.
use bytes::{ Bytes, BytesMut, BufMut };

use crate::{ WebsocketError, WebsocketResult };

/// Largest number of bytes that fit in an integer frame.
pub const MAX_INT_WIDTH: usize = 8;

/// Significant big-endian bytes of `value`, without the leading zeros.
pub(crate) fn significant_bytes(value: u64) -> ([u8; 8], usize) {
    let bytes = value.to_be_bytes();
    let skip = (value.leading_zeros() / 8) as usize;

    (bytes, skip)
}

/// Decompose `value` into its big-endian bytes.
///
/// Leading zero bytes are dropped, so `0` gives an empty sequence. With a
/// `size`, the result is left-padded with zeros when shorter, or loses its
/// high-order bytes when longer: a fixed width field keeps only what fits.
///
/// ```
/// use websocket_bits::convert::int_to_bytes;
///
/// assert_eq!(&int_to_bytes(0x0102, Some(4))[..], &[0x00, 0x00, 0x01, 0x02]);
/// assert_eq!(&int_to_bytes(0x0102, None)[..], &[0x01, 0x02]);
/// ```
pub fn int_to_bytes(value: u64, size: Option<usize>) -> Bytes {
    let (bytes, skip) = significant_bytes(value);
    let natural = &bytes[skip..];

    let size = match size {
        Some(size) => size,
        None => return Bytes::copy_from_slice(natural),
    };

    if size <= natural.len() {
        return Bytes::copy_from_slice(&natural[natural.len() - size..])
    }

    let mut buf = BytesMut::with_capacity(size);
    buf.resize(size - natural.len(), 0);
    buf.put_slice(natural);

    buf.freeze()
}

/// Fold big-endian `bytes` into an integer, most significant byte first.
///
/// At most 8 bytes are accepted. An empty slice folds to 0.
pub fn bytes_to_int(bytes: &[u8]) -> WebsocketResult<u64> {
    if bytes.len() > MAX_INT_WIDTH {
        return Err(WebsocketError::UnsupportedWidth { width: bytes.len(), forced: false })
    }

    Ok(bytes.iter().fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn pads_to_the_requested_size() {
        assert_eq!(&int_to_bytes(0x0102, Some(4))[..], &[0x00, 0x00, 0x01, 0x02]);
        assert_eq!(&int_to_bytes(0, Some(2))[..], &[0x00, 0x00]);
        assert_eq!(&int_to_bytes(0xAB, Some(9))[..], &[0, 0, 0, 0, 0, 0, 0, 0, 0xAB]);
    }

    #[test]
    fn truncates_high_order_bytes() {
        assert_eq!(&int_to_bytes(0x0102_0304, Some(2))[..], &[0x03, 0x04]);
        assert!(int_to_bytes(0xFF, Some(0)).is_empty());
    }

    #[test]
    fn suppresses_leading_zero_bytes() {
        assert!(int_to_bytes(0, None).is_empty());
        assert_eq!(&int_to_bytes(0x00FF_0000, None)[..], &[0xFF, 0x00, 0x00]);
        assert_eq!(&int_to_bytes(u64::max_value(), None)[..], &[0xFF; 8]);
    }

    #[test]
    fn folds_most_significant_first() {
        assert_eq!(bytes_to_int(&[0x01, 0x02, 0x03]).unwrap(), 66051);
        assert_eq!(bytes_to_int(&[]).unwrap(), 0);
        assert_eq!(bytes_to_int(&[0xFF; 8]).unwrap(), u64::max_value());
    }

    #[test]
    fn refuses_more_than_eight_bytes() {
        assert!(matches!(
            bytes_to_int(&[0u8; 9]),
            Err(WebsocketError::UnsupportedWidth { width: 9, .. })
        ));
    }

    proptest! {
        #[test]
        fn int_survives_a_trip_through_bytes(n in any::<u64>()) {
            prop_assert_eq!(bytes_to_int(&int_to_bytes(n, None)).unwrap(), n);
        }

        #[test]
        fn padding_restores_the_original_width(s in proptest::collection::vec(any::<u8>(), 0..=8)) {
            let n = bytes_to_int(&s).unwrap();
            prop_assert_eq!(&int_to_bytes(n, Some(s.len()))[..], &s[..]);
        }
    }
}
