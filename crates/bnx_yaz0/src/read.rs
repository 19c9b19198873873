//! Decompression of Yaz0 streams
//!

use byteorder::{BigEndian, ReadBytesExt};
use std::io::{Cursor, Read};
use tracing::instrument;

use crate::error::{Error, Result};
use crate::{HEADER_SIZE, MAGIC};

/// Check whether `data` starts with the Yaz0 magic number.
///
/// A positive probe only means the payload should be decompressed before use; it says
/// nothing about the integrity of the rest of the stream.
pub fn is_compressed(data: &[u8]) -> bool {
    data.len() >= MAGIC.len() && data[..MAGIC.len()] == MAGIC
}

/// Decompress a full Yaz0 stream into a new buffer.
#[instrument(skip(data), err)]
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut header = Cursor::new(data);

    let mut magic = [0u8; 4];
    header.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(Error::InvalidStream);
    }

    let size = header.read_u32::<BigEndian>()? as usize;
    let _alignment = header.read_u32::<BigEndian>()?;
    let _reserved = header.read_u32::<BigEndian>()?;

    let body = &data[HEADER_SIZE..];
    let mut out = Vec::with_capacity(size);

    let mut pos = 0;
    let mut head = 0u8;
    let mut flags_left = 0u8;

    while out.len() < size {
        if flags_left == 0 {
            head = *body.get(pos).ok_or(Error::Truncated)?;
            pos += 1;
            flags_left = 8;
        }

        if head & 0x80 != 0 {
            out.push(*body.get(pos).ok_or(Error::Truncated)?);
            pos += 1;
        } else {
            let b0 = *body.get(pos).ok_or(Error::Truncated)? as usize;
            let b1 = *body.get(pos + 1).ok_or(Error::Truncated)? as usize;
            pos += 2;

            let distance = ((b0 & 0x0F) << 8 | b1) + 1;
            let mut length = b0 >> 4;
            if length == 0 {
                length = *body.get(pos).ok_or(Error::Truncated)? as usize + 0x12;
                pos += 1;
            } else {
                length += 2;
            }

            if distance > out.len() {
                return Err(Error::InvalidDistance {
                    distance,
                    produced: out.len(),
                });
            }

            // Copy byte by byte; the reference may overlap its own output.
            let start = out.len() - distance;
            for i in 0..length {
                let byte = out[start + i];
                out.push(byte);
            }
        }

        head <<= 1;
        flags_left -= 1;
    }

    if out.len() != size {
        return Err(Error::SizeMismatch {
            expected: size,
            actual: out.len(),
        });
    }

    Ok(out)
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::error::{Error, Result};
    use crate::read::{decompress, is_compressed};

    #[test]
    fn probe_magic() {
        assert!(is_compressed(b"Yaz0\x00\x00\x00\x00"));
        assert!(!is_compressed(b"Yaz1\x00\x00\x00\x00"));
        assert!(!is_compressed(b"Ya"));
        assert!(!is_compressed(b""));
    }

    #[test]
    fn decompress_literals() -> Result<()> {
        #[rustfmt::skip]
        let input = [
            0x59, 0x61, 0x7A, 0x30, // "Yaz0"
            0x00, 0x00, 0x00, 0x05, // size 5
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0xF8, // 5 literal flags
            0x48, 0x65, 0x6C, 0x6C, 0x6F,
        ];

        assert_eq!(decompress(&input)?, b"Hello");

        Ok(())
    }

    #[test]
    fn decompress_overlapping_backreference() -> Result<()> {
        #[rustfmt::skip]
        let input = [
            0x59, 0x61, 0x7A, 0x30,
            0x00, 0x00, 0x00, 0x05,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0xC0,             // literal, literal, reference
            0x61, 0x62,       // "ab"
            0x10, 0x01,       // length 3, distance 2 (overlaps its own output)
        ];

        assert_eq!(decompress(&input)?, b"ababa");

        Ok(())
    }

    #[test]
    fn decompress_long_run() -> Result<()> {
        // 1 literal followed by a long-form reference: 0x12 copies of the same byte
        #[rustfmt::skip]
        let input = [
            0x59, 0x61, 0x7A, 0x30,
            0x00, 0x00, 0x00, 0x13,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x80,             // literal, reference
            0x41,             // "A"
            0x00, 0x00, 0x00, // long form: length 0x12, distance 1
        ];

        assert_eq!(decompress(&input)?, vec![0x41u8; 0x13]);

        Ok(())
    }

    #[test]
    fn decompress_rejects_bad_magic() {
        let input = [0x59, 0x61, 0x7A, 0x31, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        assert!(matches!(decompress(&input), Err(Error::InvalidStream)));
    }

    #[test]
    fn decompress_rejects_truncated_body() {
        #[rustfmt::skip]
        let input = [
            0x59, 0x61, 0x7A, 0x30,
            0x00, 0x00, 0x00, 0x05,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0xF8, 0x48, 0x65, // body ends mid-group
        ];
        assert!(matches!(decompress(&input), Err(Error::Truncated)));
    }

    #[test]
    fn decompress_rejects_bad_distance() {
        #[rustfmt::skip]
        let input = [
            0x59, 0x61, 0x7A, 0x30,
            0x00, 0x00, 0x00, 0x04,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x80,             // literal, then a reference with nothing behind it
            0x61,
            0x10, 0x05,       // distance 6 > 1 byte produced
        ];
        assert!(matches!(
            decompress(&input),
            Err(Error::InvalidDistance { .. })
        ));
    }
}
