// SPDX-License-Identifier: GPL-2.0 OR MIT

/*! An XDR decoder.
 *
 * [XDR](https://www.rfc-editor.org/rfc/rfc4506) is a standard of encoding
 * numbers and strings to bytes.
 *
 * - Boolean values are encoded as a [`u32`], where any non zero value is
 *   [`true`].
 * - [`i16`] and [`u16`] are encoded as [`i32`] and [`u32`], since that is the
 *   minimum XDR encoding size.
 * - Numbers are encoded in big endian format.
 * - Strings are encoded as a length followed by the bytes, padded to a
 *   multiple of four. The length does not include the padding.
 * - Fixed length byte blocks are padded to a multiple of four.
 *
 * [`XdrDecoder`] only moves forward, and can never read past the end of the
 * byte range it was clamped to.
 */
use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;
use core::marker::Sized;
use core::num;

use log::warn;

#[cfg(feature = "std")]
use std::error;

////////////////////////////////////////////////////////////////////////////////

/// XDR alignment in bytes.
pub const XDR_ALIGNMENT: usize = 4;

/** Rounds `length` up to a multiple of [`XDR_ALIGNMENT`].
 *
 * Returns [`None`] on overflow.
 *
 * ```
 * use rnv::phys::xdr_padded_length;
 *
 * assert_eq!(xdr_padded_length(0), Some(0));
 * assert_eq!(xdr_padded_length(1), Some(4));
 * assert_eq!(xdr_padded_length(4), Some(4));
 * assert_eq!(xdr_padded_length(7), Some(8));
 * assert_eq!(xdr_padded_length(usize::MAX), None);
 * ```
 */
pub fn xdr_padded_length(length: usize) -> Option<usize> {
    let remainder = length % XDR_ALIGNMENT;
    if remainder == 0 {
        Some(length)
    } else {
        length.checked_add(XDR_ALIGNMENT - remainder)
    }
}

////////////////////////////////////////////////////////////////////////////////

/** An XDR decoder.
 *
 * The decoder is clamped to the byte range `[min_offset, max_offset)` of
 * `data`. Offsets reported in errors are relative to the start of `data`.
 */
pub struct XdrDecoder<'a> {
    data: &'a [u8],
    offset: usize,
    min_offset: usize,
    max_offset: usize,
}

impl fmt::Debug for XdrDecoder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Change debug printing to print length instead of raw data.
        f.debug_struct("XdrDecoder")
            .field("length", &self.data.len())
            .field("offset", &self.offset)
            .field("min_offset", &self.min_offset)
            .field("max_offset", &self.max_offset)
            .finish()
    }
}

impl<'a> XdrDecoder<'a> {
    /** Initializes an [`XdrDecoder`] over all of `data`.
     *
     * ```
     * use rnv::phys::XdrDecoder;
     *
     * let data = &[0x00, 0x00, 0x13, 0x88];
     * let mut decoder = XdrDecoder::from_bytes(data);
     *
     * assert_eq!(decoder.len(), 4);
     * assert_eq!(decoder.get_u32().unwrap(), 5000);
     * assert!(decoder.is_empty());
     * ```
     */
    pub fn from_bytes(data: &'a [u8]) -> XdrDecoder<'a> {
        XdrDecoder {
            data,
            offset: 0,
            min_offset: 0,
            max_offset: data.len(),
        }
    }

    /** Initializes an [`XdrDecoder`] from a slice of clamped bytes.
     *
     * The same as [`XdrDecoder::from_bytes`], but clamps minimum and maximum
     * offsets.
     *
     * # Errors
     *
     * Returns [`XdrDecodeError::InvalidClamp`] if the range is not in `data`.
     *
     * # Examples
     *
     * Basic usage:
     *
     * ```
     * use rnv::phys::XdrDecoder;
     *
     * // Some bytes.
     * let data = &[
     *     0x12, 0x34, 0x56, 0x78, 0x9a, 0xbc, 0xde, 0xf0,
     *     0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88,
     * ];
     *
     * // Create decoder.
     * let mut decoder = XdrDecoder::from_bytes_clamped(data, 8, 4).unwrap();
     * assert_eq!(decoder.len(), 4);
     *
     * // Decode bytes.
     * let a = decoder.get_u32().unwrap();
     * assert_eq!(a, 0x11223344);
     *
     * // Will fail due to clamp.
     * assert!(decoder.get_u32().is_err());
     *
     * // Range is not inside of data.
     * assert!(XdrDecoder::from_bytes_clamped(data, 12, 8).is_err());
     * ```
     */
    pub fn from_bytes_clamped(
        data: &'a [u8],
        offset: usize,
        length: usize,
    ) -> Result<XdrDecoder<'a>, XdrDecodeError> {
        if offset > data.len() || data.len() - offset < length {
            return Err(XdrDecodeError::InvalidClamp {
                capacity: data.len(),
                offset,
                length,
            });
        }

        Ok(XdrDecoder {
            data,
            offset,
            min_offset: offset,
            max_offset: offset + length,
        })
    }

    /** Creates a decoder clamped to the next `length` bytes of this decoder.
     *
     * This decoder is not advanced.
     *
     * # Errors
     *
     * Returns [`XdrDecodeError::EndOfInput`] if there are fewer than `length`
     * bytes remaining.
     *
     * ```
     * use rnv::phys::XdrDecoder;
     *
     * let data = &[0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x02];
     * let mut decoder = XdrDecoder::from_bytes(data);
     *
     * let mut nested = decoder.split(4).unwrap();
     * assert_eq!(nested.get_u32().unwrap(), 1);
     * assert!(nested.get_u32().is_err());
     *
     * assert_eq!(decoder.offset(), 0);
     * assert!(decoder.split(9).is_err());
     * ```
     */
    pub fn split(&self, length: usize) -> Result<XdrDecoder<'a>, XdrDecodeError> {
        self.check_need(length)?;

        Ok(XdrDecoder {
            data: self.data,
            offset: self.offset,
            min_offset: self.offset,
            max_offset: self.offset + length,
        })
    }

    /** Decodes `count` bytes, without any padding.
     *
     * # Errors
     *
     * Returns [`XdrDecodeError::EndOfInput`] if there are not enough bytes.
     */
    pub fn get_bytes(&mut self, count: usize) -> Result<&'a [u8], XdrDecodeError> {
        self.check_need(count)?;

        let start = self.offset;
        self.offset += count;

        Ok(&self.data[start..self.offset])
    }

    /** Decodes a block of `count` bytes, followed by padding to a multiple of
     * four.
     *
     * The padding bytes are skipped, and not checked.
     *
     * # Errors
     *
     * Returns [`XdrDecodeError::EndOfInput`] if there are not enough bytes for
     * the block and its padding.
     *
     * ```
     * use rnv::phys::XdrDecoder;
     *
     * let data = &[0x61, 0x62, 0x63, 0xff, 0x64];
     * let mut decoder = XdrDecoder::from_bytes(data);
     *
     * assert_eq!(decoder.get_padded_bytes(3).unwrap(), b"abc");
     * assert_eq!(decoder.offset(), 4);
     *
     * // Need 3 more bytes for padding.
     * assert!(decoder.get_padded_bytes(1).is_err());
     * assert_eq!(decoder.offset(), 4);
     * ```
     */
    pub fn get_padded_bytes(&mut self, count: usize) -> Result<&'a [u8], XdrDecodeError> {
        let padded_count = match xdr_padded_length(count) {
            Some(v) => v,
            None => {
                return Err(XdrDecodeError::EndOfInput {
                    offset: self.offset,
                    max_offset: self.max_offset,
                    capacity: self.data.len(),
                    count,
                })
            }
        };

        self.check_need(padded_count)?;

        let start = self.offset;
        self.offset += padded_count;

        Ok(&self.data[start..start + count])
    }

    /** Decodes a length prefixed, padded byte array.
     *
     * On error, the offset is not changed.
     *
     * # Errors
     *
     * Returns [`XdrDecodeError`] if there are not enough bytes available.
     *
     * Basic usage:
     *
     * ```
     * use rnv::phys::XdrDecoder;
     *
     * // Some bytes.
     * let data = &[
     *     0x00, 0x00, 0x00, 0x03, 0x61, 0x62, 0x63, 0x00,
     *     0x00, 0x00, 0x00, 0x0c, 0x61, 0x62, 0x63, 0x64,
     * ];
     *
     * // Create decoder.
     * let mut decoder = XdrDecoder::from_bytes(data);
     *
     * // Decode values.
     * let a = decoder.get_opaque().unwrap();
     * assert_eq!(a, b"abc");
     *
     * // Need 8 more bytes for array.
     * assert!(decoder.get_opaque().is_err());
     * assert_eq!(decoder.offset(), 8);
     * ```
     */
    pub fn get_opaque(&mut self) -> Result<&'a [u8], XdrDecodeError> {
        let offset = self.offset;

        let length = self.get_usize()?;

        match self.get_padded_bytes(length) {
            Ok(v) => Ok(v),
            Err(err) => {
                self.offset = offset;
                Err(err)
            }
        }
    }

    /** Decodes a length prefixed, padded string.
     *
     * Bytes that are not valid UTF8 are replaced with
     * [`char::REPLACEMENT_CHARACTER`]. Valid strings are borrowed from the
     * input.
     *
     * # Errors
     *
     * Returns [`XdrDecodeError`] if there are not enough bytes available.
     *
     * ```
     * use rnv::phys::XdrDecoder;
     *
     * let data = &[
     *     0x00, 0x00, 0x00, 0x02, 0x62, 0x62, 0x00, 0x00,
     *     0x00, 0x00, 0x00, 0x03, 0x61, 0xff, 0x62, 0x00,
     * ];
     * let mut decoder = XdrDecoder::from_bytes(data);
     *
     * assert_eq!(decoder.get_str().unwrap(), "bb");
     *
     * // Invalid UTF8.
     * assert_eq!(decoder.get_str().unwrap(), "a\u{fffd}b");
     * assert!(decoder.is_empty());
     * ```
     */
    pub fn get_str(&mut self) -> Result<Cow<'a, str>, XdrDecodeError> {
        let offset = self.offset;
        let bytes = self.get_opaque()?;
        let value = String::from_utf8_lossy(bytes);

        if let Cow::Owned(_) = value {
            warn!(
                "XDR string of length {} at offset {offset} is not valid UTF8",
                bytes.len()
            );
        }

        Ok(value)
    }
}

impl XdrDecoder<'_> {
    /** Checks if there are enough bytes to decode from the data slice.
     *
     * # Errors
     *
     * Returns [`XdrDecodeError`] if there are not enough bytes to decode.
     */
    fn check_need(&self, count: usize) -> Result<(), XdrDecodeError> {
        if self.len() >= count {
            Ok(())
        } else {
            Err(XdrDecodeError::EndOfInput {
                offset: self.offset,
                max_offset: self.max_offset,
                capacity: self.data.len(),
                count,
            })
        }
    }

    /// Is the decoder empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of bytes remaining in the decoder.
    pub fn len(&self) -> usize {
        self.max_offset - self.offset
    }

    /// Current offset into `data`.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of bytes consumed since the start of the clamped range.
    pub fn consumed(&self) -> usize {
        self.offset - self.min_offset
    }

    /** Skips `count` bytes.
     *
     * # Errors
     *
     * Returns [`XdrDecodeError`] if there are not enough bytes.
     */
    pub fn skip(&mut self, count: usize) -> Result<(), XdrDecodeError> {
        self.check_need(count)?;
        self.offset += count;
        Ok(())
    }

    /** Skips padding up to the next multiple of four bytes, relative to the
     * start of the clamped range.
     *
     * # Errors
     *
     * Returns [`XdrDecodeError`] if there are not enough bytes.
     *
     * ```
     * use rnv::phys::XdrDecoder;
     *
     * let data = &[0; 6];
     * let mut decoder = XdrDecoder::from_bytes(data);
     *
     * decoder.skip(1).unwrap();
     * decoder.align().unwrap();
     * assert_eq!(decoder.offset(), 4);
     *
     * // Already aligned.
     * decoder.align().unwrap();
     * assert_eq!(decoder.offset(), 4);
     *
     * decoder.skip(1).unwrap();
     * assert!(decoder.align().is_err());
     * ```
     */
    pub fn align(&mut self) -> Result<(), XdrDecodeError> {
        let remainder = self.consumed() % XDR_ALIGNMENT;
        if remainder != 0 {
            self.skip(XDR_ALIGNMENT - remainder)?;
        }
        Ok(())
    }

    /** Decodes 4 bytes.
     *
     * # Errors
     *
     * Returns [`XdrDecodeError`] if there are not enough bytes available.
     */
    fn get_4_bytes(&mut self) -> Result<[u8; 4], XdrDecodeError> {
        self.check_need(4)?;

        let start = self.offset;
        let mut bytes = [0; 4];
        bytes.copy_from_slice(&self.data[start..start + 4]);
        self.offset += 4;

        Ok(bytes)
    }

    /** Decodes 8 bytes.
     *
     * # Errors
     *
     * Returns [`XdrDecodeError`] if there are not enough bytes available.
     */
    fn get_8_bytes(&mut self) -> Result<[u8; 8], XdrDecodeError> {
        self.check_need(8)?;

        let start = self.offset;
        let mut bytes = [0; 8];
        bytes.copy_from_slice(&self.data[start..start + 8]);
        self.offset += 8;

        Ok(bytes)
    }

    /** Decodes a [`bool`].
     *
     * Any non zero value is [`true`].
     *
     * # Errors
     *
     * Returns [`XdrDecodeError`] if there are not enough bytes available.
     *
     * ```
     * use rnv::phys::XdrDecoder;
     *
     * let data = &[
     *     0x00, 0x00, 0x00, 0x00,
     *     0x00, 0x00, 0x00, 0x01,
     *     0x80, 0x00, 0x00, 0x00,
     * ];
     * let mut decoder = XdrDecoder::from_bytes(data);
     *
     * assert_eq!(decoder.get_bool().unwrap(), false);
     * assert_eq!(decoder.get_bool().unwrap(), true);
     * assert_eq!(decoder.get_bool().unwrap(), true);
     * assert!(decoder.get_bool().is_err());
     * ```
     */
    pub fn get_bool(&mut self) -> Result<bool, XdrDecodeError> {
        Ok(self.get_u32()? != 0)
    }

    /** Decodes a [`f64`].
     *
     * # Errors
     *
     * Returns [`XdrDecodeError`] if there are not enough bytes available.
     */
    pub fn get_f64(&mut self) -> Result<f64, XdrDecodeError> {
        Ok(f64::from_bits(self.get_u64()?))
    }

    /** Decodes an [`i16`].
     *
     * The value is sign extended into a four byte slot. Only the low 16 bits
     * of the slot are kept.
     *
     * # Errors
     *
     * Returns [`XdrDecodeError`] if there are not enough bytes available.
     *
     * ```
     * use rnv::phys::XdrDecoder;
     *
     * let data = &[
     *     0xff, 0xff, 0x80, 0x00,
     *     0x00, 0x01, 0x00, 0x02,
     * ];
     * let mut decoder = XdrDecoder::from_bytes(data);
     *
     * assert_eq!(decoder.get_i16().unwrap(), -32768);
     *
     * // Upper bits are dropped.
     * assert_eq!(decoder.get_i16().unwrap(), 2);
     * assert!(decoder.is_empty());
     * ```
     */
    pub fn get_i16(&mut self) -> Result<i16, XdrDecodeError> {
        Ok(self.get_i32()? as i16)
    }

    /** Decodes an [`i32`].
     *
     * # Errors
     *
     * Returns [`XdrDecodeError`] if there are not enough bytes available.
     */
    pub fn get_i32(&mut self) -> Result<i32, XdrDecodeError> {
        Ok(i32::from_be_bytes(self.get_4_bytes()?))
    }

    /** Decodes an [`i64`].
     *
     * # Errors
     *
     * Returns [`XdrDecodeError`] if there are not enough bytes available.
     */
    pub fn get_i64(&mut self) -> Result<i64, XdrDecodeError> {
        Ok(i64::from_be_bytes(self.get_8_bytes()?))
    }

    /** Decodes a [`u16`].
     *
     * The value is right justified in a four byte slot. Only the low 16 bits
     * of the slot are kept.
     *
     * # Errors
     *
     * Returns [`XdrDecodeError`] if there are not enough bytes available.
     */
    pub fn get_u16(&mut self) -> Result<u16, XdrDecodeError> {
        Ok(self.get_u32()? as u16)
    }

    /** Decodes a [`u32`].
     *
     * # Errors
     *
     * Returns [`XdrDecodeError`] if there are not enough bytes available.
     *
     * # Examples
     *
     * Basic usage:
     *
     * ```
     * use rnv::phys::XdrDecoder;
     *
     * // Some bytes.
     * let data = &[0xf2, 0x34, 0x56, 0x78];
     *
     * // Create decoder.
     * let mut decoder = XdrDecoder::from_bytes(data);
     *
     * // Decode values.
     * let a = decoder.get_u32().unwrap();
     *
     * assert_eq!(a, 0xf2345678);
     *
     * // Need 4 bytes.
     * assert!(decoder.get_u32().is_err());
     * ```
     */
    pub fn get_u32(&mut self) -> Result<u32, XdrDecodeError> {
        Ok(u32::from_be_bytes(self.get_4_bytes()?))
    }

    /** Decodes a [`u64`].
     *
     * # Errors
     *
     * Returns [`XdrDecodeError`] if there are not enough bytes available.
     *
     * ```
     * use rnv::phys::XdrDecoder;
     *
     * let data = &[0xf2, 0x34, 0x56, 0x78, 0x9a, 0xbc, 0xde, 0xf0, 0x00];
     * let mut decoder = XdrDecoder::from_bytes(data);
     *
     * assert_eq!(decoder.get_u64().unwrap(), 0xf23456789abcdef0);
     *
     * // Need 8 bytes.
     * assert!(decoder.get_u64().is_err());
     * ```
     */
    pub fn get_u64(&mut self) -> Result<u64, XdrDecodeError> {
        Ok(u64::from_be_bytes(self.get_8_bytes()?))
    }

    /** Decodes a [`usize`] for array or string lengths.
     *
     * XDR uses unsigned 32 bit values for array and string lengths.
     *
     * # Errors
     *
     * Returns [`XdrDecodeError`] if there are not enough bytes available, or
     * value cannot be converted to [`usize`].
     */
    pub fn get_usize(&mut self) -> Result<usize, XdrDecodeError> {
        let offset = self.offset;
        let value = self.get_u32()?;

        match usize::try_from(value) {
            Ok(v) => Ok(v),
            Err(err) => {
                self.offset = offset;
                Err(XdrDecodeError::UsizeConversion { offset, value, err })
            }
        }
    }

    /** Decodes a value using the [`GetFromXdrDecoder`] trait for F.
     *
     * # Errors
     *
     * Returns [`XdrDecodeError`] in case of decoding errors.
     *
     * Basic usage:
     *
     * ```
     * use rnv::phys::XdrDecoder;
     *
     * // Some bytes.
     * let data = &[
     *     0x00, 0x00, 0x00, 0x01,                         // bool
     *     0xff, 0xff, 0x80, 0x00,                         // i16
     *     0x00, 0x00, 0x7f, 0xff,                         // u16
     *     0xed, 0xcb, 0xa9, 0x88,                         // i32
     *     0xf2, 0x34, 0x56, 0x78,                         // u32
     *     0xed, 0xcb, 0xa9, 0x87, 0x65, 0x43, 0x21, 0x10, // i64
     *     0xf2, 0x34, 0x56, 0x78, 0x9a, 0xbc, 0xde, 0xf0, // u64
     *     0x3f, 0xf8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // f64
     * ];
     *
     * // Create decoder.
     * let mut decoder = XdrDecoder::from_bytes(data);
     *
     * // Decode values.
     * let a: bool = decoder.get().unwrap();
     * let b: i16 = decoder.get().unwrap();
     * let c: u16 = decoder.get().unwrap();
     * let d: i32 = decoder.get().unwrap();
     * let e: u32 = decoder.get().unwrap();
     * let f: i64 = decoder.get().unwrap();
     * let g: u64 = decoder.get().unwrap();
     * let h: f64 = decoder.get().unwrap();
     *
     * assert_eq!(a, true);
     * assert_eq!(b, -32768);
     * assert_eq!(c, 32767);
     * assert_eq!(d, -0x12345678);
     * assert_eq!(e, 0xf2345678);
     * assert_eq!(f, -0x123456789abcdef0);
     * assert_eq!(g, 0xf23456789abcdef0);
     * assert_eq!(h, 1.5);
     * ```
     */
    pub fn get<F: GetFromXdrDecoder>(&mut self) -> Result<F, XdrDecodeError> {
        F::get_from_decoder(self)
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Get a value from an [`XdrDecoder`].
pub trait GetFromXdrDecoder: Sized {
    /// Byte size of one encoded value.
    const XDR_SIZE: usize;

    /// Get a value from an [`XdrDecoder`].
    fn get_from_decoder(decoder: &mut XdrDecoder<'_>) -> Result<Self, XdrDecodeError>;
}

impl GetFromXdrDecoder for bool {
    const XDR_SIZE: usize = 4;

    fn get_from_decoder(decoder: &mut XdrDecoder<'_>) -> Result<bool, XdrDecodeError> {
        decoder.get_bool()
    }
}

impl GetFromXdrDecoder for f64 {
    const XDR_SIZE: usize = 8;

    fn get_from_decoder(decoder: &mut XdrDecoder<'_>) -> Result<f64, XdrDecodeError> {
        decoder.get_f64()
    }
}

impl GetFromXdrDecoder for i16 {
    const XDR_SIZE: usize = 4;

    fn get_from_decoder(decoder: &mut XdrDecoder<'_>) -> Result<i16, XdrDecodeError> {
        decoder.get_i16()
    }
}

impl GetFromXdrDecoder for i32 {
    const XDR_SIZE: usize = 4;

    fn get_from_decoder(decoder: &mut XdrDecoder<'_>) -> Result<i32, XdrDecodeError> {
        decoder.get_i32()
    }
}

impl GetFromXdrDecoder for i64 {
    const XDR_SIZE: usize = 8;

    fn get_from_decoder(decoder: &mut XdrDecoder<'_>) -> Result<i64, XdrDecodeError> {
        decoder.get_i64()
    }
}

impl GetFromXdrDecoder for u16 {
    const XDR_SIZE: usize = 4;

    fn get_from_decoder(decoder: &mut XdrDecoder<'_>) -> Result<u16, XdrDecodeError> {
        decoder.get_u16()
    }
}

impl GetFromXdrDecoder for u32 {
    const XDR_SIZE: usize = 4;

    fn get_from_decoder(decoder: &mut XdrDecoder<'_>) -> Result<u32, XdrDecodeError> {
        decoder.get_u32()
    }
}

impl GetFromXdrDecoder for u64 {
    const XDR_SIZE: usize = 8;

    fn get_from_decoder(decoder: &mut XdrDecoder<'_>) -> Result<u64, XdrDecodeError> {
        decoder.get_u64()
    }
}

////////////////////////////////////////////////////////////////////////////////

/// [`XdrDecoder`] error.
#[derive(Clone, Copy, Debug)]
pub enum XdrDecodeError {
    /// End of input data.
    EndOfInput {
        /// Byte offset of data.
        offset: usize,
        /// Maximum offset.
        max_offset: usize,
        /// Total capacity of data.
        capacity: usize,
        /// Number of bytes needed.
        count: usize,
    },

    /// Invalid clamp.
    InvalidClamp {
        /// Total capacity of data.
        capacity: usize,
        /// Offset.
        offset: usize,
        /// Length.
        length: usize,
    },

    /// Size conversion error from [`u32`] to [`usize`].
    UsizeConversion {
        /// Byte offset of data.
        offset: usize,
        /// Value.
        value: u32,
        /// Error.
        err: num::TryFromIntError,
    },
}

impl XdrDecodeError {
    /// Is this error caused by a read past the end of the input.
    pub fn is_end_of_input(&self) -> bool {
        matches!(
            self,
            XdrDecodeError::EndOfInput { .. }
                | XdrDecodeError::InvalidClamp { .. }
        )
    }
}

impl fmt::Display for XdrDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XdrDecodeError::EndOfInput {
                offset,
                max_offset,
                capacity,
                count,
            } => {
                write!(
                    f,
                    "XDR decode error, end of input at offset {offset} max_offset {max_offset} capacity {capacity} count {count}"
                )
            }
            XdrDecodeError::InvalidClamp {
                capacity,
                offset,
                length,
            } => {
                write!(
                    f,
                    "XDR decode error, invalid clamp offset {offset} length {length} for capacity {capacity}"
                )
            }
            XdrDecodeError::UsizeConversion { offset, value, err } => {
                write!(
                    f,
                    "XDR decode error, usize conversion at offset {offset}, value {value} | {err}"
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl error::Error for XdrDecodeError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            XdrDecodeError::UsizeConversion { err, .. } => Some(err),
            _ => None,
        }
    }
}
