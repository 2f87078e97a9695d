// SPDX-License-Identifier: GPL-2.0 OR MIT

/*! Name Value list decoder.
 *
 * Decodes an XDR encoded [`NvList`] into owned values. All decoding state is
 * local to a single call of [`NvList::from_bytes`].
 *
 * Value encoding
 * ==============
 *
 * ```text
 * +---------------------+---------------------------------------------+
 * | Family              | Encoding of count elements                  |
 * +---------------------+---------------------------------------------+
 * | Boolean             | 4 bytes each, non zero is true              |
 * | Byte, Int8, Uint8   | 1 byte each, block padded to 4 bytes        |
 * | Int16, Uint16       | 4 bytes each, right justified               |
 * | Int32, Uint32       | 4 bytes each                                |
 * | Int64, Uint64       | 8 bytes each                                |
 * | Double, HrTime      | 8 bytes each                                |
 * | String              | length, bytes, padded to 4 bytes, each      |
 * | NvList              | nested list, bounded by the pair            |
 * | Unknown             | rest of the pair, undecoded                 |
 * +---------------------+---------------------------------------------+
 * ```
 */
use alloc::string::String;
use alloc::vec::Vec;

use log::{trace, warn};

use crate::phys::{
    GetFromXdrDecoder, NvDataType, NvDecodeError, NvHeader, NvList, NvPair, NvUnique, NvValue,
    XdrDecoder,
};

////////////////////////////////////////////////////////////////////////////////

/** Limits applied while decoding an [`NvList`].
 *
 * ```
 * use rnv::phys::{NvDecodeLimits, NvList};
 *
 * let limits = NvDecodeLimits {
 *     max_depth: 4,
 *     ..NvDecodeLimits::default()
 * };
 *
 * // Only the encoding header.
 * assert!(NvList::from_bytes_with_limits(&[1, 0, 0, 0], &limits).is_err());
 * ```
 */
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NvDecodeLimits {
    /// Maximum nesting of lists below the outer list.
    pub max_depth: usize,

    /// Maximum byte size of the input.
    pub max_size: usize,

    /** Decode arrays of nested lists.
     *
     * When not set, [`NvDataType::NvListArray`] pairs, and
     * [`NvDataType::NvList`] pairs with a count greater than one, are kept as
     * [`NvValue::Raw`].
     */
    pub nv_list_arrays: bool,
}

impl NvDecodeLimits {
    /// Default maximum nesting of lists.
    pub const DEFAULT_MAX_DEPTH: usize = 32;

    /// Default maximum input size (16 MiB).
    pub const DEFAULT_MAX_SIZE: usize = 16 * 1024 * 1024;
}

impl Default for NvDecodeLimits {
    fn default() -> Self {
        NvDecodeLimits {
            max_depth: NvDecodeLimits::DEFAULT_MAX_DEPTH,
            max_size: NvDecodeLimits::DEFAULT_MAX_SIZE,
            nv_list_arrays: false,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////

/** Decodes an outer [`NvList`], starting with its [`NvHeader`].
 *
 * # Errors
 *
 * Returns [`NvDecodeError`] if the header is not supported, the input is
 * malformed or truncated, or `limits` are exceeded.
 */
pub(crate) fn decode_nv_list(
    data: &[u8],
    limits: &NvDecodeLimits,
) -> Result<NvList, NvDecodeError> {
    if data.len() > limits.max_size {
        return Err(NvDecodeError::TooLarge {
            size: data.len(),
            max_size: limits.max_size,
        });
    }

    let header = NvHeader::from_bytes(data)?;
    header.check_supported()?;

    let mut decoder =
        XdrDecoder::from_bytes_clamped(data, NvHeader::SIZE, data.len() - NvHeader::SIZE)?;

    let list_decoder = NvListDecoder { header, limits };
    list_decoder.decode_list(&mut decoder, 0)
}

/// Decoder of one [`NvList`] tree.
struct NvListDecoder<'l> {
    /// Header of the outer list, inherited by nested lists.
    header: NvHeader,

    /// Limits.
    limits: &'l NvDecodeLimits,
}

impl NvListDecoder<'_> {
    /// Byte size of the list version and flags.
    const LIST_HEADER_SIZE: usize = 8;

    /** Decodes a list at `depth`: version, flags, and pairs up to the end
     * marker, or the end of `decoder`.
     */
    fn decode_list(
        &self,
        decoder: &mut XdrDecoder<'_>,
        depth: usize,
    ) -> Result<NvList, NvDecodeError> {
        if depth > self.limits.max_depth {
            return Err(NvDecodeError::MaxDepth {
                max_depth: self.limits.max_depth,
            });
        }

        let version = decoder.get_u32()?;
        let flags = decoder.get_u32()?;

        if version != 0 {
            warn!("NV list at offset {} has unknown version {version}", decoder.offset());
        }
        if flags & !NvUnique::FLAGS_MASK != 0 || NvUnique::try_from(flags).is_err() {
            warn!("NV list at offset {} has unknown flags {flags:#x}", decoder.offset());
        }

        let mut list = NvList::new(self.header, version, flags);

        while let Some(pair) = self.decode_pair(decoder, depth)? {
            list.insert(pair);
        }

        Ok(list)
    }

    /** Decodes the next pair.
     *
     * Returns [`None`] at the end of the list. The decoder is always left at
     * the start of the pair plus its encoded size.
     */
    fn decode_pair(
        &self,
        decoder: &mut XdrDecoder<'_>,
        depth: usize,
    ) -> Result<Option<NvPair>, NvDecodeError> {
        // End of input is also the end of the list.
        if decoder.is_empty() {
            return Ok(None);
        }

        let starting_offset = decoder.offset();
        let encoded_size = decoder.get_u32()?;

        // The end marker is a zero encoded size, followed by a zero decoded
        // size. Only the encoded size is required to be present.
        if encoded_size == 0 {
            if decoder.len() >= 4 {
                decoder.skip(4)?;
            }
            return Ok(None);
        }

        let encoded_len = encoded_size as usize;
        let used = decoder.offset() - starting_offset;
        let rest_len = match encoded_len.checked_sub(used) {
            Some(v) => v,
            None => {
                return Err(NvDecodeError::InvalidEncodedSize {
                    encoded_size: encoded_len,
                    used,
                })
            }
        };

        // Everything else in the pair is read from a decoder clamped to it.
        let mut pair_decoder = decoder.split(rest_len)?;

        let decoded_size = pair_decoder.get_u32()?;
        let name = pair_decoder.get_str()?.into_owned();
        let type_tag = pair_decoder.get_u32()?;
        let element_count = pair_decoder.get_u32()?;

        trace!(
            "NV pair {name} at offset {starting_offset} type {type_tag} count {element_count} size {encoded_size}"
        );

        let value = if element_count == 0 {
            NvValue::Unset
        } else {
            self.decode_value(&mut pair_decoder, &name, type_tag, element_count, depth)?
        };

        // Re-synchronize on the encoded size, no matter how much was used.
        decoder.skip(rest_len)?;

        Ok(Some(NvPair {
            name,
            type_tag,
            element_count,
            encoded_size,
            decoded_size,
            value,
        }))
    }

    /// Decodes `count` elements of the data type `type_tag`.
    fn decode_value(
        &self,
        decoder: &mut XdrDecoder<'_>,
        name: &str,
        type_tag: u32,
        count: u32,
        depth: usize,
    ) -> Result<NvValue, NvDecodeError> {
        let data_type = match NvDataType::try_from(type_tag) {
            Ok(v) => v,
            Err(_) => {
                warn!("NV pair {name} has unknown data type {type_tag}, keeping raw bytes");
                return Ok(NvValue::Raw(take_rest(decoder)?));
            }
        };

        let count = count as usize;

        let value = match data_type {
            NvDataType::Boolean | NvDataType::BooleanValue | NvDataType::BooleanArray => {
                NvValue::Boolean(get_values(decoder, data_type, count)?)
            }
            NvDataType::Byte | NvDataType::ByteArray => {
                NvValue::Byte(decoder.get_padded_bytes(count)?.to_vec())
            }
            NvDataType::Int8 | NvDataType::Int8Array => NvValue::Int8(
                decoder
                    .get_padded_bytes(count)?
                    .iter()
                    .map(|b| *b as i8)
                    .collect(),
            ),
            NvDataType::Uint8 | NvDataType::Uint8Array => {
                NvValue::Uint8(decoder.get_padded_bytes(count)?.to_vec())
            }
            NvDataType::Int16 | NvDataType::Int16Array => {
                NvValue::Int16(get_values(decoder, data_type, count)?)
            }
            NvDataType::Uint16 | NvDataType::Uint16Array => {
                NvValue::Uint16(get_values(decoder, data_type, count)?)
            }
            NvDataType::Int32 | NvDataType::Int32Array => {
                NvValue::Int32(get_values(decoder, data_type, count)?)
            }
            NvDataType::Uint32 | NvDataType::Uint32Array => {
                NvValue::Uint32(get_values(decoder, data_type, count)?)
            }
            NvDataType::Int64 | NvDataType::Int64Array => {
                NvValue::Int64(get_values(decoder, data_type, count)?)
            }
            NvDataType::Uint64 | NvDataType::Uint64Array => {
                NvValue::Uint64(get_values(decoder, data_type, count)?)
            }
            NvDataType::Double => NvValue::Double(get_values(decoder, data_type, count)?),
            NvDataType::HrTime => NvValue::HrTime(get_values(decoder, data_type, count)?),
            NvDataType::String | NvDataType::StringArray => {
                NvValue::String(get_strings(decoder, count)?)
            }
            NvDataType::NvList if count == 1 => {
                NvValue::NvList(self.decode_list(decoder, depth + 1)?)
            }
            NvDataType::NvList | NvDataType::NvListArray => {
                if self.limits.nv_list_arrays {
                    NvValue::NvListArray(self.decode_list_array(decoder, count, depth)?)
                } else {
                    warn!("NV pair {name} is an array of {count} lists, keeping raw bytes");
                    NvValue::Raw(take_rest(decoder)?)
                }
            }
        };

        Ok(value)
    }

    /// Decodes `count` lists, one after the other.
    fn decode_list_array(
        &self,
        decoder: &mut XdrDecoder<'_>,
        count: usize,
        depth: usize,
    ) -> Result<Vec<NvList>, NvDecodeError> {
        // Every list is at least its version, flags, and end marker.
        let mut lists = Vec::with_capacity(count.min(decoder.len() / Self::LIST_HEADER_SIZE));

        for _ in 0..count {
            lists.push(self.decode_list(decoder, depth + 1)?);
        }

        Ok(lists)
    }
}

////////////////////////////////////////////////////////////////////////////////

/** Decodes `count` fixed size values.
 *
 * The full byte size is checked before anything is allocated.
 */
fn get_values<T: GetFromXdrDecoder>(
    decoder: &mut XdrDecoder<'_>,
    data_type: NvDataType,
    count: usize,
) -> Result<Vec<T>, NvDecodeError> {
    let size = match count.checked_mul(T::XDR_SIZE) {
        Some(v) => v,
        None => return Err(NvDecodeError::InvalidCount { data_type, count }),
    };

    // Fails with end of input if the array is truncated.
    decoder.split(size)?;

    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        values.push(decoder.get()?);
    }

    Ok(values)
}

/// Decodes `count` length prefixed strings.
fn get_strings(decoder: &mut XdrDecoder<'_>, count: usize) -> Result<Vec<String>, NvDecodeError> {
    // Every string is at least its length.
    let mut values = Vec::with_capacity(count.min(decoder.len() / 4));

    for _ in 0..count {
        values.push(decoder.get_str()?.into_owned());
    }

    Ok(values)
}

/// Takes the rest of the pair as raw bytes.
fn take_rest(decoder: &mut XdrDecoder<'_>) -> Result<Vec<u8>, NvDecodeError> {
    Ok(decoder.get_bytes(decoder.len())?.to_vec())
}

////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {

    use alloc::format;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use proptest::prelude::*;

    use crate::phys::nv_test::{NvTestList, NvTestPair};
    use crate::phys::{NvDataType, NvDecodeError, NvDecodeLimits, NvList, NvValue, XdrDecoder};

    #[test]
    /// A single Uint32.
    fn decode_uint32() -> Result<(), NvDecodeError> {
        let data = NvTestList::new()
            .pair(NvTestPair::u32s("version", NvDataType::Uint32, &[5000]))
            .to_bytes();

        let list = NvList::from_bytes(&data)?;
        assert_eq!(list.len(), 1);

        let pair = list.get("version").unwrap();
        assert_eq!(pair.name, "version");
        assert_eq!(pair.data_type()?, NvDataType::Uint32);
        assert_eq!(pair.element_count, 1);
        assert_eq!(pair.value, NvValue::Uint32(vec![5000]));
        assert_eq!(list.get_u32("version")?, Some(5000));

        Ok(())
    }

    #[test]
    /// A string array, with padding between the elements.
    fn decode_string_array() -> Result<(), NvDecodeError> {
        let data = NvTestList::new()
            .pair(NvTestPair::strs("disks", NvDataType::StringArray, &["a", "bb"]))
            .to_bytes();

        let list = NvList::from_bytes(&data)?;
        let disks = list.get_str_array("disks")?.unwrap();
        assert_eq!(disks, &[String::from("a"), String::from("bb")]);

        // A single element array is still a str.
        let data = NvTestList::new()
            .pair(NvTestPair::strs("name", NvDataType::String, &["tank"]))
            .to_bytes();
        let list = NvList::from_bytes(&data)?;
        assert_eq!(list.get_str("name")?, Some("tank"));

        Ok(())
    }

    #[test]
    /// Name length is larger than the rest of the input.
    fn decode_truncated_name() {
        let mut data = NvTestList::new().to_bytes();

        // Remove end marker.
        data.truncate(12);

        // Encoded size, decoded size, name length of 64, and only 4 name bytes.
        data.extend_from_slice(&[0, 0, 0, 24, 0, 0, 0, 0, 0, 0, 0, 64]);
        data.extend_from_slice(b"abcd");

        let res = NvList::from_bytes(&data);
        assert!(res.is_err());
        assert!(res.unwrap_err().is_truncated());
    }

    #[test]
    /// Encoded size is larger than the rest of the input.
    fn decode_truncated_pair() {
        let mut data = NvTestList::new()
            .pair(NvTestPair::u64s("txg", NvDataType::Uint64, &[7]))
            .to_bytes();

        // Drop the end marker, and the last value byte.
        data.truncate(data.len() - 9);

        let res = NvList::from_bytes(&data);
        assert!(res.unwrap_err().is_truncated());
    }

    #[test]
    /// Array count is larger than the pair.
    fn decode_truncated_array() {
        let data = NvTestList::new()
            .pair(NvTestPair::raw(
                "guids",
                u32::from(NvDataType::Uint64Array),
                1000,
                &[0; 16],
            ))
            .to_bytes();

        let res = NvList::from_bytes(&data);
        assert!(res.unwrap_err().is_truncated());

        // A huge count does not allocate.
        let data = NvTestList::new()
            .pair(NvTestPair::raw(
                "names",
                u32::from(NvDataType::StringArray),
                u32::MAX,
                &[0; 8],
            ))
            .to_bytes();

        let res = NvList::from_bytes(&data);
        assert!(res.unwrap_err().is_truncated());
    }

    #[test]
    /// A nested list.
    fn decode_nested() -> Result<(), NvDecodeError> {
        let features = NvTestList::new().pair(NvTestPair::u64s("guid", NvDataType::Uint64, &[42]));
        let data = NvTestList::new()
            .pair(NvTestPair::list("features", &features))
            .to_bytes();

        let list = NvList::from_bytes(&data)?;
        assert_eq!(list.len(), 1);

        let nested = list.get_nv_list("features")?.unwrap();
        assert_eq!(nested.len(), 1);
        assert_eq!(nested.get_u64("guid")?, Some(42));
        assert_eq!(nested.header(), list.header());

        Ok(())
    }

    #[test]
    /// Zero count pairs carry no value.
    fn decode_unset() -> Result<(), NvDecodeError> {
        let data = NvTestList::new()
            .pair(NvTestPair::raw(
                "reserved",
                u32::from(NvDataType::Uint64),
                0,
                &[],
            ))
            .pair(NvTestPair::raw(
                "org.openzfs:blake3",
                u32::from(NvDataType::Boolean),
                0,
                &[],
            ))
            .pair(NvTestPair::u64s("txg", NvDataType::Uint64, &[9]))
            .to_bytes();

        let list = NvList::from_bytes(&data)?;
        assert_eq!(list.len(), 3);

        let reserved = list.get("reserved").unwrap();
        assert!(!reserved.is_set());
        assert_eq!(reserved.value, NvValue::Unset);
        assert_eq!(list.get_u64("reserved")?, None);
        assert!(!list.has_flag("reserved"));

        assert!(list.has_flag("org.openzfs:blake3"));
        assert_eq!(list.get_bool("org.openzfs:blake3")?, None);

        assert_eq!(list.get_u64("txg")?, Some(9));

        Ok(())
    }

    #[test]
    /// Only the headers and the end marker.
    fn decode_empty() -> Result<(), NvDecodeError> {
        let data = NvTestList::new().to_bytes();
        let list = NvList::from_bytes(&data)?;
        assert!(list.is_empty());
        assert_eq!(list.version(), 0);

        // End of input without an end marker.
        let list = NvList::from_bytes(&data[0..12])?;
        assert!(list.is_empty());

        // Only the encoded size of the end marker.
        let list = NvList::from_bytes(&data[0..16])?;
        assert!(list.is_empty());

        Ok(())
    }

    #[test]
    /// Unknown data types are kept as raw bytes.
    fn decode_unknown_type() -> Result<(), NvDecodeError> {
        let raw = [1, 2, 3, 4, 5, 6, 7, 8];
        let data = NvTestList::new()
            .pair(NvTestPair::raw("future", 99, 1, &raw))
            .pair(NvTestPair::u32s("after", NvDataType::Uint32, &[1]))
            .to_bytes();

        let list = NvList::from_bytes(&data)?;
        let future = list.get("future").unwrap();
        assert_eq!(future.type_tag, 99);
        assert!(future.data_type().is_err());
        assert_eq!(future.get_raw(), Some(&raw[..]));

        // Header is 4 + 4 + 4 + 8 (padded name) + 4 + 4.
        assert_eq!(future.encoded_size as usize, 28 + raw.len());

        assert_eq!(list.get_u32("after")?, Some(1));

        Ok(())
    }

    #[test]
    /// Arrays of nested lists are kept raw, unless enabled.
    fn decode_nv_list_array() -> Result<(), NvDecodeError> {
        let child_0 = NvTestList::new().pair(NvTestPair::u64s("id", NvDataType::Uint64, &[0]));
        let child_1 = NvTestList::new().pair(NvTestPair::u64s("id", NvDataType::Uint64, &[1]));
        let data = NvTestList::new()
            .pair(NvTestPair::lists("children", &[&child_0, &child_1]))
            .pair(NvTestPair::u64s("ashift", NvDataType::Uint64, &[12]))
            .to_bytes();

        let list = NvList::from_bytes(&data)?;
        let children = list.get("children").unwrap();
        assert!(children.get_raw().is_some());
        assert!(list.get_nv_list_array("children").is_err());
        assert_eq!(list.get_u64("ashift")?, Some(12));

        let limits = NvDecodeLimits {
            nv_list_arrays: true,
            ..NvDecodeLimits::default()
        };
        let list = NvList::from_bytes_with_limits(&data, &limits)?;
        let children = list.get_nv_list_array("children")?.unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].get_u64("id")?, Some(0));
        assert_eq!(children[1].get_u64("id")?, Some(1));
        assert_eq!(list.get_u64("ashift")?, Some(12));

        Ok(())
    }

    #[test]
    /// The last pair with a name wins.
    fn decode_duplicate() -> Result<(), NvDecodeError> {
        let data = NvTestList::new()
            .pair(NvTestPair::u64s("guid", NvDataType::Uint64, &[1]))
            .pair(NvTestPair::strs("name", NvDataType::String, &["tank"]))
            .pair(NvTestPair::u64s("guid", NvDataType::Uint64, &[2]))
            .to_bytes();

        let list = NvList::from_bytes(&data)?;
        assert_eq!(list.len(), 2);
        assert_eq!(list.get_u64("guid")?, Some(2));

        let names: Vec<&str> = list.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["guid", "name"]);

        Ok(())
    }

    #[test]
    /// Every scalar family.
    fn decode_all_families() -> Result<(), NvDecodeError> {
        let data = NvTestList::new()
            .pair(NvTestPair::u32s("b", NvDataType::BooleanValue, &[2]))
            .pair(NvTestPair::u32s("ba", NvDataType::BooleanArray, &[0, 1]))
            .pair(NvTestPair::bytes("byte", NvDataType::ByteArray, &[1, 2, 3, 4, 5]))
            .pair(NvTestPair::bytes("i8", NvDataType::Int8, &[0xff]))
            .pair(NvTestPair::bytes("u8", NvDataType::Uint8Array, &[7, 8]))
            .pair(NvTestPair::u32s("i16", NvDataType::Int16, &[0xffff_8000]))
            .pair(NvTestPair::u32s("u16", NvDataType::Uint16Array, &[1, 0xffff]))
            .pair(NvTestPair::u32s("i32", NvDataType::Int32, &[0xffff_ffff]))
            .pair(NvTestPair::u64s("i64", NvDataType::Int64Array, &[u64::MAX, 3]))
            .pair(NvTestPair::u64s("f64", NvDataType::Double, &[1.5f64.to_bits()]))
            .pair(NvTestPair::u64s("hrtime", NvDataType::HrTime, &[1_000_000_000]))
            .to_bytes();

        let list = NvList::from_bytes(&data)?;
        assert_eq!(list.get_bool("b")?, Some(true));
        assert_eq!(list.get_bool_array("ba")?, Some(&[false, true][..]));
        assert_eq!(list.get_byte_array("byte")?, Some(&[1, 2, 3, 4, 5][..]));
        assert_eq!(list.get_i8("i8")?, Some(-1));
        assert_eq!(list.get_u8_array("u8")?, Some(&[7, 8][..]));
        assert_eq!(list.get_i16("i16")?, Some(-32768));
        assert_eq!(list.get_u16_array("u16")?, Some(&[1, 0xffff][..]));
        assert_eq!(list.get_i32("i32")?, Some(-1));
        assert_eq!(list.get_i64_array("i64")?, Some(&[-1, 3][..]));
        assert_eq!(list.get_f64("f64")?, Some(1.5));
        assert_eq!(list.get_hr_time("hrtime")?, Some(1_000_000_000));

        // Scalar getter on a multi element value.
        assert!(list.get_i64("i64").is_err());

        Ok(())
    }

    #[test]
    /// Native encoding is rejected.
    fn decode_native() {
        let mut data = NvTestList::new()
            .pair(NvTestPair::u32s("version", NvDataType::Uint32, &[5000]))
            .to_bytes();
        data[0] = 0;

        let res = NvList::from_bytes(&data);
        assert!(matches!(
            res,
            Err(NvDecodeError::UnsupportedEncoding { .. })
        ));

        data[0] = 7;
        let res = NvList::from_bytes(&data);
        assert!(matches!(res, Err(NvDecodeError::UnknownEncoding { .. })));
    }

    #[test]
    /// Encoded size smaller than the encoded size field.
    fn decode_invalid_encoded_size() {
        let mut data = NvTestList::new().to_bytes();
        data.truncate(12);
        data.extend_from_slice(&[0, 0, 0, 2, 0, 0, 0, 0]);

        let res = NvList::from_bytes(&data);
        assert!(matches!(
            res,
            Err(NvDecodeError::InvalidEncodedSize { .. })
        ));
    }

    #[test]
    /// Nested lists deeper than the limit.
    fn decode_max_depth() -> Result<(), NvDecodeError> {
        let mut list = NvTestList::new().pair(NvTestPair::u64s("leaf", NvDataType::Uint64, &[1]));
        for _ in 0..8 {
            list = NvTestList::new().pair(NvTestPair::list("nested", &list));
        }
        let data = list.to_bytes();

        let limits = NvDecodeLimits {
            max_depth: 8,
            ..NvDecodeLimits::default()
        };
        NvList::from_bytes_with_limits(&data, &limits)?;

        let limits = NvDecodeLimits {
            max_depth: 7,
            ..NvDecodeLimits::default()
        };
        let res = NvList::from_bytes_with_limits(&data, &limits);
        assert!(matches!(res, Err(NvDecodeError::MaxDepth { max_depth: 7 })));

        Ok(())
    }

    #[test]
    /// Input larger than the limit.
    fn decode_too_large() {
        let data = NvTestList::new().to_bytes();
        let limits = NvDecodeLimits {
            max_size: data.len() - 1,
            ..NvDecodeLimits::default()
        };

        let res = NvList::from_bytes_with_limits(&data, &limits);
        assert!(matches!(res, Err(NvDecodeError::TooLarge { .. })));
    }

    #[test]
    /// Encoded size covers more than the decoded value.
    fn decode_resync() -> Result<(), NvDecodeError> {
        let mut value = Vec::new();
        value.extend_from_slice(&5u32.to_be_bytes());
        value.extend_from_slice(&[0xaa; 12]);

        let data = NvTestList::new()
            .pair(NvTestPair::raw("padded", u32::from(NvDataType::Uint32), 1, &value))
            .pair(NvTestPair::u32s("next", NvDataType::Uint32, &[6]))
            .to_bytes();

        let list = NvList::from_bytes(&data)?;
        assert_eq!(list.get_u32("padded")?, Some(5));
        assert_eq!(list.get_u32("next")?, Some(6));

        Ok(())
    }

    #[test]
    /// Only the low 16 bits of a 16 bit slot are kept.
    fn decode_wide_16_bit_slot() -> Result<(), NvDecodeError> {
        let data = NvTestList::new()
            .pair(NvTestPair::u32s("u16", NvDataType::Uint16, &[0x0001_0002]))
            .pair(NvTestPair::u32s("i16", NvDataType::Int16Array, &[0x7fff_fffe, 0x0000_8000]))
            .pair(NvTestPair::u64s("guid", NvDataType::Uint64, &[42]))
            .to_bytes();

        let list = NvList::from_bytes(&data)?;
        assert_eq!(list.get_u16("u16")?, Some(2));
        assert_eq!(list.get_i16_array("i16")?, Some(&[-2, -32768][..]));
        assert_eq!(list.get_u64("guid")?, Some(42));

        Ok(())
    }

    #[test]
    /// Invalid UTF8 in names and strings is replaced, and decoding goes on.
    fn decode_invalid_utf8() -> Result<(), NvDecodeError> {
        let mut value = Vec::new();
        value.extend_from_slice(&3u32.to_be_bytes());
        value.extend_from_slice(&[b'a', 0xff, b'b', 0x00]);

        let mut data = NvTestList::new()
            .pair(NvTestPair::raw("hostname", NvDataType::String.into(), 1, &value))
            .pair(NvTestPair::strs("path", NvDataType::String, &["/dev/sda1"]))
            .pair(NvTestPair::u64s("guid", NvDataType::Uint64, &[42]))
            .to_bytes();

        // Corrupt the first byte of the name "path".
        let offset = data.windows(4).position(|w| w == b"path").unwrap();
        data[offset] = 0xfe;

        let list = NvList::from_bytes(&data)?;
        assert_eq!(list.len(), 3);
        assert_eq!(list.get_str("hostname")?, Some("a\u{fffd}b"));
        assert_eq!(list.get_str("\u{fffd}ath")?, Some("/dev/sda1"));
        assert_eq!(list.get_u64("guid")?, Some(42));

        Ok(())
    }

    #[test]
    /// Byte blocks of odd length end on the next four byte boundary.
    fn decode_odd_byte_array() -> Result<(), NvDecodeError> {
        let data = NvTestList::new()
            .pair(NvTestPair::bytes("bytes", NvDataType::ByteArray, &[1, 2, 3]))
            .pair(NvTestPair::bytes("byte", NvDataType::Byte, &[4]))
            .to_bytes();

        // Name "bytes" is padded to 8, the block of 3 bytes to 4.
        let list = NvList::from_bytes(&data)?;
        let bytes = list.get("bytes").unwrap();
        assert_eq!(bytes.encoded_size, 8 + 4 + 8 + 4 + 4 + 4);
        assert_eq!(list.get_byte_array("bytes")?, Some(&[1, 2, 3][..]));
        assert_eq!(list.get_byte("byte")?, Some(4));

        // Back to back blocks, outside of any pair.
        let data = [1, 2, 3, 0xaa, 4, 0xbb, 0xbb, 0xbb, 0, 0, 0, 5];
        let mut decoder = XdrDecoder::from_bytes(&data);
        assert_eq!(decoder.get_padded_bytes(3)?, &[1, 2, 3]);
        assert_eq!(decoder.offset(), 4);
        assert_eq!(decoder.get_padded_bytes(1)?, &[4]);
        assert_eq!(decoder.offset(), 8);
        assert_eq!(decoder.get_u32()?, 5);
        assert!(decoder.is_empty());

        Ok(())
    }

    /// A list with one of each kind of pair, used as a seed for mutation.
    fn sample_bytes() -> Vec<u8> {
        let nested = NvTestList::new()
            .pair(NvTestPair::u64s("guid", NvDataType::Uint64, &[42]))
            .pair(NvTestPair::strs("path", NvDataType::String, &["/dev/sda1"]));

        NvTestList::new()
            .pair(NvTestPair::u64s("version", NvDataType::Uint64, &[5000]))
            .pair(NvTestPair::strs("name", NvDataType::String, &["tank"]))
            .pair(NvTestPair::strs("disks", NvDataType::StringArray, &["a", "bb", "ccc"]))
            .pair(NvTestPair::bytes("bytes", NvDataType::ByteArray, &[1, 2, 3]))
            .pair(NvTestPair::list("vdev_tree", &nested))
            .pair(NvTestPair::raw("future", 99, 1, &[9; 8]))
            .to_bytes()
    }

    #[test]
    /// Every truncation of a valid list fails or decodes, and never panics.
    fn decode_every_truncation() {
        let data = sample_bytes();
        for size in 0..data.len() {
            let _ = NvList::from_bytes(&data[0..size]);
        }
        assert!(NvList::from_bytes(&data).is_ok());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn decode_random_bytes(tail in proptest::collection::vec(any::<u8>(), 0..512)) {
            let mut data = vec![1, 0, 0, 0];
            data.extend_from_slice(&tail);

            let first = NvList::from_bytes(&data);
            let second = NvList::from_bytes(&data);

            // Decoding is deterministic.
            prop_assert_eq!(format!("{first:?}"), format!("{second:?}"));
        }

        #[test]
        fn decode_mutated_bytes(
            mutations in proptest::collection::vec((any::<usize>(), any::<u8>()), 1..16)
        ) {
            let mut data = sample_bytes();
            let len = data.len();
            for (index, byte) in mutations {
                data[index % len] = byte;
            }

            let first = NvList::from_bytes(&data);
            let second = NvList::from_bytes(&data);
            prop_assert_eq!(format!("{first:?}"), format!("{second:?}"));
        }
    }
}
