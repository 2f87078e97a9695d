// SPDX-License-Identifier: GPL-2.0 OR MIT

/*! Name Value list.
 *
 * A Name Value list is a sequence of Name Value [`NvPair`].
 *
 * Header
 * ======
 * The first four bytes of the parent list are:
 * - [`NvEncoding`]
 * - [`NvEndianOrder`]
 * - Two reserved bytes
 *
 * Only [`NvEncoding::Xdr`] is supported. XDR is always big endian, no matter
 * what the [`NvEndianOrder`] byte says. Nested lists inherit the [`NvHeader`]
 * of the parent list.
 *
 * List
 * ====
 * A list starts with:
 * - [`u32`] version
 * - [`u32`] flags
 *
 * And is followed by a sequence of [`NvPair`].
 *
 * NvPair
 * ======
 * An [`NvPair`] starts with:
 * - [`u32`] encoded size (of entire pair, including this number)
 * - [`u32`] decoded size (in memory)
 *
 * An encoded size of zero is the end of the list.
 *
 * Otherwise what follows is:
 * - [`String`] name
 * - [`u32`] [`NvDataType`]
 * - [`u32`] count for number of values in this pair
 * - [`NvValue`] whose encoding corresponds to [`NvDataType`] and count
 *
 * The encoded size is authoritative: the next pair always starts at the
 * start of this pair plus its encoded size.
 *
 * Booleans
 * ========
 * A note about the two different boolean data types:
 * - [`NvDataType::Boolean`] has a count of 0, has no value, and is used as a
 *   flag. For example, the `features_for_read` list contains a sequence of
 *   flags, such as `org.openzfs:blake3`. Use [`NvList::has_flag`].
 * - [`NvDataType::BooleanValue`] has a count of 1, and an actual value that
 *   can be [`true`] or [`false`].
 */
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use core::fmt;
use core::fmt::Display;
use core::result::Result;
use core::result::Result::{Err, Ok};

#[cfg(feature = "std")]
use std::error;

use log::debug;

use crate::phys::{decode_nv_list, NvDecodeLimits, XdrDecodeError, XdrDecoder};

////////////////////////////////////////////////////////////////////////////////

/// Name Value List byte order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NvEndianOrder {
    /// Big byte order.
    Big = 0,

    /// Little byte order.
    Little = 1,
}

impl Display for NvEndianOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NvEndianOrder::Big => write!(f, "Big"),
            NvEndianOrder::Little => write!(f, "Little"),
        }
    }
}

impl From<NvEndianOrder> for u8 {
    fn from(val: NvEndianOrder) -> u8 {
        val as u8
    }
}

impl TryFrom<u8> for NvEndianOrder {
    type Error = NvDecodeError;

    /** Try converting from a [`u8`] to a [`NvEndianOrder`].
     *
     * # Errors
     *
     * Returns [`NvDecodeError`] in case of an unknown [`NvEndianOrder`].
     */
    fn try_from(order: u8) -> Result<Self, Self::Error> {
        match order {
            0 => Ok(NvEndianOrder::Big),
            1 => Ok(NvEndianOrder::Little),
            _ => Err(NvDecodeError::UnknownEndian { order }),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Name Value List encoding.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NvEncoding {
    /// Native binary encoding.
    Native = 0,

    /// XDR encoding.
    Xdr = 1,
}

impl Display for NvEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NvEncoding::Native => write!(f, "Native"),
            NvEncoding::Xdr => write!(f, "Xdr"),
        }
    }
}

impl From<NvEncoding> for u8 {
    fn from(val: NvEncoding) -> u8 {
        val as u8
    }
}

impl TryFrom<u8> for NvEncoding {
    type Error = NvDecodeError;

    /** Try converting from a [`u8`] to a [`NvEncoding`].
     *
     * # Errors
     *
     * Returns [`NvDecodeError`] in case of an unknown [`NvEncoding`].
     */
    fn try_from(encoding: u8) -> Result<Self, Self::Error> {
        match encoding {
            0 => Ok(NvEncoding::Native),
            1 => Ok(NvEncoding::Xdr),
            _ => Err(NvDecodeError::UnknownEncoding { encoding }),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Name Value List Unique.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NvUnique {
    /// No unique constraints.
    None = 0,

    /// Name must be unique.
    Name = 1,

    /// Name and type must be unique.
    NameType = 2,
}

impl NvUnique {
    /// Mask of the list flags used for [`NvUnique`].
    pub const FLAGS_MASK: u32 = 0x3;
}

impl Display for NvUnique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NvUnique::None => write!(f, "None"),
            NvUnique::Name => write!(f, "Name"),
            NvUnique::NameType => write!(f, "NameType"),
        }
    }
}

impl TryFrom<u32> for NvUnique {
    type Error = NvDecodeError;

    /** Try converting from list flags to a [`NvUnique`].
     *
     * # Errors
     *
     * Returns [`NvDecodeError`] in case of an unknown [`NvUnique`].
     */
    fn try_from(flags: u32) -> Result<Self, Self::Error> {
        match flags & NvUnique::FLAGS_MASK {
            0 => Ok(NvUnique::None),
            1 => Ok(NvUnique::Name),
            2 => Ok(NvUnique::NameType),
            unique => Err(NvDecodeError::UnknownUnique { unique }),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////

/** Encoding header of an outer [`NvList`].
 *
 * ### Byte layout.
 *
 * - Bytes: 4
 *
 * ```text
 * +----------+---+
 * | encoding | 1 |
 * | endian   | 1 |
 * | reserved | 2 |
 * +----------+---+
 * ```
 */
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NvHeader {
    /// Encoding of the list.
    pub encoding: NvEncoding,

    /// Declared byte order of the host that wrote the list.
    pub order: NvEndianOrder,
}

impl NvHeader {
    /// Byte size of an encoded [`NvHeader`].
    pub const SIZE: usize = 4;

    /** Decodes an [`NvHeader`] from the start of `data`.
     *
     * The reserved bytes are ignored.
     *
     * # Errors
     *
     * Returns [`NvDecodeError`] if `data` is too short, or the encoding or
     * byte order is unknown.
     *
     * ```
     * use rnv::phys::{NvEncoding, NvEndianOrder, NvHeader};
     *
     * let header = NvHeader::from_bytes(&[1, 1, 0, 0]).unwrap();
     * assert_eq!(header.encoding, NvEncoding::Xdr);
     * assert_eq!(header.order, NvEndianOrder::Little);
     * assert!(header.check_supported().is_ok());
     *
     * let header = NvHeader::from_bytes(&[0, 0, 0, 0]).unwrap();
     * assert!(header.check_supported().is_err());
     *
     * assert!(NvHeader::from_bytes(&[1, 0, 0]).is_err());
     * assert!(NvHeader::from_bytes(&[2, 0, 0, 0]).is_err());
     * ```
     */
    pub fn from_bytes(data: &[u8]) -> Result<NvHeader, NvDecodeError> {
        let mut decoder = XdrDecoder::from_bytes(data);
        let header = decoder.get_bytes(NvHeader::SIZE)?;

        Ok(NvHeader {
            encoding: NvEncoding::try_from(header[0])?,
            order: NvEndianOrder::try_from(header[1])?,
        })
    }

    /** Checks that the rest of the list can be decoded.
     *
     * # Errors
     *
     * Returns [`NvDecodeError::UnsupportedEncoding`] for anything other than
     * [`NvEncoding::Xdr`].
     */
    pub fn check_supported(&self) -> Result<(), NvDecodeError> {
        match self.encoding {
            NvEncoding::Xdr => Ok(()),
            NvEncoding::Native => Err(NvDecodeError::UnsupportedEncoding {
                encoding: self.encoding,
                order: self.order,
            }),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Name Value Pair Data Type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NvDataType {
    /// A boolean flag (no value).
    Boolean = 1,

    /// A [u8] byte.
    Byte = 2,

    /// A [i16].
    Int16 = 3,

    /// A [u16].
    Uint16 = 4,

    /// A [i32].
    Int32 = 5,

    /// A [u32].
    Uint32 = 6,

    /// A [i64].
    Int64 = 7,

    /// A [u64].
    Uint64 = 8,

    /// A [str].
    String = 9,

    /// An array of [u8] bytes.
    ByteArray = 10,

    /// An array of [i16].
    Int16Array = 11,

    /// An array of [u16].
    Uint16Array = 12,

    /// An array of [i32].
    Int32Array = 13,

    /// An array of [u32].
    Uint32Array = 14,

    /// An array of [i64].
    Int64Array = 15,

    /// An array of [u64].
    Uint64Array = 16,

    /// An array of [str].
    StringArray = 17,

    /// High resolution time.
    HrTime = 18,

    /// A [`NvList`].
    NvList = 19,

    /// An array of nested [`NvList`].
    NvListArray = 20,

    /// A [bool].
    BooleanValue = 21,

    /// A [i8].
    Int8 = 22,

    /// A [u8].
    Uint8 = 23,

    /// An array of [bool].
    BooleanArray = 24,

    /// An array of [i8].
    Int8Array = 25,

    /// An array of [u8].
    Uint8Array = 26,

    /// A [f64].
    Double = 27,
}

impl Display for NvDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NvDataType::Boolean => write!(f, "Boolean"),
            NvDataType::Byte => write!(f, "Byte"),
            NvDataType::Int16 => write!(f, "Int16"),
            NvDataType::Uint16 => write!(f, "Uint16"),
            NvDataType::Int32 => write!(f, "Int32"),
            NvDataType::Uint32 => write!(f, "Uint32"),
            NvDataType::Int64 => write!(f, "Int64"),
            NvDataType::Uint64 => write!(f, "Uint64"),
            NvDataType::String => write!(f, "String"),
            NvDataType::ByteArray => write!(f, "ByteArray"),
            NvDataType::Int16Array => write!(f, "Int16Array"),
            NvDataType::Uint16Array => write!(f, "Uint16Array"),
            NvDataType::Int32Array => write!(f, "Int32Array"),
            NvDataType::Uint32Array => write!(f, "Uint32Array"),
            NvDataType::Int64Array => write!(f, "Int64Array"),
            NvDataType::Uint64Array => write!(f, "Uint64Array"),
            NvDataType::StringArray => write!(f, "StringArray"),
            NvDataType::HrTime => write!(f, "HrTime"),
            NvDataType::NvList => write!(f, "NvList"),
            NvDataType::NvListArray => write!(f, "NvListArray"),
            NvDataType::BooleanValue => write!(f, "BooleanValue"),
            NvDataType::Int8 => write!(f, "Int8"),
            NvDataType::Uint8 => write!(f, "Uint8"),
            NvDataType::BooleanArray => write!(f, "BooleanArray"),
            NvDataType::Int8Array => write!(f, "Int8Array"),
            NvDataType::Uint8Array => write!(f, "Uint8Array"),
            NvDataType::Double => write!(f, "Double"),
        }
    }
}

impl From<NvDataType> for u32 {
    fn from(val: NvDataType) -> u32 {
        val as u32
    }
}

impl TryFrom<u32> for NvDataType {
    type Error = NvDecodeError;

    /** Try converting from a [`u32`] to a [`NvDataType`].
     *
     * # Errors
     *
     * Returns [`NvDecodeError`] in case of an unknown [`NvDataType`].
     */
    fn try_from(data_type: u32) -> Result<Self, Self::Error> {
        match data_type {
            1 => Ok(NvDataType::Boolean),
            2 => Ok(NvDataType::Byte),
            3 => Ok(NvDataType::Int16),
            4 => Ok(NvDataType::Uint16),
            5 => Ok(NvDataType::Int32),
            6 => Ok(NvDataType::Uint32),
            7 => Ok(NvDataType::Int64),
            8 => Ok(NvDataType::Uint64),
            9 => Ok(NvDataType::String),
            10 => Ok(NvDataType::ByteArray),
            11 => Ok(NvDataType::Int16Array),
            12 => Ok(NvDataType::Uint16Array),
            13 => Ok(NvDataType::Int32Array),
            14 => Ok(NvDataType::Uint32Array),
            15 => Ok(NvDataType::Int64Array),
            16 => Ok(NvDataType::Uint64Array),
            17 => Ok(NvDataType::StringArray),
            18 => Ok(NvDataType::HrTime),
            19 => Ok(NvDataType::NvList),
            20 => Ok(NvDataType::NvListArray),
            21 => Ok(NvDataType::BooleanValue),
            22 => Ok(NvDataType::Int8),
            23 => Ok(NvDataType::Uint8),
            24 => Ok(NvDataType::BooleanArray),
            25 => Ok(NvDataType::Int8Array),
            26 => Ok(NvDataType::Uint8Array),
            27 => Ok(NvDataType::Double),
            _ => Err(NvDecodeError::UnknownDataType { data_type }),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////

/** Decoded Name Value Pair value.
 *
 * Scalar and array data types of the same family share a variant, and hold
 * one element per decoded count.
 */
#[derive(Clone, Debug, PartialEq)]
pub enum NvValue {
    /// No value, the pair had a count of zero.
    Unset,

    /// [`NvDataType::BooleanValue`] and [`NvDataType::BooleanArray`].
    Boolean(Vec<bool>),

    /// [`NvDataType::Byte`] and [`NvDataType::ByteArray`].
    Byte(Vec<u8>),

    /// [`NvDataType::Int8`] and [`NvDataType::Int8Array`].
    Int8(Vec<i8>),

    /// [`NvDataType::Uint8`] and [`NvDataType::Uint8Array`].
    Uint8(Vec<u8>),

    /// [`NvDataType::Int16`] and [`NvDataType::Int16Array`].
    Int16(Vec<i16>),

    /// [`NvDataType::Uint16`] and [`NvDataType::Uint16Array`].
    Uint16(Vec<u16>),

    /// [`NvDataType::Int32`] and [`NvDataType::Int32Array`].
    Int32(Vec<i32>),

    /// [`NvDataType::Uint32`] and [`NvDataType::Uint32Array`].
    Uint32(Vec<u32>),

    /// [`NvDataType::Int64`] and [`NvDataType::Int64Array`].
    Int64(Vec<i64>),

    /// [`NvDataType::Uint64`] and [`NvDataType::Uint64Array`].
    Uint64(Vec<u64>),

    /// [`NvDataType::Double`].
    Double(Vec<f64>),

    /// [`NvDataType::HrTime`].
    HrTime(Vec<i64>),

    /// [`NvDataType::String`] and [`NvDataType::StringArray`].
    String(Vec<String>),

    /// A nested [`NvList`].
    NvList(NvList),

    /// An array of nested [`NvList`], only decoded when
    /// [`NvDecodeLimits::nv_list_arrays`] is set.
    NvListArray(Vec<NvList>),

    /// Undecoded bytes of an unknown data type, or an array of nested lists.
    Raw(Vec<u8>),
}

impl NvValue {
    /// Number of decoded elements.
    pub fn len(&self) -> usize {
        match self {
            NvValue::Unset => 0,
            NvValue::Boolean(v) => v.len(),
            NvValue::Byte(v) => v.len(),
            NvValue::Int8(v) => v.len(),
            NvValue::Uint8(v) => v.len(),
            NvValue::Int16(v) => v.len(),
            NvValue::Uint16(v) => v.len(),
            NvValue::Int32(v) => v.len(),
            NvValue::Uint32(v) => v.len(),
            NvValue::Int64(v) => v.len(),
            NvValue::Uint64(v) => v.len(),
            NvValue::Double(v) => v.len(),
            NvValue::HrTime(v) => v.len(),
            NvValue::String(v) => v.len(),
            NvValue::NvList(_) => 1,
            NvValue::NvListArray(v) => v.len(),
            NvValue::Raw(_) => 1,
        }
    }

    /// Is the value empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Decoded [`NvPair`].
#[derive(Clone, Debug, PartialEq)]
pub struct NvPair {
    /// Name.
    pub name: String,

    /// Raw [`NvDataType`] tag, which may be unknown.
    pub type_tag: u32,

    /// Number of elements declared in the pair header.
    pub element_count: u32,

    /// Encoded size of the pair, including its header.
    pub encoded_size: u32,

    /// Decoded (in memory) size of the pair.
    pub decoded_size: u32,

    /// Value.
    pub value: NvValue,
}

macro_rules! nv_pair_getters {
    ($($variant:ident, $ty:ty, $scalar:ident, $array:ident, $get:ident, $get_array:ident;)*) => {
        $(
            #[doc = concat!("Gets a single [`", stringify!($ty), "`] value.")]
            ///
            /// # Errors
            ///
            /// Returns [`NvDecodeError`] if the type does not match, or the
            /// pair does not have exactly one element.
            pub fn $get(&self) -> Result<$ty, NvDecodeError> {
                match &self.value {
                    NvValue::$variant(values) => match values.as_slice() {
                        [value] => Ok(*value),
                        _ => Err(NvDecodeError::InvalidCount {
                            data_type: NvDataType::$scalar,
                            count: values.len(),
                        }),
                    },
                    _ => Err(self.mismatch(NvDataType::$scalar)),
                }
            }

            #[doc = concat!("Gets all [`", stringify!($ty), "`] values.")]
            ///
            /// # Errors
            ///
            /// Returns [`NvDecodeError`] if the type does not match.
            pub fn $get_array(&self) -> Result<&[$ty], NvDecodeError> {
                match &self.value {
                    NvValue::$variant(values) => Ok(values.as_slice()),
                    _ => Err(self.mismatch(NvDataType::$array)),
                }
            }
        )*
    };
}

impl NvPair {
    /** Gets the [`NvDataType`] of the pair.
     *
     * # Errors
     *
     * Returns [`NvDecodeError::UnknownDataType`] for an unknown tag.
     */
    pub fn data_type(&self) -> Result<NvDataType, NvDecodeError> {
        NvDataType::try_from(self.type_tag)
    }

    /// Does the pair carry a value (count was not zero).
    pub fn is_set(&self) -> bool {
        !matches!(self.value, NvValue::Unset)
    }

    fn mismatch(&self, expected: NvDataType) -> NvDecodeError {
        NvDecodeError::DataTypeMismatch {
            expected,
            actual: self.type_tag,
        }
    }

    nv_pair_getters! {
        Boolean, bool, BooleanValue, BooleanArray, get_bool, get_bool_array;
        Byte, u8, Byte, ByteArray, get_byte, get_byte_array;
        Int8, i8, Int8, Int8Array, get_i8, get_i8_array;
        Uint8, u8, Uint8, Uint8Array, get_u8, get_u8_array;
        Int16, i16, Int16, Int16Array, get_i16, get_i16_array;
        Uint16, u16, Uint16, Uint16Array, get_u16, get_u16_array;
        Int32, i32, Int32, Int32Array, get_i32, get_i32_array;
        Uint32, u32, Uint32, Uint32Array, get_u32, get_u32_array;
        Int64, i64, Int64, Int64Array, get_i64, get_i64_array;
        Uint64, u64, Uint64, Uint64Array, get_u64, get_u64_array;
        Double, f64, Double, Double, get_f64, get_f64_array;
        HrTime, i64, HrTime, HrTime, get_hr_time, get_hr_time_array;
    }

    /** Gets a single [`str`] value.
     *
     * # Errors
     *
     * Returns [`NvDecodeError`] if the type does not match, or the pair does
     * not have exactly one element.
     */
    pub fn get_str(&self) -> Result<&str, NvDecodeError> {
        match &self.value {
            NvValue::String(values) => match values.as_slice() {
                [value] => Ok(value.as_str()),
                _ => Err(NvDecodeError::InvalidCount {
                    data_type: NvDataType::String,
                    count: values.len(),
                }),
            },
            _ => Err(self.mismatch(NvDataType::String)),
        }
    }

    /** Gets all [`str`] values.
     *
     * # Errors
     *
     * Returns [`NvDecodeError`] if the type does not match.
     */
    pub fn get_str_array(&self) -> Result<&[String], NvDecodeError> {
        match &self.value {
            NvValue::String(values) => Ok(values.as_slice()),
            _ => Err(self.mismatch(NvDataType::StringArray)),
        }
    }

    /** Gets a nested [`NvList`].
     *
     * # Errors
     *
     * Returns [`NvDecodeError`] if the type does not match.
     */
    pub fn get_nv_list(&self) -> Result<&NvList, NvDecodeError> {
        match &self.value {
            NvValue::NvList(list) => Ok(list),
            _ => Err(self.mismatch(NvDataType::NvList)),
        }
    }

    /** Gets an array of nested [`NvList`].
     *
     * # Errors
     *
     * Returns [`NvDecodeError`] if the type does not match, which includes
     * arrays that were left undecoded.
     */
    pub fn get_nv_list_array(&self) -> Result<&[NvList], NvDecodeError> {
        match &self.value {
            NvValue::NvListArray(lists) => Ok(lists.as_slice()),
            _ => Err(self.mismatch(NvDataType::NvListArray)),
        }
    }

    /// Gets the undecoded bytes of the pair, if it was not decoded.
    pub fn get_raw(&self) -> Option<&[u8]> {
        match &self.value {
            NvValue::Raw(bytes) => Some(bytes.as_slice()),
            _ => None,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////

/** A decoded name value pair list.
 *
 * Names are unique: when a name is repeated in the encoded list, the last
 * pair wins, and takes the position of the first one.
 */
#[derive(Clone, Debug, PartialEq)]
pub struct NvList {
    /// Header inherited from the outer list.
    header: NvHeader,

    /// List version.
    version: u32,

    /// List flags.
    flags: u32,

    /// Pairs.
    pairs: Vec<NvPair>,

    /// Index into pairs by name.
    index: BTreeMap<String, usize>,
}

macro_rules! nv_list_getters {
    ($($ty:ty, $get:ident, $get_array:ident;)*) => {
        $(
            #[doc = concat!("Gets a single [`", stringify!($ty), "`] with the specified name.")]
            ///
            /// Returns [`None`] if not found, or not set.
            ///
            /// # Errors
            ///
            /// Returns [`NvDecodeError`] if the type does not match.
            pub fn $get(&self, name: &str) -> Result<Option<$ty>, NvDecodeError> {
                match self.find_set(name) {
                    Some(pair) => Ok(Some(pair.$get()?)),
                    None => Ok(None),
                }
            }

            #[doc = concat!("Gets all [`", stringify!($ty), "`] values with the specified name.")]
            ///
            /// Returns [`None`] if not found, or not set.
            ///
            /// # Errors
            ///
            /// Returns [`NvDecodeError`] if the type does not match.
            pub fn $get_array(&self, name: &str) -> Result<Option<&[$ty]>, NvDecodeError> {
                match self.find_set(name) {
                    Some(pair) => Ok(Some(pair.$get_array()?)),
                    None => Ok(None),
                }
            }
        )*
    };
}

impl NvList {
    /** Decodes a [`NvList`] from a slice of bytes, using the default
     * [`NvDecodeLimits`].
     *
     * # Errors.
     *
     * Returns [`NvDecodeError`] on error. No partial list is returned.
     *
     * ```
     * use rnv::phys::NvList;
     *
     * let data = &[
     *     0x01, 0x01, 0x00, 0x00, // XDR, little endian host
     *     0x00, 0x00, 0x00, 0x00, // version
     *     0x00, 0x00, 0x00, 0x01, // flags
     *     0x00, 0x00, 0x00, 0x20, // encoded size
     *     0x00, 0x00, 0x00, 0x28, // decoded size
     *     0x00, 0x00, 0x00, 0x07, // name length
     *     b'v', b'e', b'r', b's', b'i', b'o', b'n', 0x00,
     *     0x00, 0x00, 0x00, 0x06, // Uint32
     *     0x00, 0x00, 0x00, 0x01, // count
     *     0x00, 0x00, 0x13, 0x88, // 5000
     *     0x00, 0x00, 0x00, 0x00, // end of list
     *     0x00, 0x00, 0x00, 0x00,
     * ];
     *
     * let list = NvList::from_bytes(data).unwrap();
     * assert_eq!(list.len(), 1);
     * assert_eq!(list.get_u32("version").unwrap(), Some(5000));
     * assert_eq!(list.get_u32("missing").unwrap(), None);
     * assert!(list.get_u64("version").is_err());
     *
     * // Truncated.
     * assert!(NvList::from_bytes(&data[0..30]).is_err());
     * ```
     */
    pub fn from_bytes(data: &[u8]) -> Result<NvList, NvDecodeError> {
        NvList::from_bytes_with_limits(data, &NvDecodeLimits::default())
    }

    /** Decodes a [`NvList`] from a slice of bytes.
     *
     * # Errors.
     *
     * Returns [`NvDecodeError`] on error, including when `limits` are
     * exceeded.
     */
    pub fn from_bytes_with_limits(
        data: &[u8],
        limits: &NvDecodeLimits,
    ) -> Result<NvList, NvDecodeError> {
        decode_nv_list(data, limits)
    }

    /// Creates an empty list.
    pub(crate) fn new(header: NvHeader, version: u32, flags: u32) -> NvList {
        NvList {
            header,
            version,
            flags,
            pairs: Vec::new(),
            index: BTreeMap::new(),
        }
    }

    /// Adds a pair, replacing any earlier pair with the same name.
    pub(crate) fn insert(&mut self, pair: NvPair) {
        match self.index.get(&pair.name) {
            Some(idx) => {
                debug!("NV pair {} repeated, replacing earlier value", pair.name);
                self.pairs[*idx] = pair;
            }
            None => {
                self.index.insert(pair.name.clone(), self.pairs.len());
                self.pairs.push(pair);
            }
        }
    }

    /// Gets the [`NvHeader`] of the outer list.
    pub fn header(&self) -> NvHeader {
        self.header
    }

    /// Gets the list version.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Gets the raw list flags.
    pub fn flags(&self) -> u32 {
        self.flags
    }

    /// Gets the [`NvUnique`] value from the list flags.
    pub fn unique(&self) -> Option<NvUnique> {
        NvUnique::try_from(self.flags).ok()
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Is the list empty.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns an iterator over the [`NvPair`] of the list.
    pub fn iter(&self) -> core::slice::Iter<'_, NvPair> {
        self.pairs.iter()
    }

    /// Finds the name value pair by name, whether or not it is set.
    pub fn get(&self, name: &str) -> Option<&NvPair> {
        self.index.get(name).and_then(|idx| self.pairs.get(*idx))
    }

    /// Finds the name value pair by name, only if it has a value.
    fn find_set(&self, name: &str) -> Option<&NvPair> {
        self.get(name).filter(|p| p.is_set())
    }

    /** Is there an [`NvDataType::Boolean`] flag with the specified name.
     *
     * Flags never carry a value, so they are absent from typed lookups.
     */
    pub fn has_flag(&self, name: &str) -> bool {
        self.get(name)
            .is_some_and(|p| p.type_tag == u32::from(NvDataType::Boolean))
    }

    nv_list_getters! {
        bool, get_bool, get_bool_array;
        u8, get_byte, get_byte_array;
        i8, get_i8, get_i8_array;
        u8, get_u8, get_u8_array;
        i16, get_i16, get_i16_array;
        u16, get_u16, get_u16_array;
        i32, get_i32, get_i32_array;
        u32, get_u32, get_u32_array;
        i64, get_i64, get_i64_array;
        u64, get_u64, get_u64_array;
        f64, get_f64, get_f64_array;
        i64, get_hr_time, get_hr_time_array;
    }

    /** Gets [`str`] with the specified name.
     *
     * Returns [`None`] if not found, or not set.
     *
     * # Errors
     *
     * Returns [`NvDecodeError`] if the type does not match.
     */
    pub fn get_str(&self, name: &str) -> Result<Option<&str>, NvDecodeError> {
        match self.find_set(name) {
            Some(pair) => Ok(Some(pair.get_str()?)),
            None => Ok(None),
        }
    }

    /** Gets [`str`] array with the specified name.
     *
     * Returns [`None`] if not found, or not set.
     *
     * # Errors
     *
     * Returns [`NvDecodeError`] if the type does not match.
     */
    pub fn get_str_array(&self, name: &str) -> Result<Option<&[String]>, NvDecodeError> {
        match self.find_set(name) {
            Some(pair) => Ok(Some(pair.get_str_array()?)),
            None => Ok(None),
        }
    }

    /** Gets a nested [`NvList`] with the specified name.
     *
     * Returns [`None`] if not found, or not set.
     *
     * # Errors
     *
     * Returns [`NvDecodeError`] if the type does not match.
     */
    pub fn get_nv_list(&self, name: &str) -> Result<Option<&NvList>, NvDecodeError> {
        match self.find_set(name) {
            Some(pair) => Ok(Some(pair.get_nv_list()?)),
            None => Ok(None),
        }
    }

    /** Gets an array of nested [`NvList`] with the specified name.
     *
     * Returns [`None`] if not found, or not set.
     *
     * # Errors
     *
     * Returns [`NvDecodeError`] if the type does not match.
     */
    pub fn get_nv_list_array(&self, name: &str) -> Result<Option<&[NvList]>, NvDecodeError> {
        match self.find_set(name) {
            Some(pair) => Ok(Some(pair.get_nv_list_array()?)),
            None => Ok(None),
        }
    }
}

impl<'a> IntoIterator for &'a NvList {
    type Item = &'a NvPair;
    type IntoIter = core::slice::Iter<'a, NvPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

////////////////////////////////////////////////////////////////////////////////

/// [`NvList`] decode error.
#[derive(Debug)]
pub enum NvDecodeError {
    /// [`NvDataType`] mismatch.
    DataTypeMismatch {
        /// Expected.
        expected: NvDataType,
        /// Actual tag.
        actual: u32,
    },

    /// Data type has an invalid count.
    InvalidCount {
        /// [`NvDataType`].
        data_type: NvDataType,
        /// Count.
        count: usize,
    },

    /// Invalid encoded size.
    InvalidEncodedSize {
        /// Encoded size.
        encoded_size: usize,
        /// Bytes used.
        used: usize,
    },

    /// Nested lists are deeper than [`NvDecodeLimits::max_depth`].
    MaxDepth {
        /// Maximum depth.
        max_depth: usize,
    },

    /// Input is larger than [`NvDecodeLimits::max_size`].
    TooLarge {
        /// Size of input.
        size: usize,
        /// Maximum size.
        max_size: usize,
    },

    /// Unknown [`NvDataType`].
    UnknownDataType {
        /// Unknown [`NvDataType`].
        data_type: u32,
    },

    /// Invalid [`NvEncoding`].
    UnknownEncoding {
        /// Invalid [`NvEncoding`].
        encoding: u8,
    },

    /// Invalid [`NvEndianOrder`].
    UnknownEndian {
        /// Invalid [`NvEndianOrder`].
        order: u8,
    },

    /// Invalid [`NvUnique`].
    UnknownUnique {
        /// Invalid [`NvUnique`].
        unique: u32,
    },

    /// Known, but not supported [`NvEncoding`].
    UnsupportedEncoding {
        /// Encoding.
        encoding: NvEncoding,
        /// Byte order.
        order: NvEndianOrder,
    },

    /// [`XdrDecoder`] error.
    Xdr {
        /// Error.
        err: XdrDecodeError,
    },
}

impl NvDecodeError {
    /// Is this error caused by truncated input.
    pub fn is_truncated(&self) -> bool {
        match self {
            NvDecodeError::Xdr { err } => err.is_end_of_input(),
            _ => false,
        }
    }
}

impl From<XdrDecodeError> for NvDecodeError {
    fn from(err: XdrDecodeError) -> Self {
        NvDecodeError::Xdr { err }
    }
}

impl fmt::Display for NvDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NvDecodeError::DataTypeMismatch { expected, actual } => {
                write!(
                    f,
                    "NV decode error, data type mismatch, expected {expected} actual {actual}"
                )
            }
            NvDecodeError::InvalidCount { data_type, count } => {
                write!(
                    f,
                    "NV decode error, invalid count {count} for data type {data_type}"
                )
            }
            NvDecodeError::InvalidEncodedSize { encoded_size, used } => {
                write!(
                    f,
                    "NV decode error, invalid encoded size {encoded_size} used {used}"
                )
            }
            NvDecodeError::MaxDepth { max_depth } => {
                write!(
                    f,
                    "NV decode error, nested lists exceed max depth {max_depth}"
                )
            }
            NvDecodeError::TooLarge { size, max_size } => {
                write!(
                    f,
                    "NV decode error, input size {size} exceeds max size {max_size}"
                )
            }
            NvDecodeError::UnknownDataType { data_type } => {
                write!(f, "NV decode error, unknown data type {data_type}")
            }
            NvDecodeError::UnknownEncoding { encoding } => {
                write!(f, "NV decode error, unknown encoding {encoding}")
            }
            NvDecodeError::UnknownEndian { order } => {
                write!(f, "NV decode error, unknown endian {order}")
            }
            NvDecodeError::UnknownUnique { unique } => {
                write!(f, "NV decode error, unknown unique {unique}")
            }
            NvDecodeError::UnsupportedEncoding { encoding, order } => {
                write!(
                    f,
                    "NV decode error, unsupported encoding {encoding} endian {order}"
                )
            }
            NvDecodeError::Xdr { err } => {
                write!(f, "NV decode error | {err}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl error::Error for NvDecodeError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            NvDecodeError::Xdr { err } => Some(err),
            _ => None,
        }
    }
}
