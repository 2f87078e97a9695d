// SPDX-License-Identifier: GPL-2.0 OR MIT

//! Builders of encoded [`crate::phys::NvList`] bytes for tests.

use alloc::vec;
use alloc::vec::Vec;

use crate::phys::{xdr_padded_length, NvDataType};

/// Appends `value` as a big endian [`u32`].
fn put_u32(data: &mut Vec<u8>, value: u32) {
    data.extend_from_slice(&value.to_be_bytes());
}

/// Appends `bytes`, padded with zeros to a multiple of 4 bytes.
fn put_padded(data: &mut Vec<u8>, bytes: &[u8]) {
    data.extend_from_slice(bytes);
    let padded = xdr_padded_length(bytes.len()).unwrap_or(bytes.len());
    data.resize(data.len() + padded - bytes.len(), 0);
}

/// An encoded pair, with its name, tag, count, and value bytes.
pub(crate) struct NvTestPair {
    name: &'static str,
    type_tag: u32,
    count: u32,
    value: Vec<u8>,
}

impl NvTestPair {
    /// A pair with arbitrary `value` bytes.
    pub(crate) fn raw(name: &'static str, type_tag: u32, count: u32, value: &[u8]) -> NvTestPair {
        NvTestPair {
            name,
            type_tag,
            count,
            value: value.to_vec(),
        }
    }

    /// A pair of 4 byte values.
    pub(crate) fn u32s(name: &'static str, data_type: NvDataType, values: &[u32]) -> NvTestPair {
        let mut value = Vec::new();
        for v in values {
            put_u32(&mut value, *v);
        }
        NvTestPair::raw(name, data_type.into(), values.len() as u32, &value)
    }

    /// A pair of 8 byte values.
    pub(crate) fn u64s(name: &'static str, data_type: NvDataType, values: &[u64]) -> NvTestPair {
        let mut value = Vec::new();
        for v in values {
            value.extend_from_slice(&v.to_be_bytes());
        }
        NvTestPair::raw(name, data_type.into(), values.len() as u32, &value)
    }

    /// A pair of single byte values.
    pub(crate) fn bytes(name: &'static str, data_type: NvDataType, values: &[u8]) -> NvTestPair {
        let mut value = Vec::new();
        put_padded(&mut value, values);
        NvTestPair::raw(name, data_type.into(), values.len() as u32, &value)
    }

    /// A pair of strings.
    pub(crate) fn strs(name: &'static str, data_type: NvDataType, values: &[&str]) -> NvTestPair {
        let mut value = Vec::new();
        for v in values {
            put_u32(&mut value, v.len() as u32);
            put_padded(&mut value, v.as_bytes());
        }
        NvTestPair::raw(name, data_type.into(), values.len() as u32, &value)
    }

    /// A pair of one nested list.
    pub(crate) fn list(name: &'static str, list: &NvTestList) -> NvTestPair {
        NvTestPair::raw(name, NvDataType::NvList.into(), 1, &list.to_nested_bytes())
    }

    /// A pair of an array of nested lists.
    pub(crate) fn lists(name: &'static str, lists: &[&NvTestList]) -> NvTestPair {
        let mut value = Vec::new();
        for list in lists {
            value.extend_from_slice(&list.to_nested_bytes());
        }
        NvTestPair::raw(name, NvDataType::NvListArray.into(), lists.len() as u32, &value)
    }

    /// Appends the encoded pair.
    fn encode(&self, data: &mut Vec<u8>) {
        let mut body = Vec::new();
        put_u32(&mut body, self.name.len() as u32);
        put_padded(&mut body, self.name.as_bytes());
        put_u32(&mut body, self.type_tag);
        put_u32(&mut body, self.count);
        body.extend_from_slice(&self.value);

        // Encoded and decoded sizes.
        let encoded_size = (body.len() + 8) as u32;
        put_u32(data, encoded_size);
        put_u32(data, encoded_size);
        data.extend_from_slice(&body);
    }
}

/// An encoded list of pairs.
pub(crate) struct NvTestList {
    pairs: Vec<NvTestPair>,
}

impl NvTestList {
    /// An empty list.
    pub(crate) fn new() -> NvTestList {
        NvTestList { pairs: Vec::new() }
    }

    /// Appends a pair.
    pub(crate) fn pair(mut self, pair: NvTestPair) -> NvTestList {
        self.pairs.push(pair);
        self
    }

    /// Version, flags, pairs, and the end marker.
    fn to_nested_bytes(&self) -> Vec<u8> {
        let mut data = Vec::new();

        // Version 0, unique name.
        put_u32(&mut data, 0);
        put_u32(&mut data, 1);

        for pair in &self.pairs {
            pair.encode(&mut data);
        }

        data.extend_from_slice(&[0; 8]);
        data
    }

    /// An outer list, with an XDR big endian encoding header.
    pub(crate) fn to_bytes(&self) -> Vec<u8> {
        let mut data = vec![1, 0, 0, 0];
        data.extend_from_slice(&self.to_nested_bytes());
        data
    }
}
