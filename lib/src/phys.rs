// SPDX-License-Identifier: GPL-2.0 OR MIT

pub(crate) mod label;
pub use label::{Label, LabelError, NvPairs};

pub(crate) mod nv;
pub use nv::{
    NvDataType, NvDecodeError, NvEncoding, NvEndianOrder, NvHeader, NvList, NvPair, NvUnique,
    NvValue,
};

pub(crate) mod nv_decoder;
pub(crate) use nv_decoder::decode_nv_list;
pub use nv_decoder::NvDecodeLimits;

pub(crate) mod nv_display;
pub use nv_display::NvListDisplay;

#[cfg(test)]
pub(crate) mod nv_test;

pub(crate) mod pool;
pub use pool::{PoolConfigKey, PoolLabel, PoolLabelDecodeError, PoolState};

pub(crate) mod sector;
pub use sector::{is_multiple_of_sector_size, sector_to_bytes, SECTOR_SHIFT, SECTOR_SIZE};

pub(crate) mod xdr;
pub use xdr::{xdr_padded_length, GetFromXdrDecoder, XdrDecodeError, XdrDecoder, XDR_ALIGNMENT};
