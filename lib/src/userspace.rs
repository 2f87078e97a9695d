// SPDX-License-Identifier: GPL-2.0 OR MIT

pub(crate) mod block_device;
pub use block_device::{BlockDevice, BlockDeviceOpenError, BlockDeviceReadError};
