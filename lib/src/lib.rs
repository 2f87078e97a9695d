// SPDX-License-Identifier: GPL-2.0 OR MIT

//! Name Value list decoding, for the labels of ZFS vdevs.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

extern crate alloc;

/// On disk physical structure decoding.
pub mod phys;

/// Userspace device access.
#[cfg(feature = "userspace")]
pub mod userspace;
