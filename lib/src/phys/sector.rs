// SPDX-License-Identifier: GPL-2.0 OR MIT

/// Power of two of a device sector.
pub const SECTOR_SHIFT: u32 = 9;

/// Byte size of a device sector (512).
pub const SECTOR_SIZE: usize = 1 << SECTOR_SHIFT;

/** Is `bytes` a whole number of sectors.
 *
 * ```
 * use rnv::phys::is_multiple_of_sector_size;
 *
 * assert!(is_multiple_of_sector_size(1024));
 * assert!(!is_multiple_of_sector_size(1025));
 * ```
 */
pub fn is_multiple_of_sector_size(bytes: u64) -> bool {
    bytes & ((1 << SECTOR_SHIFT) - 1) == 0
}

/** Byte offset of a sector.
 *
 * Returns [`None`] on overflow.
 *
 * ```
 * use rnv::phys::sector_to_bytes;
 *
 * assert_eq!(sector_to_bytes(3), Some(1536));
 * assert_eq!(sector_to_bytes(u64::MAX), None);
 * ```
 */
pub fn sector_to_bytes(sector: u64) -> Option<u64> {
    sector.checked_mul(SECTOR_SIZE as u64)
}
