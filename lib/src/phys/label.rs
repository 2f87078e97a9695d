// SPDX-License-Identifier: GPL-2.0 OR MIT

use core::fmt;

#[cfg(feature = "std")]
use std::error;

use crate::phys::{is_multiple_of_sector_size, SECTOR_SHIFT};

////////////////////////////////////////////////////////////////////////////////

/**
 * NV Pairs portion of a [`Label`].
 *
 * ### Byte layout.
 *
 * - Bytes: 114688 (112 KiB)
 *
 * ```text
 * +---------------+--------+
 * | payload       | 114648 |
 * +---------------+--------+
 * | checksum tail |     40 |
 * +---------------+--------+
 * ```
 *
 * The payload is an XDR encoded [`crate::phys::NvList`], padded with zeros.
 */
pub struct NvPairs {}

impl NvPairs {
    /// Byte size of [`NvPairs`].
    pub const SIZE: usize = 112 * 1024;

    /// Byte offset into a [`Label`], after the blank and boot header.
    pub const LABEL_OFFSET: usize = Label::BLANK_SIZE + Label::BOOT_HEADER_SIZE;

    /// Byte size of the checksum tail.
    pub const CHECKSUM_TAIL_SIZE: usize = 40;

    /// Byte size of the payload (114648).
    pub const PAYLOAD_SIZE: usize = NvPairs::SIZE - NvPairs::CHECKSUM_TAIL_SIZE;
}

////////////////////////////////////////////////////////////////////////////////

/**
 * Label of a block device.
 *
 * ### Byte layout.
 *
 * - Bytes: 262144 (256 KiB)
 *
 * ```text
 * +------------+--------+
 * | Blank      |   8192 |
 * +------------+--------+
 * | BootHeader |   8192 |
 * +------------+--------+
 * | NvPairs    | 114688 |
 * +------------+--------+
 * | UberBlocks | 131072 |
 * +------------+--------+
 * ```
 *
 * ### Label layout in block device.
 *
 * ```text
 * +----+----+-----------+-----+----+----+
 * | L0 | L1 | BootBlock | ... | L2 | L3 |
 * +----+----+-----------+-----+----+----+
 * ```
 */
pub struct Label {}

impl Label {
    /// Count of [`Label`] in a vdev.
    pub const COUNT: usize = 4;

    /// Byte size of the blank portion.
    pub const BLANK_SIZE: usize = 8 * 1024;

    /// Byte size of the boot header portion.
    pub const BOOT_HEADER_SIZE: usize = 8 * 1024;

    /// Byte size of the uber block ring.
    pub const UBER_BLOCKS_SIZE: usize = 128 * 1024;

    /// Byte size of a [`Label`] (256 KiB).
    pub const SIZE: usize =
        Label::BLANK_SIZE + Label::BOOT_HEADER_SIZE + NvPairs::SIZE + Label::UBER_BLOCKS_SIZE;

    /** Gets label sector offsets for a virtual device size in sectors.
     *
     * # Errors
     *
     * Returns [`LabelError`] if vdev_sectors is too small.
     *
     * ```
     * use rnv::phys::Label;
     *
     * let sectors = Label::sectors(4096).unwrap();
     * assert_eq!(sectors, [0, 512, 3072, 3584]);
     *
     * assert!(Label::sectors(2047).is_err());
     * ```
     */
    pub fn sectors(vdev_sectors: u64) -> Result<[u64; Label::COUNT], LabelError> {
        debug_assert!(is_multiple_of_sector_size(Label::SIZE as u64));

        let size_sectors: u64 = (Label::SIZE >> SECTOR_SHIFT) as u64;

        if vdev_sectors < size_sectors * Label::COUNT as u64 {
            return Err(LabelError::TooSmall {
                sectors: vdev_sectors,
            });
        }

        Ok([
            // L0
            0,
            // L1
            size_sectors,
            // L2
            vdev_sectors - 2 * size_sectors,
            // L3
            vdev_sectors - size_sectors,
        ])
    }

    /** Gets the [`NvPairs`] payload of a label.
     *
     * `label` is the label, or its first bytes.
     *
     * # Errors
     *
     * Returns [`LabelError`] if `label` ends before the payload.
     *
     * ```
     * use rnv::phys::{Label, NvPairs};
     *
     * let label = vec![0; Label::SIZE];
     * let payload = Label::nv_pairs_payload(&label).unwrap();
     * assert_eq!(payload.len(), NvPairs::PAYLOAD_SIZE);
     *
     * assert!(Label::nv_pairs_payload(&label[0..NvPairs::LABEL_OFFSET]).is_err());
     * ```
     */
    pub fn nv_pairs_payload(label: &[u8]) -> Result<&[u8], LabelError> {
        let end = NvPairs::LABEL_OFFSET + NvPairs::PAYLOAD_SIZE;

        match label.get(NvPairs::LABEL_OFFSET..end) {
            Some(v) => Ok(v),
            None => Err(LabelError::Truncated { size: label.len() }),
        }
    }
}

/// [`Label`] error.
#[derive(Debug)]
pub enum LabelError {
    /// Not enough sectors for [`Label::sectors`].
    TooSmall {
        /// Sectors.
        sectors: u64,
    },

    /// Label bytes end before the [`NvPairs`] payload.
    Truncated {
        /// Size of label bytes.
        size: usize,
    },
}

impl fmt::Display for LabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelError::TooSmall { sectors } => {
                write!(f, "Not enough sectors for Label::sectors: {sectors}")
            }
            LabelError::Truncated { size } => {
                write!(f, "Label is truncated before NvPairs: {size} bytes")
            }
        }
    }
}

#[cfg(feature = "std")]
impl error::Error for LabelError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}

////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {

    use crate::phys::{Label, LabelError, NvPairs, SECTOR_SIZE};

    #[test]
    /// Layout constants.
    fn layout() {
        assert_eq!(Label::SIZE, 256 * 1024);
        assert_eq!(NvPairs::LABEL_OFFSET, 16 * 1024);
        assert_eq!(NvPairs::PAYLOAD_SIZE, 114648);
        assert_eq!(Label::SIZE % SECTOR_SIZE, 0);
    }

    #[test]
    /// Smallest device with four labels.
    fn sectors_minimum() -> Result<(), LabelError> {
        let label_sectors = (Label::SIZE / SECTOR_SIZE) as u64;

        let sectors = Label::sectors(4 * label_sectors)?;
        assert_eq!(
            sectors,
            [0, label_sectors, 2 * label_sectors, 3 * label_sectors]
        );

        assert!(matches!(
            Label::sectors(4 * label_sectors - 1),
            Err(LabelError::TooSmall { .. })
        ));

        Ok(())
    }
}
