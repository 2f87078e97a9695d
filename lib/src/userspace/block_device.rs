// SPDX-License-Identifier: GPL-2.0 OR MIT

use core::fmt;
use std::error;

use std::fs;
use std::io;
use std::os::unix::fs::FileExt;
use std::path::Path;

use log::debug;

use crate::phys::{is_multiple_of_sector_size, sector_to_bytes, Label, LabelError, SECTOR_SHIFT};

/// A read only block device backed by a file or device node.
#[derive(Debug)]
pub struct BlockDevice {
    /// Block device file.
    file: fs::File,

    /// Size of file in sectors.
    sectors: u64,
}

impl BlockDevice {
    /** Opens the path as a block device.
     *
     * # Errors
     *
     * Returns [`BlockDeviceOpenError`] if the path cannot be opened, or its
     * size is not a multiple of the sector size.
     */
    pub fn open<P: AsRef<Path>>(path: P) -> Result<BlockDevice, BlockDeviceOpenError> {
        let path = path.as_ref();

        let file = match fs::OpenOptions::new().read(true).open(path) {
            Ok(v) => v,
            Err(err) => return Err(BlockDeviceOpenError::Open { err }),
        };

        let size = match file.metadata() {
            Ok(v) => v.len(),
            Err(err) => return Err(BlockDeviceOpenError::Metadata { err }),
        };

        if !is_multiple_of_sector_size(size) {
            return Err(BlockDeviceOpenError::InvalidSize { size });
        }

        debug!("opened block device {} of {size} bytes", path.display());

        Ok(BlockDevice {
            file,
            sectors: size >> SECTOR_SHIFT,
        })
    }

    /// Size in sectors.
    pub fn sectors(&self) -> u64 {
        self.sectors
    }

    /** Reads `data` starting at `sector`.
     *
     * # Errors
     *
     * Returns [`BlockDeviceReadError`] if `data` is not a whole number of
     * sectors, the range is past the end of the device, or on I/O errors.
     */
    pub fn read(&self, data: &mut [u8], sector: u64) -> Result<(), BlockDeviceReadError> {
        let size = data.len();
        let invalid = BlockDeviceReadError::InvalidRead { sector, size };

        if !is_multiple_of_sector_size(size as u64) {
            return Err(invalid);
        }

        let sector_count = (size >> SECTOR_SHIFT) as u64;
        if sector > self.sectors || self.sectors - sector < sector_count {
            return Err(invalid);
        }

        let mut offset = match sector_to_bytes(sector) {
            Some(v) => v,
            None => return Err(invalid),
        };

        // Handle short reads.
        let mut data: &mut [u8] = data;
        while !data.is_empty() {
            let read = match self.file.read_at(data, offset) {
                Ok(0) => {
                    return Err(BlockDeviceReadError::Io {
                        err: io::Error::from(io::ErrorKind::UnexpectedEof),
                        sector,
                        size,
                    })
                }
                Ok(v) => v,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(BlockDeviceReadError::Io { err, sector, size }),
            };

            let rest = data;
            data = &mut rest[read..];
            offset += read as u64;
        }

        Ok(())
    }

    /** Reads the label at `index`, in `0..Label::COUNT`.
     *
     * # Errors
     *
     * Returns [`BlockDeviceReadError`] if the device is too small for labels,
     * `index` is out of range, or the read fails.
     */
    pub fn read_label(&self, index: usize) -> Result<Vec<u8>, BlockDeviceReadError> {
        let sectors = Label::sectors(self.sectors)
            .map_err(|err| BlockDeviceReadError::Label { err })?;

        let sector = match sectors.get(index) {
            Some(v) => *v,
            None => return Err(BlockDeviceReadError::InvalidLabel { index }),
        };

        let mut label = vec![0; Label::SIZE];
        self.read(&mut label, sector)?;

        debug!("read label {index} at sector {sector}");

        Ok(label)
    }
}

/// [`BlockDevice`] open error.
#[derive(Debug)]
pub enum BlockDeviceOpenError {
    /// Block device invalid size.
    InvalidSize {
        /// Size.
        size: u64,
    },

    /// Block device open error.
    Open {
        /// Error.
        err: io::Error,
    },

    /// Block device metadata query error.
    Metadata {
        /// Error.
        err: io::Error,
    },
}

impl fmt::Display for BlockDeviceOpenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockDeviceOpenError::InvalidSize { size } => {
                write!(f, "Block Device invalid size:0x{size:016x}")
            }
            BlockDeviceOpenError::Open { err } => {
                write!(f, "Block Device open error: [{err}]")
            }
            BlockDeviceOpenError::Metadata { err } => {
                write!(f, "Block Device metadata error: [{err}]")
            }
        }
    }
}

impl error::Error for BlockDeviceOpenError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            BlockDeviceOpenError::Open { err } => Some(err),
            BlockDeviceOpenError::Metadata { err } => Some(err),
            BlockDeviceOpenError::InvalidSize { .. } => None,
        }
    }
}

/// [`BlockDevice`] read error.
#[derive(Debug)]
pub enum BlockDeviceReadError {
    /// Invalid read bytes offset and / or size.
    InvalidRead {
        /// Sector.
        sector: u64,
        /// Size in bytes.
        size: usize,
    },

    /// Label index out of range.
    InvalidLabel {
        /// Index.
        index: usize,
    },

    /// I/O error.
    Io {
        /// Error.
        err: io::Error,
        /// Sector.
        sector: u64,
        /// Size.
        size: usize,
    },

    /// Device is too small for labels.
    Label {
        /// Error.
        err: LabelError,
    },
}

impl fmt::Display for BlockDeviceReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockDeviceReadError::InvalidRead { sector, size } => {
                write!(
                    f,
                    "Block Device invalid read sector:0x{sector:016x} size:0x{size:016x}"
                )
            }
            BlockDeviceReadError::InvalidLabel { index } => {
                write!(f, "Block Device invalid label index {index}")
            }
            BlockDeviceReadError::Io { err, sector, size } => {
                write!(
                    f,
                    "Block Device read IO error at sector:0x{sector:016x} size:0x{size:016x}: [{err}]"
                )
            }
            BlockDeviceReadError::Label { err } => {
                write!(f, "Block Device label error: [{err}]")
            }
        }
    }
}

impl error::Error for BlockDeviceReadError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            BlockDeviceReadError::Io { err, .. } => Some(err),
            BlockDeviceReadError::Label { err } => Some(err),
            _ => None,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
