// SPDX-License-Identifier: GPL-2.0 OR MIT

/*! Name Value list text dump.
 *
 * One line per pair, indented by two spaces per nesting level:
 *
 * ```text
 * version = 5000
 * disks[0] = a
 * disks[1] = bb
 * reserved is not set
 * features
 *   guid = 42
 * future = raw type 99 [0x01, 0x02]
 * ```
 */
use core::fmt;
use core::fmt::Display;

use alloc::vec::Vec;

use crate::phys::{NvList, NvPair, NvValue};

////////////////////////////////////////////////////////////////////////////////

/** Text dump of an [`NvList`], starting at an indentation depth.
 *
 * ```
 * use rnv::phys::{NvList, NvListDisplay};
 *
 * let data = &[
 *     // XDR, big endian.
 *     0x01, 0x00, 0x00, 0x00,
 *     // Version and flags.
 *     0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01,
 *     // Encoded size, decoded size.
 *     0x00, 0x00, 0x00, 0x18, 0x00, 0x00, 0x00, 0x18,
 *     // Name.
 *     0x00, 0x00, 0x00, 0x03, b't', b'x', b'g', 0x00,
 *     // Uint64, count 0.
 *     0x00, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00, 0x00,
 *     // End.
 *     0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
 * ];
 *
 * let list = NvList::from_bytes(data).unwrap();
 * assert_eq!(list.to_string(), "txg is not set\n");
 * assert_eq!(NvListDisplay::new(&list, 1).to_string(), "  txg is not set\n");
 * ```
 */
#[derive(Clone, Copy, Debug)]
pub struct NvListDisplay<'a> {
    list: &'a NvList,
    depth: usize,
}

impl NvListDisplay<'_> {
    /// Spaces per depth.
    const INDENT: &'static str = "  ";

    /// Dumps `list`, with every line indented by `depth` levels.
    pub fn new(list: &NvList, depth: usize) -> NvListDisplay<'_> {
        NvListDisplay { list, depth }
    }

    fn indent(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.depth {
            f.write_str(NvListDisplay::INDENT)?;
        }
        Ok(())
    }

    /// Writes the lines of one pair.
    fn fmt_pair(&self, f: &mut fmt::Formatter<'_>, pair: &NvPair) -> fmt::Result {
        let name = &pair.name;

        match &pair.value {
            NvValue::Unset => {
                self.indent(f)?;
                writeln!(f, "{name} is not set")
            }
            NvValue::Boolean(v) => self.fmt_values(f, name, v),
            NvValue::Byte(v) | NvValue::Uint8(v) => {
                self.fmt_values(f, name, &v.iter().map(ByteDisplay).collect::<Vec<_>>())
            }
            NvValue::Int8(v) => self.fmt_values(f, name, v),
            NvValue::Int16(v) => self.fmt_values(f, name, v),
            NvValue::Uint16(v) => self.fmt_values(f, name, v),
            NvValue::Int32(v) => self.fmt_values(f, name, v),
            NvValue::Uint32(v) => self.fmt_values(f, name, v),
            NvValue::Int64(v) => self.fmt_values(f, name, v),
            NvValue::Uint64(v) => self.fmt_values(f, name, v),
            NvValue::Double(v) => self.fmt_values(f, name, v),
            NvValue::HrTime(v) => self.fmt_values(f, name, v),
            NvValue::String(v) => self.fmt_values(f, name, v),
            NvValue::NvList(list) => {
                self.indent(f)?;
                writeln!(f, "{name}")?;
                NvListDisplay::new(list, self.depth + 1).fmt(f)
            }
            NvValue::NvListArray(lists) => {
                for (idx, list) in lists.iter().enumerate() {
                    self.indent(f)?;
                    writeln!(f, "{name}[{idx}]")?;
                    NvListDisplay::new(list, self.depth + 1).fmt(f)?;
                }
                Ok(())
            }
            NvValue::Raw(bytes) => {
                self.indent(f)?;
                write!(f, "{name} = raw type {} [", pair.type_tag)?;
                for (idx, b) in bytes.iter().enumerate() {
                    if idx != 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{b:#04x}")?;
                }
                writeln!(f, "]")
            }
        }
    }

    /// Writes `name = value`, or `name[i] = value` per element of an array.
    fn fmt_values<T: Display>(
        &self,
        f: &mut fmt::Formatter<'_>,
        name: &str,
        values: &[T],
    ) -> fmt::Result {
        if values.len() == 1 {
            self.indent(f)?;
            return writeln!(f, "{name} = {}", values[0]);
        }

        for (idx, value) in values.iter().enumerate() {
            self.indent(f)?;
            writeln!(f, "{name}[{idx}] = {value}")?;
        }

        Ok(())
    }
}

impl Display for NvListDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pair in self.list {
            self.fmt_pair(f, pair)?;
        }
        Ok(())
    }
}

impl Display for NvList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        NvListDisplay::new(self, 0).fmt(f)
    }
}

/// Hex byte.
struct ByteDisplay<'a>(&'a u8);

impl Display for ByteDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {

    use alloc::string::ToString;

    use crate::phys::nv_test::{NvTestList, NvTestPair};
    use crate::phys::{NvDataType, NvDecodeError, NvDecodeLimits, NvList, NvListDisplay};

    #[test]
    /// Scalars and arrays.
    fn display_values() -> Result<(), NvDecodeError> {
        let data = NvTestList::new()
            .pair(NvTestPair::u32s("version", NvDataType::Uint32, &[5000]))
            .pair(NvTestPair::strs("disks", NvDataType::StringArray, &["a", "bb"]))
            .pair(NvTestPair::bytes("bytes", NvDataType::ByteArray, &[1, 0xab]))
            .pair(NvTestPair::u32s("b", NvDataType::BooleanValue, &[1]))
            .pair(NvTestPair::u64s("i64", NvDataType::Int64, &[u64::MAX]))
            .to_bytes();

        let list = NvList::from_bytes(&data)?;
        assert_eq!(
            list.to_string(),
            "version = 5000\n\
             disks[0] = a\n\
             disks[1] = bb\n\
             bytes[0] = 0x01\n\
             bytes[1] = 0xab\n\
             b = true\n\
             i64 = -1\n"
        );

        Ok(())
    }

    #[test]
    /// Zero count pairs.
    fn display_unset() -> Result<(), NvDecodeError> {
        let data = NvTestList::new()
            .pair(NvTestPair::raw("reserved", NvDataType::Uint64.into(), 0, &[]))
            .to_bytes();

        let list = NvList::from_bytes(&data)?;
        assert_eq!(list.to_string(), "reserved is not set\n");

        Ok(())
    }

    #[test]
    /// Nested lists are indented.
    fn display_nested() -> Result<(), NvDecodeError> {
        let inner = NvTestList::new().pair(NvTestPair::u64s("guid", NvDataType::Uint64, &[42]));
        let outer = NvTestList::new()
            .pair(NvTestPair::list("features", &inner))
            .pair(NvTestPair::u64s("txg", NvDataType::Uint64, &[3]));
        let data = NvTestList::new()
            .pair(NvTestPair::list("vdev_tree", &outer))
            .to_bytes();

        let list = NvList::from_bytes(&data)?;
        assert_eq!(
            list.to_string(),
            "vdev_tree\n  features\n    guid = 42\n  txg = 3\n"
        );

        let nested = list.get_nv_list("vdev_tree")?.unwrap();
        assert_eq!(
            NvListDisplay::new(nested, 2).to_string(),
            "    features\n      guid = 42\n    txg = 3\n"
        );

        Ok(())
    }

    #[test]
    /// Raw bytes, and decoded arrays of lists.
    fn display_raw() -> Result<(), NvDecodeError> {
        let child = NvTestList::new().pair(NvTestPair::u64s("id", NvDataType::Uint64, &[7]));
        let data = NvTestList::new()
            .pair(NvTestPair::raw("future", 99, 1, &[1, 2]))
            .pair(NvTestPair::lists("children", &[&child]))
            .to_bytes();

        let list = NvList::from_bytes(&data)?;
        let dump = list.to_string();
        assert!(dump.starts_with("future = raw type 99 [0x01, 0x02]\nchildren = raw type 20 ["));

        let limits = NvDecodeLimits {
            nv_list_arrays: true,
            ..NvDecodeLimits::default()
        };
        let list = NvList::from_bytes_with_limits(&data, &limits)?;
        assert_eq!(
            list.to_string(),
            "future = raw type 99 [0x01, 0x02]\nchildren[0]\n  id = 7\n"
        );

        Ok(())
    }
}
