// SPDX-License-Identifier: GPL-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;

use core::fmt;
use core::fmt::Display;

#[cfg(feature = "std")]
use std::error;

use crate::phys::{NvDecodeError, NvList};

////////////////////////////////////////////////////////////////////////////////

/** Pool state.
 *
 * ```text
 * +------------+-------------+
 * | State      | SPA Version |
 * +------------+-------------+
 * | Active     |           1 |
 * | Exported   |           1 |
 * | Destroyed  |           1 |
 * | Spare      |           3 |
 * | L2Cache    |          10 |
 * +------------+-------------+
 * ```
 */
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PoolState {
    /// In use.
    Active = 0,

    /// Exported.
    Exported = 1,

    /// Destroyed.
    Destroyed = 2,

    /// Hot spare.
    Spare = 3,

    /// Level 2 ARC.
    L2Cache = 4,
}

impl Display for PoolState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolState::Active => write!(f, "Active"),
            PoolState::Exported => write!(f, "Exported"),
            PoolState::Destroyed => write!(f, "Destroyed"),
            PoolState::Spare => write!(f, "Spare"),
            PoolState::L2Cache => write!(f, "L2Cache"),
        }
    }
}

impl From<PoolState> for u64 {
    fn from(val: PoolState) -> u64 {
        val as u64
    }
}

impl TryFrom<u64> for PoolState {
    type Error = PoolLabelDecodeError;

    /** Try converting from a [`u64`] to a [`PoolState`].
     *
     * # Errors
     *
     * Returns [`PoolLabelDecodeError`] in case of an unknown [`PoolState`].
     */
    fn try_from(pool_state: u64) -> Result<Self, Self::Error> {
        match pool_state {
            0 => Ok(PoolState::Active),
            1 => Ok(PoolState::Exported),
            2 => Ok(PoolState::Destroyed),
            3 => Ok(PoolState::Spare),
            4 => Ok(PoolState::L2Cache),
            _ => Err(PoolLabelDecodeError::UnknownState { pool_state }),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Keys of the label [`NvList`] read into a [`PoolLabel`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PoolConfigKey {
    /// Features needed to read the pool.
    FeaturesForRead,

    /// Vdev GUID.
    Guid,

    /// Host ID.
    HostId,

    /// Host name.
    HostName,

    /// Pool name.
    Name,

    /// Pool GUID.
    PoolGuid,

    /// Pool state.
    State,

    /// Top level vdev GUID.
    TopGuid,

    /// Transaction group.
    Txg,

    /// Vdev type, in [`PoolConfigKey::VdevTree`].
    VdevType,

    /// Vdev tree.
    VdevTree,

    /// SPA version.
    Version,
}

impl Display for PoolConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

impl From<PoolConfigKey> for &'static str {
    fn from(val: PoolConfigKey) -> &'static str {
        match val {
            PoolConfigKey::FeaturesForRead => "features_for_read",
            PoolConfigKey::Guid => "guid",
            PoolConfigKey::HostId => "hostid",
            PoolConfigKey::HostName => "hostname",
            PoolConfigKey::Name => "name",
            PoolConfigKey::PoolGuid => "pool_guid",
            PoolConfigKey::State => "state",
            PoolConfigKey::TopGuid => "top_guid",
            PoolConfigKey::Txg => "txg",
            PoolConfigKey::VdevType => "type",
            PoolConfigKey::VdevTree => "vdev_tree",
            PoolConfigKey::Version => "version",
        }
    }
}

////////////////////////////////////////////////////////////////////////////////

/** Summary of the [`NvList`] of a vdev label.
 *
 * Every field is optional, spare and cache devices do not carry the pool
 * fields.
 */
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PoolLabel {
    /// Pool name.
    pub name: Option<String>,

    /// Vdev GUID.
    pub guid: Option<u64>,

    /// Pool GUID.
    pub pool_guid: Option<u64>,

    /// SPA version.
    pub version: Option<u64>,

    /// Transaction group of the label.
    pub txg: Option<u64>,

    /// Pool state.
    pub state: Option<PoolState>,

    /// Host name that last imported the pool.
    pub hostname: Option<String>,

    /// Host ID that last imported the pool.
    pub hostid: Option<u64>,

    /// Top level vdev GUID.
    pub top_guid: Option<u64>,

    /// Type of the top level vdev.
    pub vdev_type: Option<String>,

    /// Names of features needed to read the pool.
    pub features_for_read: Vec<String>,
}

impl PoolLabel {
    /** Reads a [`PoolLabel`] from a decoded label list.
     *
     * Missing keys are [`None`].
     *
     * # Errors
     *
     * Returns [`PoolLabelDecodeError`] if a key has an unexpected data type,
     * or the state is unknown.
     */
    pub fn from_nv_list(list: &NvList) -> Result<PoolLabel, PoolLabelDecodeError> {
        let state = match get(list, PoolConfigKey::State, NvList::get_u64)? {
            Some(v) => Some(PoolState::try_from(v)?),
            None => None,
        };

        let vdev_type = match get(list, PoolConfigKey::VdevTree, NvList::get_nv_list)? {
            Some(tree) => get(tree, PoolConfigKey::VdevType, NvList::get_str)?.map(String::from),
            None => None,
        };

        let features_for_read =
            match get(list, PoolConfigKey::FeaturesForRead, NvList::get_nv_list)? {
                Some(features) => features.iter().map(|p| p.name.clone()).collect(),
                None => Vec::new(),
            };

        Ok(PoolLabel {
            name: get(list, PoolConfigKey::Name, NvList::get_str)?.map(String::from),
            guid: get(list, PoolConfigKey::Guid, NvList::get_u64)?,
            pool_guid: get(list, PoolConfigKey::PoolGuid, NvList::get_u64)?,
            version: get(list, PoolConfigKey::Version, NvList::get_u64)?,
            txg: get(list, PoolConfigKey::Txg, NvList::get_u64)?,
            state,
            hostname: get(list, PoolConfigKey::HostName, NvList::get_str)?.map(String::from),
            hostid: get(list, PoolConfigKey::HostId, NvList::get_u64)?,
            top_guid: get(list, PoolConfigKey::TopGuid, NvList::get_u64)?,
            vdev_type,
            features_for_read,
        })
    }
}

/// Looks up `key` with `getter`, tagging errors with the key.
fn get<'a, T>(
    list: &'a NvList,
    key: PoolConfigKey,
    getter: fn(&'a NvList, &str) -> Result<Option<T>, NvDecodeError>,
) -> Result<Option<T>, PoolLabelDecodeError> {
    getter(list, key.into()).map_err(|err| PoolLabelDecodeError::Key { key, err })
}

impl Display for PoolLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(v) = &self.name {
            writeln!(f, "pool: {v}")?;
        }
        if let Some(v) = self.pool_guid {
            writeln!(f, "pool guid: {v:#018x}")?;
        }
        if let Some(v) = self.guid {
            writeln!(f, "vdev guid: {v:#018x}")?;
        }
        if let Some(v) = self.top_guid {
            writeln!(f, "top guid: {v:#018x}")?;
        }
        if let Some(v) = &self.vdev_type {
            writeln!(f, "vdev type: {v}")?;
        }
        if let Some(v) = self.version {
            writeln!(f, "version: {v}")?;
        }
        if let Some(v) = self.txg {
            writeln!(f, "txg: {v}")?;
        }
        if let Some(v) = self.state {
            writeln!(f, "state: {v}")?;
        }
        if let Some(v) = &self.hostname {
            writeln!(f, "hostname: {v}")?;
        }
        if let Some(v) = self.hostid {
            writeln!(f, "hostid: {v:#x}")?;
        }
        for feature in &self.features_for_read {
            writeln!(f, "feature for read: {feature}")?;
        }
        Ok(())
    }
}

/// [`PoolLabel`] decode error.
#[derive(Debug)]
pub enum PoolLabelDecodeError {
    /// Key has an unexpected data type or count.
    Key {
        /// Key.
        key: PoolConfigKey,
        /// Error.
        err: NvDecodeError,
    },

    /// Unknown [`PoolState`].
    UnknownState {
        /// Pool state.
        pool_state: u64,
    },
}

impl fmt::Display for PoolLabelDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolLabelDecodeError::Key { key, err } => {
                write!(f, "PoolLabel decode error, key {key}: [{err}]")
            }
            PoolLabelDecodeError::UnknownState { pool_state } => {
                write!(f, "PoolLabel decode error, unknown state {pool_state}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl error::Error for PoolLabelDecodeError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            PoolLabelDecodeError::Key { err, .. } => Some(err),
            PoolLabelDecodeError::UnknownState { .. } => None,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
