// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use understory_constellation::ItemId;

/// Error returned by [`Scene`](crate::Scene) entry points that require an id
/// of the loaded tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SceneError {
    /// The id names neither a node nor a container of the loaded tree.
    UnknownItem {
        /// The id that was passed in.
        id: ItemId,
    },
}

impl SceneError {
    pub(crate) fn unknown(id: &str) -> Self {
        Self::UnknownItem { id: id.into() }
    }
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownItem { id } => write!(f, "no node or container with id {id:?}"),
        }
    }
}

impl core::error::Error for SceneError {}
