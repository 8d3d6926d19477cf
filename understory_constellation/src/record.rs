// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw ingestion records consumed by [`TreeBuilder`](crate::TreeBuilder).
//!
//! With the `serde` feature these deserialize from the camelCase JSON shape
//! supplied by the ingestion endpoint:
//!
//! ```json
//! { "id": "docs", "centerPosition": { "x": 0.0, "y": 0.0 }, "depthHint": 0,
//!   "items": [ { "id": "a", "title": "A", "kind": "folder", "children": [] } ] }
//! ```

use alloc::string::String;
use alloc::vec::Vec;
use kurbo::Point;

use crate::types::ItemKind;

/// A top-level grouping: one center node plus its items.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct ContainerRecord {
    /// Container id. A trailing [`CENTER_SUFFIX`](crate::CENTER_SUFFIX) is ignored.
    pub id: String,
    /// Optional display title for the center node; defaults to the id.
    pub title: Option<String>,
    /// World-space position of the center node.
    #[cfg_attr(feature = "serde", serde(alias = "centerPosition"))]
    pub center: Point,
    /// Scalar depth hint of the center node; `None` means level 0.
    #[cfg_attr(feature = "serde", serde(alias = "depthHint"))]
    pub depth: Option<f64>,
    /// Marks the designated home container, whose center never steps back.
    pub home: bool,
    /// Items of the container, in display order.
    pub items: Vec<ItemRecord>,
}

impl ContainerRecord {
    /// Creates a container at `center` with no items.
    pub fn new(id: impl Into<String>, center: Point) -> Self {
        Self {
            id: id.into(),
            center,
            ..Self::default()
        }
    }

    /// Appends an item.
    #[must_use]
    pub fn with_item(mut self, item: ItemRecord) -> Self {
        self.items.push(item);
        self
    }

    /// Sets the center depth hint.
    #[must_use]
    pub fn with_depth(mut self, depth: f64) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Marks this container as the home container.
    #[must_use]
    pub fn as_home(mut self) -> Self {
        self.home = true;
        self
    }
}

/// One item of a container, possibly owning nested items.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct ItemRecord {
    /// Stable item id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Item kind.
    pub kind: ItemKind,
    /// Angle from the parent in degrees; computed from the fan when absent.
    pub angle: Option<f64>,
    /// Distance from the parent; computed from the level radius when absent.
    pub distance: Option<f64>,
    /// Scalar depth hint.
    #[cfg_attr(feature = "serde", serde(alias = "depthHint"))]
    pub depth: Option<f64>,
    /// Id of another item in the same container that owns this one.
    ///
    /// Only honored on top-level items; nesting through [`ItemRecord::children`]
    /// takes precedence.
    pub parent_id: Option<String>,
    /// Nested items owned inline.
    pub children: Vec<ItemRecord>,
}

impl ItemRecord {
    /// Creates an item with the given id, title and kind.
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            ..Self::default()
        }
    }

    /// Creates a document item whose title equals its id.
    pub fn document(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::new(id.clone(), id, ItemKind::Document)
    }

    /// Creates a folder item whose title equals its id.
    pub fn folder(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::new(id.clone(), id, ItemKind::Folder)
    }

    /// Appends a nested child.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Sets the scalar depth hint.
    #[must_use]
    pub fn with_depth(mut self, depth: f64) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Sets the owning item by id.
    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Pins the polar placement relative to the parent.
    #[must_use]
    pub fn at(mut self, angle_degrees: f64, distance: f64) -> Self {
        self.angle = Some(angle_degrees);
        self.distance = Some(distance);
        self
    }
}
