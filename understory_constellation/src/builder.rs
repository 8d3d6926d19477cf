// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Orbital layout: turns container records into a flat [`ConstellationTree`].

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::{HashMap, HashSet};

use crate::layer::DepthLayer;
use crate::record::{ContainerRecord, ItemRecord};
use crate::tree::{ConstellationTree, Node, polar};
use crate::types::{
    CENTER_SUFFIX, ItemId, ItemKind, NodeFlags, NodeId, OVERFLOW_SUFFIX, normalize_container_id,
};

/// Geometry and fan-out parameters for [`TreeBuilder`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Distance of direct children from their container center.
    pub base_radius: f64,
    /// Extra distance per nesting level below the direct children.
    pub radius_step: f64,
    /// Maximum number of nodes emitted around one parent, counting the
    /// overflow placeholder.
    pub max_visible_children: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            base_radius: 200.0,
            radius_step: 80.0,
            max_visible_children: 10,
        }
    }
}

/// Builds a [`ConstellationTree`] from ingestion records.
///
/// The builder never mutates its input. Malformed parent references are
/// dropped, making the affected item a root of its own ancestor walk.
#[derive(Clone, Debug, Default)]
pub struct TreeBuilder {
    config: LayoutConfig,
    home: Option<String>,
}

impl TreeBuilder {
    /// Creates a builder with the default [`LayoutConfig`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the layout configuration.
    #[must_use]
    pub fn config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }

    /// Designates the home container by id, in addition to any record
    /// carrying [`ContainerRecord::home`].
    #[must_use]
    pub fn home(mut self, container: impl Into<String>) -> Self {
        self.home = Some(container.into());
        self
    }

    /// Returns the layout configuration.
    #[must_use]
    pub fn layout(&self) -> &LayoutConfig {
        &self.config
    }

    /// Materializes every container into one flat tree.
    #[must_use]
    pub fn build(&self, containers: &[ContainerRecord]) -> ConstellationTree {
        let mut tree = ConstellationTree::default();
        for container in containers {
            self.build_container(&mut tree, container);
        }
        tree
    }

    fn build_container(&self, tree: &mut ConstellationTree, record: &ContainerRecord) {
        let key = ItemId::from(normalize_container_id(&record.id));
        let is_home = record.home
            || self
                .home
                .as_deref()
                .is_some_and(|h| normalize_container_id(h) == key.as_str());

        let mut flags = NodeFlags::CENTER;
        if is_home {
            flags |= NodeFlags::HOME;
            if tree.home.is_none() {
                tree.home = Some(key.clone());
            }
        }

        let center = tree.push(Node {
            id: ItemId::new(format!("{key}{CENTER_SUFFIX}")),
            title: record.title.clone().unwrap_or_else(|| key.as_str().into()),
            kind: ItemKind::Center,
            constellation: key.clone(),
            position: record.center,
            angle: 0.0,
            distance: 0.0,
            parent: None,
            depth_hint: Some(record.depth.map_or(DepthLayer::FRONT, DepthLayer::from_scalar)),
            level: 0,
            flags,
            overflow: Vec::new(),
        });
        tree.centers.entry(key.clone()).or_insert(center);
        tree.containers.push(key.clone());

        let plan = ContainerPlan::new(key.as_str(), &record.items);
        let placer = Placer {
            config: &self.config,
            plan: &plan,
            constellation: key,
        };
        placer.place_fan(tree, center, &plan.direct, 1);
    }
}

/// Parent assignment for the top-level items of one container.
struct ContainerPlan<'a> {
    items: &'a [ItemRecord],
    /// First top-level index per id.
    known: HashMap<&'a str, usize>,
    /// Items without a usable `parent_id`, in input order.
    direct: Vec<&'a ItemRecord>,
    /// Items whose `parent_id` named nothing or formed a cycle.
    ///
    /// Only top-level ids are link targets; a `parent_id` naming an item
    /// nested inline under another record counts as dangling.
    orphans: HashSet<&'a str>,
    /// Top-level items attached to another item via `parent_id`.
    linked: HashMap<&'a str, Vec<&'a ItemRecord>>,
}

impl<'a> ContainerPlan<'a> {
    fn new(container: &str, items: &'a [ItemRecord]) -> Self {
        let known: HashMap<&str, usize> = items
            .iter()
            .enumerate()
            .rev()
            .map(|(i, it)| (it.id.as_str(), i))
            .collect();

        // Index of the owning top-level item, if the reference is usable.
        let mut parent_of: Vec<Option<usize>> = items
            .iter()
            .map(|it| it.parent_id.as_deref().and_then(|p| known.get(p).copied()))
            .collect();

        // Links to the container itself are just direct children; links to
        // anything else unknown are malformed.
        let mut orphans: HashSet<&str> = items
            .iter()
            .zip(&parent_of)
            .filter(|(it, parent)| {
                parent.is_none()
                    && it
                        .parent_id
                        .as_deref()
                        .is_some_and(|p| !p.is_empty() && normalize_container_id(p) != container)
            })
            .map(|(it, _)| it.id.as_str())
            .collect();

        for i in 0..items.len() {
            if Self::on_cycle(&parent_of, i) {
                orphans.insert(items[i].id.as_str());
            }
        }
        for (i, item) in items.iter().enumerate() {
            if orphans.contains(item.id.as_str()) {
                parent_of[i] = None;
            }
        }

        let mut direct = Vec::new();
        let mut linked: HashMap<&str, Vec<&ItemRecord>> = HashMap::new();
        for (item, parent) in items.iter().zip(&parent_of) {
            match parent {
                Some(p) => linked.entry(items[*p].id.as_str()).or_default().push(item),
                None => direct.push(item),
            }
        }

        Self {
            items,
            known,
            direct,
            orphans,
            linked,
        }
    }

    fn on_cycle(parent_of: &[Option<usize>], start: usize) -> bool {
        let mut cursor = parent_of[start];
        for _ in 0..parent_of.len() {
            match cursor {
                Some(i) if i == start => return true,
                Some(i) => cursor = parent_of[i],
                None => return false,
            }
        }
        false
    }

    /// Inline children first, then linked top-level items.
    ///
    /// Only the top-level record itself picks up linked items, so a nested
    /// record that happens to reuse a top-level id cannot loop the layout.
    fn nested(&self, item: &'a ItemRecord) -> Vec<&'a ItemRecord> {
        let is_top_level = self
            .known
            .get(item.id.as_str())
            .is_some_and(|&i| core::ptr::eq(&self.items[i], item));
        let linked = is_top_level
            .then(|| self.linked.get(item.id.as_str()))
            .flatten();
        item.children
            .iter()
            .chain(linked.into_iter().flatten().copied())
            .collect()
    }

    /// Clones `item` with its linked items folded into `children`, so a
    /// truncated record keeps everything that would have hung below it.
    fn detach(&self, item: &'a ItemRecord) -> ItemRecord {
        let mut owned = item.clone();
        owned.children = self.nested(item).into_iter().map(|r| self.detach(r)).collect();
        owned
    }
}

struct Placer<'a> {
    config: &'a LayoutConfig,
    plan: &'a ContainerPlan<'a>,
    constellation: ItemId,
}

impl<'a> Placer<'a> {
    /// Places `children` evenly around `parent` at nesting `level`.
    fn place_fan(
        &self,
        tree: &mut ConstellationTree,
        parent: NodeId,
        children: &[&'a ItemRecord],
        level: u16,
    ) {
        if children.is_empty() {
            return;
        }
        let cap = self.config.max_visible_children.max(1);
        let (shown, tail) = if children.len() > cap {
            children.split_at(cap - 1)
        } else {
            (children, &[][..])
        };
        let slots = shown.len() + usize::from(!tail.is_empty());
        let step = if slots > 1 { 360.0 / slots as f64 } else { 0.0 };
        let radius = self.config.base_radius + f64::from(level - 1) * self.config.radius_step;

        let (origin, parent_hint, parent_key) = {
            let p = &tree.nodes[parent.index()];
            (p.position, p.depth_hint, p.id.clone())
        };

        for (slot, record) in shown.iter().enumerate() {
            let angle = record.angle.unwrap_or(slot as f64 * step);
            let distance = record.distance.unwrap_or(radius);
            let is_orphan = level == 1 && self.plan.orphans.contains(record.id.as_str());
            let node = Node {
                id: ItemId::new(record.id.as_str()),
                title: record.title.clone(),
                kind: record.kind,
                constellation: self.constellation.clone(),
                position: polar(origin, angle, distance),
                angle,
                distance,
                parent: if is_orphan { None } else { Some(parent) },
                depth_hint: Self::hint_for(record.depth, parent_hint, level),
                level,
                flags: NodeFlags::empty(),
                overflow: Vec::new(),
            };
            let child = tree.push(node);
            let nested = self.plan.nested(*record);
            self.place_fan(tree, child, &nested, level.saturating_add(1));
        }

        if !tail.is_empty() {
            let angle = shown.len() as f64 * step;
            let node = Node {
                id: ItemId::new(format!("{parent_key}{OVERFLOW_SUFFIX}")),
                title: format!("+{} more", tail.len()),
                kind: ItemKind::Document,
                constellation: self.constellation.clone(),
                position: polar(origin, angle, radius),
                angle,
                distance: radius,
                parent: Some(parent),
                depth_hint: Self::hint_for(None, parent_hint, level),
                level,
                flags: NodeFlags::OVERFLOW,
                overflow: tail.iter().map(|r| self.plan.detach(*r)).collect(),
            };
            tree.push(node);
        }
    }

    /// Own hint wins; nested items inherit from their parent.
    fn hint_for(own: Option<f64>, parent: Option<DepthLayer>, level: u16) -> Option<DepthLayer> {
        if let Some(own) = own {
            return Some(DepthLayer::from_scalar(own));
        }
        if level <= 1 {
            return None;
        }
        Some(match parent {
            Some(p) => DepthLayer::from_scalar(p.as_scalar() + 1.0),
            None => DepthLayer::Level(level.saturating_add(2)),
        })
    }
}
