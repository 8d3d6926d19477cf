// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for the constellation benchmarks.

use kurbo::Point;
use understory_constellation::{
    ConstellationTree, ContainerRecord, ItemRecord, LayoutConfig, TreeBuilder,
};

/// `containers` containers, each with `folders` folders of `docs` documents.
///
/// The fan-out cap is lifted so every record becomes a node.
pub fn synthetic_tree(containers: usize, folders: usize, docs: usize) -> ConstellationTree {
    let records: Vec<ContainerRecord> = (0..containers)
        .map(|c| {
            let mut record = ContainerRecord::new(
                format!("c{c}"),
                Point::new((c % 8) as f64 * 600.0, (c / 8) as f64 * 600.0),
            );
            if c == 0 {
                record = record.as_home();
            }
            for f in 0..folders {
                let mut folder = ItemRecord::folder(format!("c{c}/f{f}"));
                for d in 0..docs {
                    folder = folder.with_child(ItemRecord::document(format!("c{c}/f{f}/d{d}")));
                }
                record = record.with_item(folder);
            }
            record
        })
        .collect();
    let layout = LayoutConfig {
        max_visible_children: usize::MAX,
        ..LayoutConfig::default()
    };
    TreeBuilder::new().config(layout).build(&records)
}
