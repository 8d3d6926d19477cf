// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deserialization of ingestion records (requires the `serde` feature).

#![cfg(feature = "serde")]

use kurbo::Point;
use understory_constellation::{ContainerRecord, DepthLayer, ItemKind, TreeBuilder};

const FIXTURE: &str = r#"[
  {
    "id": "home",
    "home": true,
    "centerPosition": { "x": 400.0, "y": 300.0 },
    "depthHint": 0,
    "items": [
      { "id": "readme", "title": "Readme", "kind": "document" },
      {
        "id": "specs",
        "title": "Specs",
        "kind": "folder",
        "depthHint": 1,
        "children": [
          { "id": "specs-a", "title": "A" },
          { "id": "specs-b", "title": "B", "angle": 45.0, "distance": 60.0 }
        ]
      },
      { "id": "late", "title": "Late", "parentId": "specs" }
    ]
  },
  { "id": "archive_center", "center": { "x": 0.0, "y": 0.0 }, "depth": 2 }
]"#;

#[test]
fn camel_case_fixture_parses_and_builds() {
    let records: Vec<ContainerRecord> = serde_json::from_str(FIXTURE).unwrap();
    assert_eq!(records.len(), 2);
    assert!(records[0].home);
    assert_eq!(records[0].center, Point::new(400.0, 300.0));
    assert_eq!(records[0].items[1].kind, ItemKind::Folder);
    assert_eq!(records[0].items[2].parent_id.as_deref(), Some("specs"));

    let tree = TreeBuilder::new().build(&records);
    assert_eq!(tree.home().map(|h| h.as_str()), Some("home"));

    let specs = tree.node_id("specs").unwrap();
    let children: Vec<&str> = tree
        .children(specs)
        .into_iter()
        .map(|c| tree.get(c).unwrap().id.as_str())
        .collect();
    assert_eq!(children, vec!["specs-a", "specs-b", "late"]);
    assert_eq!(
        tree.node_by_id("late").unwrap().depth_hint,
        Some(DepthLayer::Level(2))
    );

    let archive = tree.node_by_id("archive_center").unwrap();
    assert_eq!(archive.depth_hint, Some(DepthLayer::Level(2)));
    assert_eq!(archive.constellation, "archive");
}

#[test]
fn center_kind_accepts_container_center_spelling() {
    let kind: ItemKind = serde_json::from_str("\"container-center\"").unwrap();
    assert_eq!(kind, ItemKind::Center);
    let folder: ItemKind = serde_json::from_str("\"folder\"").unwrap();
    assert_eq!(folder, ItemKind::Folder);
}
