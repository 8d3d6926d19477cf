// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Picking against resolved layers and a live camera.

use kurbo::{Point, Rect};
use understory_constellation::{ContainerRecord, DepthLayer, ItemRecord, TreeBuilder};
use understory_depth::{VisualState, resolve_all};
use understory_depth_hit::{HitParams, hit_test, hits_at};
use understory_view3d::{Camera3D, ProjectionConfig};

const VIEWPORT: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);

#[test]
fn front_layer_wins_on_overlap() {
    // The farther center is created first, so arena order alone would pick it.
    let tree = TreeBuilder::new().build(&[
        ContainerRecord::new("back", Point::new(400.0, 300.0)).with_depth(1.0),
        ContainerRecord::new("front", Point::new(400.0, 300.0)).with_depth(0.0),
    ]);
    let layers = resolve_all(&tree, &VisualState::new());
    assert_eq!(layers[0], DepthLayer::Level(1));
    assert_eq!(layers[1], DepthLayer::FRONT);

    let camera = Camera3D::new(VIEWPORT);
    let params = HitParams::default();
    let probe = Point::new(405.0, 300.0);
    let hit = hit_test(&tree, &layers, &camera, probe, &params).unwrap();
    assert_eq!(Some(hit.node), tree.center_of("front"));
    assert!((hit.distance - 5.0).abs() < 1e-9);

    let all: Vec<_> = hits_at(&tree, &layers, &camera, probe, &params)
        .into_iter()
        .map(|h| h.node)
        .collect();
    assert_eq!(all, vec![tree.center_of("front").unwrap(), tree.center_of("back").unwrap()]);
}

#[test]
fn collapsed_children_are_never_hit() {
    let tree = TreeBuilder::new().build(&[ContainerRecord::new("c", Point::new(400.0, 300.0))
        .with_item(ItemRecord::document("a").at(0.0, 200.0))]);
    let camera = Camera3D::new(VIEWPORT);
    let params = HitParams::default();
    let at_a = tree.node_by_id("a").unwrap().position;

    let mut state = VisualState::new();
    let collapsed = resolve_all(&tree, &state);
    assert_eq!(hit_test(&tree, &collapsed, &camera, at_a, &params), None);

    state.expand("c");
    let expanded = resolve_all(&tree, &state);
    let hit = hit_test(&tree, &expanded, &camera, at_a, &params).unwrap();
    assert_eq!(Some(hit.node), tree.node_id("a"));
}

#[test]
fn folders_are_easier_to_hit_than_documents() {
    let tree = TreeBuilder::new().build(&[ContainerRecord::new("c", Point::new(400.0, 300.0))
        .with_item(ItemRecord::folder("f").at(0.0, 200.0))
        .with_item(ItemRecord::document("d").at(180.0, 200.0))]);
    let mut state = VisualState::new();
    state.expand("c");
    let layers = resolve_all(&tree, &state);
    let camera = Camera3D::new(VIEWPORT);
    let params = HitParams::default();

    // 30 units off-center: inside the folder's 32, outside the document's 19.
    let near_f = Point::new(600.0, 330.0);
    let near_d = Point::new(200.0, 330.0);
    assert_eq!(
        hit_test(&tree, &layers, &camera, near_f, &params).map(|h| h.node),
        tree.node_id("f")
    );
    assert_eq!(hit_test(&tree, &layers, &camera, near_d, &params), None);
}

#[test]
fn non_positive_scale_is_not_interactive() {
    let tree = TreeBuilder::new().build(&[ContainerRecord::new("c", Point::new(400.0, 300.0))]);
    let layers = resolve_all(&tree, &VisualState::new());
    let config = ProjectionConfig {
        focal_distance: 5.0,
        near_threshold: 10.0,
        close_up_scale: 0.0,
    };
    let camera = Camera3D::with_config(VIEWPORT, config);
    let center = Point::new(400.0, 300.0);
    assert!(camera.project_at(center, 0.0).scale <= 0.0);
    assert_eq!(hit_test(&tree, &layers, &camera, center, &HitParams::default()), None);
}

#[test]
fn short_layer_slices_count_as_hidden() {
    let tree = TreeBuilder::new().build(&[ContainerRecord::new("c", Point::new(400.0, 300.0))]);
    let camera = Camera3D::new(VIEWPORT);
    let hit = hit_test(&tree, &[], &camera, Point::new(400.0, 300.0), &HitParams::default());
    assert_eq!(hit, None);
}
