// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inverse projection recovers planar positions across camera parameters.

use glam::DVec3;
use kurbo::{Point, Rect, Vec2};
use understory_view3d::{Camera3D, ProjectionConfig};

const LAYER_DEPTHS: [f64; 5] = [0.0, -100.0, -150.0, -300.0, -2000.0];

#[test]
fn unproject_inverts_project_outside_the_clamp() {
    let points = [
        Point::new(400.0, 300.0),
        Point::new(0.0, 0.0),
        Point::new(760.0, 120.0),
        Point::new(-150.0, 640.0),
    ];
    let mut checked = 0;
    for yaw in [-1.0, 0.0, 0.3, 2.0] {
        for pitch in [-0.5, 0.0, 0.9] {
            for zoom in [0.5, 1.0, 3.0] {
                for pan in [Vec2::ZERO, Vec2::new(80.0, -40.0)] {
                    let mut camera = Camera3D::new(Rect::new(0.0, 0.0, 800.0, 600.0));
                    camera.set_rotation(yaw, pitch);
                    camera.set_zoom(zoom);
                    camera.pan_by(pan);
                    for point in points {
                        for z in LAYER_DEPTHS {
                            let projected = camera.project(DVec3::new(point.x, point.y, z));
                            if projected.clamped {
                                // Far layers can swing behind the eye at large yaw.
                                continue;
                            }
                            let back = camera
                                .unproject(projected.screen, z)
                                .expect("point outside the clamp region");
                            assert!(
                                (back - point).hypot() < 1e-6,
                                "yaw {yaw} pitch {pitch} zoom {zoom} z {z}: {back:?} != {point:?}"
                            );
                            checked += 1;
                        }
                    }
                }
            }
        }
    }
    assert!(checked > 4 * 3 * 3 * 2 * 4 * 4);
}

#[test]
fn offset_viewport_rotates_about_its_center() {
    let viewport = Rect::new(100.0, 50.0, 500.0, 350.0);
    let mut camera = Camera3D::new(viewport);
    camera.rotate_by(1.1, 0.4);
    let projected = camera.project(DVec3::new(viewport.center().x, viewport.center().y, 0.0));
    assert!((projected.screen - viewport.center()).hypot() < 1e-9);
}

#[test]
fn custom_focal_distance_changes_perspective() {
    let config = ProjectionConfig::new(500.0, 5.0);
    assert_eq!(config.close_up_scale, 100.0);
    let camera = Camera3D::with_config(Rect::new(0.0, 0.0, 800.0, 600.0), config);
    let near = camera.project(DVec3::new(500.0, 300.0, -150.0));
    assert!((near.scale - 500.0 / 650.0).abs() < 1e-12);
    let hidden = camera.project(DVec3::new(500.0, 300.0, -2000.0));
    assert!(hidden.scale < near.scale);
    assert!(hidden.scale > 0.0);
}
