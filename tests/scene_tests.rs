//! Scene Integration Tests
//!
//! Tests for:
//! - Scene: add nodes, unique names, lookup, creation order
//! - Hierarchy: attach, cycle rejection, world matrices
//! - Selection & readiness status
//! - ChannelWriter: position writes, keyframes, locked channels

use glam::{Quat, Vec3};

use scatter::animation::{Axis, AxisMask};
use scatter::errors::ScatterError;
use scatter::scatter::{ChannelWrite, ChannelWriter, resolve};
use scatter::scene::{Node, NodeKey, PointCloud, Scene, SceneStatus};

fn mesh(name: &str, count: usize) -> Node {
    Node::with_geometry(
        name,
        (0..count).map(|i| Vec3::splat(i as f32)).collect::<PointCloud>(),
    )
}

// ============================================================================
// Node Management
// ============================================================================

#[test]
fn scene_add_and_find_node() {
    let mut scene = Scene::new();
    let key = scene.add_node(Node::new("Cube")).unwrap();
    assert_eq!(scene.find_by_name("Cube"), Some(key));
    assert_eq!(scene.name_of(key), "Cube");
    assert_eq!(scene.len(), 1);
}

#[test]
fn scene_rejects_duplicate_names() {
    let mut scene = Scene::new();
    scene.add_node(Node::new("Cube")).unwrap();
    let err = scene.add_node(Node::new("Cube")).unwrap_err();
    assert!(matches!(err, ScatterError::DuplicateName(ref n) if n == "Cube"));
}

#[test]
fn scene_require_reports_missing_name() {
    let scene = Scene::new();
    assert!(matches!(scene.require("Ghost"), Err(ScatterError::NodeNotFound(_))));
}

#[test]
fn scene_iterates_in_creation_order() {
    let mut scene = Scene::new();
    for name in ["C", "A", "B"] {
        scene.add_node(Node::new(name)).unwrap();
    }
    let names: Vec<&str> = scene.iter().map(|(_, n)| n.name()).collect();
    assert_eq!(names, vec!["C", "A", "B"]);
}

#[test]
fn select_ignores_repeats() {
    let mut scene = Scene::new();
    let a = scene.add_node(Node::new("A")).unwrap();
    scene.select(a);
    scene.select(a);
    assert_eq!(scene.selection, vec![a]);
}

// ============================================================================
// Hierarchy & World Matrices
// ============================================================================

#[test]
fn attach_sets_parent() {
    let mut scene = Scene::new();
    let parent = scene.add_node(Node::new("Parent")).unwrap();
    let child = scene.add_node(Node::new("Child")).unwrap();
    scene.attach(child, parent).unwrap();
    assert_eq!(scene.get_node(child).unwrap().parent(), Some(parent));
}

#[test]
fn attach_rejects_cycles() {
    let mut scene = Scene::new();
    let a = scene.add_node(Node::new("A")).unwrap();
    let b = scene.add_node(Node::new("B")).unwrap();
    scene.attach(b, a).unwrap();

    assert!(scene.attach(a, b).is_err());
    assert!(scene.attach(a, a).is_err());
    assert_eq!(scene.get_node(a).unwrap().parent(), None);
}

#[test]
fn world_matrix_of_root_is_local() {
    let mut scene = Scene::new();
    let key = scene
        .add_node(Node::new("N").at(Vec3::new(1.0, 2.0, 3.0)))
        .unwrap();
    let p = scene.world_matrix(key).transform_point3(Vec3::ZERO);
    assert_eq!(p, Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn world_matrix_composes_parent_chain() {
    let mut scene = Scene::new();
    let root = scene.add_node(Node::new("Root")).unwrap();
    {
        let t = &mut scene.get_node_mut(root).unwrap().transform;
        t.scale = Vec3::splat(2.0);
        t.rotation = Quat::from_rotation_y(std::f32::consts::PI);
    }
    let child = scene
        .add_node(Node::new("Child").at(Vec3::new(1.0, 0.0, 0.0)))
        .unwrap();
    scene.attach(child, root).unwrap();

    // child origin: (1,0,0) scaled by 2, rotated half a turn about Y
    let p = scene.world_matrix(child).transform_point3(Vec3::ZERO);
    assert!((p - Vec3::new(-2.0, 0.0, 0.0)).length() < 1e-5, "{p}");
}

// ============================================================================
// Status
// ============================================================================

#[test]
fn status_without_active_node() {
    assert_eq!(Scene::new().status(), SceneStatus::SourceMissing);
}

#[test]
fn status_requires_mesh_source() {
    let mut scene = Scene::new();
    scene.active = Some(scene.add_node(Node::new("Empty")).unwrap());
    assert_eq!(scene.status(), SceneStatus::SourceNotMesh);
}

#[test]
fn status_counts_targets_excluding_selected_source() {
    let mut scene = Scene::new();
    let source = scene.add_node(mesh("Grid", 4)).unwrap();
    let a = scene.add_node(Node::new("A")).unwrap();
    let b = scene.add_node(Node::new("B")).unwrap();
    scene.active = Some(source);

    scene.selection = vec![source];
    assert_eq!(scene.status(), SceneStatus::NeedsTargets { vertex_count: 4 });

    scene.selection = vec![source, a, b];
    assert_eq!(
        scene.status(),
        SceneStatus::Ready {
            vertex_count: 4,
            target_count: 2
        }
    );

    // Source not selected: every selected node is a target
    scene.selection = vec![a, b];
    assert!(scene.status().is_ready());
}

#[test]
fn status_skips_stale_selection_like_a_run() {
    let mut scene = Scene::new();
    let source = scene.add_node(mesh("Grid", 4)).unwrap();
    let a = scene.add_node(Node::new("A")).unwrap();
    scene.active = Some(source);

    scene.selection = vec![source, NodeKey::default()];
    assert_eq!(scene.status(), SceneStatus::NeedsTargets { vertex_count: 4 });

    scene.selection = vec![source, NodeKey::default(), a];
    let snapshot = resolve::snapshot(&scene, source, &scene.selection).unwrap();
    assert_eq!(
        scene.status(),
        SceneStatus::Ready {
            vertex_count: 4,
            target_count: snapshot.targets.len()
        }
    );
    assert_eq!(snapshot.targets, vec![a]);
}

// ============================================================================
// ChannelWriter
// ============================================================================

#[test]
fn write_channel_sets_value_and_keys() {
    let mut scene = Scene::new();
    let key = scene.add_node(Node::new("T")).unwrap();

    scene
        .write_channel(&ChannelWrite {
            target: key,
            axis: Axis::Y,
            value: 4.0,
            frame: 12,
            keyed: true,
        })
        .unwrap();

    let node = scene.get_node(key).unwrap();
    assert_eq!(node.transform.position, Vec3::new(0.0, 4.0, 0.0));
    assert_eq!(node.animation[Axis::Y].key_at(12.0), Some(4.0));
    assert!(node.animation[Axis::X].is_empty());
}

#[test]
fn write_channel_unkeyed_leaves_tracks_alone() {
    let mut scene = Scene::new();
    let key = scene.add_node(Node::new("T")).unwrap();

    scene
        .write_channel(&ChannelWrite {
            target: key,
            axis: Axis::X,
            value: 1.0,
            frame: 0,
            keyed: false,
        })
        .unwrap();

    let node = scene.get_node(key).unwrap();
    assert_eq!(node.transform.position.x, 1.0);
    assert!(node.animation.is_empty());
}

#[test]
fn write_channel_rejects_locked_axis_without_side_effects() {
    let mut scene = Scene::new();
    let key = scene
        .add_node(Node::new("T").locked(AxisMask::X).at(Vec3::splat(3.0)))
        .unwrap();

    let err = scene
        .write_channel(&ChannelWrite {
            target: key,
            axis: Axis::X,
            value: 9.0,
            frame: 2,
            keyed: true,
        })
        .unwrap_err();

    assert!(matches!(
        err,
        ScatterError::WriteRejected { ref target, axis: Axis::X, frame: 2 } if target == "T"
    ));
    let node = scene.get_node(key).unwrap();
    assert_eq!(node.transform.position, Vec3::splat(3.0));
    assert!(node.animation.is_empty());
}

#[test]
fn evaluate_location_plays_back_keys() {
    let mut scene = Scene::new();
    let key = scene.add_node(Node::new("T")).unwrap();
    for (frame, value) in [(0, 0.0), (10, 10.0)] {
        scene
            .write_channel(&ChannelWrite {
                target: key,
                axis: Axis::X,
                value,
                frame,
                keyed: true,
            })
            .unwrap();
    }

    let node = scene.get_node(key).unwrap();
    assert!((node.evaluate_location(5.0).x - 5.0).abs() < 1e-5);
}
