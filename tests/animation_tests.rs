//! Animation Track Tests
//!
//! Tests for:
//! - KeyframeTrack insertion (ordering, replacement at an occupied frame)
//! - KeyframeTrack linear/step sampling and clamping
//! - Axis / AxisMask helpers and serialization
//! - LocationTracks evaluation with rest-position fallback

use glam::Vec3;

use scatter::animation::{Axis, AxisMask, InterpolationMode, KeyframeTrack, LocationTracks};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

// ============================================================================
// KeyframeTrack: Insertion
// ============================================================================

#[test]
fn insert_keeps_times_sorted() {
    let mut track = KeyframeTrack::default();
    track.insert(20.0, 2.0);
    track.insert(0.0, 0.0);
    track.insert(10.0, 1.0);

    assert_eq!(track.times, vec![0.0, 10.0, 20.0]);
    assert_eq!(track.values, vec![0.0, 1.0, 2.0]);
}

#[test]
fn insert_replaces_key_on_same_frame() {
    let mut track = KeyframeTrack::default();
    track.insert(5.0, 1.0);
    track.insert(5.0, 9.0);

    assert_eq!(track.len(), 1);
    assert_eq!(track.key_at(5.0), Some(9.0));
}

#[test]
fn key_at_misses_between_keys() {
    let track = KeyframeTrack::from_keys([(0.0, 1.0), (2.0, 3.0)]);
    assert_eq!(track.key_at(1.0), None);
    assert_eq!(track.key_at(2.0), Some(3.0));
}

#[test]
fn from_keys_later_pairs_win() {
    let track = KeyframeTrack::from_keys([(1.0, 1.0), (0.0, 0.0), (1.0, 7.0)]);
    let keys: Vec<(f32, f32)> = track.keys().collect();
    assert_eq!(keys, vec![(0.0, 0.0), (1.0, 7.0)]);
}

// ============================================================================
// KeyframeTrack: Sampling
// ============================================================================

#[test]
fn sample_empty_track_is_none() {
    assert_eq!(KeyframeTrack::default().sample(3.0), None);
}

#[test]
fn sample_linear_midpoint() {
    let track = KeyframeTrack::new(vec![0.0, 1.0], vec![0.0, 10.0], InterpolationMode::Linear);
    let val = track.sample(0.5).unwrap();
    assert!(approx(val, 5.0), "Expected 5.0, got {val}");
}

#[test]
fn sample_linear_exact_keyframes() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0],
        vec![0.0, 10.0, 20.0],
        InterpolationMode::Linear,
    );
    assert!(approx(track.sample(0.0).unwrap(), 0.0));
    assert!(approx(track.sample(1.0).unwrap(), 10.0));
    assert!(approx(track.sample(2.0).unwrap(), 20.0));
}

#[test]
fn sample_clamps_outside_range() {
    let track = KeyframeTrack::new(vec![1.0, 2.0], vec![10.0, 20.0], InterpolationMode::Linear);
    assert!(approx(track.sample(0.5).unwrap(), 10.0));
    assert!(approx(track.sample(5.0).unwrap(), 20.0));
}

#[test]
fn sample_step_holds_value() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0],
        vec![0.0, 100.0, 200.0],
        InterpolationMode::Step,
    );
    assert!(approx(track.sample(0.99).unwrap(), 0.0));
    assert!(approx(track.sample(1.0).unwrap(), 100.0));
    assert!(approx(track.sample(1.5).unwrap(), 100.0));
}

#[test]
fn sample_single_key_is_constant() {
    let track = KeyframeTrack::from_keys([(4.0, 2.5)]);
    assert_eq!(track.sample(-10.0), Some(2.5));
    assert_eq!(track.sample(100.0), Some(2.5));
}

// ============================================================================
// Axis & AxisMask
// ============================================================================

#[test]
fn axis_indices_match_vec3_components() {
    let v = Vec3::new(1.0, 2.0, 3.0);
    assert_eq!(v[Axis::X.index()], 1.0);
    assert_eq!(v[Axis::Y.index()], 2.0);
    assert_eq!(v[Axis::Z.index()], 3.0);
}

#[test]
fn mask_iterates_in_xyz_order() {
    let mask = AxisMask::Z | AxisMask::X;
    assert_eq!(mask.axes().collect::<Vec<_>>(), vec![Axis::X, Axis::Z]);
    assert!(mask.has(Axis::Z));
    assert!(!mask.has(Axis::Y));
}

#[test]
fn mask_serializes_as_axis_names() {
    let json = serde_json::to_string(&(AxisMask::X | AxisMask::Y)).unwrap();
    assert_eq!(json, r#"["x","y"]"#);

    let mask: AxisMask = serde_json::from_str(r#"["z","x","z"]"#).unwrap();
    assert_eq!(mask, AxisMask::X | AxisMask::Z);
}

// ============================================================================
// LocationTracks
// ============================================================================

#[test]
fn location_evaluate_falls_back_to_rest() {
    let mut tracks = LocationTracks::new();
    tracks[Axis::Y].insert(0.0, 0.0);
    tracks[Axis::Y].insert(10.0, 10.0);

    let rest = Vec3::new(7.0, -1.0, 3.0);
    let at = tracks.evaluate(5.0, rest);
    assert!(approx(at.x, 7.0));
    assert!(approx(at.y, 5.0));
    assert!(approx(at.z, 3.0));
}

#[test]
fn location_key_count_sums_axes() {
    let mut tracks = LocationTracks::new();
    assert!(tracks.is_empty());
    tracks[Axis::X].insert(0.0, 1.0);
    tracks[Axis::Z].insert(0.0, 1.0);
    tracks[Axis::Z].insert(1.0, 1.0);
    assert_eq!(tracks.key_count(), 3);
}
