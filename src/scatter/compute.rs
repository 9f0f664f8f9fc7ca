//! Value computation: turns each pairing into a position and a frame.
//! Pure; nothing here touches the scene.

use glam::{Affine3A, Vec3};

use crate::errors::{Result, ScatterError};
use crate::scatter::pairing::{Pairing, PairingPlan};
use crate::scatter::resolve::Snapshot;
use crate::scene::NodeKey;
use crate::settings::ScatterSettings;

/// The values one pairing will commit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledKey {
    pub pairing: Pairing,
    pub target: NodeKey,
    pub position: Vec3,
    pub frame: i32,
}

/// Position and frame for one pairing.
pub fn compute(
    pairing: Pairing,
    points: &[Vec3],
    source_frame: &Affine3A,
    settings: &ScatterSettings,
) -> Result<(Vec3, i32)> {
    let local = points[pairing.point];
    let position = if settings.world_space {
        source_frame.transform_point3(local)
    } else {
        local
    };
    let frame = settings
        .frame_for_slot(pairing.slot)
        .ok_or(ScatterError::FrameOutOfRange { slot: pairing.slot })?;
    Ok((position, frame))
}

/// Computes every pairing of `plan` against `snapshot`, in point order.
///
/// Fails as a whole if any pairing's frame is out of range, so nothing is
/// committed from a partial schedule.
pub fn schedule(
    plan: &PairingPlan,
    snapshot: &Snapshot,
    settings: &ScatterSettings,
) -> Result<Vec<ScheduledKey>> {
    plan.pairings()
        .map(|pairing| {
            let (position, frame) =
                compute(pairing, &snapshot.points, &snapshot.source_frame, settings)?;
            Ok(ScheduledKey {
                pairing,
                target: snapshot.targets[pairing.target],
                position,
                frame,
            })
        })
        .collect()
}
