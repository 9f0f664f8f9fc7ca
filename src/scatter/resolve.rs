//! Target resolution.
//!
//! Everything a run reads from the scene is copied out here, once, before
//! any pairing is generated: the source points, the source frame and the
//! ordered target list. Later stages never look at the scene again.

use glam::{Affine3A, Vec3};

use crate::errors::{Result, ScatterError};
use crate::scene::{NodeKey, Scene};

/// Read-only snapshot of the inputs of one run.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub source: NodeKey,
    pub source_name: String,
    /// Source vertices in local space, in vertex order
    pub points: Vec<Vec3>,
    /// Local-to-world matrix of the source
    pub source_frame: Affine3A,
    /// Selected nodes minus the source, in selection order
    pub targets: Vec<NodeKey>,
}

impl Snapshot {
    /// Number of pairings the run will produce.
    #[inline]
    #[must_use]
    pub fn pairing_len(&self) -> usize {
        self.points.len().min(self.targets.len())
    }
}

/// Removes the first occurrence of `source` from `selection`, keeping order.
#[must_use]
pub fn resolve_targets<K: Copy + PartialEq>(source: K, selection: &[K]) -> Vec<K> {
    let mut targets = Vec::with_capacity(selection.len());
    let mut excluded = false;
    for &key in selection {
        if !excluded && key == source {
            excluded = true;
            continue;
        }
        targets.push(key);
    }
    targets
}

/// Snapshots the source and targets of a run.
///
/// Fails with [`ScatterError::NoGeometry`] when the source has no vertices;
/// this check runs before anything else is read.
pub fn snapshot(scene: &Scene, source: NodeKey, selection: &[NodeKey]) -> Result<Snapshot> {
    let node = scene
        .get_node(source)
        .ok_or_else(|| ScatterError::NodeNotFound(format!("{source:?}")))?;

    let points = match &node.geometry {
        Some(geometry) if !geometry.is_empty() => geometry.points().to_vec(),
        _ => {
            return Err(ScatterError::NoGeometry {
                source_name: node.name().to_owned(),
            });
        }
    };

    let targets: Vec<NodeKey> = resolve_targets(source, selection)
        .into_iter()
        .filter(|&key| {
            let present = scene.get_node(key).is_some();
            if !present {
                log::warn!("Dropping stale selection entry {key:?}");
            }
            present
        })
        .collect();

    log::debug!(
        "Resolved source '{}' ({} points) and {} targets",
        node.name(),
        points.len(),
        targets.len()
    );

    Ok(Snapshot {
        source,
        source_name: node.name().to_owned(),
        points,
        source_frame: scene.world_matrix(source),
        targets,
    })
}
