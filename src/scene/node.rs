use glam::Vec3;

use crate::animation::{AxisMask, LocationTracks};
use crate::scene::NodeKey;
use crate::scene::geometry::PointCloud;
use crate::scene::transform::Transform;

/// A scene node.
///
/// # Hierarchy
///
/// `parent` is optional; the world matrix of a node is the product of the
/// local matrices along its parent chain (see [`Scene::world_matrix`]).
///
/// # Components
///
/// - `geometry`: present on mesh nodes, the vertex source for a scatter run
/// - `locked`: location channels that refuse writes
/// - `animation`: per-axis location keyframes
///
/// [`Scene::world_matrix`]: crate::scene::Scene::world_matrix
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique name within the owning scene
    pub(crate) name: String,
    /// Parent node key (None for root nodes)
    pub(crate) parent: Option<NodeKey>,

    pub transform: Transform,
    pub geometry: Option<PointCloud>,
    pub locked: AxisMask,
    pub animation: LocationTracks,
}

impl Node {
    /// Creates an empty node at the origin.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            transform: Transform::new(),
            geometry: None,
            locked: AxisMask::empty(),
            animation: LocationTracks::new(),
        }
    }

    /// Creates a mesh node carrying `geometry`.
    #[must_use]
    pub fn with_geometry(name: impl Into<String>, geometry: PointCloud) -> Self {
        Self {
            geometry: Some(geometry),
            ..Self::new(name)
        }
    }

    #[must_use]
    pub fn at(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    #[must_use]
    pub fn locked(mut self, locked: AxisMask) -> Self {
        self.locked = locked;
        self
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn is_mesh(&self) -> bool {
        self.geometry.is_some()
    }

    /// Location at `frame` as the keyed animation would play it back.
    #[must_use]
    pub fn evaluate_location(&self, frame: f32) -> Vec3 {
        self.animation.evaluate(frame, self.transform.position)
    }
}
