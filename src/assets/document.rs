//! JSON scene documents.
//!
//! A document is the on-disk stand-in for the host application's scene:
//!
//! ```json
//! {
//!   "current_frame": 10,
//!   "active": "Grid",
//!   "selection": ["Grid", "Cube.000", "Cube.001"],
//!   "nodes": [
//!     { "name": "Grid", "position": [0, 0, 1], "vertices": [[0, 0, 0], [1, 0, 0]] },
//!     { "name": "Cube.000", "locked": ["z"] },
//!     { "name": "Cube.001", "animation": { "x": [[1, 0.5]] } }
//!   ]
//! }
//! ```

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::animation::{Axis, AxisMask, KeyframeTrack, LocationTracks};
use crate::errors::{Result, ScatterError};
use crate::scene::{Node, NodeKey, PointCloud, Scene, Transform};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDocument {
    pub current_frame: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<String>,
    pub selection: Vec<String>,
    pub nodes: Vec<NodeDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDocument {
    pub name: String,
    #[serde(default)]
    pub position: [f32; 3],
    /// Quaternion as `[x, y, z, w]`
    #[serde(default = "identity_rotation")]
    pub rotation: [f32; 4],
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertices: Option<Vec<[f32; 3]>>,
    #[serde(default, skip_serializing_if = "AxisMask::is_empty")]
    pub locked: AxisMask,
    #[serde(default, skip_serializing_if = "AnimationDocument::is_empty")]
    pub animation: AnimationDocument,
}

/// Location keys per axis, each key written as `[frame, value]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationDocument {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub x: Vec<[f32; 2]>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub y: Vec<[f32; 2]>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub z: Vec<[f32; 2]>,
}

fn identity_rotation() -> [f32; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl AnimationDocument {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() && self.y.is_empty() && self.z.is_empty()
    }

    fn keys(&self, axis: Axis) -> &[[f32; 2]] {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }

    fn keys_mut(&mut self, axis: Axis) -> &mut Vec<[f32; 2]> {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }

    fn to_tracks(&self) -> LocationTracks {
        let mut tracks = LocationTracks::new();
        for axis in Axis::ALL {
            tracks[axis] = KeyframeTrack::from_keys(self.keys(axis).iter().map(|&[t, v]| (t, v)));
        }
        tracks
    }

    fn from_tracks(tracks: &LocationTracks) -> Self {
        let mut doc = Self::default();
        for axis in Axis::ALL {
            *doc.keys_mut(axis) = tracks[axis].keys().map(|(t, v)| [t, v]).collect();
        }
        doc
    }
}

impl NodeDocument {
    fn to_node(&self) -> Result<Node> {
        let rotation = Quat::from_array(self.rotation);
        if rotation.length_squared() <= f32::EPSILON {
            return Err(ScatterError::InvalidDocument(format!(
                "node '{}' has a zero rotation quaternion",
                self.name
            )));
        }

        let mut node = Node::new(self.name.clone());
        node.transform = Transform {
            position: Vec3::from_array(self.position),
            rotation: rotation.normalize(),
            scale: Vec3::from_array(self.scale),
        };
        node.geometry = self
            .vertices
            .as_ref()
            .map(|vertices| vertices.iter().copied().map(Vec3::from_array).collect::<PointCloud>());
        node.locked = self.locked;
        node.animation = self.animation.to_tracks();
        Ok(node)
    }

    fn from_node(scene: &Scene, node: &Node) -> Self {
        Self {
            name: node.name().to_owned(),
            position: node.transform.position.to_array(),
            rotation: node.transform.rotation.to_array(),
            scale: node.transform.scale.to_array(),
            parent: node.parent().map(|key| scene.name_of(key).to_owned()),
            vertices: node
                .geometry
                .as_ref()
                .map(|geometry| geometry.points().iter().map(|p| p.to_array()).collect()),
            locked: node.locked,
            animation: AnimationDocument::from_tracks(&node.animation),
        }
    }
}

impl SceneDocument {
    /// Validates the document and builds a [`Scene`] from it.
    pub fn to_scene(&self) -> Result<Scene> {
        let mut scene = Scene::new();
        scene.current_frame = self.current_frame;

        let mut keys: Vec<NodeKey> = Vec::with_capacity(self.nodes.len());
        for doc in &self.nodes {
            keys.push(scene.add_node(doc.to_node()?)?);
        }

        for (doc, &key) in self.nodes.iter().zip(&keys) {
            if let Some(parent) = &doc.parent {
                let parent_key = scene.require(parent).map_err(|_| {
                    ScatterError::InvalidDocument(format!(
                        "node '{}' has unknown parent '{parent}'",
                        doc.name
                    ))
                })?;
                scene.attach(key, parent_key)?;
            }
        }

        for name in &self.selection {
            let key = scene.require(name)?;
            scene.select(key);
        }

        if let Some(active) = &self.active {
            scene.active = Some(scene.require(active)?);
        }

        log::debug!(
            "Loaded scene: {} nodes, {} selected",
            scene.len(),
            scene.selection.len()
        );
        Ok(scene)
    }

    /// Captures `scene` as a document, preserving node order.
    #[must_use]
    pub fn from_scene(scene: &Scene) -> Self {
        Self {
            current_frame: scene.current_frame,
            active: scene.active.map(|key| scene.name_of(key).to_owned()),
            selection: scene
                .selection
                .iter()
                .map(|&key| scene.name_of(key).to_owned())
                .collect(),
            nodes: scene
                .iter()
                .map(|(_, node)| NodeDocument::from_node(scene, node))
                .collect(),
        }
    }
}
