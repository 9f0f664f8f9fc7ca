use glam::Affine3A;
use slotmap::SlotMap;

use crate::errors::{Result, ScatterError};
use crate::scatter::{ChannelWrite, ChannelWriter};
use crate::scene::NodeKey;
use crate::scene::node::Node;

/// Readiness of a scene for a scatter run, as a host panel would show it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneStatus {
    /// No active node.
    SourceMissing,
    /// The active node has no geometry.
    SourceNotMesh,
    /// Nothing besides the source is selected.
    NeedsTargets { vertex_count: usize },
    Ready {
        vertex_count: usize,
        target_count: usize,
    },
}

impl SceneStatus {
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

/// Scene graph container
///
/// Owns the nodes plus the host-side state a scatter run reads from:
/// the ordered selection, the active (source) node and the current frame.
/// Node order is creation order and is preserved on save.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: SlotMap<NodeKey, Node>,
    order: Vec<NodeKey>,

    /// Selected nodes in selection order
    pub selection: Vec<NodeKey>,
    /// The active node, used as the scatter source
    pub active: Option<NodeKey>,
    pub current_frame: i32,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a root node. Names must be unique within a scene.
    pub fn add_node(&mut self, node: Node) -> Result<NodeKey> {
        if self.find_by_name(&node.name).is_some() {
            return Err(ScatterError::DuplicateName(node.name));
        }
        let key = self.nodes.insert(node);
        self.order.push(key);
        Ok(key)
    }

    /// Parents `child` under `parent`, refusing links that would form a cycle.
    pub fn attach(&mut self, child: NodeKey, parent: NodeKey) -> Result<()> {
        if !self.nodes.contains_key(parent) {
            return Err(ScatterError::NodeNotFound(format!("{parent:?}")));
        }

        let mut cursor = Some(parent);
        while let Some(key) = cursor {
            if key == child {
                return Err(ScatterError::InvalidDocument(format!(
                    "attaching '{}' under '{}' would form a cycle",
                    self.name_of(child),
                    self.name_of(parent),
                )));
            }
            cursor = self.nodes.get(key).and_then(|n| n.parent);
        }

        let node = self
            .nodes
            .get_mut(child)
            .ok_or_else(|| ScatterError::NodeNotFound(format!("{child:?}")))?;
        node.parent = Some(parent);
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn get_node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    #[inline]
    pub fn get_node_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<NodeKey> {
        self.order
            .iter()
            .copied()
            .find(|&key| self.nodes.get(key).is_some_and(|n| n.name == name))
    }

    /// Like [`find_by_name`](Self::find_by_name) but reports a missing node.
    pub fn require(&self, name: &str) -> Result<NodeKey> {
        self.find_by_name(name)
            .ok_or_else(|| ScatterError::NodeNotFound(name.to_owned()))
    }

    /// Name of `key`, or `"<missing>"` for a stale key.
    #[must_use]
    pub fn name_of(&self, key: NodeKey) -> &str {
        self.nodes.get(key).map_or("<missing>", Node::name)
    }

    /// Iterates nodes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, &Node)> {
        self.order
            .iter()
            .filter_map(|&key| self.nodes.get(key).map(|node| (key, node)))
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Appends `key` to the selection unless it is already selected.
    pub fn select(&mut self, key: NodeKey) {
        if !self.selection.contains(&key) {
            self.selection.push(key);
        }
    }

    /// Local-to-world matrix of `key`, composed along the parent chain.
    #[must_use]
    pub fn world_matrix(&self, key: NodeKey) -> Affine3A {
        let mut matrix = Affine3A::IDENTITY;
        let mut cursor = Some(key);
        while let Some(current) = cursor {
            let Some(node) = self.nodes.get(current) else {
                break;
            };
            matrix = node.transform.local_matrix() * matrix;
            cursor = node.parent;
        }
        matrix
    }

    /// Summarizes whether a scatter run from the active node can do anything.
    #[must_use]
    pub fn status(&self) -> SceneStatus {
        let Some(source) = self.active.and_then(|key| self.nodes.get(key)) else {
            return SceneStatus::SourceMissing;
        };
        let Some(geometry) = &source.geometry else {
            return SceneStatus::SourceNotMesh;
        };

        let vertex_count = geometry.len();
        let target_count = self
            .selection
            .iter()
            .filter(|&&key| Some(key) != self.active && self.nodes.contains_key(key))
            .count();

        if target_count == 0 {
            SceneStatus::NeedsTargets { vertex_count }
        } else {
            SceneStatus::Ready {
                vertex_count,
                target_count,
            }
        }
    }
}

impl ChannelWriter for Scene {
    fn write_channel(&mut self, write: &ChannelWrite) -> Result<()> {
        let node = self
            .nodes
            .get_mut(write.target)
            .ok_or_else(|| ScatterError::NodeNotFound(format!("{:?}", write.target)))?;

        if node.locked.has(write.axis) {
            return Err(ScatterError::WriteRejected {
                target: node.name.clone(),
                axis: write.axis,
                frame: write.frame,
            });
        }

        node.transform.position[write.axis.index()] = write.value;
        if write.keyed {
            // Scheduled frames are bounded by MAX_FRAME, so the cast is exact
            node.animation[write.axis].insert(write.frame as f32, write.value);
        }
        Ok(())
    }
}
