//! Scene module
//!
//! The host-side model a scatter run reads from and writes to:
//! - Node: named scene node (transform, optional geometry, location tracks)
//! - Transform: position, rotation, scale
//! - PointCloud: ordered mesh vertices
//! - Scene: node container plus selection, active node and current frame

pub mod geometry;
pub mod node;
pub mod scene;
pub mod transform;

pub use geometry::PointCloud;
pub use node::Node;
pub use scene::{Scene, SceneStatus};
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeKey;
}
