use glam::Vec3;

/// The ordered vertex positions of a mesh, in the mesh's local space.
///
/// Vertex order is the mesh's own index order and is never changed here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    points: Vec<Vec3>,
}

impl PointCloud {
    #[must_use]
    pub fn new(points: Vec<Vec3>) -> Self {
        Self { points }
    }

    #[inline]
    #[must_use]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl From<Vec<Vec3>> for PointCloud {
    fn from(points: Vec<Vec3>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<Vec3> for PointCloud {
    fn from_iter<I: IntoIterator<Item = Vec3>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
