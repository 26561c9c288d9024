//! R-tree hit testing for port markers.
//!
//! Surfaces that cannot raycast their own scene pass the raw pointer
//! position instead of a hit name. The picker resolves that position to
//! the nearest port marker within a pick radius on the map plane.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::identifiers::PortName;
use crate::spatial::projection::DisplayPoint;

// ============================================================================
// Port Spatial Node
// ============================================================================

#[derive(Clone, Debug)]
pub struct PortNode {
    pub port: PortName,
    point: [f64; 2],
}

impl PortNode {
    pub fn new(port: PortName, at: DisplayPoint) -> Self {
        Self {
            port,
            point: [at.x, at.y],
        }
    }
}

impl RTreeObject for PortNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for PortNode {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ============================================================================
// Picker
// ============================================================================

#[derive(Clone)]
pub struct PortPicker {
    tree: RTree<PortNode>,
    radius: f64,
}

impl PortPicker {
    pub fn new(ports: impl IntoIterator<Item = (PortName, DisplayPoint)>, radius: f64) -> Self {
        let nodes = ports
            .into_iter()
            .filter(|(_, at)| at.x.is_finite() && at.y.is_finite())
            .map(|(port, at)| PortNode::new(port, at))
            .collect();

        Self {
            tree: RTree::bulk_load(nodes),
            radius,
        }
    }

    /// Nearest port whose marker lies within the pick radius of `point`
    pub fn pick(&self, point: [f64; 2]) -> Option<&PortName> {
        if self.radius <= 0.0 || !self.radius.is_finite() {
            return None;
        }
        if !point[0].is_finite() || !point[1].is_finite() {
            return None;
        }

        self.tree
            .nearest_neighbor(&point)
            .filter(|node| node.distance_2(&point) <= self.radius * self.radius)
            .map(|node| &node.port)
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
