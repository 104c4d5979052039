/// Sphere-bounded octree with capacity-limited nodes and lazy subdivision
use crate::constants::NODE_CAPACITY;
use crate::generator::PointGenerator;
use crate::point::CloudPoint;
use crate::sphere::BoundingSphere;

/// Child centre offsets relative to the parent centre, in units of half the
/// parent cell size. The order is fixed: x varies fastest, then y, then z.
const CHILD_OFFSETS: [(f64, f64, f64); 8] = [
    (-1.0, -1.0, -1.0),
    (1.0, -1.0, -1.0),
    (-1.0, 1.0, -1.0),
    (1.0, 1.0, -1.0),
    (-1.0, -1.0, 1.0),
    (1.0, -1.0, 1.0),
    (-1.0, 1.0, 1.0),
    (1.0, 1.0, 1.0),
];

/// One node of the partition tree. A node owns its buffered points and,
/// after subdividing, exactly eight children.
pub struct OctreeNode {
    pub centre: (f64, f64, f64),
    pub cell_size: f64,
    pub sphere: BoundingSphere,
    pub points: Vec<CloudPoint>,
    pub children: Option<Box<[OctreeNode; 8]>>,
}

impl OctreeNode {
    /// Create a leaf node and seed it with a point at its own centre.
    ///
    /// The centre seed consumes one capacity slot, so a fresh leaf accepts
    /// only seven externally supplied points before overflowing. Replicated
    /// from the observed behaviour of the original pipeline.
    pub fn new(centre: (f64, f64, f64), cell_size: f64, generator: &mut PointGenerator) -> Self {
        let mut points = Vec::with_capacity(NODE_CAPACITY);
        points.push(CloudPoint {
            position: centre,
            colour: generator.next_colour(),
        });

        Self {
            centre,
            cell_size,
            sphere: BoundingSphere::new(centre, cell_size / 2.0),
            points,
            children: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Route a position into the subtree.
    ///
    /// Returns true when some node buffered the point. A false return means
    /// the position fell outside this node's sphere, or outside every child
    /// sphere after forwarding, and was dropped. Points inside the cubic
    /// cell but outside the inscribed sphere are lost at that level and are
    /// never retried elsewhere.
    pub fn insert(&mut self, position: (f64, f64, f64), generator: &mut PointGenerator) -> bool {
        if !self.sphere.contains(position) {
            return false;
        }

        // The buffer only ever grows, so a subdivided node is permanently
        // full and every later arrival is forwarded.
        if self.points.len() < NODE_CAPACITY {
            self.points.push(CloudPoint {
                position,
                colour: generator.next_colour(),
            });
            return true;
        }

        if self.is_leaf() {
            self.subdivide(generator);
        }

        // Sibling spheres are disjoint, so at most one child accepts. A
        // position in a cube-corner region misses every child sphere.
        let mut accepted = false;
        if let Some(children) = self.children.as_mut() {
            for child in children.iter_mut() {
                accepted |= child.insert(position, generator);
            }
        }
        accepted
    }

    /// Create the eight children at the documented offsets. Each child seeds
    /// its own centre point at construction.
    fn subdivide(&mut self, generator: &mut PointGenerator) {
        let (cx, cy, cz) = self.centre;
        let half = self.cell_size / 2.0;

        let children = CHILD_OFFSETS.map(|(ox, oy, oz)| {
            OctreeNode::new((cx + ox * half, cy + oy * half, cz + oz * half), half, generator)
        });
        self.children = Some(Box::new(children));
    }

    /// Depth-first pre-order walk: this node's buffer first, then children
    /// in offset order 0..7.
    pub fn flatten_into(&self, out: &mut Vec<CloudPoint>) {
        out.extend_from_slice(&self.points);
        if let Some(children) = self.children.as_ref() {
            for child in children.iter() {
                child.flatten_into(out);
            }
        }
    }

    /// Total nodes in this subtree, including self
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .as_ref()
            .map_or(0, |children| children.iter().map(OctreeNode::node_count).sum())
    }
}
