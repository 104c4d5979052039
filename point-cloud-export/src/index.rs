/// Cloud index owning the octree root and accounting for dropped points
use crate::error::ExportError;
use crate::generator::PointGenerator;
use crate::octree::OctreeNode;
use crate::point::CloudPoint;

/// Owns the root node and drives batch insertion. Rejected points are
/// silently excluded from the tree, but the index keeps count so the export
/// summary and metadata can report them.
pub struct CloudIndex {
    pub root: OctreeNode,
    accepted: usize,
    dropped: usize,
}

impl CloudIndex {
    /// Build an index over a cubic working volume.
    ///
    /// A non-positive (or NaN) cell size cannot inscribe a containment
    /// sphere and is rejected up front. Recursive halving keeps every child
    /// cell size positive afterwards.
    pub fn new(
        centre: (f64, f64, f64),
        cell_size: f64,
        generator: &mut PointGenerator,
    ) -> Result<Self, ExportError> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(ExportError::InvalidCellSize(cell_size));
        }

        Ok(Self {
            root: OctreeNode::new(centre, cell_size, generator),
            accepted: 0,
            dropped: 0,
        })
    }

    /// Insert a batch of positions in input order. Geometric rejections are
    /// counted, never retried.
    pub fn insert_batch(&mut self, positions: &[(f64, f64, f64)], generator: &mut PointGenerator) {
        for &position in positions {
            if self.root.insert(position, generator) {
                self.accepted += 1;
            } else {
                self.dropped += 1;
            }
        }
    }

    /// Deterministic pre-order flattening of every buffered point
    pub fn flatten(&self) -> Vec<CloudPoint> {
        let mut out = Vec::new();
        self.root.flatten_into(&mut out);
        out
    }

    pub fn accepted(&self) -> usize {
        self.accepted
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }
}
