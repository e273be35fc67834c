//! Immutable 2-D KD-tree with k-nearest and radius queries.
//!
//! The tree is stored implicitly in one array: the median of each range is
//! its root, the left half holds coordinates `<=` the median on the split
//! axis, the right half `>=`. Splits alternate x, y, x, ... with depth.
//! Query results are ordered by ascending distance and, on ties, by the
//! order in which entries were passed to [`KdTree::build`], so results are
//! deterministic regardless of the tree's internal layout.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::geometry::Point2D;

/// A query hit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Neighbor<T> {
    pub value: T,
    pub distance: f64,
}

#[derive(Clone, Debug)]
struct Node<T> {
    point: Point2D,
    value: T,
    /// Position in the build input, used to break distance ties.
    seq: usize,
}

/// Read-only KD-tree over `(point, value)` entries.
#[derive(Clone, Debug)]
pub struct KdTree<T> {
    nodes: Vec<Node<T>>,
}

impl<T> Default for KdTree<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

#[inline]
fn axis_value(p: Point2D, axis: usize) -> f64 {
    if axis == 0 { p.x } else { p.y }
}

/// Max-heap entry: the worst hit so far sits on top.
#[derive(Copy, Clone, Debug)]
struct Hit {
    dist_sq: f64,
    seq: usize,
    slot: usize,
}

impl PartialEq for Hit {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Hit {}

impl PartialOrd for Hit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Hit {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dist_sq
            .total_cmp(&other.dist_sq)
            .then(self.seq.cmp(&other.seq))
    }
}

impl<T> KdTree<T> {
    /// Builds the tree. Entries with non-finite coordinates are skipped.
    pub fn build<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Point2D, T)>,
    {
        let mut nodes: Vec<Node<T>> = entries
            .into_iter()
            .enumerate()
            .filter(|(_, (point, _))| point.is_finite())
            .map(|(seq, (point, value))| Node { point, value, seq })
            .collect();
        arrange(&mut nodes, 0);
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Up to `k` entries within `max_distance` of `query`, nearest first.
    pub fn nearest_candidates(&self, query: Point2D, k: usize, max_distance: f64) -> Vec<Neighbor<T>>
    where
        T: Clone,
    {
        if k == 0 || self.nodes.is_empty() || !query.is_finite() || !(max_distance >= 0.0) {
            return Vec::new();
        }
        let mut heap = BinaryHeap::with_capacity(k.min(self.nodes.len()) + 1);
        let bound = max_distance * max_distance;
        self.search_knn(0, self.nodes.len(), 0, query, k, bound, &mut heap);
        self.finish(heap.into_vec())
    }

    /// All entries within `radius` of `query`, nearest first.
    pub fn within(&self, query: Point2D, radius: f64) -> Vec<Neighbor<T>>
    where
        T: Clone,
    {
        if self.nodes.is_empty() || !query.is_finite() || !(radius >= 0.0) {
            return Vec::new();
        }
        let mut hits = Vec::new();
        self.search_radius(0, self.nodes.len(), 0, query, radius * radius, &mut hits);
        self.finish(hits)
    }

    fn finish(&self, mut hits: Vec<Hit>) -> Vec<Neighbor<T>>
    where
        T: Clone,
    {
        hits.sort();
        hits.into_iter()
            .map(|h| Neighbor {
                value: self.nodes[h.slot].value.clone(),
                distance: h.dist_sq.sqrt(),
            })
            .collect()
    }

    #[allow(clippy::too_many_arguments)]
    fn search_knn(
        &self,
        lo: usize,
        hi: usize,
        depth: usize,
        query: Point2D,
        k: usize,
        bound: f64,
        heap: &mut BinaryHeap<Hit>,
    ) {
        if lo >= hi {
            return;
        }
        let mid = lo + (hi - lo) / 2;
        let node = &self.nodes[mid];
        let dist_sq = node.point.distance_sq(query);
        if dist_sq <= bound {
            heap.push(Hit {
                dist_sq,
                seq: node.seq,
                slot: mid,
            });
            if heap.len() > k {
                heap.pop();
            }
        }

        let axis = depth % 2;
        let diff = axis_value(query, axis) - axis_value(node.point, axis);
        let (near, far) = if diff < 0.0 {
            ((lo, mid), (mid + 1, hi))
        } else {
            ((mid + 1, hi), (lo, mid))
        };
        self.search_knn(near.0, near.1, depth + 1, query, k, bound, heap);

        let worst = match heap.peek() {
            Some(top) if heap.len() == k => top.dist_sq.min(bound),
            _ => bound,
        };
        if diff * diff <= worst {
            self.search_knn(far.0, far.1, depth + 1, query, k, bound, heap);
        }
    }

    fn search_radius(
        &self,
        lo: usize,
        hi: usize,
        depth: usize,
        query: Point2D,
        bound: f64,
        hits: &mut Vec<Hit>,
    ) {
        if lo >= hi {
            return;
        }
        let mid = lo + (hi - lo) / 2;
        let node = &self.nodes[mid];
        let dist_sq = node.point.distance_sq(query);
        if dist_sq <= bound {
            hits.push(Hit {
                dist_sq,
                seq: node.seq,
                slot: mid,
            });
        }
        let axis = depth % 2;
        let diff = axis_value(query, axis) - axis_value(node.point, axis);
        if diff <= 0.0 || diff * diff <= bound {
            self.search_radius(lo, mid, depth + 1, query, bound, hits);
        }
        if diff >= 0.0 || diff * diff <= bound {
            self.search_radius(mid + 1, hi, depth + 1, query, bound, hits);
        }
    }
}

/// Recursively places each range's median (by axis, then input order) at
/// the range centre.
fn arrange<T>(nodes: &mut [Node<T>], depth: usize) {
    if nodes.len() <= 1 {
        return;
    }
    let axis = depth % 2;
    let mid = nodes.len() / 2;
    nodes.select_nth_unstable_by(mid, |a, b| {
        axis_value(a.point, axis)
            .total_cmp(&axis_value(b.point, axis))
            .then(a.seq.cmp(&b.seq))
    });
    let (left, rest) = nodes.split_at_mut(mid);
    arrange(left, depth + 1);
    arrange(&mut rest[1..], depth + 1);
}
