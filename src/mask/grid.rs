//! Uniform grid over polygon bounding boxes.
//!
//! Each cell lists the polygons whose bounding box overlaps it. The cell
//! size follows the mean polygon extent, capped so the grid never exceeds
//! `MAX_CELLS_PER_AXIS` cells on a side.

use crate::geometry::{BBox, Point2D};

const MAX_CELLS_PER_AXIS: usize = 512;

#[derive(Clone, Debug)]
pub(crate) struct GridIndex {
    extent: BBox,
    cell: f64,
    cols: usize,
    rows: usize,
    buckets: Vec<Vec<u32>>,
}

impl GridIndex {
    pub(crate) fn build(boxes: &[BBox]) -> Self {
        let extent = boxes.iter().fold(BBox::EMPTY, |acc, b| acc.union(*b));
        if boxes.is_empty() || extent.is_empty() {
            return Self {
                extent: BBox::EMPTY,
                cell: 1.0,
                cols: 0,
                rows: 0,
                buckets: Vec::new(),
            };
        }
        let mean = boxes.iter().map(|b| b.width().max(b.height())).sum::<f64>() / boxes.len() as f64;
        let cap = MAX_CELLS_PER_AXIS as f64;
        let cell = mean
            .max(extent.width() / cap)
            .max(extent.height() / cap)
            .max(f64::MIN_POSITIVE);
        let cols = ((extent.width() / cell).floor() as usize + 1).min(MAX_CELLS_PER_AXIS);
        let rows = ((extent.height() / cell).floor() as usize + 1).min(MAX_CELLS_PER_AXIS);

        let mut grid = Self {
            extent,
            cell,
            cols,
            rows,
            buckets: vec![Vec::new(); cols * rows],
        };
        for (i, b) in boxes.iter().enumerate() {
            let (c0, r0, c1, r1) = grid.span(b);
            for r in r0..=r1 {
                for c in c0..=c1 {
                    grid.buckets[r * cols + c].push(i as u32);
                }
            }
        }
        log::debug!(
            "mask grid: {cols}x{rows} cells of {cell:.3} over {} polygons",
            boxes.len()
        );
        grid
    }

    fn cell_of(&self, p: Point2D) -> (usize, usize) {
        let c = ((p.x - self.extent.min.x) / self.cell).floor();
        let r = ((p.y - self.extent.min.y) / self.cell).floor();
        let clamp = |v: f64, n: usize| -> usize {
            if v.is_nan() || v <= 0.0 {
                0
            } else {
                (v as usize).min(n - 1)
            }
        };
        (clamp(c, self.cols), clamp(r, self.rows))
    }

    fn span(&self, b: &BBox) -> (usize, usize, usize, usize) {
        let (c0, r0) = self.cell_of(b.min);
        let (c1, r1) = self.cell_of(b.max);
        (c0, r0, c1, r1)
    }

    /// Indices of polygons whose cells overlap `query`, ascending, no repeats.
    pub(crate) fn query(&self, query: &BBox) -> Vec<usize> {
        if self.buckets.is_empty() || !self.extent.intersects(query) {
            return Vec::new();
        }
        let (c0, r0, c1, r1) = self.span(query);
        let mut out: Vec<usize> = Vec::new();
        for r in r0..=r1 {
            for c in c0..=c1 {
                out.extend(self.buckets[r * self.cols + c].iter().map(|&i| i as usize));
            }
        }
        out.sort_unstable();
        out.dedup();
        out
    }
}
