//! Polyline-minus-mask clipping.
//!
//! Each segment is cut at every parameter where it meets a nearby mask edge
//! (crossings, touches and collinear overlaps within `eps`). Breakpoints
//! closer than `eps` to each other or to the segment ends are merged away.
//! Every resulting piece is then kept or dropped by testing its midpoint:
//! a piece survives only if the midpoint is outside every mask polygon and
//! farther than `eps` from every mask boundary.
//!
//! Surviving pieces are stitched back together across vertices, so a run of
//! untouched segments comes out as one fragment carrying the original
//! vertices unchanged.

use itertools::Itertools;
use thiserror::Error;

use crate::geometry::segment::crossing_params;
use crate::geometry::{BBox, Point2D};
use crate::mask::TrimMask;

/// Internal clipping failures.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClipError {
    #[error("non-finite coordinate produced on segment {segment}")]
    NonFinite { segment: usize },
    #[error("zero-length segment {segment}")]
    ZeroLength { segment: usize },
}

/// Parameter spans of `a → b` that lie outside the mask, merged, ascending.
fn kept_spans(a: Point2D, b: Point2D, mask: &TrimMask, eps: f64, breaks: &mut Vec<f64>) -> Vec<(f64, f64)> {
    let len = a.distance(b);
    let query = BBox::from_points(&[a, b]).expanded(eps);

    breaks.clear();
    for m in mask.candidates(&query) {
        for (c, d) in m.polygon.edges() {
            let edge_box = BBox::from_points(&[c, d]);
            if edge_box.intersects(&query) {
                crossing_params(a, b, c, d, eps, breaks);
            }
        }
    }
    breaks.retain(|&t| t * len >= eps && (1.0 - t) * len >= eps);
    breaks.sort_by(f64::total_cmp);
    breaks.dedup_by(|next, prev| (*next - *prev) * len < eps);
    breaks.insert(0, 0.0);
    breaks.push(1.0);

    let mut spans: Vec<(f64, f64)> = Vec::new();
    for (&t0, &t1) in breaks.iter().tuple_windows() {
        let mid = a.lerp(b, 0.5 * (t0 + t1));
        if !mask.is_outside(mid, eps) {
            continue;
        }
        match spans.last_mut() {
            Some(last) if last.1 == t0 => last.1 = t1,
            _ => spans.push((t0, t1)),
        }
    }
    spans
}

/// Parts of `points` lying outside `mask`, in traversal order.
///
/// Every returned part has at least two points and keeps the original
/// vertices strictly inside it; its ends are either original vertices or
/// points where the line meets a mask boundary.
pub fn clip_polyline(points: &[Point2D], mask: &TrimMask, eps: f64) -> Result<Vec<Vec<Point2D>>, ClipError> {
    let mut fragments: Vec<Vec<Point2D>> = Vec::new();
    let mut current: Vec<Point2D> = Vec::new();
    let mut breaks = Vec::new();

    let flush = |current: &mut Vec<Point2D>, fragments: &mut Vec<Vec<Point2D>>| {
        if current.len() >= 2 {
            let length: f64 = current.iter().tuple_windows().map(|(p, q)| p.distance(*q)).sum();
            if length >= eps {
                fragments.push(std::mem::take(current));
                return;
            }
        }
        current.clear();
    };

    for (segment, (&a, &b)) in points.iter().tuple_windows().enumerate() {
        if a == b {
            return Err(ClipError::ZeroLength { segment });
        }
        let spans = if mask.is_empty() {
            vec![(0.0, 1.0)]
        } else {
            kept_spans(a, b, mask, eps, &mut breaks)
        };
        for (t0, t1) in spans {
            let start = a.lerp(b, t0);
            let end = a.lerp(b, t1);
            if !start.is_finite() || !end.is_finite() {
                return Err(ClipError::NonFinite { segment });
            }
            if t0 == 0.0 && !current.is_empty() {
                current.push(end);
            } else {
                flush(&mut current, &mut fragments);
                current.push(start);
                current.push(end);
            }
            if t1 < 1.0 {
                flush(&mut current, &mut fragments);
            }
        }
        if current.last() != Some(&b) {
            flush(&mut current, &mut fragments);
        }
    }
    flush(&mut current, &mut fragments);
    Ok(fragments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Polygon;
    use crate::ids::BuildingId;
    use crate::mask::{MaskPolygon, MaskSource};

    fn p(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y)
    }

    fn mask_of(rings: &[&[(f64, f64)]]) -> TrimMask {
        TrimMask::from_polygons(
            rings
                .iter()
                .enumerate()
                .map(|(i, ring)| MaskPolygon {
                    polygon: Polygon::new(ring.iter().map(|&q| q.into()).collect()).unwrap(),
                    source: MaskSource::Building(BuildingId::new(i as u64)),
                })
                .collect(),
        )
    }

    fn close(a: &[Point2D], b: &[(f64, f64)]) -> bool {
        a.len() == b.len()
            && a.iter().zip(b).all(|(p, q)| (p.x - q.0).abs() < 1e-9 && (p.y - q.1).abs() < 1e-9)
    }

    #[test]
    fn untouched_line_is_returned_verbatim() {
        let mask = mask_of(&[&[(100.0, 100.0), (101.0, 100.0), (101.0, 101.0)]]);
        let line = vec![p(0.0, 0.0), p(1.0, 0.3), p(2.0, -0.2), p(3.0, 0.0)];
        let out = clip_polyline(&line, &mask, 1e-6).unwrap();
        assert_eq!(out, vec![line]);
    }

    #[test]
    fn line_through_square_loses_the_middle() {
        let mask = mask_of(&[&[(2.0, -1.0), (4.0, -1.0), (4.0, 1.0), (2.0, 1.0)]]);
        let line = vec![p(0.0, 0.0), p(3.0, 0.0), p(6.0, 0.0)];
        let out = clip_polyline(&line, &mask, 1e-6).unwrap();
        assert_eq!(out.len(), 2);
        assert!(close(&out[0], &[(0.0, 0.0), (2.0, 0.0)]));
        assert!(close(&out[1], &[(4.0, 0.0), (6.0, 0.0)]));
    }

    #[test]
    fn vertices_outside_the_mask_are_kept() {
        let mask = mask_of(&[&[(4.0, -1.0), (5.0, -1.0), (5.0, 1.0), (4.0, 1.0)]]);
        let line = vec![p(0.0, 0.0), p(1.0, 1.0), p(2.0, 0.0), p(6.0, 0.0)];
        let out = clip_polyline(&line, &mask, 1e-6).unwrap();
        assert_eq!(out.len(), 2);
        assert!(close(&out[0], &[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (4.0, 0.0)]));
        assert!(close(&out[1], &[(5.0, 0.0), (6.0, 0.0)]));
    }

    #[test]
    fn fully_covered_line_vanishes() {
        let mask = mask_of(&[&[(-1.0, -1.0), (10.0, -1.0), (10.0, 1.0), (-1.0, 1.0)]]);
        let line = vec![p(0.0, 0.0), p(5.0, 0.5), p(9.0, 0.0)];
        assert!(clip_polyline(&line, &mask, 1e-6).unwrap().is_empty());
    }

    #[test]
    fn line_along_a_boundary_is_removed() {
        let mask = mask_of(&[&[(0.0, 0.0), (10.0, 0.0), (10.0, 5.0), (0.0, 5.0)]]);
        let line = vec![p(2.0, 0.0), p(8.0, 0.0)];
        assert!(clip_polyline(&line, &mask, 1e-6).unwrap().is_empty());
    }

    #[test]
    fn touching_a_corner_does_not_split() {
        let mask = mask_of(&[&[(5.0, 0.0), (6.0, 1.0), (5.0, 2.0), (4.0, 1.0)]]);
        let line = vec![p(0.0, 0.0), p(10.0, 0.0)];
        let out = clip_polyline(&line, &mask, 1e-6).unwrap();
        assert_eq!(out, vec![line]);
    }

    #[test]
    fn reclipping_is_stable() {
        let mask = mask_of(&[&[(2.0, -1.0), (4.0, -1.0), (4.0, 1.0), (2.0, 1.0)]]);
        let line = vec![p(0.0, 0.3), p(7.0, -0.4)];
        let once = clip_polyline(&line, &mask, 1e-6).unwrap();
        for frag in &once {
            let again = clip_polyline(frag, &mask, 1e-6).unwrap();
            assert_eq!(again, vec![frag.clone()]);
        }
    }

    #[test]
    fn repeated_vertex_is_an_error() {
        let mask = mask_of(&[&[(2.0, -1.0), (4.0, -1.0), (4.0, 1.0)]]);
        let line = vec![p(0.0, 0.0), p(0.0, 0.0), p(1.0, 0.0)];
        assert_eq!(
            clip_polyline(&line, &mask, 1e-6).unwrap_err(),
            ClipError::ZeroLength { segment: 0 }
        );
    }
}
