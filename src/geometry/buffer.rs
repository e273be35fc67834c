//! Buffering lines and rings into corridor pieces.
//!
//! A buffer is returned as a set of polygons whose union is the corridor:
//! one rectangle per segment (flat caps at the open ends) and one circular
//! fan per joint on the outer side of the turn. The pieces overlap; nothing
//! downstream needs them merged, since the mask is a polygon set.
//!
//! A piece whose vertices round onto each other (a width far below the
//! coordinate spacing at that magnitude) covers nothing and is left out.

use std::f64::consts::{FRAC_PI_2, PI};

use itertools::Itertools;

use super::{GeometryError, LineString, Point2D, Polygon};

/// Corridor of half-width `half_width` around an open line, flat-capped.
///
/// `join_segments` is the number of arc steps per quarter turn at joints.
/// A zero width yields no pieces.
pub fn buffer_line(
    line: &LineString,
    half_width: f64,
    join_segments: usize,
) -> Result<Vec<Polygon>, GeometryError> {
    stroke(line.points(), false, half_width, join_segments)
}

/// `polygon` grown outward by `margin`: the polygon itself plus a corridor
/// around its ring with round joins at every vertex.
pub fn buffer_ring(
    polygon: &Polygon,
    margin: f64,
    join_segments: usize,
) -> Result<Vec<Polygon>, GeometryError> {
    let mut pieces = vec![polygon.clone()];
    pieces.extend(stroke(polygon.ring(), true, margin, join_segments)?);
    Ok(pieces)
}

fn stroke(
    points: &[Point2D],
    closed: bool,
    half_width: f64,
    join_segments: usize,
) -> Result<Vec<Polygon>, GeometryError> {
    if !half_width.is_finite() || half_width < 0.0 {
        return Err(GeometryError::InvalidWidth(half_width));
    }
    if half_width == 0.0 || points.len() < 2 {
        return Ok(Vec::new());
    }

    let segments: Vec<(Point2D, Point2D)> = if closed {
        points.iter().copied().circular_tuple_windows().collect()
    } else {
        points.iter().copied().tuple_windows().collect()
    };

    let mut pieces = Vec::with_capacity(segments.len() * 2);
    for &(a, b) in &segments {
        let Some(n) = (b - a).unit_normal() else {
            continue;
        };
        let off = n * half_width;
        match Polygon::new(vec![a + off, b + off, b - off, a - off]) {
            Ok(rect) => pieces.push(rect),
            // The offset vanishes at this coordinate magnitude.
            Err(GeometryError::TooFewPoints { .. }) => {}
            Err(err) => return Err(err),
        }
    }

    let joints: Vec<((Point2D, Point2D), (Point2D, Point2D))> = if closed {
        segments.iter().copied().circular_tuple_windows().collect()
    } else {
        segments.iter().copied().tuple_windows().collect()
    };
    let step = FRAC_PI_2 / join_segments.max(1) as f64;
    for ((a, v), (_, b)) in joints {
        if let Some(fan) = join_fan(a, v, b, half_width, step)? {
            pieces.push(fan);
        }
    }
    Ok(pieces)
}

/// Circular fan centred on `v` filling the gap between the rectangles of
/// `a → v` and `v → b` on the outer side of the turn.
fn join_fan(
    a: Point2D,
    v: Point2D,
    b: Point2D,
    radius: f64,
    step: f64,
) -> Result<Option<Polygon>, GeometryError> {
    let d1 = v - a;
    let d2 = b - v;
    let (Some(n1), Some(n2)) = (d1.unit_normal(), d2.unit_normal()) else {
        return Ok(None);
    };
    // Left turn: the gap opens on the right.
    let side = if d1.cross(d2) > 0.0 { -1.0 } else { 1.0 };
    let u1 = n1 * side;
    let u2 = n2 * side;
    let start = u1.y.atan2(u1.x);
    let mut delta = u2.y.atan2(u2.x) - start;
    while delta > PI {
        delta -= 2.0 * PI;
    }
    while delta <= -PI {
        delta += 2.0 * PI;
    }
    if delta.abs() < 1e-12 {
        return Ok(None);
    }
    let steps = (delta.abs() / step).ceil().max(1.0) as usize;
    let mut ring = Vec::with_capacity(steps + 2);
    ring.push(v);
    for i in 0..=steps {
        let angle = start + delta * i as f64 / steps as f64;
        ring.push(v + Point2D::new(angle.cos(), angle.sin()) * radius);
    }
    match Polygon::new(ring) {
        Ok(fan) => Ok(Some(fan)),
        Err(GeometryError::TooFewPoints { .. }) => Ok(None),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(raw: &[(f64, f64)]) -> LineString {
        LineString::new(raw.iter().map(|&p| p.into()).collect()).unwrap()
    }

    fn covered(pieces: &[Polygon], p: Point2D) -> bool {
        pieces.iter().any(|poly| poly.contains(p))
    }

    #[test]
    fn straight_line_has_flat_caps() {
        let pieces = buffer_line(&line(&[(0.0, 0.0), (10.0, 0.0)]), 3.0, 8).unwrap();
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].area(), 60.0);
        assert!(covered(&pieces, Point2D::new(5.0, 2.9)));
        assert!(!covered(&pieces, Point2D::new(5.0, 3.1)));
        assert!(!covered(&pieces, Point2D::new(-0.1, 0.0)));
        assert!(!covered(&pieces, Point2D::new(10.1, 0.0)));
    }

    #[test]
    fn corner_gets_round_join_on_outer_side() {
        // Left turn at (10, 0): the outer side is below-right of the corner.
        let pieces = buffer_line(&line(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]), 2.0, 8).unwrap();
        assert_eq!(pieces.len(), 3);
        let diag = Point2D::new(10.0 + 1.3, -1.3);
        assert!(covered(&pieces, diag));
        assert!(!covered(&pieces, Point2D::new(10.0 + 1.5, -1.5)));
    }

    #[test]
    fn zero_width_is_empty_and_negative_is_rejected() {
        let l = line(&[(0.0, 0.0), (1.0, 0.0)]);
        assert!(buffer_line(&l, 0.0, 8).unwrap().is_empty());
        assert_eq!(
            buffer_line(&l, -1.0, 8).unwrap_err(),
            GeometryError::InvalidWidth(-1.0)
        );
        assert!(buffer_line(&l, f64::NAN, 8).is_err());
    }

    #[test]
    fn width_below_coordinate_spacing_yields_no_pieces() {
        let (x, y) = (6.6e6, 6.6e6);
        let straight = line(&[(x, y), (x + 10.0, y)]);
        assert!(buffer_line(&straight, 1e-12, 8).unwrap().is_empty());

        let bent = line(&[(x, y), (x + 10.0, y), (x + 10.0, y + 10.0)]);
        assert!(buffer_line(&bent, 1e-12, 8).unwrap().is_empty());

        // The same width still produces pieces near the origin.
        let near = line(&[(0.0, 0.0), (10.0, 0.0)]);
        assert_eq!(buffer_line(&near, 1e-12, 8).unwrap().len(), 1);
    }

    #[test]
    fn ring_buffer_grows_the_footprint() {
        let sq = Polygon::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(4.0, 0.0),
            Point2D::new(4.0, 4.0),
            Point2D::new(0.0, 4.0),
        ])
        .unwrap();
        let pieces = buffer_ring(&sq, 1.0, 8).unwrap();
        // footprint + 4 edge rectangles + 4 corner fans
        assert_eq!(pieces.len(), 9);
        assert!(covered(&pieces, Point2D::new(2.0, 2.0)));
        assert!(covered(&pieces, Point2D::new(2.0, -0.9)));
        assert!(covered(&pieces, Point2D::new(-0.6, -0.6)));
        assert!(!covered(&pieces, Point2D::new(-0.8, -0.8)));
        assert!(!covered(&pieces, Point2D::new(2.0, 5.1)));
    }
}
