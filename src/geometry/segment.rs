//! Segment predicates shared by polygon containment and line clipping.

use super::Point2D;

/// Parameter of the projection of `p` onto segment `a → b`, clamped to `[0, 1]`.
#[inline]
pub fn project(p: Point2D, a: Point2D, b: Point2D) -> f64 {
    let ab = b - a;
    let len_sq = ab.dot(ab);
    if len_sq == 0.0 {
        return 0.0;
    }
    ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0)
}

/// Euclidean distance from `p` to the closed segment `a → b`.
#[inline]
pub fn point_segment_distance(p: Point2D, a: Point2D, b: Point2D) -> f64 {
    p.distance(a.lerp(b, project(p, a, b)))
}

/// Parameters `t` along `a → b` where it meets the segment `c → d`.
///
/// Crossings and touches within `eps` of either segment are reported; a
/// collinear overlap yields the parameters of both overlap ends. Values are
/// clamped to `[0, 1]`. At most two parameters are appended to `out`.
pub fn crossing_params(a: Point2D, b: Point2D, c: Point2D, d: Point2D, eps: f64, out: &mut Vec<f64>) {
    let r = b - a;
    let s = d - c;
    let len_r = r.norm();
    let len_s = s.norm();
    if len_r == 0.0 {
        return;
    }
    let denom = r.cross(s);
    let ac = c - a;

    if denom.abs() > f64::EPSILON * len_r * len_s.max(f64::MIN_POSITIVE) * 16.0 {
        let t = ac.cross(s) / denom;
        let u = ac.cross(r) / denom;
        let tol_t = eps / len_r;
        let tol_u = if len_s > 0.0 { eps / len_s } else { f64::INFINITY };
        if t >= -tol_t && t <= 1.0 + tol_t && u >= -tol_u && u <= 1.0 + tol_u {
            out.push(t.clamp(0.0, 1.0));
            return;
        }
    } else if ac.cross(r).abs() / len_r <= eps {
        // Collinear: report where the other segment's ends project.
        let tc = ac.dot(r) / (len_r * len_r);
        let td = (d - a).dot(r) / (len_r * len_r);
        let (lo, hi) = if tc <= td { (tc, td) } else { (td, tc) };
        if hi >= 0.0 && lo <= 1.0 {
            out.push(lo.clamp(0.0, 1.0));
            out.push(hi.clamp(0.0, 1.0));
        }
        return;
    }

    // Near misses: an endpoint of `c → d` within eps of `a → b`.
    for q in [c, d] {
        if point_segment_distance(q, a, b) <= eps {
            out.push(project(q, a, b));
        }
    }
}

/// `true` when the open segments `a → b` and `c → d` properly cross.
pub fn segments_cross(a: Point2D, b: Point2D, c: Point2D, d: Point2D) -> bool {
    let d1 = (b - a).cross(c - a);
    let d2 = (b - a).cross(d - a);
    let d3 = (d - c).cross(a - c);
    let d4 = (d - c).cross(b - c);
    ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
}
