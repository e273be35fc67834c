#![allow(dead_code)]
use talus_trim::prelude::*;

pub fn pts(raw: &[(f64, f64)]) -> Vec<Point2D> {
    raw.iter().map(|&p| p.into()).collect()
}

pub fn talus(id: u64, side: TalusSide, raw: &[(f64, f64)]) -> Record {
    Record::Talus {
        id: TalusId::new(id),
        side,
        points: pts(raw),
    }
}

pub fn building(id: u64, raw: &[(f64, f64)]) -> Record {
    Record::Building {
        id: BuildingId::new(id),
        category: "batiment".into(),
        shape: BuildingShape::Footprint,
        points: pts(raw),
    }
}

pub fn wall(id: u64, raw: &[(f64, f64)]) -> Record {
    Record::Building {
        id: BuildingId::new(id),
        category: "batiment".into(),
        shape: BuildingShape::Outline,
        points: pts(raw),
    }
}

pub fn courbe(id: u64, raw: &[(f64, f64)]) -> Record {
    Record::Courbe {
        id: CourbeId::new(id),
        layer: CourbeLayer::Principale,
        points: pts(raw),
    }
}

/// Coordinates of a fragment, for order-sensitive comparisons.
pub fn coords(frag: &TrimmedCourbe) -> Vec<(f64, f64)> {
    frag.line.points().iter().map(|p| (p.x, p.y)).collect()
}

/// Asserts two coordinate lists agree to within `tol`.
pub fn assert_coords_close(got: &[(f64, f64)], want: &[(f64, f64)], tol: f64) {
    assert_eq!(got.len(), want.len(), "got={got:?}\nwant={want:?}");
    for (g, w) in got.iter().zip(want) {
        assert!(
            (g.0 - w.0).abs() <= tol && (g.1 - w.1).abs() <= tol,
            "got={got:?}\nwant={want:?}"
        );
    }
}

pub fn single_thread() -> TrimConfig {
    TrimConfig {
        workers: 1,
        ..Default::default()
    }
}
