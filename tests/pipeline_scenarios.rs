mod util;

use talus_trim::prelude::*;
use util::*;

const TOL: f64 = 1e-9;

fn slope_pair() -> Vec<Record> {
    vec![
        talus(1, TalusSide::Low, &[(0.0, 0.0), (10.0, 0.0)]),
        talus(2, TalusSide::High, &[(0.0, 5.0), (10.0, 5.0)]),
    ]
}

fn no_corridors() -> TrimConfig {
    TrimConfig {
        corridor_half_width: 0.0,
        ..single_thread()
    }
}

fn run(records: Vec<Record>, cfg: TrimConfig) -> RunOutput {
    let ds = Dataset::from_records(records).unwrap();
    Pipeline::new(cfg).unwrap().process(&ds).unwrap()
}

#[test]
fn courbe_crossing_a_slope_keeps_both_outer_ends() {
    let mut records = slope_pair();
    records.push(courbe(10, &[(-5.0, 2.0), (15.0, 2.0)]));
    let out = run(records, single_thread());

    assert_eq!(out.summary.pairs, 1);
    assert_eq!(out.summary.strips, 1);
    assert_eq!(out.fragments.len(), 2);
    assert_coords_close(&coords(&out.fragments[0]), &[(-5.0, 2.0), (0.0, 2.0)], TOL);
    assert_coords_close(&coords(&out.fragments[1]), &[(10.0, 2.0), (15.0, 2.0)], TOL);
    for frag in &out.fragments {
        assert_eq!(frag.source, CourbeId::new(10));
        assert_eq!(frag.layer, CourbeLayer::Principale);
    }
}

#[test]
fn strip_alone_cuts_a_crossing_courbe() {
    let mut records = slope_pair();
    records.push(courbe(10, &[(5.0, -5.0), (5.0, 10.0)]));
    let out = run(records, no_corridors());

    assert_eq!(out.fragments.len(), 2);
    assert_coords_close(&coords(&out.fragments[0]), &[(5.0, -5.0), (5.0, 0.0)], TOL);
    assert_coords_close(&coords(&out.fragments[1]), &[(5.0, 5.0), (5.0, 10.0)], TOL);
}

#[test]
fn courbe_through_a_building_loses_the_inside_part() {
    let records = vec![
        building(1, &[(2.0, 2.0), (8.0, 2.0), (8.0, 8.0), (2.0, 8.0)]),
        courbe(3, &[(0.0, 0.0), (10.0, 10.0)]),
    ];
    let out = run(records, single_thread());

    assert_eq!(out.summary.mask_polygons, 1);
    assert_eq!(out.fragments.len(), 2);
    assert_coords_close(&coords(&out.fragments[0]), &[(0.0, 0.0), (2.0, 2.0)], TOL);
    assert_coords_close(&coords(&out.fragments[1]), &[(8.0, 8.0), (10.0, 10.0)], TOL);
}

#[test]
fn courbe_away_from_the_mask_is_returned_unchanged() {
    let raw = [(0.0, 20.0), (3.0, 21.5), (7.0, 19.0), (10.0, 20.0)];
    let mut records = slope_pair();
    records.push(courbe(4, &raw));
    let out = run(records, single_thread());

    assert_eq!(out.fragments.len(), 1);
    assert_eq!(coords(&out.fragments[0]), raw.to_vec());
    assert!(out.summary.courbes_dropped.is_empty());
}

#[test]
fn courbe_inside_a_strip_is_dropped() {
    let mut records = slope_pair();
    records.push(courbe(4, &[(2.0, 2.5), (8.0, 2.5)]));
    let out = run(records, no_corridors());

    assert!(out.fragments.is_empty());
    assert_eq!(out.summary.courbes_dropped, vec![CourbeId::new(4)]);
}

#[test]
fn touching_a_corner_does_not_split() {
    let mut records = slope_pair();
    records.push(courbe(4, &[(8.0, 7.0), (12.0, 3.0)]));
    let out = run(records, no_corridors());

    assert_eq!(out.fragments.len(), 1);
    assert_eq!(coords(&out.fragments[0]), vec![(8.0, 7.0), (12.0, 3.0)]);
}

#[test]
fn unpaired_talus_is_reported_but_still_gets_a_corridor() {
    let records = vec![
        talus(1, TalusSide::Low, &[(0.0, 0.0), (10.0, 0.0)]),
        talus(2, TalusSide::High, &[(0.0, 50.0), (10.0, 50.0)]),
        courbe(7, &[(5.0, -10.0), (5.0, 60.0)]),
    ];
    let out = run(records, single_thread());

    assert_eq!(out.summary.pairs, 0);
    assert_eq!(out.summary.strips, 0);
    assert_eq!(out.summary.unpaired_talus, vec![TalusId::new(1), TalusId::new(2)]);
    let deficits: Vec<_> = out
        .summary
        .issues
        .iter()
        .filter(|e| matches!(e, TrimError::PairingDeficit { .. }))
        .collect();
    assert_eq!(deficits.len(), 2);
    assert!(deficits.iter().all(|e| !e.is_fatal()));

    assert_eq!(out.fragments.len(), 3);
    assert_coords_close(&coords(&out.fragments[0]), &[(5.0, -10.0), (5.0, -3.0)], TOL);
    assert_coords_close(&coords(&out.fragments[1]), &[(5.0, 3.0), (5.0, 47.0)], TOL);
    assert_coords_close(&coords(&out.fragments[2]), &[(5.0, 53.0), (5.0, 60.0)], TOL);
}

#[test]
fn degenerate_courbes_are_counted_as_skipped() {
    let mut records = slope_pair();
    records.push(courbe(1, &[(30.0, 30.0), (30.0, 30.0)]));
    records.push(courbe(2, &[(30.0, 30.0), (40.0, 30.0)]));
    let out = run(records, single_thread());

    assert_eq!(out.summary.courbes_in, 2);
    assert_eq!(out.summary.courbes_skipped, 1);
    assert_eq!(out.fragments.len(), 1);
    assert_eq!(out.fragments[0].source, CourbeId::new(2));
    assert!(out.summary.issues.iter().any(|e| matches!(
        e,
        TrimError::DegenerateGeometry { entity: EntityRef::Courbe(id), .. } if *id == CourbeId::new(1)
    )));
}

#[test]
fn building_margin_widens_the_cut() {
    let records = vec![
        building(1, &[(2.0, 2.0), (8.0, 2.0), (8.0, 8.0), (2.0, 8.0)]),
        courbe(3, &[(0.0, 5.0), (10.0, 5.0)]),
    ];
    let cfg = TrimConfig {
        building_margin: 1.0,
        ..single_thread()
    };
    let out = run(records, cfg);

    assert_eq!(out.fragments.len(), 2);
    assert_coords_close(&coords(&out.fragments[0]), &[(0.0, 5.0), (1.0, 5.0)], TOL);
    assert_coords_close(&coords(&out.fragments[1]), &[(9.0, 5.0), (10.0, 5.0)], TOL);
}

#[test]
fn output_does_not_depend_on_worker_count() {
    let mut records = slope_pair();
    records.push(building(1, &[(20.0, 0.0), (26.0, 0.0), (26.0, 6.0), (20.0, 6.0)]));
    for i in 0..40u64 {
        let y = -8.0 + i as f64 * 0.5;
        records.push(courbe(100 + i, &[(-4.0, y), (12.0, y + 1.0), (30.0, y - 1.0)]));
    }

    let ds = Dataset::from_records(records).unwrap();
    let serial = Pipeline::new(single_thread()).unwrap().process(&ds).unwrap();
    let parallel = Pipeline::new(TrimConfig {
        workers: 4,
        ..Default::default()
    })
    .unwrap()
    .process(&ds)
    .unwrap();

    assert_eq!(serial.fragments, parallel.fragments);
    assert_eq!(serial.summary.courbes_dropped, parallel.summary.courbes_dropped);
}

#[test]
fn run_hands_every_fragment_to_the_sink() {
    let mut records = slope_pair();
    records.push(courbe(10, &[(-5.0, 2.0), (15.0, 2.0)]));
    records.push(courbe(11, &[(-5.0, 20.0), (15.0, 20.0)]));
    let ds = Dataset::from_records(records).unwrap();

    let mut sink = VecSink::default();
    let summary = Pipeline::new(single_thread()).unwrap().run(&ds, &mut sink).unwrap();

    assert_eq!(summary.fragments_out, 3);
    assert_eq!(sink.fragments.len(), 3);
    let sources: Vec<u64> = sink.fragments.iter().map(|f| f.source.get()).collect();
    assert_eq!(sources, vec![10, 10, 11]);
}

#[test]
fn two_point_wall_cuts_a_crossing_courbe() {
    let records = vec![
        wall(1, &[(0.0, 5.0), (10.0, 5.0)]),
        courbe(2, &[(5.0, -5.0), (5.0, 15.0)]),
    ];
    let out = run(records, single_thread());

    assert_eq!(out.summary.buildings, 1);
    assert!(out.summary.issues.is_empty());
    let half = TrimConfig::default().outline_half_width;
    assert_eq!(out.fragments.len(), 2);
    assert_coords_close(&coords(&out.fragments[0]), &[(5.0, -5.0), (5.0, 5.0 - half)], TOL);
    assert_coords_close(&coords(&out.fragments[1]), &[(5.0, 5.0 + half), (5.0, 15.0)], TOL);
}

#[test]
fn open_wall_does_not_mask_the_area_between_its_arms() {
    let raw = [(3.0, 2.5), (7.5, 6.0)];
    let records = vec![
        wall(1, &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]),
        courbe(2, &raw),
    ];
    let out = run(records, single_thread());

    assert_eq!(out.fragments.len(), 1);
    assert_eq!(coords(&out.fragments[0]), raw.to_vec());
}
