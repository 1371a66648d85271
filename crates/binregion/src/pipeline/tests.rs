//! End-to-end checks over small hand-built rasters and synthetic maps.

use super::*;
use crate::geom::{Pt, RegionKind};
use crate::synth::{voronoi_labels, ReplayToken, SynthCfg};

fn exact() -> PipelineCfg {
    PipelineCfg {
        tolerance: 0.0,
        threads: 1,
        ..PipelineCfg::default()
    }
}

fn corner_set(points: &[Pt]) -> Vec<(i32, i32)> {
    let mut v: Vec<_> = points.iter().map(|p| (p.x, p.y)).collect();
    v.sort_unstable();
    v
}

#[test]
fn two_by_two_block_is_one_inclusion_square() {
    let r = Raster::filled(2, 2, 1).unwrap();
    let out = process(&r, &exact()).unwrap();
    assert!(out.failures.is_empty());
    let polys = &out.polygons[&1];
    assert_eq!(polys.len(), 1);
    assert_eq!(polys[0].kind, RegionKind::Inclusion);
    assert_eq!(polys[0].area, -4.0);
    assert_eq!(
        corner_set(&polys[0].points),
        vec![(0, 0), (0, 2), (2, 0), (2, 2)]
    );
}

#[test]
fn background_frame_is_not_traced() {
    let r = Raster::from_rows([
        [-1, -1, -1, -1],
        [-1, 1, 1, -1],
        [-1, 1, 1, -1],
        [-1, -1, -1, -1],
    ])
    .unwrap();
    let out = process(&r, &exact()).unwrap();
    assert_eq!(out.polygons.keys().copied().collect::<Vec<_>>(), vec![1]);
    let polys = &out.polygons[&1];
    assert_eq!(polys.len(), 1);
    assert_eq!(polys[0].points.len(), 4);
    assert_eq!(polys[0].kind, RegionKind::Inclusion);
    assert_eq!(
        corner_set(&polys[0].points),
        vec![(1, 1), (1, 3), (3, 1), (3, 3)]
    );
}

#[test]
fn enclosed_cell_yields_hole_in_surrounding_label() {
    let r = Raster::from_rows([[1, 1, 1], [1, 2, 1], [1, 1, 1]]).unwrap();
    let out = process(&r, &exact()).unwrap();

    let inner = &out.polygons[&2];
    assert_eq!(inner.len(), 1);
    assert_eq!(inner[0].kind, RegionKind::Inclusion);
    assert_eq!(inner[0].area, -1.0);

    let mut outer = out.polygons[&1].clone();
    outer.sort_by(|a, b| a.area.total_cmp(&b.area));
    assert_eq!(outer.len(), 2);
    assert_eq!(outer[0].kind, RegionKind::Inclusion);
    assert_eq!(outer[0].area, -9.0);
    assert_eq!(outer[1].kind, RegionKind::Exclusion);
    assert_eq!(outer[1].area, 1.0);
    assert_eq!(
        corner_set(&outer[1].points),
        vec![(1, 1), (1, 2), (2, 1), (2, 2)]
    );
}

#[test]
fn l_shape_retains_no_collinear_triples() {
    let r = Raster::from_rows([
        [3, -1, -1],
        [3, -1, -1],
        [3, -1, -1],
        [3, 3, 3],
    ])
    .unwrap();
    let out = process(&r, &exact()).unwrap();
    let poly = &out.polygons[&3][0];
    assert_eq!(poly.points.len(), 6);
    let n = poly.points.len();
    for i in 0..n {
        let a = poly.points[(i + n - 1) % n];
        let b = poly.points[i];
        let c = poly.points[(i + 1) % n];
        let (u, v) = (b - a, c - b);
        let straight = u.x * v.y - u.y * v.x == 0 && u.x * v.x + u.y * v.y > 0;
        assert!(!straight, "collinear triple around {b:?}");
    }
}

#[test]
fn flattened_loop_is_dropped_not_emitted() {
    let r = Raster::filled(3, 3, 4).unwrap();
    let cfg = PipelineCfg {
        tolerance: 10.0,
        ..exact()
    };
    let out = process(&r, &cfg).unwrap();
    assert!(out.polygons[&4].is_empty());
    assert_eq!(out.dropped[&4], 1);
    assert!(out.failures.is_empty());
}

#[test]
fn default_tolerance_keeps_large_regions() {
    let r = Raster::filled(20, 12, 0).unwrap();
    let out = process(&r, &PipelineCfg::default()).unwrap();
    assert_eq!(out.polygons[&0].len(), 1);
    assert_eq!(out.polygons[&0][0].area, -240.0);
}

#[test]
fn background_variants() {
    let r = Raster::from_rows([[-1, 0], [0, 0]]).unwrap();
    let only = |background| {
        let cfg = PipelineCfg {
            background,
            ..exact()
        };
        process(&r, &cfg)
            .unwrap()
            .polygons
            .keys()
            .copied()
            .collect::<Vec<_>>()
    };
    assert_eq!(only(Background::Negative), vec![0]);
    assert_eq!(only(Background::Label(0)), vec![-1]);
    assert_eq!(only(Background::None), vec![-1, 0]);
}

#[test]
fn invalid_tolerance_is_rejected() {
    let r = Raster::filled(1, 1, 0).unwrap();
    for tolerance in [-1.0, f64::NAN, f64::INFINITY] {
        let cfg = PipelineCfg {
            tolerance,
            ..exact()
        };
        assert!(matches!(
            process(&r, &cfg),
            Err(Error::InvalidInput { .. })
        ));
    }
}

#[test]
fn cancelled_run_stops() {
    let r = Raster::filled(2, 2, 0).unwrap();
    let cancel = CancelToken::new();
    cancel.cancel();
    assert!(matches!(
        process_with_cancel(&r, &exact(), &cancel),
        Err(Error::Cancelled)
    ));
}

#[test]
fn cancelling_between_labels_stops_the_run() {
    let r = Raster::from_rows([[0, 1, 2], [3, 4, 5]]).unwrap();
    let cancel = CancelToken::new();
    let seen = std::sync::Mutex::new(Vec::new());
    let progress = |label: Label| {
        seen.lock().unwrap().push(label);
        cancel.cancel();
    };
    let res = process_with_progress(&r, &exact(), &cancel, &progress);
    assert!(matches!(res, Err(Error::Cancelled)));
    assert_eq!(*seen.lock().unwrap(), vec![0]);
}

#[test]
fn progress_reports_every_traced_label() {
    let r = Raster::from_rows([[-1, 0, 1], [2, 2, 1]]).unwrap();
    let seen = std::sync::Mutex::new(Vec::new());
    let progress = |label: Label| seen.lock().unwrap().push(label);
    let cfg = PipelineCfg {
        threads: 2,
        ..exact()
    };
    process_with_progress(&r, &cfg, &CancelToken::new(), &progress).unwrap();
    let mut labels = seen.into_inner().unwrap();
    labels.sort_unstable();
    assert_eq!(labels, vec![0, 1, 2]);
}

#[test]
fn broken_edge_set_fails_with_its_label() {
    let edges = [Edge::new(0, 0, 1, 0)];
    match process_label(5, &edges, &exact()) {
        Err(e @ Error::UnterminatedChain { .. }) => assert_eq!(e.label(), Some(5)),
        other => panic!("expected UnterminatedChain, got {other:?}"),
    }
}

#[test]
fn zero_area_policy() {
    let spike = Loop::new(vec![Pt::new(0, 0), Pt::new(2, 0), Pt::new(1, 0)]);
    let keep = classify_loop(1, &spike, &exact()).unwrap();
    assert_eq!(keep.kind, RegionKind::Exclusion);
    assert_eq!(keep.area, 0.0);
    let drop = PipelineCfg {
        zero_area: ZeroAreaPolicy::Drop,
        ..exact()
    };
    assert!(matches!(
        classify_loop(1, &spike, &drop),
        Err(Error::EmptyLoop { label: 1, points: 3 })
    ));
}

#[test]
fn parallel_run_matches_serial() {
    let cfg = SynthCfg {
        width: 48,
        height: 40,
        ..SynthCfg::default()
    };
    let r = voronoi_labels(cfg, ReplayToken::new(2024)).unwrap();
    let run = |threads| {
        let cfg = PipelineCfg {
            tolerance: 1.0,
            threads,
            ..PipelineCfg::default()
        };
        process(&r, &cfg).unwrap()
    };
    let (serial, parallel) = (run(1), run(4));
    assert_eq!(serial.polygons, parallel.polygons);
    assert_eq!(serial.dropped, parallel.dropped);
    assert!(serial.failures.is_empty());
    assert!(serial.polygon_count() > 0);
}

#[test]
fn inclusion_area_accounts_for_every_pixel_without_simplification() {
    // With tolerance 0 the polygons are exact: inclusions minus holes equals
    // the label's pixel count.
    let r = voronoi_labels(SynthCfg::default(), ReplayToken::new(11)).unwrap();
    let out = process(&r, &exact()).unwrap();
    for (label, polys) in &out.polygons {
        let pixels = r.as_slice().iter().filter(|&&v| v == *label).count() as f64;
        let net: f64 = polys.iter().map(|p| -p.area).sum();
        assert_eq!(net, pixels, "label {label}");
    }
}
