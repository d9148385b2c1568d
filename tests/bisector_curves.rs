// Copyright 2025 Lars Brubaker
// Bisector parameterization: every point at offset t is t away from both sites.

mod helpers;

use approx::assert_relative_eq;
use helpers::{assert_point_near, line_site};
use offset_voronoi::{
    Bisector, Branch, Direction, EdgeType, Error, LineSite, Point, PointSite, Site, SiteKind,
};

fn assert_equidistant(b: &Bisector, s1: &Site, s2: &Site, ts: &[f64]) {
    for &t in ts {
        for branch in [Branch::Plus, Branch::Minus] {
            let p = b.point_on_branch(t, branch).unwrap();
            assert_relative_eq!(s1.distance_to(p), t, epsilon = 1e-9, max_relative = 1e-9);
            assert_relative_eq!(s2.distance_to(p), t, epsilon = 1e-9, max_relative = 1e-9);
        }
    }
}

#[test]
fn parabola_apex_is_the_midpoint() {
    let focus = Site::point(0.0, 0.0);
    let directrix = line_site(1.0, 1.0, 1.0, -1.0);
    let b = Bisector::between(&focus, &directrix).unwrap();
    assert_eq!(b.kind, EdgeType::Parabola);

    let t0 = b.min_offset().unwrap();
    assert_relative_eq!(t0, 0.5, epsilon = 1e-12);
    assert_point_near(b.point(t0).unwrap(), Point::new(0.5, 0.0), 1e-12, "apex");
    assert!(matches!(b.point(0.0), Err(Error::Domain { .. })));
    assert_equidistant(&b, &focus, &directrix, &[0.5, 0.75, 1.0, 4.0, 100.0]);
}

#[test]
fn parabola_on_either_side_of_the_line() {
    let l = line_site(-3.0, 0.0, 3.0, 0.0);
    for focus in [Site::point(1.0, 2.0), Site::point(1.0, -2.0)] {
        let b = Bisector::between(&focus, &l).unwrap();
        assert_relative_eq!(b.min_offset().unwrap(), 1.0, epsilon = 1e-12);
        assert_equidistant(&b, &focus, &l, &[1.0, 2.5, 10.0]);
        // The curve stays on the focus's side.
        let p = b.point(5.0).unwrap();
        assert_eq!(p.y.signum(), focus.y().unwrap().signum());
    }
}

#[test]
fn site_order_does_not_change_the_curve() {
    let p = Site::point(2.0, 3.0);
    let l = line_site(0.0, 0.0, 5.0, 1.0);
    assert_eq!(
        Bisector::between(&p, &l).unwrap(),
        Bisector::between(&l, &p).unwrap()
    );
}

#[test]
fn perpendicular_bisector_of_two_points() {
    let (a, b) = (Site::point(1.0, 1.0), Site::point(4.0, 5.0));
    let bis = Bisector::between(&a, &b).unwrap();
    assert_eq!(bis.kind, EdgeType::Line);
    assert_relative_eq!(bis.min_offset().unwrap(), 2.5, epsilon = 1e-12);
    assert_point_near(bis.point(2.5).unwrap(), Point::new(2.5, 3.0), 1e-12, "midpoint");
    assert_equidistant(&bis, &a, &b, &[2.5, 3.0, 7.0]);
    let plus = bis.point_on_branch(5.0, Branch::Plus).unwrap();
    let minus = bis.point_on_branch(5.0, Branch::Minus).unwrap();
    assert_point_near(plus.midpoint(minus), Point::new(2.5, 3.0), 1e-12, "branches");
}

#[test]
fn line_line_signed_offsets() {
    let l1 = LineSite::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0)).unwrap();
    let l2 = LineSite::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0)).unwrap();
    for k1 in [Direction::Positive, Direction::Negative] {
        for k2 in [Direction::Positive, Direction::Negative] {
            let b = Bisector::line_line(&l1, k1, &l2, k2).unwrap();
            assert_eq!(b.kind, EdgeType::Line);
            for t in [0.0, 0.5, 3.0] {
                let p = b.point(t).unwrap();
                assert_relative_eq!(l1.signed_distance(p), k1.value() * t, epsilon = 1e-12);
                assert_relative_eq!(l2.signed_distance(p), k2.value() * t, epsilon = 1e-12);
            }
        }
    }
}

#[test]
fn parallel_lines_are_degenerate() {
    let l1 = line_site(0.0, 0.0, 1.0, 0.0);
    let l2 = line_site(5.0, 3.0, 0.0, 3.0);
    let err = Bisector::between(&l1, &l2).unwrap_err();
    assert!(matches!(err, Error::Degenerate(_)));
    assert!(err.is_recoverable());
}

#[test]
fn point_on_its_line_needs_a_separator() {
    let endpoint = PointSite::new(1.0, 0.0);
    let l = LineSite::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0)).unwrap();
    assert!(matches!(
        Bisector::point_line(&endpoint, &l),
        Err(Error::Degenerate(_))
    ));

    let sep = Bisector::separator(&endpoint, &l, Direction::Negative);
    assert_eq!(sep.kind, EdgeType::Separator);
    for t in [0.0, 1.0, 2.5] {
        let p = sep.point(t).unwrap();
        assert_relative_eq!(l.signed_distance(p), -t, epsilon = 1e-12);
        assert_relative_eq!(p.distance(endpoint.position()), t, epsilon = 1e-12);
    }
}

#[test]
fn line_site_edge_does_not_move() {
    let l = LineSite::new(Point::new(2.0, 1.0), Point::new(4.0, 1.0)).unwrap();
    let b = Bisector::line_site(&l);
    assert_eq!(b.kind, EdgeType::LineSite);
    assert_eq!(b.point(0.0).unwrap(), b.point(9.0).unwrap());
    assert_eq!(b.point(3.0).unwrap(), l.start);
}

#[test]
fn arc_sites_are_unsupported() {
    let arc = Site::arc(
        Point::new(2.0, 0.0),
        Point::new(0.0, 2.0),
        Point::new(0.0, 0.0),
        true,
    )
    .unwrap();
    let p = Site::point(0.0, 0.0);
    for (a, b) in [(&arc, &p), (&p, &arc), (&arc, &arc)] {
        match Bisector::between(a, b) {
            Err(Error::UnsupportedConfiguration(kinds)) => {
                assert!(kinds.contains(&SiteKind::Arc));
            }
            other => panic!("expected unsupported configuration, got {:?}", other),
        }
    }
}

#[test]
fn display_names_the_curve() {
    let b = Bisector::between(&Site::point(0.0, 0.0), &line_site(1.0, 1.0, 1.0, -1.0)).unwrap();
    let text = b.to_string();
    assert!(text.starts_with("PARABOLA"), "{}", text);
    assert!(text.contains("x-params") && text.contains("y-params"), "{}", text);
}
