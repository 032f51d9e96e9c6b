use proptest::prelude::*;
use tl_chart::core::{Point, Segment, detect_conflicts, intersect};

fn through(center: Point, angle: f64, half_len: f64) -> Segment {
    let (sin, cos) = angle.sin_cos();
    Segment::new(
        center.x - cos * half_len,
        center.y - sin * half_len,
        center.x + cos * half_len,
        center.y + sin * half_len,
    )
}

proptest! {
    #[test]
    fn crossing_segments_meet_at_their_shared_center(
        cx in -1_000.0f64..1_000.0,
        cy in -1_000.0f64..1_000.0,
        angle_a in 0.1f64..1.4,
        angle_b in 1.7f64..3.0,
        half_a in 1.0f64..500.0,
        half_b in 1.0f64..500.0,
    ) {
        let center = Point::new(cx, cy);
        let a = through(center, angle_a, half_a);
        let b = through(center, angle_b, half_b);

        let forward = intersect(&a, &b).expect("crossing exists");
        let backward = intersect(&b, &a).expect("crossing exists");
        prop_assert!((forward.x - cx).abs() <= 1e-6);
        prop_assert!((forward.y - cy).abs() <= 1e-6);
        prop_assert!((backward.x - cx).abs() <= 1e-6);
        prop_assert!((backward.y - cy).abs() <= 1e-6);
    }

    #[test]
    fn parallel_offsets_never_intersect(
        x1 in -500.0f64..500.0,
        y1 in -500.0f64..500.0,
        dx in 1.0f64..100.0,
        dy in -100.0f64..100.0,
        shift in 1.0f64..50.0,
    ) {
        let a = Segment::new(x1, y1, x1 + dx, y1 + dy);
        let b = Segment::new(x1, y1 + shift, x1 + dx, y1 + dy + shift);
        prop_assert!(intersect(&a, &b).is_none());
    }

    #[test]
    fn conflict_pairs_are_ordered(
        coords in proptest::collection::vec(
            (0.0f64..100.0, 0.0f64..100.0, 0.0f64..100.0, 0.0f64..100.0),
            0..12,
        )
    ) {
        let segments: Vec<Segment> = coords
            .into_iter()
            .map(|(x1, y1, x2, y2)| Segment::new(x1, y1, x2, y2))
            .collect();
        let conflicts = detect_conflicts(&segments);
        for conflict in &conflicts {
            prop_assert!(conflict.first < conflict.second);
            prop_assert!(conflict.second < segments.len());
        }
        for pair in conflicts.windows(2) {
            prop_assert!((pair[0].first, pair[0].second) < (pair[1].first, pair[1].second));
        }
    }
}
