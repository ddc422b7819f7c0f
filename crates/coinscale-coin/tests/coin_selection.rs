use approx::assert_relative_eq;
use coinscale_coin::{CoinDetector, CoinDetectorParams, CoinResult};
use coinscale_core::{order_corners, synthetic, Contour};
use nalgebra::Point2;

fn detector() -> CoinDetector {
    CoinDetector::new(CoinDetectorParams::default())
}

#[test]
fn largest_eligible_coin_wins() {
    let contours: Vec<Contour> = [100.0, 5_000.0, 20_000.0, 60_000.0]
        .iter()
        .enumerate()
        .map(|(i, &area)| synthetic::circle_with_area(Point2::new(300.0 + 400.0 * i as f64, 400.0), area))
        .collect();

    let coin = detector().detect(&contours);
    assert!(coin.found);
    assert!((coin.rect.center.x - 1100.0).abs() < 1.0, "center {:?}", coin.rect.center);

    let alone = detector().detect(&contours[2..3]);
    assert_relative_eq!(coin.area, alone.area, max_relative = 1e-12);
    assert!(coin.area < 50_000.0);
}

#[test]
fn below_min_area_and_above_fit_ceiling_are_rejected() {
    let tiny = synthetic::circle_with_area(Point2::new(50.0, 50.0), 100.0);
    let huge = synthetic::circle_with_area(Point2::new(500.0, 500.0), 60_000.0);
    assert_eq!(detector().detect(&[tiny, huge]), CoinResult::default());
}

#[test]
fn no_candidates_keeps_every_field_at_default() {
    let coin = detector().detect(&[]);
    assert!(!coin.found);
    assert_eq!(coin.area, 0.0);
    assert!(coin.homography.is_none());
    assert_eq!(coin.rect.major(), 0.0);
}

#[test]
fn rectangle_is_not_a_coin() {
    let rect = synthetic::rectangle_contour(Point2::new(200.0, 200.0), 120.0, 80.0, 15.0);
    assert!(!detector().detect(&[rect]).found);
}

#[test]
fn extremely_thin_ellipse_is_rejected() {
    let thin = synthetic::ellipse_contour(Point2::new(300.0, 300.0), 240.0, 30.0, 0.0);
    assert!(!detector().detect(&[thin]).found);
}

#[test]
fn foreshortened_coin_is_accepted() {
    let tilted = synthetic::ellipse_contour(Point2::new(300.0, 300.0), 120.0, 60.0, 20.0);
    let coin = detector().detect(&[tilted]);
    assert!(coin.found);
    assert_relative_eq!(coin.major(), 120.0, max_relative = 0.03);
    assert_relative_eq!(coin.minor(), 60.0, max_relative = 0.05);
}

#[test]
fn selection_does_not_depend_on_order_for_distinct_areas() {
    let small = synthetic::circle_contour(Point2::new(100.0, 100.0), 30.0);
    let large = synthetic::circle_contour(Point2::new(400.0, 100.0), 60.0);
    let a = detector().detect(&[small.clone(), large.clone()]);
    let b = detector().detect(&[large, small]);
    assert_eq!(a, b);
    assert!((a.rect.center.x - 400.0).abs() < 1.0);
}

#[test]
fn equal_scores_keep_the_first_candidate() {
    let coin = synthetic::circle_contour(Point2::new(150.0, 150.0), 45.0);
    let single = detector().detect(std::slice::from_ref(&coin));
    let repeated = detector().detect(&[coin.clone(), coin]);
    assert_eq!(single, repeated);
}

#[test]
fn homography_maps_envelope_onto_major_square() {
    let contour = synthetic::ellipse_contour(Point2::new(320.0, 240.0), 100.0, 70.0, 0.0);
    let coin = detector().detect(&[contour]);
    assert!(coin.found);
    let h = coin.homography.expect("homography");
    let s = coin.major();
    let expected = [(0.0, 0.0), (s, 0.0), (s, s), (0.0, s)];
    for (src, (ex, ey)) in order_corners(coin.rect.points()).iter().zip(expected) {
        let p = h.apply(*src);
        assert!((p.x - ex).abs() < 1e-6 && (p.y - ey).abs() < 1e-6, "{p:?} vs ({ex}, {ey})");
    }
}

#[test]
fn params_accept_partial_json() {
    let params: CoinDetectorParams = serde_json::from_str(r#"{ "min_area": 800.0 }"#).unwrap();
    assert_eq!(params.min_area, 800.0);
    assert_eq!(params.max_fit_area, CoinDetectorParams::default().max_fit_area);
}
